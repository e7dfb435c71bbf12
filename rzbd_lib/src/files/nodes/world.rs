//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! World node bodies: the level rectangle and the 256x256 spatial partition
//! grid.
//!
//! Most of the body is derivable from the area rectangle and is checked
//! against the derivations on read, then recomputed on write. The
//! partition diagonal is a special case: the engine used an approximate
//! square root, so the stored value is -192.0 instead of the correct
//! ~-181.02.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_gt, assert_ne};
use crate::error::Result;
use crate::float::approx_sqrt;

/// Size of a World node body, excluding the child and the partition grid.
pub const WORLD_SIZE: u64 = 188;

/// Size of a partition record, excluding its node references.
pub const PARTITION_SIZE: u64 = 72;

/// Partitions are fixed at 256x256 world units, with the y axis growing
/// downward.
const PARTITION_STEP: i32 = 256;

/// The virtual-partition diagonal the approximate sqrt produces.
const VIRT_PARTITION_DIAGONAL: f32 = -192.0;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The world rectangle. The y axis grows downward, so `bottom > top`.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Area {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// This holds a single World node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct World {
    pub area: Area,
    pub partitions: Vec<Vec<Partition>>,
    pub children: Vec<u32>,

    pub virt_partition_x_count: u32,
    pub virt_partition_y_count: u32,

    /// For some worlds the stored partition count is one short of the
    /// derived count. Nobody knows why.
    pub fudge_count: bool,

    pub area_partition_ptr: u32,
    pub virt_partition_ptr: u32,
    pub children_ptr: u32,
    pub lights_ptr: u32,
}

/// A 256x256 cell of the partition grid.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Partition {
    pub x: i32,
    pub y: i32,
    pub nodes: Vec<u32>,

    /// The three scalars that can't be derived from (x, y): fields 20, 32,
    /// and 44 of the record. Preserved verbatim.
    pub unk: (f32, f32, f32),
    pub ptr: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of World
//---------------------------------------------------------------------------//

impl Area {

    fn x_values(&self) -> Vec<i32> {
        let mut values = vec![];
        let mut x = self.left;
        while x < self.right {
            values.push(x);
            x += PARTITION_STEP;
        }
        values
    }

    // Because the virtual partition y size is negative, this is inverted.
    fn y_values(&self) -> Vec<i32> {
        let mut values = vec![];
        let mut y = self.bottom;
        while y > self.top {
            values.push(y);
            y -= PARTITION_STEP;
        }
        values
    }
}

fn partition_diagonal(unk20: f32, unk32: f32) -> f32 {
    // The engine derives this from the partition extents. The x and z
    // deltas are always 128.0; only the y delta varies.
    let temp = (unk32 as f64 - unk20 as f64) * 0.5;
    approx_sqrt((128.0 * 128.0 + temp * temp + 128.0 * 128.0) as f32)
}

fn read_partition<R: ReadBytes>(data: &mut R, x: i32, y: i32) -> Result<Partition> {
    let prev = data.stream_position()?;

    let flag_raw = data.read_u32()?;
    let mone04 = data.read_i32()?;
    let part_x = data.read_f32()?;
    let part_y = data.read_f32()?;
    let unk16 = data.read_f32()?;
    let unk20 = data.read_f32()?;
    let unk24 = data.read_f32()?;
    let unk28 = data.read_f32()?;
    let unk32 = data.read_f32()?;
    let unk36 = data.read_f32()?;
    let unk40 = data.read_f32()?;
    let unk44 = data.read_f32()?;
    let unk48 = data.read_f32()?;
    let unk52 = data.read_f32()?;
    let zero56 = data.read_u16()?;
    let count = data.read_u16()?;
    let ptr = data.read_u32()?;
    let zero64 = data.read_u32()?;
    let zero68 = data.read_u32()?;

    assert_eq("partition field 00", 0x100, flag_raw, prev)?;
    assert_eq("partition field 04", -1, mone04, prev + 4)?;

    assert_eq("partition x", x as f32, part_x, prev + 8)?;
    assert_eq("partition y", y as f32, part_y, prev + 12)?;

    assert_eq("partition field 16", x as f32, unk16, prev + 16)?;
    assert_eq("partition field 24", (y - 256) as f32, unk24, prev + 24)?;
    assert_eq("partition field 28", (x + 256) as f32, unk28, prev + 28)?;
    assert_eq("partition field 36", y as f32, unk36, prev + 36)?;

    // Simplifies from unk16 + (unk28 - unk16) * 0.5.
    assert_eq("partition field 40", (x + 128) as f32, unk40, prev + 40)?;

    // unk44 starts from unk20 + (unk32 - unk20) * 0.5, but some stored
    // values are ever so slightly off, so it is preserved instead.

    // Simplifies from unk24 + (unk36 - unk24) * 0.5.
    assert_eq("partition field 48", (y - 128) as f32, unk48, prev + 48)?;

    assert_eq("partition field 52", partition_diagonal(unk20, unk32), unk52, prev + 52)?;

    assert_eq("partition field 56", 0, zero56, prev + 56)?;
    assert_eq("partition field 64", 0, zero64, prev + 64)?;
    assert_eq("partition field 68", 0, zero68, prev + 68)?;

    let mut nodes = Vec::with_capacity(count as usize);
    if count > 0 {
        assert_ne("partition ptr", 0, ptr, prev + 60)?;
        for _ in 0..count {
            nodes.push(data.read_u32()?);
        }
    } else {
        assert_eq("partition ptr", 0, ptr, prev + 60)?;
    }

    Ok(Partition {
        x,
        y,
        nodes,
        unk: (unk20, unk32, unk44),
        ptr,
    })
}

fn write_partition<W: WriteBytes>(buffer: &mut W, partition: &Partition) -> Result<()> {
    let (x, y) = (partition.x, partition.y);
    let (unk20, unk32, unk44) = partition.unk;

    buffer.write_u32(0x100)?;
    buffer.write_i32(-1)?;
    buffer.write_f32(x as f32)?;
    buffer.write_f32(y as f32)?;
    buffer.write_f32(x as f32)?;
    buffer.write_f32(unk20)?;
    buffer.write_f32((y - 256) as f32)?;
    buffer.write_f32((x + 256) as f32)?;
    buffer.write_f32(unk32)?;
    buffer.write_f32(y as f32)?;
    buffer.write_f32((x + 128) as f32)?;
    buffer.write_f32(unk44)?;
    buffer.write_f32((y - 128) as f32)?;
    buffer.write_f32(partition_diagonal(unk20, unk32))?;
    buffer.write_u16(0)?;
    buffer.write_u16(partition.nodes.len() as u16)?;
    buffer.write_u32(partition.ptr)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;

    for node in &partition.nodes {
        buffer.write_u32(*node)?;
    }

    Ok(())
}

/// This function reads a World node body, including its child and the partition grid.
pub fn read_world<R: ReadBytes>(data: &mut R) -> Result<World> {
    let prev = data.stream_position()?;

    let flag_raw = data.read_u32()?;
    let area_partition_used = data.read_u32()?;
    let area_partition_count = data.read_u32()?;
    let area_partition_ptr = data.read_u32()?;
    let fog_state = data.read_u32()?;
    let fog_color_r = data.read_f32()?;
    let fog_color_g = data.read_f32()?;
    let fog_color_b = data.read_f32()?;
    let fog_range_near = data.read_f32()?;
    let fog_range_far = data.read_f32()?;
    let fog_alti_high = data.read_f32()?;
    let fog_alti_low = data.read_f32()?;
    let fog_density = data.read_f32()?;
    let area_left_f = data.read_f32()?;
    let area_bottom_f = data.read_f32()?;
    let area_width = data.read_f32()?;
    let area_height = data.read_f32()?;
    let area_right_f = data.read_f32()?;
    let area_top_f = data.read_f32()?;
    let partition_max_dec_feature_count = data.read_u32()?;
    let virtual_partition = data.read_u32()?;
    let virt_partition_x_min = data.read_u32()?;
    let virt_partition_y_min = data.read_u32()?;
    let virt_partition_x_max = data.read_u32()?;
    let virt_partition_y_max = data.read_u32()?;
    let virt_partition_x_size = data.read_f32()?;
    let virt_partition_y_size = data.read_f32()?;
    let virt_partition_x_half = data.read_f32()?;
    let virt_partition_y_half = data.read_f32()?;
    let virt_partition_x_inv = data.read_f32()?;
    let virt_partition_y_inv = data.read_f32()?;
    let virt_partition_diag = data.read_f32()?;
    let partition_inclusion_tol_low = data.read_f32()?;
    let partition_inclusion_tol_high = data.read_f32()?;
    let virt_partition_x_count = data.read_u32()?;
    let virt_partition_y_count = data.read_u32()?;
    let virt_partition_ptr = data.read_u32()?;
    let one148 = data.read_f32()?;
    let one152 = data.read_f32()?;
    let one156 = data.read_f32()?;
    let children_count = data.read_u32()?;
    let children_ptr = data.read_u32()?;
    let lights_ptr = data.read_u32()?;
    let zero172 = data.read_u32()?;
    let zero176 = data.read_u32()?;
    let zero180 = data.read_u32()?;
    let zero184 = data.read_u32()?;

    assert_eq("flag", 0, flag_raw, prev)?;

    // LINEAR = 1, EXPONENTIAL = 2 (never set). The fog values aren't set
    // either; missions set the fog through animations.
    assert_eq("fog state", 1, fog_state, prev + 16)?;
    assert_eq("fog color r", 0.0, fog_color_r, prev + 20)?;
    assert_eq("fog color g", 0.0, fog_color_g, prev + 24)?;
    assert_eq("fog color b", 0.0, fog_color_b, prev + 28)?;
    assert_eq("fog range near", 0.0, fog_range_near, prev + 32)?;
    assert_eq("fog range far", 0.0, fog_range_far, prev + 36)?;
    assert_eq("fog alti high", 0.0, fog_alti_high, prev + 40)?;
    assert_eq("fog alti low", 0.0, fog_alti_low, prev + 44)?;
    assert_eq("fog density", 0.0, fog_density, prev + 48)?;

    // We need these values to be integers for the partition logic.
    let area = Area {
        left: area_left_f as i32,
        top: area_top_f as i32,
        right: area_right_f as i32,
        bottom: area_bottom_f as i32,
    };
    assert_eq("area left", area.left as f32, area_left_f, prev + 52)?;
    assert_eq("area bottom", area.bottom as f32, area_bottom_f, prev + 56)?;
    assert_eq("area right", area.right as f32, area_right_f, prev + 68)?;
    assert_eq("area top", area.top as f32, area_top_f, prev + 72)?;

    assert_gt("area right", area.left, area.right, prev + 68)?;
    assert_gt("area bottom", area.top, area.bottom, prev + 72)?;

    let width = area.right - area.left;
    let height = area.top - area.bottom;
    assert_eq("area width", width as f32, area_width, prev + 60)?;
    assert_eq("area height", height as f32, area_height, prev + 64)?;

    assert_eq("partition max feat", 16, partition_max_dec_feature_count, prev + 76)?;
    assert_eq("virtual partition", 1, virtual_partition, prev + 80)?;

    assert_eq("vp x min", 1, virt_partition_x_min, prev + 84)?;
    assert_eq("vp y min", 1, virt_partition_y_min, prev + 88)?;

    assert_eq("vp x size", 256.0, virt_partition_x_size, prev + 100)?;
    assert_eq("vp y size", -256.0, virt_partition_y_size, prev + 104)?;
    assert_eq("vp x half", 128.0, virt_partition_x_half, prev + 108)?;
    assert_eq("vp y half", -128.0, virt_partition_y_half, prev + 112)?;
    assert_eq("vp x inv", 1.0 / 256.0, virt_partition_x_inv, prev + 116)?;
    assert_eq("vp y inv", 1.0 / -256.0, virt_partition_y_inv, prev + 120)?;

    // This is sqrt(x_size^2 + y_size^2) * -0.5, but because of the (poor)
    // sqrt approximation used, it comes out as -192.0 instead of -181.0.
    assert_eq("vp diagonal", VIRT_PARTITION_DIAGONAL, virt_partition_diag, prev + 124)?;

    assert_eq("vp inc tol low", 3.0, partition_inclusion_tol_low, prev + 128)?;
    assert_eq("vp inc tol high", 3.0, partition_inclusion_tol_high, prev + 132)?;

    let area_x = area.x_values();
    let area_y = area.y_values();

    assert_eq("vp x count", area_x.len() as u32, virt_partition_x_count, prev + 136)?;
    assert_eq("vp y count", area_y.len() as u32, virt_partition_y_count, prev + 140)?;
    assert_eq("ap used", 0, area_partition_used, prev + 4)?;
    assert_eq("vp x max", virt_partition_x_count - 1, virt_partition_x_max, prev + 92)?;
    assert_eq("vp y max", virt_partition_y_count - 1, virt_partition_y_max, prev + 96)?;

    let virt_partition_count = virt_partition_x_count * virt_partition_y_count;
    assert_between("ap count", virt_partition_count - 1, virt_partition_count, area_partition_count, prev + 8)?;
    let fudge_count = area_partition_count != virt_partition_count;

    assert_ne("ap ptr", 0, area_partition_ptr, prev + 12)?;
    assert_ne("vp ptr", 0, virt_partition_ptr, prev + 144)?;

    assert_eq("field 148", 1.0, one148, prev + 148)?;
    assert_eq("field 152", 1.0, one152, prev + 152)?;
    assert_eq("field 156", 1.0, one156, prev + 156)?;
    assert_eq("children count", 1, children_count, prev + 160)?;
    assert_ne("children ptr", 0, children_ptr, prev + 164)?;
    assert_ne("lights ptr", 0, lights_ptr, prev + 168)?;
    assert_eq("field 172", 0, zero172, prev + 172)?;
    assert_eq("field 176", 0, zero176, prev + 176)?;
    assert_eq("field 180", 0, zero180, prev + 180)?;
    assert_eq("field 184", 0, zero184, prev + 184)?;

    // Read as a result of children_count being 1.
    let child = data.read_u32()?;

    let mut partitions = Vec::with_capacity(area_y.len());
    for y in &area_y {
        let mut subpartitions = Vec::with_capacity(area_x.len());
        for x in &area_x {
            subpartitions.push(read_partition(data, *x, *y)?);
        }
        partitions.push(subpartitions);
    }

    Ok(World {
        area,
        partitions,
        children: vec![child],
        virt_partition_x_count,
        virt_partition_y_count,
        fudge_count,
        area_partition_ptr,
        virt_partition_ptr,
        children_ptr,
        lights_ptr,
    })
}

/// This function writes a World node body, including its child and the partition grid.
pub fn write_world<W: WriteBytes>(buffer: &mut W, world: &World) -> Result<()> {
    let area = world.area;
    let virt_partition_count = world.virt_partition_x_count * world.virt_partition_y_count;
    let area_partition_count = if world.fudge_count {
        virt_partition_count - 1
    } else {
        virt_partition_count
    };

    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(area_partition_count)?;
    buffer.write_u32(world.area_partition_ptr)?;
    buffer.write_u32(1)?;
    for _ in 0..9 {
        buffer.write_f32(0.0)?;
    }
    buffer.write_f32(area.left as f32)?;
    buffer.write_f32(area.bottom as f32)?;
    buffer.write_f32((area.right - area.left) as f32)?;
    buffer.write_f32((area.top - area.bottom) as f32)?;
    buffer.write_f32(area.right as f32)?;
    buffer.write_f32(area.top as f32)?;
    buffer.write_u32(16)?;
    buffer.write_u32(1)?;
    buffer.write_u32(1)?;
    buffer.write_u32(1)?;
    buffer.write_u32(world.virt_partition_x_count - 1)?;
    buffer.write_u32(world.virt_partition_y_count - 1)?;
    buffer.write_f32(256.0)?;
    buffer.write_f32(-256.0)?;
    buffer.write_f32(128.0)?;
    buffer.write_f32(-128.0)?;
    buffer.write_f32(1.0 / 256.0)?;
    buffer.write_f32(1.0 / -256.0)?;
    buffer.write_f32(VIRT_PARTITION_DIAGONAL)?;
    buffer.write_f32(3.0)?;
    buffer.write_f32(3.0)?;
    buffer.write_u32(world.virt_partition_x_count)?;
    buffer.write_u32(world.virt_partition_y_count)?;
    buffer.write_u32(world.virt_partition_ptr)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_u32(1)?;
    buffer.write_u32(world.children_ptr)?;
    buffer.write_u32(world.lights_ptr)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;

    buffer.write_u32(world.children[0])?;

    for subpartitions in &world.partitions {
        for partition in subpartitions {
            write_partition(buffer, partition)?;
        }
    }

    Ok(())
}

/// This function returns the encoded size of a World node body, in bytes.
pub fn size_world(world: &World) -> u64 {
    let mut item_count = 0;
    let mut partition_count = 0;
    for subpartitions in &world.partitions {
        for partition in subpartitions {
            item_count += partition.nodes.len() as u64;
            partition_count += 1;
        }
    }

    WORLD_SIZE + 4 + PARTITION_SIZE * partition_count + 4 * item_count
}
