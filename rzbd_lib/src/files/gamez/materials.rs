//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The GameZ material array.
//!
//! The array has a fixed size; the first `count` records are live, the rest
//! are free. Live records are doubly linked forward via their two trailing
//! shorts, free records are linked in the opposite direction, and both
//! chains terminate with -1. Cycled materials additionally store a cycle
//! header and their texture index list after the whole array.

use bitflags::bitflags;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_flags, assert_in, assert_ne};
use crate::error::Result;

/// Size of the material array header.
pub const MATERIAL_HEADER_SIZE: u64 = 16;

/// Size of a material record.
pub const MATERIAL_INFO_SIZE: u64 = 44;

/// Size of a cycle header.
pub const CYCLE_HEADER_SIZE: u64 = 28;

bitflags! {

    /// This represents the bitmasks a material can have applied to its flag field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MaterialFlags: u8 {
        const TEXTURED = 1 << 0;
        const UNKNOWN  = 1 << 1;
        const CYCLED   = 1 << 2;
        const ALWAYS   = 1 << 4;
        const FREE     = 1 << 5;
    }
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A live GameZ material: either a texture reference or a plain color,
/// optionally with a cycled texture animation.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Material {
    pub texture: Option<u32>,
    pub color: Option<[f32; 3]>,
    pub cycle: Option<Cycle>,

    pub unk00: u8,
    pub unk32: u32,
    pub unknown: bool,
}

/// A cycled texture animation.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cycle {
    pub textures: Vec<u32>,
    pub unk00: bool,
    pub unk04: u32,
    pub unk12: f32,
    pub info_ptr: u32,
    pub data_ptr: u32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn read_material_live<R: ReadBytes>(data: &mut R, index: u32, count: u32, texture_count: u32) -> Result<(Material, u32)> {
    let prev = data.stream_position()?;

    let unk00 = data.read_u8()?;
    let flag_raw = data.read_u8()?;
    let rgb = data.read_u16()?;
    let red = data.read_f32()?;
    let green = data.read_f32()?;
    let blue = data.read_f32()?;
    let texture = data.read_u32()?;
    let unk20 = data.read_f32()?;
    let unk24 = data.read_f32()?;
    let unk28 = data.read_f32()?;
    let unk32 = data.read_u32()?;
    let cycle_ptr = data.read_u32()?;
    let index1 = data.read_i16()?;
    let index2 = data.read_i16()?;

    let flags: MaterialFlags = assert_flags("flag", flag_raw, prev + 1)?;

    assert_eq("flag always", true, flags.contains(MaterialFlags::ALWAYS), prev + 1)?;
    assert_eq("flag free", false, flags.contains(MaterialFlags::FREE), prev + 1)?;

    let cycled = flags.contains(MaterialFlags::CYCLED);
    let textured = flags.contains(MaterialFlags::TEXTURED);

    let (texture, color) = if textured {
        assert_eq("field 00", 255, unk00, prev)?;

        // A textured material has no RGB value of its own.
        assert_eq("rgb", 0x7FFF, rgb, prev + 2)?;
        assert_eq("red", 255.0, red, prev + 4)?;
        assert_eq("green", 255.0, green, prev + 8)?;
        assert_eq("blue", 255.0, blue, prev + 12)?;
        assert_between("texture", 0, texture_count - 1, texture, prev + 16)?;
        (Some(texture), None)
    } else {
        assert_in("field 00", &[0, 51, 76, 89, 102, 127, 153, 255], unk00, prev)?;

        // Never set for untextured materials.
        assert_eq("flag unk", false, flags.contains(MaterialFlags::UNKNOWN), prev + 1)?;

        // An untextured material can't be cycled.
        assert_eq("texture cycled", false, cycled, prev + 1)?;

        // The short RGB is calculated from the floats, and depends on the
        // hardware's RGB565 or RGB555 support, so it's not set here.
        assert_eq("rgb", 0, rgb, prev + 2)?;
        assert_eq("texture", 0, texture, prev + 16)?;
        (None, Some([red, green, blue]))
    };

    assert_eq("field 20", 0.0, unk20, prev + 20)?;
    assert_eq("field 24", 0.5, unk24, prev + 24)?;
    assert_eq("field 28", 0.5, unk28, prev + 28)?;
    assert_in("field 32", &[0, 1, 4, 6, 7, 8, 9, 10, 12, 13], unk32, prev + 32)?;

    if cycled {
        assert_ne("cycle pointer", 0, cycle_ptr, prev + 36)?;
    } else {
        assert_eq("cycle pointer", 0, cycle_ptr, prev + 36)?;
    }

    let mut expected1 = index as i16 + 1;
    if expected1 >= count as i16 {
        expected1 = -1;
    }
    assert_eq("index 1", expected1, index1, prev + 40)?;

    let expected2 = index as i16 - 1;
    assert_eq("index 2", expected2, index2, prev + 42)?;

    let material = Material {
        texture,
        color,
        cycle: None,
        unk00,
        unk32,
        unknown: flags.contains(MaterialFlags::UNKNOWN),
    };
    Ok((material, cycle_ptr))
}

fn read_materials_zero<R: ReadBytes>(data: &mut R, count: u32, array_size: u32) -> Result<()> {
    for index in count..array_size {
        let prev = data.stream_position()?;

        let unk00 = data.read_u8()?;
        let flag_raw = data.read_u8()?;
        let rgb = data.read_u16()?;
        let red = data.read_f32()?;
        let green = data.read_f32()?;
        let blue = data.read_f32()?;
        let texture = data.read_u32()?;
        let unk20 = data.read_f32()?;
        let unk24 = data.read_f32()?;
        let unk28 = data.read_f32()?;
        let unk32 = data.read_u32()?;
        let cycle_ptr = data.read_u32()?;
        let index1 = data.read_i16()?;
        let index2 = data.read_i16()?;

        assert_eq("field 00", 0, unk00, prev)?;
        assert_eq("flag", MaterialFlags::FREE.bits(), flag_raw, prev + 1)?;
        assert_eq("rgb", 0, rgb, prev + 2)?;
        assert_eq("red", 0.0, red, prev + 4)?;
        assert_eq("green", 0.0, green, prev + 8)?;
        assert_eq("blue", 0.0, blue, prev + 12)?;
        assert_eq("texture", 0, texture, prev + 16)?;
        assert_eq("field 20", 0.0, unk20, prev + 20)?;
        assert_eq("field 24", 0.0, unk24, prev + 24)?;
        assert_eq("field 28", 0.0, unk28, prev + 28)?;
        assert_eq("field 32", 0, unk32, prev + 32)?;
        assert_eq("cycle pointer", 0, cycle_ptr, prev + 36)?;

        // Free records link backward.
        let mut expected1 = index as i16 - 1;
        if expected1 < count as i16 {
            expected1 = -1;
        }
        assert_eq("index 1", expected1, index1, prev + 40)?;

        let mut expected2 = index as i16 + 1;
        if expected2 >= array_size as i16 {
            expected2 = -1;
        }
        assert_eq("index 2", expected2, index2, prev + 42)?;
    }

    Ok(())
}

/// This function reads the material array, returning the array size and the live materials.
pub fn read_materials<R: ReadBytes>(data: &mut R, texture_count: u32) -> Result<(u32, Vec<Material>)> {
    let prev = data.stream_position()?;
    let array_size = data.read_u32()?;
    let count = data.read_u32()?;
    let index_max = data.read_u32()?;
    let unknown = data.read_i32()?;

    assert_eq("index max", count, index_max, prev + 8)?;
    assert_eq("field 12", count as i32 - 1, unknown, prev + 12)?;

    let mut materials_and_cycles = Vec::with_capacity(count as usize);
    for index in 0..count {
        materials_and_cycles.push(read_material_live(data, index, count, texture_count)?);
    }

    read_materials_zero(data, count, array_size)?;

    // The cycle data of all cycled materials trails the whole array.
    let mut materials = Vec::with_capacity(count as usize);
    for (mut material, cycle_info_ptr) in materials_and_cycles {
        if cycle_info_ptr != 0 {
            let prev = data.stream_position()?;

            let unk00 = data.read_u32()?;
            let unk04 = data.read_u32()?;
            let zero08 = data.read_u32()?;
            let unk12 = data.read_f32()?;
            let cycle_count1 = data.read_u32()?;
            let cycle_count2 = data.read_u32()?;
            let data_ptr = data.read_u32()?;

            assert_in("field 00", &[0, 1], unk00, prev)?;
            assert_eq("field 08", 0, zero08, prev + 8)?;
            assert_between("field 12", 2.0, 16.0, unk12, prev + 12)?;
            assert_eq("cycle count", cycle_count1, cycle_count2, prev + 20)?;
            assert_ne("field 24", 0, data_ptr, prev + 24)?;

            let mut textures = Vec::with_capacity(cycle_count1 as usize);
            for i in 0..cycle_count1 {
                let texture = data.read_u32()?;
                assert_between("texture", 0, texture_count - 1, texture, prev + 28 + i as u64 * 4)?;
                textures.push(texture);
            }

            material.cycle = Some(Cycle {
                textures,
                unk00: unk00 == 1,
                unk04,
                unk12,
                info_ptr: cycle_info_ptr,
                data_ptr,
            });
        }
        materials.push(material);
    }

    Ok((array_size, materials))
}

/// This function writes the material array.
pub fn write_materials<W: WriteBytes>(buffer: &mut W, array_size: u32, materials: &[Material]) -> Result<()> {
    let count = materials.len() as u32;
    buffer.write_u32(array_size)?;
    buffer.write_u32(count)?;
    buffer.write_u32(count)?;
    buffer.write_i32(count as i32 - 1)?;

    for (index, material) in materials.iter().enumerate() {
        let mut index1 = index as i16 + 1;
        if index1 >= count as i16 {
            index1 = -1;
        }
        let index2 = index as i16 - 1;

        let mut flags = MaterialFlags::ALWAYS;
        if material.unknown {
            flags |= MaterialFlags::UNKNOWN;
        }

        let (rgb, red, green, blue, texture) = match (material.texture, material.color) {
            (Some(texture), _) => {
                flags |= MaterialFlags::TEXTURED;
                (0x7FFF, 255.0, 255.0, 255.0, texture)
            }
            (None, Some(color)) => (0, color[0], color[1], color[2], 0),
            (None, None) => (0, 0.0, 0.0, 0.0, 0),
        };

        let cycle_ptr = match &material.cycle {
            Some(cycle) => {
                flags |= MaterialFlags::CYCLED;
                cycle.info_ptr
            }
            None => 0,
        };

        buffer.write_u8(material.unk00)?;
        buffer.write_u8(flags.bits())?;
        buffer.write_u16(rgb)?;
        buffer.write_f32(red)?;
        buffer.write_f32(green)?;
        buffer.write_f32(blue)?;
        buffer.write_u32(texture)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.5)?;
        buffer.write_f32(0.5)?;
        buffer.write_u32(material.unk32)?;
        buffer.write_u32(cycle_ptr)?;
        buffer.write_i16(index1)?;
        buffer.write_i16(index2)?;
    }

    for index in count..array_size {
        let mut index1 = index as i16 - 1;
        if index1 < count as i16 {
            index1 = -1;
        }
        let mut index2 = index as i16 + 1;
        if index2 >= array_size as i16 {
            index2 = -1;
        }

        buffer.write_u8(0)?;
        buffer.write_u8(MaterialFlags::FREE.bits())?;
        buffer.write_u16(0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_u32(0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_i16(index1)?;
        buffer.write_i16(index2)?;
    }

    for material in materials {
        if let Some(cycle) = &material.cycle {
            let cycle_count = cycle.textures.len() as u32;
            buffer.write_u32(u32::from(cycle.unk00))?;
            buffer.write_u32(cycle.unk04)?;
            buffer.write_u32(0)?;
            buffer.write_f32(cycle.unk12)?;
            buffer.write_u32(cycle_count)?;
            buffer.write_u32(cycle_count)?;
            buffer.write_u32(cycle.data_ptr)?;

            for texture in &cycle.textures {
                buffer.write_u32(*texture)?;
            }
        }
    }

    Ok(())
}

/// This function returns the encoded size of the material array, in bytes.
pub fn size_materials(array_size: u32, materials: &[Material]) -> u64 {
    let mut size = MATERIAL_HEADER_SIZE + MATERIAL_INFO_SIZE * array_size as u64;
    for material in materials {
        if let Some(cycle) = &material.cycle {
            size += CYCLE_HEADER_SIZE + 4 * cycle.textures.len() as u64;
        }
    }
    size
}
