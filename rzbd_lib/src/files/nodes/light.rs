//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Light node bodies (the sunlight).

use bitflags::bitflags;
use nalgebra::Vector3;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_between, assert_eq, assert_flags, assert_gt, assert_ne};
use crate::error::Result;

/// Size of a Light node body.
pub const LIGHT_SIZE: u64 = 212;

bitflags! {

    /// This represents the bitmasks a light can have applied to its flag field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LightFlags: u32 {
        const TRANSLATION_ABS = 1 << 0;
        const TRANSLATION     = 1 << 1;
        const ROTATION        = 1 << 2;
        const RANGE           = 1 << 3;
        const COLOR           = 1 << 4;
        const AMBIENT         = 1 << 5;
        const DIFFUSE         = 1 << 6;
        const DIRECTIONAL     = 1 << 7;
        const SATURATED       = 1 << 8;
        const SUBDIVIDE       = 1 << 9;
        const STATIC          = 1 << 10;
    }
}

impl LightFlags {

    /// The sunlight always has this exact flag combination.
    pub fn sunlight() -> Self {
        Self::SUBDIVIDE | Self::SATURATED | Self::DIRECTIONAL | Self::RANGE | Self::TRANSLATION | Self::TRANSLATION_ABS
    }
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single Light node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Light {
    pub direction: Vector3<f32>,
    pub diffuse: f32,
    pub ambient: f32,

    // The color is constant white, and the flag is constant too, so neither
    // is kept in the document.
    pub range: (f32, f32),
    pub parent_ptr: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Light
//---------------------------------------------------------------------------//

fn square(value: f32) -> f32 {
    (value as f64 * value as f64) as f32
}

/// This function reads a 212-byte Light node body.
pub fn read_light<R: ReadBytes>(data: &mut R) -> Result<Light> {
    let prev = data.stream_position()?;

    let direction = data.read_vector_3_f32()?;
    let trans_x = data.read_f32()?;
    let trans_y = data.read_f32()?;
    let trans_z = data.read_f32()?;
    let zero024 = data.read_slice(112, false)?;
    let one136 = data.read_f32()?;
    let zero140 = data.read_f32()?;
    let zero144 = data.read_f32()?;
    let zero148 = data.read_f32()?;
    let zero152 = data.read_f32()?;
    let diffuse = data.read_f32()?;
    let ambient = data.read_f32()?;
    let color_r = data.read_f32()?;
    let color_g = data.read_f32()?;
    let color_b = data.read_f32()?;
    let flag_raw = data.read_u32()?;
    let range_min = data.read_f32()?;
    let range_max = data.read_f32()?;
    let range_min_sq = data.read_f32()?;
    let range_max_sq = data.read_f32()?;
    let range_inv = data.read_f32()?;
    let parent_count = data.read_u32()?;
    let parent_ptr = data.read_u32()?;
    let zero208 = data.read_u32()?;

    // Translation is never set.
    assert_eq("trans x", 0.0, trans_x, prev + 12)?;
    assert_eq("trans y", 0.0, trans_y, prev + 16)?;
    assert_eq("trans z", 0.0, trans_z, prev + 20)?;

    assert_all_zero("field 024", &zero024, prev + 24)?;

    assert_eq("field 136", 1.0, one136, prev + 136)?;
    assert_eq("field 140", 0.0, zero140, prev + 140)?;
    assert_eq("field 144", 0.0, zero144, prev + 144)?;
    assert_eq("field 148", 0.0, zero148, prev + 148)?;
    assert_eq("field 152", 0.0, zero152, prev + 152)?;

    assert_between("diffuse", 0.0, 1.0, diffuse, prev + 156)?;
    assert_between("ambient", 0.0, 1.0, ambient, prev + 160)?;

    assert_eq("color r", 1.0, color_r, prev + 164)?;
    assert_eq("color g", 1.0, color_g, prev + 168)?;
    assert_eq("color b", 1.0, color_b, prev + 172)?;

    let flags: LightFlags = assert_flags("flag", flag_raw, prev + 176)?;
    assert_eq("flag", LightFlags::sunlight(), flags, prev + 176)?;

    assert_gt("range min", 0.0, range_min, prev + 180)?;
    assert_gt("range max", range_min, range_max, prev + 184)?;
    assert_eq("range min sq", square(range_min), range_min_sq, prev + 188)?;
    assert_eq("range max sq", square(range_max), range_max_sq, prev + 192)?;

    let expected = (1.0 / (range_max as f64 - range_min as f64)) as f32;
    assert_eq("range inv", expected, range_inv, prev + 196)?;

    // If this was ever zero, field 208 wouldn't be read.
    assert_eq("parent count", 1, parent_count, prev + 200)?;
    assert_ne("parent ptr", 0, parent_ptr, prev + 204)?;
    assert_eq("field 208", 0, zero208, prev + 208)?;

    Ok(Light {
        direction,
        diffuse,
        ambient,
        range: (range_min, range_max),
        parent_ptr,
    })
}

/// This function writes a 212-byte Light node body.
pub fn write_light<W: WriteBytes>(buffer: &mut W, light: &Light) -> Result<()> {
    let (range_min, range_max) = light.range;

    buffer.write_vector_3_f32(&light.direction)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_all(&[0; 112])?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(light.diffuse)?;
    buffer.write_f32(light.ambient)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_u32(LightFlags::sunlight().bits())?;
    buffer.write_f32(range_min)?;
    buffer.write_f32(range_max)?;
    buffer.write_f32(square(range_min))?;
    buffer.write_f32(square(range_max))?;
    buffer.write_f32((1.0 / (range_max as f64 - range_min as f64)) as f32)?;
    buffer.write_u32(1)?;
    buffer.write_u32(light.parent_ptr)?;
    buffer.write_u32(0)?;
    Ok(())
}
