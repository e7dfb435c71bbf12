//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Level-of-detail node bodies.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_between, assert_eq, assert_ge, assert_in, assert_ne};
use crate::error::Result;

/// Size of a LOD node body.
pub const LOD_SIZE: u64 = 80;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single LOD node body decoded in memory.
///
/// The near range is stored squared, and kept that way: taking the square
/// root and squaring again is not guaranteed to reproduce the bits.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Lod {
    pub level: bool,
    pub range_near_sq: f32,
    pub range_far: f32,
    pub unk60: f32,
    pub unk76: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Lod
//---------------------------------------------------------------------------//

fn square(value: f32) -> f32 {
    (value as f64 * value as f64) as f32
}

/// This function reads an 80-byte LOD node body.
pub fn read_lod<R: ReadBytes>(data: &mut R) -> Result<Lod> {
    let prev = data.stream_position()?;

    let level = data.read_u32()?;
    let range_near_sq = data.read_f32()?;
    let range_far = data.read_f32()?;
    let range_far_sq = data.read_f32()?;
    let zero16 = data.read_slice(44, false)?;
    let unk60 = data.read_f32()?;
    let unk64 = data.read_f32()?;
    let one68 = data.read_u32()?;
    let zero72 = data.read_u32()?;
    let unk76 = data.read_u32()?;

    assert_in("level", &[0, 1], level, prev)?;

    assert_between("range near sq", 0.0, 1000.0 * 1000.0, range_near_sq, prev + 4)?;

    assert_ge("range far", 0.0, range_far, prev + 8)?;
    assert_eq("range far sq", square(range_far), range_far_sq, prev + 12)?;

    assert_all_zero("field 16", &zero16, prev + 16)?;

    assert_ge("field 60", 0.0, unk60, prev + 60)?;
    assert_eq("field 64", square(unk60), unk64, prev + 64)?;

    assert_eq("field 68", 1, one68, prev + 68)?;
    assert_in("field 72", &[0, 1], zero72, prev + 72)?;
    if zero72 == 0 {
        assert_eq("field 76", 0, unk76, prev + 76)?;
    } else {
        assert_ne("field 76", 0, unk76, prev + 76)?;
    }

    Ok(Lod {
        level: level == 1,
        range_near_sq,
        range_far,
        unk60,
        unk76,
    })
}

/// This function writes an 80-byte LOD node body.
pub fn write_lod<W: WriteBytes>(buffer: &mut W, lod: &Lod) -> Result<()> {
    buffer.write_u32(u32::from(lod.level))?;
    buffer.write_f32(lod.range_near_sq)?;
    buffer.write_f32(lod.range_far)?;
    buffer.write_f32(square(lod.range_far))?;
    buffer.write_all(&[0; 44])?;
    buffer.write_f32(lod.unk60)?;
    buffer.write_f32(square(lod.unk60))?;
    buffer.write_u32(1)?;
    buffer.write_u32(u32::from(lod.unk76 != 0))?;
    buffer.write_u32(lod.unk76)?;
    Ok(())
}
