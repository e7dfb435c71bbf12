//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Display node bodies. The values are all constants, but they're dumped
//! anyway because they're interesting for engine internals.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::assert_eq;
use crate::error::Result;

/// Size of a Display node body.
pub const DISPLAY_SIZE: u64 = 28;

/// The clear color is always this dark blue.
const CLEAR_COLOR: f32 = 0.392;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single Display node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Display {
    pub resolution: (i32, i32),
    pub clear_color: [f32; 3],
}

//---------------------------------------------------------------------------//
//                           Implementation of Display
//---------------------------------------------------------------------------//

/// This function reads a 28-byte Display node body.
pub fn read_display<R: ReadBytes>(data: &mut R) -> Result<Display> {
    let prev = data.stream_position()?;

    let origin_x = data.read_i32()?;
    let origin_y = data.read_i32()?;
    let resolution_x = data.read_i32()?;
    let resolution_y = data.read_i32()?;
    let clear_color_r = data.read_f32()?;
    let clear_color_g = data.read_f32()?;
    let clear_color_b = data.read_f32()?;

    assert_eq("origin x", 0, origin_x, prev)?;
    assert_eq("origin y", 0, origin_y, prev + 4)?;

    assert_eq("resolution x", 640, resolution_x, prev + 8)?;
    assert_eq("resolution y", 400, resolution_y, prev + 12)?;

    assert_eq("clear color r", CLEAR_COLOR, clear_color_r, prev + 16)?;
    assert_eq("clear color g", CLEAR_COLOR, clear_color_g, prev + 20)?;
    assert_eq("clear color b", 1.0, clear_color_b, prev + 24)?;

    Ok(Display {
        resolution: (resolution_x, resolution_y),
        clear_color: [clear_color_r, clear_color_g, clear_color_b],
    })
}

/// This function writes a 28-byte Display node body.
pub fn write_display<W: WriteBytes>(buffer: &mut W, display: &Display) -> Result<()> {
    buffer.write_i32(0)?;
    buffer.write_i32(0)?;
    buffer.write_i32(display.resolution.0)?;
    buffer.write_i32(display.resolution.1)?;
    for value in display.clear_color {
        buffer.write_f32(value)?;
    }
    Ok(())
}
