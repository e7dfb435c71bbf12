//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Window node bodies.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_eq};
use crate::error::Result;

/// Size of a Window node body.
pub const WINDOW_SIZE: u64 = 248;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single Window node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Window {
    pub resolution: (i32, i32),
}

//---------------------------------------------------------------------------//
//                           Implementation of Window
//---------------------------------------------------------------------------//

/// This function reads a 248-byte Window node body.
pub fn read_window<R: ReadBytes>(data: &mut R) -> Result<Window> {
    let prev = data.stream_position()?;

    let origin_x = data.read_i32()?;
    let origin_y = data.read_i32()?;
    let resolution_x = data.read_i32()?;
    let resolution_y = data.read_i32()?;
    let zero016 = data.read_slice(212, false)?;
    let buffer_index = data.read_i32()?;
    let buffer_ptr = data.read_u32()?;
    let zero236 = data.read_u32()?;
    let zero240 = data.read_u32()?;
    let zero244 = data.read_u32()?;

    assert_eq("origin x", 0, origin_x, prev)?;
    assert_eq("origin y", 0, origin_y, prev + 4)?;

    assert_eq("resolution x", 320, resolution_x, prev + 8)?;
    assert_eq("resolution y", 200, resolution_y, prev + 12)?;

    assert_all_zero("field 016", &zero016, prev + 16)?;

    assert_eq("buffer index", -1, buffer_index, prev + 228)?;
    assert_eq("buffer ptr", 0, buffer_ptr, prev + 232)?;

    assert_eq("field 236", 0, zero236, prev + 236)?;
    assert_eq("field 240", 0, zero240, prev + 240)?;
    assert_eq("field 244", 0, zero244, prev + 244)?;

    Ok(Window {
        resolution: (resolution_x, resolution_y),
    })
}

/// This function writes a 248-byte Window node body.
pub fn write_window<W: WriteBytes>(buffer: &mut W, window: &Window) -> Result<()> {
    buffer.write_i32(0)?;
    buffer.write_i32(0)?;
    buffer.write_i32(window.resolution.0)?;
    buffer.write_i32(window.resolution.1)?;
    buffer.write_all(&[0; 212])?;
    buffer.write_i32(-1)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    Ok(())
}
