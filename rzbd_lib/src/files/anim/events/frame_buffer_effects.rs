//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Frame buffer effects: full-screen color fades.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_gt};
use crate::error::Result;

/// Payload size of FBFX_COLOR_FROM_TO.
pub const FBFX_COLOR_FROM_TO_SIZE: u32 = 52;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// FBFX_COLOR_FROM_TO: fade the screen between two RGBA colors.
///
/// The deltas are roughly `(to - from) / run_time`, but not exactly, so
/// they're preserved.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct FbfxColorFromTo {
    pub from_color: [f32; 4],
    pub to_color: [f32; 4],
    pub delta: [f32; 4],
    pub run_time: f32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl FbfxColorFromTo {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let prev = data.stream_position()?;

        let from_r = data.read_f32()?;
        let to_r = data.read_f32()?;
        let delta_r = data.read_f32()?;
        let from_g = data.read_f32()?;
        let to_g = data.read_f32()?;
        let delta_g = data.read_f32()?;
        let from_b = data.read_f32()?;
        let to_b = data.read_f32()?;
        let delta_b = data.read_f32()?;
        let from_a = data.read_f32()?;
        let to_a = data.read_f32()?;
        let delta_a = data.read_f32()?;
        let run_time = data.read_f32()?;

        assert_between("from red", 0.0, 1.0, from_r, prev)?;
        assert_between("to red", 0.0, 1.0, to_r, prev + 4)?;
        assert_between("from green", 0.0, 1.0, from_g, prev + 12)?;
        assert_between("to green", 0.0, 1.0, to_g, prev + 16)?;
        assert_between("from blue", 0.0, 1.0, from_b, prev + 24)?;
        assert_between("to blue", 0.0, 1.0, to_b, prev + 28)?;
        assert_between("from alpha", 0.0, 1.0, from_a, prev + 36)?;
        assert_between("to alpha", 0.0, 1.0, to_a, prev + 40)?;

        assert_gt("run time", 0.0, run_time, prev + 48)?;

        Ok(Self {
            from_color: [from_r, from_g, from_b, from_a],
            to_color: [to_r, to_g, to_b, to_a],
            delta: [delta_r, delta_g, delta_b, delta_a],
            run_time,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        for channel in 0..4 {
            buffer.write_f32(self.from_color[channel])?;
            buffer.write_f32(self.to_color[channel])?;
            buffer.write_f32(self.delta[channel])?;
        }
        buffer.write_f32(self.run_time)
    }
}
