//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The fog state event.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_ge};
use crate::error::Result;

/// Payload size of FOG_STATE.
pub const FOG_STATE_SIZE: u32 = 68;

/// The name field is always this.
const DEFAULT_FOG_NAME: &[u8; 32] = b"default_fog_name\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";

/// Flag: set state | set color | set altitude | set range.
const FOG_FLAG: u32 = 14;

/// OFF = 0, LINEAR = 1, EXPONENTIAL = 2. Only LINEAR occurs.
const FOG_TYPE_LINEAR: u32 = 1;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// FOG_STATE: set the world fog.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct FogState {
    pub color: [f32; 3],
    pub altitude: (f32, f32),
    pub range: (f32, f32),
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl FogState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(32, false)?;
        let flag_raw = data.read_u32()?;
        let fog_type = data.read_u32()?;
        let color_r = data.read_f32()?;
        let color_g = data.read_f32()?;
        let color_b = data.read_f32()?;
        let altitude_min = data.read_f32()?;
        let altitude_max = data.read_f32()?;
        let range_min = data.read_f32()?;
        let range_max = data.read_f32()?;

        assert_eq("name", &DEFAULT_FOG_NAME[..], &name_raw[..], prev)?;
        assert_eq("flag", FOG_FLAG, flag_raw, prev + 32)?;
        assert_eq("fog type", FOG_TYPE_LINEAR, fog_type, prev + 36)?;

        assert_between("red", 0.0, 1.0, color_r, prev + 40)?;
        assert_between("green", 0.0, 1.0, color_g, prev + 44)?;
        assert_between("blue", 0.0, 1.0, color_b, prev + 48)?;

        // The altitude is always ordered this way, even negative (unlike
        // the range).
        assert_ge("altitude max", altitude_min, altitude_max, prev + 56)?;

        assert_ge("range min", 0.0, range_min, prev + 60)?;
        assert_ge("range max", range_min, range_max, prev + 64)?;

        Ok(Self {
            color: [color_r, color_g, color_b],
            altitude: (altitude_min, altitude_max),
            range: (range_min, range_max),
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_all(DEFAULT_FOG_NAME)?;
        buffer.write_u32(FOG_FLAG)?;
        buffer.write_u32(FOG_TYPE_LINEAR)?;
        for value in self.color {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(self.altitude.0)?;
        buffer.write_f32(self.altitude.1)?;
        buffer.write_f32(self.range.0)?;
        buffer.write_f32(self.range.1)
    }
}
