//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Light state and animation events.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_ge, assert_gt, assert_in, assert_lt};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

use super::{at_node_rotated_from_index, at_node_rotated_to_index, AtNodeRotated};

/// Payload size of LIGHT_STATE.
pub const LIGHT_STATE_SIZE: u32 = 120;

/// Payload size of LIGHT_ANIMATION.
pub const LIGHT_ANIMATION_SIZE: u32 = 100;

/// Size of the name field.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// LIGHT_STATE: configure one of the animation's lights.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LightState {
    pub name: String,
    pub active_state: bool,
    pub at_node: Option<AtNodeRotated>,
    pub range: (f32, f32),
    pub color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub subdivide: bool,
    pub saturated: bool,
    pub directional: bool,
    pub static_: bool,
    pub unk36: u32,
}

/// LIGHT_ANIMATION: fade a light's range and color over time.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LightAnimation {
    pub name: String,
    pub range: (f32, f32),
    pub color: [f32; 3],
    pub run_time: f32,
    pub unk32: i32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl LightState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let index = data.read_u32()?;
        let unk36 = data.read_u32()?;
        let active_state = data.read_u32()?;
        let one044 = data.read_u32()?;
        let directional = data.read_u32()?;
        let saturated = data.read_u32()?;
        let subdivide = data.read_u32()?;
        let static_ = data.read_u32()?;
        let at_index = data.read_i32()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;
        let at_rx = data.read_f32()?;
        let at_ry = data.read_f32()?;
        let at_rz = data.read_f32()?;
        let range_min = data.read_f32()?;
        let range_max = data.read_f32()?;
        let color_r = data.read_f32()?;
        let color_g = data.read_f32()?;
        let color_b = data.read_f32()?;
        let ambient = data.read_f32()?;
        let diffuse = data.read_f32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;

        let expected_name = anim_def.light_from_index(index as i32, prev + 32)?;
        assert_eq("index name", expected_name.as_str(), name.as_str(), prev + 32)?;

        assert_in("active state", &[0, 1], active_state, prev + 40)?;
        assert_eq("field 044", 1, one044, prev + 44)?;
        assert_in("directional", &[0, 1], directional, prev + 48)?;
        assert_in("saturated", &[0, 1], saturated, prev + 52)?;
        assert_in("subdivide", &[0, 1], subdivide, prev + 56)?;
        assert_in("static", &[0, 1], static_, prev + 60)?;

        let at_node = at_node_rotated_from_index(anim_def, at_index, [at_tx, at_ty, at_tz], [at_rx, at_ry, at_rz], prev + 64)?;

        assert_ge("range min", 0.0, range_min, prev + 92)?;
        assert_ge("range max", range_min, range_max, prev + 96)?;

        assert_between("red", 0.0, 1.0, color_r, prev + 100)?;
        assert_between("green", 0.0, 1.0, color_g, prev + 104)?;
        assert_between("blue", 0.0, 1.0, color_b, prev + 108)?;

        assert_between("ambient", 0.0, 1.0, ambient, prev + 112)?;
        assert_between("diffuse", 0.0, 1.0, diffuse, prev + 116)?;

        Ok(Self {
            name,
            active_state: active_state == 1,
            at_node,
            range: (range_min, range_max),
            color: [color_r, color_g, color_b],
            ambient,
            diffuse,
            subdivide: subdivide == 1,
            saturated: saturated == 1,
            directional: directional == 1,
            static_: static_ == 1,
            unk36,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation, rotation) = at_node_rotated_to_index(anim_def, &self.at_node)?;

        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_u32(anim_def.light_to_index(&self.name)? as u32)?;
        buffer.write_u32(self.unk36)?;
        buffer.write_u32(u32::from(self.active_state))?;
        buffer.write_u32(1)?;
        buffer.write_u32(u32::from(self.directional))?;
        buffer.write_u32(u32::from(self.saturated))?;
        buffer.write_u32(u32::from(self.subdivide))?;
        buffer.write_u32(u32::from(self.static_))?;
        buffer.write_i32(at_index)?;
        for value in translation {
            buffer.write_f32(value)?;
        }
        for value in rotation {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(self.range.0)?;
        buffer.write_f32(self.range.1)?;
        for value in self.color {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(self.ambient)?;
        buffer.write_f32(self.diffuse)
    }
}

impl LightAnimation {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, _anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let unk32 = data.read_i32()?;
        let range_min = data.read_f32()?;
        let range_max = data.read_f32()?;
        let zero44 = data.read_f32()?;
        let zero48 = data.read_f32()?;
        let zero52 = data.read_f32()?;
        let zero56 = data.read_f32()?;
        let color_r = data.read_f32()?;
        let color_g = data.read_f32()?;
        let color_b = data.read_f32()?;
        let zero72 = data.read_f32()?;
        let zero76 = data.read_f32()?;
        let zero80 = data.read_f32()?;
        let zero84 = data.read_f32()?;
        let zero88 = data.read_f32()?;
        let zero92 = data.read_f32()?;
        let run_time = data.read_f32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;
        assert_in("field 32", &[1, 2, 3, 4], unk32, prev + 32)?;

        if range_min >= 0.0 {
            assert_ge("range max", range_min, range_max, prev + 40)?;
        } else {
            assert_lt("range max", range_min, range_max, prev + 40)?;
        }

        assert_eq("field 44", 0.0, zero44, prev + 44)?;
        assert_eq("field 48", 0.0, zero48, prev + 48)?;
        assert_eq("field 52", 0.0, zero52, prev + 52)?;
        assert_eq("field 56", 0.0, zero56, prev + 56)?;

        assert_between("red", -5.0, 5.0, color_r, prev + 60)?;
        assert_between("green", -5.0, 5.0, color_g, prev + 64)?;
        assert_between("blue", -5.0, 5.0, color_b, prev + 68)?;

        assert_eq("field 72", 0.0, zero72, prev + 72)?;
        assert_eq("field 76", 0.0, zero76, prev + 76)?;
        assert_eq("field 80", 0.0, zero80, prev + 80)?;
        assert_eq("field 84", 0.0, zero84, prev + 84)?;
        assert_eq("field 88", 0.0, zero88, prev + 88)?;
        assert_eq("field 92", 0.0, zero92, prev + 92)?;

        assert_gt("run time", 0.0, run_time, prev + 96)?;

        Ok(Self {
            name,
            range: (range_min, range_max),
            color: [color_r, color_g, color_b],
            run_time,
            unk32,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_i32(self.unk32)?;
        buffer.write_f32(self.range.0)?;
        buffer.write_f32(self.range.1)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        for value in self.color {
            buffer.write_f32(value)?;
        }
        for _ in 0..6 {
            buffer.write_f32(0.0)?;
        }
        buffer.write_f32(self.run_time)
    }
}
