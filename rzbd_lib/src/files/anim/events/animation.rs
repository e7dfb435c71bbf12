//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Events that call into other animations.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

use super::{at_node_rotated_from_index, at_node_rotated_to_index, AtNodeRotated};

/// Payload size of CALL_ANIMATION.
pub const CALL_ANIMATION_SIZE: u32 = 68;

/// Payload size of STOP/RESET/INVALIDATE_ANIMATION.
pub const ANIMATION_SIZE: u32 = 36;

/// Size of the name fields.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// CALL_ANIMATION: start another animation, optionally at a node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct CallAnimation {
    pub name: String,
    pub flag: u16,
    pub unk34: u32,
    pub unk38: u16,
    pub at_node: Option<AtNodeRotated>,
}

/// STOP_ANIMATION: stop a running animation.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct StopAnimation {
    pub name: String,
}

/// RESET_ANIMATION: reset an animation to its initial state.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResetAnimation {
    pub name: String,
}

/// INVALIDATE_ANIMATION: drop an animation's cached state.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct InvalidateAnimation {
    pub name: String,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl CallAnimation {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let flag = data.read_u16()?;
        let unk34 = data.read_u32()?;
        let unk38 = data.read_u16()?;
        let at_index = data.read_i32()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;
        let at_rx = data.read_f32()?;
        let at_ry = data.read_f32()?;
        let at_rz = data.read_f32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;
        assert_in("flag", &[0, 1, 3, 7, 8, 10, 16], flag, prev + 32)?;

        let at_node = at_node_rotated_from_index(anim_def, at_index, [at_tx, at_ty, at_tz], [at_rx, at_ry, at_rz], prev + 40)?;

        Ok(Self {
            name,
            flag,
            unk34,
            unk38,
            at_node,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation, rotation) = at_node_rotated_to_index(anim_def, &self.at_node)?;

        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_u16(self.flag)?;
        buffer.write_u32(self.unk34)?;
        buffer.write_u16(self.unk38)?;
        buffer.write_i32(at_index)?;
        for value in translation {
            buffer.write_f32(value)?;
        }
        for value in rotation {
            buffer.write_f32(value)?;
        }
        Ok(())
    }
}

fn read_name_sentinel<R: ReadBytes>(data: &mut R, sentinel: i32) -> Result<String> {
    let prev = data.stream_position()?;
    let name_raw = data.read_slice(NAME_SIZE, false)?;
    let actual = data.read_i32()?;

    let name = ascii_zterm_padded("name", &name_raw, prev)?;
    assert_eq("sentinel", sentinel, actual, prev + 32)?;
    Ok(name)
}

fn write_name_sentinel<W: WriteBytes>(buffer: &mut W, name: &str, sentinel: i32) -> Result<()> {
    buffer.write_string_u8_0padded(name, NAME_SIZE)?;
    buffer.write_i32(sentinel)
}

impl StopAnimation {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { name: read_name_sentinel(data, 0)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        write_name_sentinel(buffer, &self.name, 0)
    }
}

impl ResetAnimation {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { name: read_name_sentinel(data, 0)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        write_name_sentinel(buffer, &self.name, 0)
    }
}

impl InvalidateAnimation {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { name: read_name_sentinel(data, 0)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        write_name_sentinel(buffer, &self.name, 0)
    }
}
