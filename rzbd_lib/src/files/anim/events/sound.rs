//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Sound playback events.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

use super::{at_node_from_index, at_node_to_index, AtNode};

/// Payload size of SOUND.
pub const SOUND_SIZE: u32 = 16;

/// Payload size of SOUND_NODE.
pub const SOUND_NODE_SIZE: u32 = 60;

/// Size of the name field.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// SOUND: play a static sound, optionally at a node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Sound {
    pub name: String,
    pub at_node: Option<AtNode>,
}

/// SOUND_NODE: activate or deactivate a named sound node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SoundNode {
    pub name: String,
    pub active_state: bool,
    pub at_node: Option<AtNode>,
    pub unk36: u32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl Sound {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let index = data.read_u16()?;
        let at_index = data.read_i16()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;

        let name = anim_def.sound_from_index(index as i32, prev)?;
        let at_node = at_node_from_index(anim_def, at_index as i32, [at_tx, at_ty, at_tz], prev + 2)?;

        Ok(Self { name, at_node })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation) = at_node_to_index(anim_def, &self.at_node)?;

        buffer.write_u16(anim_def.sound_to_index(&self.name)? as u16)?;
        buffer.write_i16(at_index as i16)?;
        for value in translation {
            buffer.write_f32(value)?;
        }
        Ok(())
    }
}

impl SoundNode {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let one32 = data.read_u32()?;
        let unk36 = data.read_u32()?;
        let active_state = data.read_u32()?;
        let at_index = data.read_i32()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;

        assert_eq("field 32", 1, one32, prev + 32)?;
        assert_in("field 36", &[0, 2], unk36, prev + 36)?;
        assert_in("active state", &[0, 1], active_state, prev + 40)?;

        let at_node = at_node_from_index(anim_def, at_index, [at_tx, at_ty, at_tz], prev + 44)?;

        Ok(Self {
            name,
            active_state: active_state == 1,
            at_node,
            unk36,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation) = at_node_to_index(anim_def, &self.at_node)?;

        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_u32(1)?;
        buffer.write_u32(self.unk36)?;
        buffer.write_u32(u32::from(self.active_state))?;
        buffer.write_i32(at_index)?;
        for value in translation {
            buffer.write_f32(value)?;
        }
        Ok(())
    }
}
