//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The weapon detonation event.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

use super::{at_node_from_index, at_node_to_index, AtNode};

/// Payload size of DETONATE_WEAPON.
pub const DETONATE_WEAPON_SIZE: u32 = 24;

/// Size of the weapon name field.
const NAME_SIZE: usize = 10;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// DETONATE_WEAPON: set off a weapon effect, optionally at a node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetonateWeapon {
    pub name: String,
    pub at_node: Option<AtNode>,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl DetonateWeapon {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let at_index = data.read_i16()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;
        let at_node = at_node_from_index(anim_def, at_index as i32, [at_tx, at_ty, at_tz], prev + 10)?;

        Ok(Self { name, at_node })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation) = at_node_to_index(anim_def, &self.at_node)?;

        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_i16(at_index as i16)?;
        for value in translation {
            buffer.write_f32(value)?;
        }
        Ok(())
    }
}
