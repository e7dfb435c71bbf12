//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Control flow events: loops, conditionals, and engine callbacks.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in, AssertionError, AssertOp};
use crate::error::Result;
use crate::files::anim::AnimDef;

/// Payload size of LOOP.
pub const LOOP_SIZE: u32 = 8;

/// Payload size of IF and ELSEIF.
pub const IF_SIZE: u32 = 12;

/// Payload size of CALLBACK.
pub const CALLBACK_SIZE: u32 = 4;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// LOOP: repeat the following events. A count of -1 loops forever.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Loop {
    pub loop_count: i16,
}

/// The left-hand side and value of a conditional.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum Condition {
    RandomWeight(f32),
    PlayerRange(f32),
    AnimationLod(u32),
    HwRender(bool),
    Player1stPerson(bool),
}

/// IF: conditionally run the following events.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct If {
    pub condition: Condition,
}

/// ELSEIF.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Elif {
    pub condition: Condition,
}

/// ELSE. No payload.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Else;

/// ENDIF. No payload.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Endif;

/// CALLBACK: invoke the game's callback with a value. Only valid when the
/// animation definition declares callbacks.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Callback {
    pub value: u32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl Loop {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let prev = data.stream_position()?;

        let start = data.read_u32()?;
        let loop_count = data.read_i16()?;
        let pad = data.read_u16()?;

        assert_eq("field 0", 1, start, prev)?;
        assert_eq("field 6", 0, pad, prev + 6)?;
        Ok(Self { loop_count })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_u32(1)?;
        buffer.write_i16(self.loop_count)?;
        buffer.write_u16(0)
    }
}

impl Condition {

    fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let prev = data.stream_position()?;

        let condition = data.read_u32()?;
        let zero = data.read_u32()?;
        assert_eq("field 4", 0, zero, prev + 4)?;

        match condition {
            1 => Ok(Self::RandomWeight(data.read_f32()?)),
            2 => Ok(Self::PlayerRange(data.read_f32()?)),
            4 => Ok(Self::AnimationLod(data.read_u32()?)),
            32 => {
                let raw = data.read_u32()?;
                assert_in("condition value", &[0, 1], raw, prev + 8)?;
                // The engine treats zero as true here.
                Ok(Self::HwRender(raw == 0))
            }
            64 => {
                let raw = data.read_u32()?;
                assert_in("condition value", &[0, 1], raw, prev + 8)?;
                Ok(Self::Player1stPerson(raw == 0))
            }
            _ => Err(AssertionError::new("condition", AssertOp::In, "[1, 2, 4, 32, 64]".to_owned(), condition.to_string(), prev).into()),
        }
    }

    fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        match self {
            Self::RandomWeight(value) => {
                buffer.write_u32(1)?;
                buffer.write_u32(0)?;
                buffer.write_f32(*value)
            }
            Self::PlayerRange(value) => {
                buffer.write_u32(2)?;
                buffer.write_u32(0)?;
                buffer.write_f32(*value)
            }
            Self::AnimationLod(value) => {
                buffer.write_u32(4)?;
                buffer.write_u32(0)?;
                buffer.write_u32(*value)
            }
            Self::HwRender(value) => {
                buffer.write_u32(32)?;
                buffer.write_u32(0)?;
                buffer.write_u32(u32::from(!*value))
            }
            Self::Player1stPerson(value) => {
                buffer.write_u32(64)?;
                buffer.write_u32(0)?;
                buffer.write_u32(u32::from(!*value))
            }
        }
    }
}

impl If {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { condition: Condition::read(data)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        self.condition.write(buffer)
    }
}

impl Elif {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { condition: Condition::read(data)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        self.condition.write(buffer)
    }
}

impl Callback {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;
        assert_eq("has callback", true, *anim_def.has_callback(), prev)?;
        Ok(Self { value: data.read_u32()? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_u32(self.value)
    }
}
