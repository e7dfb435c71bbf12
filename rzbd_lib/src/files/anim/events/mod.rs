//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the event opcodes of animation scripts.
//!
//! Every opcode is a variant of [`EventData`], dispatched by numeric id
//! through one match. Registration is data, not control flow: the id, the
//! payload size, and the codec of each opcode live together in this module
//! tree. An unrecognized opcode is a hard parse failure.
//!
//! # Event Structure
//!
//! | Bytes | Type | Data                                                |
//! | ----- | ---- | --------------------------------------------------- |
//! | 1     | u8   | Opcode.                                             |
//! | 1     | u8   | Start offset kind, 1-3.                             |
//! | 2     | u16  | 0.                                                  |
//! | 4     | u32  | Total size, including these 12 bytes.               |
//! | 4     | f32  | Start time.                                         |
//! | *     | *    | Opcode-specific payload of `size - 12` bytes.       |

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in, AssertionError, AssertOp};
use crate::error::Result;

use super::AnimDef;

pub mod animation;
pub mod control_flow;
pub mod detonate_weapon;
pub mod fog;
pub mod frame_buffer_effects;
pub mod light;
pub mod object_motion;
pub mod object_motion_si_script;
pub mod object_state;
pub mod puffer;
pub mod sequence;
pub mod sound;

/// Size of the event header.
pub const EVENT_HEADER_SIZE: u32 = 12;

/// The node index sentinel denoting the animation's input node.
pub const INPUT_NODE_INDEX: i32 = -200;

/// The name the input node sentinel resolves to.
pub const INPUT_NODE: &str = "INPUT_NODE";

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// What an event's start time is relative to.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum StartOffset {
    #[default]
    Unset,
    Animation,
    Sequence,
    Event,
}

impl StartOffset {

    fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Animation),
            2 => Some(Self::Sequence),
            3 => Some(Self::Event),
            _ => None,
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            // Unset is written back as Animation with a zero start time.
            Self::Unset | Self::Animation => 1,
            Self::Sequence => 2,
            Self::Event => 3,
        }
    }
}

/// A single scripted event.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub data: EventData,
    pub start_offset: StartOffset,
    pub start_time: f32,
}

/// A node reference with a translation, used by events that happen "at" a
/// node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct AtNode {
    pub node: String,
    pub translation: [f32; 3],
}

/// A node reference with a translation and a rotation.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct AtNodeRotated {
    pub node: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
}

/// Every known event opcode.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum EventData {
    Sound(sound::Sound),
    SoundNode(sound::SoundNode),
    LightState(light::LightState),
    LightAnimation(light::LightAnimation),
    ObjectActiveState(object_state::ObjectActiveState),
    ObjectTranslateState(object_state::ObjectTranslateState),
    ObjectScaleState(object_state::ObjectScaleState),
    ObjectRotateState(object_state::ObjectRotateState),
    ObjectMotion(object_motion::ObjectMotion),
    ObjectMotionFromTo(object_motion::ObjectMotionFromTo),
    ObjectMotionSiScript(object_motion_si_script::ObjectMotionSiScript),
    ObjectOpacityState(object_state::ObjectOpacityState),
    ObjectOpacityFromTo(object_state::ObjectOpacityFromTo),
    ObjectAddChild(object_state::ObjectAddChild),
    ObjectCycleTexture(object_state::ObjectCycleTexture),
    ObjectConnector(object_state::ObjectConnector),
    CallObjectConnector(object_state::CallObjectConnector),
    CallSequence(sequence::CallSequence),
    StopSequence(sequence::StopSequence),
    CallAnimation(animation::CallAnimation),
    StopAnimation(animation::StopAnimation),
    ResetAnimation(animation::ResetAnimation),
    InvalidateAnimation(animation::InvalidateAnimation),
    FogState(fog::FogState),
    Loop(control_flow::Loop),
    If(control_flow::If),
    Else(control_flow::Else),
    Elif(control_flow::Elif),
    Endif(control_flow::Endif),
    Callback(control_flow::Callback),
    FbfxColorFromTo(frame_buffer_effects::FbfxColorFromTo),
    DetonateWeapon(detonate_weapon::DetonateWeapon),
    PufferState(puffer::PufferState),
}

//---------------------------------------------------------------------------//
//                           Implementation of EventData
//---------------------------------------------------------------------------//

impl EventData {

    /// This function returns the numeric opcode of the event.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::Sound(_) => 1,
            Self::SoundNode(_) => 2,
            Self::LightState(_) => 4,
            Self::LightAnimation(_) => 5,
            Self::ObjectActiveState(_) => 6,
            Self::ObjectTranslateState(_) => 7,
            Self::ObjectScaleState(_) => 8,
            Self::ObjectRotateState(_) => 9,
            Self::ObjectMotion(_) => 10,
            Self::ObjectMotionFromTo(_) => 11,
            Self::ObjectMotionSiScript(_) => 12,
            Self::ObjectOpacityState(_) => 13,
            Self::ObjectOpacityFromTo(_) => 14,
            Self::ObjectAddChild(_) => 15,
            Self::ObjectCycleTexture(_) => 17,
            Self::ObjectConnector(_) => 18,
            Self::CallObjectConnector(_) => 19,
            Self::CallSequence(_) => 22,
            Self::StopSequence(_) => 23,
            Self::CallAnimation(_) => 24,
            Self::StopAnimation(_) => 25,
            Self::ResetAnimation(_) => 26,
            Self::InvalidateAnimation(_) => 27,
            Self::FogState(_) => 28,
            Self::Loop(_) => 30,
            Self::If(_) => 31,
            Self::Else(_) => 32,
            Self::Elif(_) => 33,
            Self::Endif(_) => 34,
            Self::Callback(_) => 35,
            Self::FbfxColorFromTo(_) => 36,
            Self::DetonateWeapon(_) => 41,
            Self::PufferState(_) => 42,
        }
    }

    /// This function returns the name the script language uses for the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sound(_) => "SOUND",
            Self::SoundNode(_) => "SOUND_NODE",
            Self::LightState(_) => "LIGHT_STATE",
            Self::LightAnimation(_) => "LIGHT_ANIMATION",
            Self::ObjectActiveState(_) => "OBJECT_ACTIVE_STATE",
            Self::ObjectTranslateState(_) => "OBJECT_TRANSLATE_STATE",
            Self::ObjectScaleState(_) => "OBJECT_SCALE_STATE",
            Self::ObjectRotateState(_) => "OBJECT_ROTATE_STATE",
            Self::ObjectMotion(_) => "OBJECT_MOTION",
            Self::ObjectMotionFromTo(_) => "OBJECT_MOTION_FROM_TO",
            Self::ObjectMotionSiScript(_) => "OBJECT_MOTION_SI_SCRIPT",
            Self::ObjectOpacityState(_) => "OBJECT_OPACITY_STATE",
            Self::ObjectOpacityFromTo(_) => "OBJECT_OPACITY_FROM_TO",
            Self::ObjectAddChild(_) => "OBJECT_ADD_CHILD",
            Self::ObjectCycleTexture(_) => "OBJECT_CYCLE_TEXTURE",
            Self::ObjectConnector(_) => "OBJECT_CONNECTOR",
            Self::CallObjectConnector(_) => "CALL_OBJECT_CONNECTOR",
            Self::CallSequence(_) => "CALL_SEQUENCE",
            Self::StopSequence(_) => "STOP_SEQUENCE",
            Self::CallAnimation(_) => "CALL_ANIMATION",
            Self::StopAnimation(_) => "STOP_ANIMATION",
            Self::ResetAnimation(_) => "RESET_ANIMATION",
            Self::InvalidateAnimation(_) => "INVALIDATE_ANIMATION",
            Self::FogState(_) => "FOG_STATE",
            Self::Loop(_) => "LOOP",
            Self::If(_) => "IF",
            Self::Else(_) => "ELSE",
            Self::Elif(_) => "ELSEIF",
            Self::Endif(_) => "ENDIF",
            Self::Callback(_) => "CALLBACK",
            Self::FbfxColorFromTo(_) => "FBFX_COLOR_FROM_TO",
            Self::DetonateWeapon(_) => "DETONATE_WEAPON",
            Self::PufferState(_) => "PUFFER_STATE",
        }
    }

    /// This function returns the payload size of the event, in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Sound(_) => sound::SOUND_SIZE,
            Self::SoundNode(_) => sound::SOUND_NODE_SIZE,
            Self::LightState(_) => light::LIGHT_STATE_SIZE,
            Self::LightAnimation(_) => light::LIGHT_ANIMATION_SIZE,
            Self::ObjectActiveState(_) => object_state::OBJECT_ACTIVE_STATE_SIZE,
            Self::ObjectTranslateState(_) => object_state::OBJECT_TRANSLATE_STATE_SIZE,
            Self::ObjectScaleState(_) => object_state::OBJECT_SCALE_STATE_SIZE,
            Self::ObjectRotateState(_) => object_state::OBJECT_ROTATE_STATE_SIZE,
            Self::ObjectMotion(_) => object_motion::OBJECT_MOTION_SIZE,
            Self::ObjectMotionFromTo(_) => object_motion::OBJECT_MOTION_FROM_TO_SIZE,
            Self::ObjectMotionSiScript(script) => script.size(),
            Self::ObjectOpacityState(_) => object_state::OBJECT_OPACITY_STATE_SIZE,
            Self::ObjectOpacityFromTo(_) => object_state::OBJECT_OPACITY_FROM_TO_SIZE,
            Self::ObjectAddChild(_) => object_state::OBJECT_ADD_CHILD_SIZE,
            Self::ObjectCycleTexture(_) => object_state::OBJECT_CYCLE_TEXTURE_SIZE,
            Self::ObjectConnector(_) => object_state::OBJECT_CONNECTOR_SIZE,
            Self::CallObjectConnector(_) => object_state::CALL_OBJECT_CONNECTOR_SIZE,
            Self::CallSequence(_) => sequence::SEQUENCE_SIZE,
            Self::StopSequence(_) => sequence::SEQUENCE_SIZE,
            Self::CallAnimation(_) => animation::CALL_ANIMATION_SIZE,
            Self::StopAnimation(_) => animation::ANIMATION_SIZE,
            Self::ResetAnimation(_) => animation::ANIMATION_SIZE,
            Self::InvalidateAnimation(_) => animation::ANIMATION_SIZE,
            Self::FogState(_) => fog::FOG_STATE_SIZE,
            Self::Loop(_) => control_flow::LOOP_SIZE,
            Self::If(_) => control_flow::IF_SIZE,
            Self::Else(_) => 0,
            Self::Elif(_) => control_flow::IF_SIZE,
            Self::Endif(_) => 0,
            Self::Callback(_) => control_flow::CALLBACK_SIZE,
            Self::FbfxColorFromTo(_) => frame_buffer_effects::FBFX_COLOR_FROM_TO_SIZE,
            Self::DetonateWeapon(_) => detonate_weapon::DETONATE_WEAPON_SIZE,
            Self::PufferState(_) => puffer::PUFFER_STATE_SIZE,
        }
    }

    /// This function reads an event payload, dispatching on the opcode.
    pub fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef, opcode: u8, length: u32, offset: u64) -> Result<Self> {
        let event = match opcode {
            1 => Self::Sound(sound::Sound::read(data, anim_def)?),
            2 => Self::SoundNode(sound::SoundNode::read(data, anim_def)?),
            4 => Self::LightState(light::LightState::read(data, anim_def)?),
            5 => Self::LightAnimation(light::LightAnimation::read(data, anim_def)?),
            6 => Self::ObjectActiveState(object_state::ObjectActiveState::read(data, anim_def)?),
            7 => Self::ObjectTranslateState(object_state::ObjectTranslateState::read(data, anim_def)?),
            8 => Self::ObjectScaleState(object_state::ObjectScaleState::read(data, anim_def)?),
            9 => Self::ObjectRotateState(object_state::ObjectRotateState::read(data, anim_def)?),
            10 => Self::ObjectMotion(object_motion::ObjectMotion::read(data, anim_def)?),
            11 => Self::ObjectMotionFromTo(object_motion::ObjectMotionFromTo::read(data, anim_def)?),
            12 => Self::ObjectMotionSiScript(object_motion_si_script::ObjectMotionSiScript::read(data, length)?),
            13 => Self::ObjectOpacityState(object_state::ObjectOpacityState::read(data, anim_def)?),
            14 => Self::ObjectOpacityFromTo(object_state::ObjectOpacityFromTo::read(data, anim_def)?),
            15 => Self::ObjectAddChild(object_state::ObjectAddChild::read(data, anim_def)?),
            17 => Self::ObjectCycleTexture(object_state::ObjectCycleTexture::read(data, anim_def)?),
            18 => Self::ObjectConnector(object_state::ObjectConnector::read(data, anim_def)?),
            19 => Self::CallObjectConnector(object_state::CallObjectConnector::read(data, anim_def)?),
            22 => Self::CallSequence(sequence::CallSequence::read(data)?),
            23 => Self::StopSequence(sequence::StopSequence::read(data)?),
            24 => Self::CallAnimation(animation::CallAnimation::read(data, anim_def)?),
            25 => Self::StopAnimation(animation::StopAnimation::read(data)?),
            26 => Self::ResetAnimation(animation::ResetAnimation::read(data)?),
            27 => Self::InvalidateAnimation(animation::InvalidateAnimation::read(data)?),
            28 => Self::FogState(fog::FogState::read(data)?),
            30 => Self::Loop(control_flow::Loop::read(data)?),
            31 => Self::If(control_flow::If::read(data)?),
            32 => Self::Else(control_flow::Else),
            33 => Self::Elif(control_flow::Elif::read(data)?),
            34 => Self::Endif(control_flow::Endif),
            35 => Self::Callback(control_flow::Callback::read(data, anim_def)?),
            36 => Self::FbfxColorFromTo(frame_buffer_effects::FbfxColorFromTo::read(data)?),
            41 => Self::DetonateWeapon(detonate_weapon::DetonateWeapon::read(data, anim_def)?),
            42 => Self::PufferState(puffer::PufferState::read(data, anim_def)?),
            _ => {
                return Err(AssertionError::new("event type", AssertOp::In, "a known opcode".to_owned(), opcode.to_string(), offset).into());
            }
        };

        assert_eq(event.name(), event.size(), length, offset + 4)?;
        Ok(event)
    }

    /// This function writes an event payload.
    pub fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        match self {
            Self::Sound(event) => event.write(buffer, anim_def),
            Self::SoundNode(event) => event.write(buffer, anim_def),
            Self::LightState(event) => event.write(buffer, anim_def),
            Self::LightAnimation(event) => event.write(buffer),
            Self::ObjectActiveState(event) => event.write(buffer, anim_def),
            Self::ObjectTranslateState(event) => event.write(buffer, anim_def),
            Self::ObjectScaleState(event) => event.write(buffer, anim_def),
            Self::ObjectRotateState(event) => event.write(buffer, anim_def),
            Self::ObjectMotion(event) => event.write(buffer, anim_def),
            Self::ObjectMotionFromTo(event) => event.write(buffer, anim_def),
            Self::ObjectMotionSiScript(event) => event.write(buffer),
            Self::ObjectOpacityState(event) => event.write(buffer, anim_def),
            Self::ObjectOpacityFromTo(event) => event.write(buffer, anim_def),
            Self::ObjectAddChild(event) => event.write(buffer, anim_def),
            Self::ObjectCycleTexture(event) => event.write(buffer, anim_def),
            Self::ObjectConnector(event) => event.write(buffer, anim_def),
            Self::CallObjectConnector(event) => event.write(buffer, anim_def),
            Self::CallSequence(event) => event.write(buffer),
            Self::StopSequence(event) => event.write(buffer),
            Self::CallAnimation(event) => event.write(buffer, anim_def),
            Self::StopAnimation(event) => event.write(buffer),
            Self::ResetAnimation(event) => event.write(buffer),
            Self::InvalidateAnimation(event) => event.write(buffer),
            Self::FogState(event) => event.write(buffer),
            Self::Loop(event) => event.write(buffer),
            Self::If(event) => event.write(buffer),
            Self::Else(_) => Ok(()),
            Self::Elif(event) => event.write(buffer),
            Self::Endif(_) => Ok(()),
            Self::Callback(event) => event.write(buffer),
            Self::FbfxColorFromTo(event) => event.write(buffer),
            Self::DetonateWeapon(event) => event.write(buffer, anim_def),
            Self::PufferState(event) => event.write(buffer, anim_def),
        }
    }
}

//---------------------------------------------------------------------------//
//                              At-node helpers
//---------------------------------------------------------------------------//

/// This function resolves an at-node index plus translation into an [`AtNode`].
///
/// An index of 0 means no node, and then the translation must be zero so
/// nothing is lost on the round trip.
pub(crate) fn at_node_from_index(anim_def: &AnimDef, index: i32, translation: [f32; 3], offset: u64) -> Result<Option<AtNode>> {
    if index == 0 {
        assert_eq("at node translation", [0.0; 3], translation, offset)?;
        return Ok(None);
    }

    let node = anim_def.node_or_input_from_index(index, offset)?;
    Ok(Some(AtNode { node, translation }))
}

pub(crate) fn at_node_to_index(anim_def: &AnimDef, at_node: &Option<AtNode>) -> Result<(i32, [f32; 3])> {
    match at_node {
        None => Ok((0, [0.0; 3])),
        Some(at_node) => Ok((anim_def.node_or_input_to_index(&at_node.node)?, at_node.translation)),
    }
}

/// This function resolves an at-node index plus translation and rotation into an
/// [`AtNodeRotated`].
pub(crate) fn at_node_rotated_from_index(anim_def: &AnimDef, index: i32, translation: [f32; 3], rotation: [f32; 3], offset: u64) -> Result<Option<AtNodeRotated>> {
    if index == 0 {
        assert_eq("at node translation", [0.0; 3], translation, offset)?;
        assert_eq("at node rotation", [0.0; 3], rotation, offset)?;
        return Ok(None);
    }

    let node = anim_def.node_or_input_from_index(index, offset)?;
    Ok(Some(AtNodeRotated { node, translation, rotation }))
}

pub(crate) fn at_node_rotated_to_index(anim_def: &AnimDef, at_node: &Option<AtNodeRotated>) -> Result<(i32, [f32; 3], [f32; 3])> {
    match at_node {
        None => Ok((0, [0.0; 3], [0.0; 3])),
        Some(at_node) => Ok((anim_def.node_or_input_to_index(&at_node.node)?, at_node.translation, at_node.rotation)),
    }
}

//---------------------------------------------------------------------------//
//                              Event codec
//---------------------------------------------------------------------------//

impl Event {

    /// This function reads one event, header and payload.
    pub fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let opcode = data.read_u8()?;
        let start_offset_raw = data.read_u8()?;
        let pad = data.read_u16()?;
        let size = data.read_u32()?;
        let start_time = data.read_f32()?;

        assert_in("start offset", &[1, 2, 3], start_offset_raw, prev + 1)?;
        assert_eq("field 02", 0, pad, prev + 2)?;

        let mut start_offset = StartOffset::from_u8(start_offset_raw)
            .ok_or_else(|| AssertionError::new("start offset", AssertOp::In, "[1, 2, 3]".to_owned(), start_offset_raw.to_string(), prev + 1))?;

        if start_time == 0.0 {
            assert_eq("start offset", StartOffset::Animation, start_offset, prev + 1)?;
            start_offset = StartOffset::Unset;
        }

        let length = size.checked_sub(EVENT_HEADER_SIZE)
            .ok_or_else(|| AssertionError::new("event size", AssertOp::Ge, EVENT_HEADER_SIZE.to_string(), size.to_string(), prev + 4))?;

        let data = EventData::read(data, anim_def, opcode, length, prev)?;

        Ok(Self {
            data,
            start_offset,
            start_time,
        })
    }

    /// This function writes one event, header and payload.
    pub fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u8(self.data.opcode())?;
        buffer.write_u8(self.start_offset.to_u8())?;
        buffer.write_u16(0)?;
        buffer.write_u32(self.data.size() + EVENT_HEADER_SIZE)?;
        buffer.write_f32(self.start_time)?;
        self.data.write(buffer, anim_def)
    }

    /// This function returns the encoded size of the event, in bytes.
    pub fn size(&self) -> u32 {
        self.data.size() + EVENT_HEADER_SIZE
    }
}
