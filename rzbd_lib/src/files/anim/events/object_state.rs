//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Events that set the immediate state of a node: activation, transform,
//! opacity, hierarchy, textures, and connectors.
//!
//! Rotations stay in radians, exactly as stored on the wire. Converting to
//! degrees and back is not bit-exact.

use serde_derive::{Deserialize, Serialize};

use std::f32::consts::TAU;

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_ge, assert_gt, assert_in};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

pub const OBJECT_ACTIVE_STATE_SIZE: u32 = 8;
pub const OBJECT_TRANSLATE_STATE_SIZE: u32 = 20;
pub const OBJECT_SCALE_STATE_SIZE: u32 = 16;
pub const OBJECT_ROTATE_STATE_SIZE: u32 = 20;
pub const OBJECT_OPACITY_STATE_SIZE: u32 = 12;
pub const OBJECT_OPACITY_FROM_TO_SIZE: u32 = 24;
pub const OBJECT_ADD_CHILD_SIZE: u32 = 4;
pub const OBJECT_CYCLE_TEXTURE_SIZE: u32 = 8;
pub const OBJECT_CONNECTOR_SIZE: u32 = 76;
pub const CALL_OBJECT_CONNECTOR_SIZE: u32 = 68;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// OBJECT_ACTIVE_STATE: activate or deactivate a node.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectActiveState {
    pub node: String,
    pub state: bool,
}

/// OBJECT_TRANSLATE_STATE: set a node's translation.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectTranslateState {
    pub node: String,
    pub state: [f32; 3],
}

/// OBJECT_SCALE_STATE: set a node's scale.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectScaleState {
    pub node: String,
    pub state: [f32; 3],
}

/// OBJECT_ROTATE_STATE: set a node's rotation, in radians.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectRotateState {
    pub node: String,
    pub state: [f32; 3],
    pub at_node_matrix: u32,
}

/// OBJECT_OPACITY_STATE: set a node's opacity.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectOpacityState {
    pub node: String,
    pub state: bool,
    pub opacity: f32,
    pub unk00: u16,
}

/// OBJECT_OPACITY_FROM_TO: fade a node's opacity over time.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectOpacityFromTo {
    pub node: String,
    pub opacity_from: (f32, i16),
    pub opacity_to: (f32, i16),
    pub run_time: f32,

    /// Roughly `(to - from) / run_time`, preserved verbatim.
    pub delta: f32,
}

/// OBJECT_ADD_CHILD: attach one node to another.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectAddChild {
    pub parent: String,
    pub child: String,
}

/// OBJECT_CYCLE_TEXTURE: advance a node's cycled texture.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectCycleTexture {
    pub node: String,
    pub reset: u16,
}

/// OBJECT_CONNECTOR: stretch a connector between two nodes or positions.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectConnector {
    pub node: String,
    pub from_node: String,
    pub to_node: String,
    pub from_pos: [f32; 3],
    pub to_pos: [f32; 3],
    pub max_length: f32,
    pub unk00: u16,
}

/// CALL_OBJECT_CONNECTOR: invoke a connector by name.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct CallObjectConnector {
    pub node: String,
    pub from_node: String,
    pub to_pos: [f32; 3],
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl ObjectActiveState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let state = data.read_u32()?;
        let index = data.read_u32()?;

        assert_in("state", &[0, 1], state, prev)?;
        let node = anim_def.node_from_index(index as i32, prev + 4)?;
        Ok(Self { node, state: state == 1 })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u32(u32::from(self.state))?;
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)
    }
}

impl ObjectTranslateState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let at_node_matrix = data.read_i32()?;
        let tx = data.read_f32()?;
        let ty = data.read_f32()?;
        let tz = data.read_f32()?;
        let index = data.read_i32()?;

        assert_eq("field 00", 0, at_node_matrix, prev)?;
        let node = anim_def.node_or_input_from_index(index, prev + 16)?;
        Ok(Self { node, state: [tx, ty, tz] })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_i32(0)?;
        for value in self.state {
            buffer.write_f32(value)?;
        }
        buffer.write_i32(anim_def.node_or_input_to_index(&self.node)?)
    }
}

impl ObjectScaleState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let sx = data.read_f32()?;
        let sy = data.read_f32()?;
        let sz = data.read_f32()?;
        let index = data.read_u32()?;

        let node = anim_def.node_from_index(index as i32, prev + 12)?;
        Ok(Self { node, state: [sx, sy, sz] })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        for value in self.state {
            buffer.write_f32(value)?;
        }
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)
    }
}

impl ObjectRotateState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let at_node_matrix = data.read_i32()?;
        let rx = data.read_f32()?;
        let ry = data.read_f32()?;
        let rz = data.read_f32()?;
        let index = data.read_i32()?;

        assert_in("at node matrix", &[0, 2, 4], at_node_matrix, prev)?;
        assert_between("rot x", -TAU, TAU, rx, prev + 4)?;
        assert_between("rot y", -TAU, TAU, ry, prev + 8)?;
        assert_between("rot z", -TAU, TAU, rz, prev + 12)?;

        let node = anim_def.node_or_input_from_index(index, prev + 16)?;
        Ok(Self {
            node,
            state: [rx, ry, rz],
            at_node_matrix: at_node_matrix as u32,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_i32(self.at_node_matrix as i32)?;
        for value in self.state {
            buffer.write_f32(value)?;
        }
        buffer.write_i32(anim_def.node_or_input_to_index(&self.node)?)
    }
}

impl ObjectOpacityState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let unk00 = data.read_u16()?;
        let state = data.read_u16()?;
        let opacity = data.read_f32()?;
        let index = data.read_u32()?;

        assert_in("field 0", &[0, 1], unk00, prev)?;
        assert_in("state", &[0, 1], state, prev + 2)?;
        if state == 1 {
            assert_between("opacity", 0.0, 1.0, opacity, prev + 4)?;
        } else {
            assert_eq("opacity", 0.0, opacity, prev + 4)?;
        }

        let node = anim_def.node_from_index(index as i32, prev + 8)?;
        Ok(Self {
            node,
            state: state == 1,
            opacity,
            unk00,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u16(self.unk00)?;
        buffer.write_u16(u16::from(self.state))?;
        buffer.write_f32(self.opacity)?;
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)
    }
}

impl ObjectOpacityFromTo {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let index = data.read_u32()?;
        let from_state = data.read_i16()?;
        let to_state = data.read_i16()?;
        let from_value = data.read_f32()?;
        let to_value = data.read_f32()?;
        let delta = data.read_f32()?;
        let run_time = data.read_f32()?;

        let node = anim_def.node_from_index(index as i32, prev)?;
        assert_in("from state", &[-1, 0, 1], from_state, prev + 4)?;
        assert_in("to state", &[-1, 0, 1], to_state, prev + 6)?;
        assert_between("from opacity", 0.0, 1.0, from_value, prev + 8)?;
        assert_between("to opacity", 0.0, 1.0, to_value, prev + 12)?;
        assert_gt("run time", 0.0, run_time, prev + 20)?;

        Ok(Self {
            node,
            opacity_from: (from_value, from_state),
            opacity_to: (to_value, to_state),
            run_time,
            delta,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)?;
        buffer.write_i16(self.opacity_from.1)?;
        buffer.write_i16(self.opacity_to.1)?;
        buffer.write_f32(self.opacity_from.0)?;
        buffer.write_f32(self.opacity_to.0)?;
        buffer.write_f32(self.delta)?;
        buffer.write_f32(self.run_time)
    }
}

impl ObjectAddChild {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let parent_index = data.read_u16()?;
        let child_index = data.read_u16()?;

        let parent = anim_def.node_from_index(parent_index as i32, prev)?;
        let child = anim_def.node_from_index(child_index as i32, prev + 2)?;
        Ok(Self { parent, child })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u16(anim_def.node_to_index(&self.parent)? as u16)?;
        buffer.write_u16(anim_def.node_to_index(&self.child)? as u16)
    }
}

impl ObjectCycleTexture {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let one = data.read_u16()?;
        let zero = data.read_u16()?;
        let index = data.read_u16()?;
        let reset = data.read_u16()?;

        // Increment?
        assert_eq("field 0", 1, one, prev)?;
        // Start index?
        assert_eq("field 2", 0, zero, prev + 2)?;
        let node = anim_def.node_from_index(index as i32, prev + 4)?;
        assert_between("reset", 0, 5, reset, prev + 6)?;
        Ok(Self { node, reset })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u16(1)?;
        buffer.write_u16(0)?;
        buffer.write_u16(anim_def.node_to_index(&self.node)? as u16)?;
        buffer.write_u16(self.reset)
    }
}

impl ObjectConnector {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let unk00 = data.read_u16()?;
        let zero02 = data.read_u16()?;
        let index = data.read_u16()?;
        let from_index = data.read_u16()?;
        let to_index = data.read_u16()?;
        let zero10 = data.read_u16()?;
        let from_x = data.read_f32()?;
        let from_y = data.read_f32()?;
        let from_z = data.read_f32()?;
        let to_x = data.read_f32()?;
        let to_y = data.read_f32()?;
        let to_z = data.read_f32()?;
        let zero36 = data.read_f32()?;
        let zero40 = data.read_f32()?;
        let zero44 = data.read_f32()?;
        let zero48 = data.read_f32()?;
        let one52 = data.read_f32()?;
        let one56 = data.read_f32()?;
        let zero60 = data.read_f32()?;
        let zero64 = data.read_f32()?;
        let zero68 = data.read_f32()?;
        let max_length = data.read_f32()?;

        assert_eq("field 02", 0, zero02, prev + 2)?;
        let node = anim_def.node_from_index(index as i32, prev + 4)?;
        let from_node = anim_def.node_or_input_from_index(from_index as i16 as i32, prev + 6)?;
        let to_node = anim_def.node_or_input_from_index(to_index as i16 as i32, prev + 8)?;
        assert_eq("field 10", 0, zero10, prev + 10)?;

        assert_eq("field 36", 0.0, zero36, prev + 36)?;
        assert_eq("field 40", 0.0, zero40, prev + 40)?;
        assert_eq("field 44", 0.0, zero44, prev + 44)?;
        assert_eq("field 48", 0.0, zero48, prev + 48)?;
        assert_eq("field 52", 1.0, one52, prev + 52)?;
        assert_eq("field 56", 1.0, one56, prev + 56)?;
        assert_eq("field 60", 0.0, zero60, prev + 60)?;
        assert_eq("field 64", 0.0, zero64, prev + 64)?;
        assert_eq("field 68", 0.0, zero68, prev + 68)?;
        assert_ge("max length", 0.0, max_length, prev + 72)?;

        Ok(Self {
            node,
            from_node,
            to_node,
            from_pos: [from_x, from_y, from_z],
            to_pos: [to_x, to_y, to_z],
            max_length,
            // This must have something to do with from/to node/pos.
            unk00,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u16(self.unk00)?;
        buffer.write_u16(0)?;
        buffer.write_u16(anim_def.node_to_index(&self.node)? as u16)?;
        buffer.write_u16(anim_def.node_or_input_to_index(&self.from_node)? as u16)?;
        buffer.write_u16(anim_def.node_or_input_to_index(&self.to_node)? as u16)?;
        buffer.write_u16(0)?;
        for value in self.from_pos {
            buffer.write_f32(value)?;
        }
        for value in self.to_pos {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(1.0)?;
        buffer.write_f32(1.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(self.max_length)
    }
}

impl CallObjectConnector {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let two00 = data.read_i8()?;
        let six01 = data.read_i8()?;
        let zero02 = data.read_i16()?;
        let name_raw = data.read_slice(32, false)?;
        let zero36 = data.read_i16()?;
        let mone38 = data.read_i16()?;
        let from_index = data.read_u32()?;
        let zero44 = data.read_f32()?;
        let zero48 = data.read_f32()?;
        let zero52 = data.read_f32()?;
        let to_x = data.read_f32()?;
        let to_y = data.read_f32()?;
        let to_z = data.read_f32()?;

        // These may have something to do with how to call the connector.
        assert_eq("field 00", 2, two00, prev)?;
        assert_eq("field 01", 6, six01, prev + 1)?;
        assert_eq("field 02", 0, zero02, prev + 2)?;

        let name = ascii_zterm_padded("name", &name_raw, prev + 4)?;

        assert_eq("field 36", 0, zero36, prev + 36)?;
        assert_eq("field 38", -1, mone38, prev + 38)?;

        let from_node = anim_def.node_from_index(from_index as i32, prev + 40)?;
        assert_eq("field 44", 0.0, zero44, prev + 44)?;
        assert_eq("field 48", 0.0, zero48, prev + 48)?;
        assert_eq("field 52", 0.0, zero52, prev + 52)?;

        Ok(Self {
            node: name,
            from_node,
            to_pos: [to_x, to_y, to_z],
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_i8(2)?;
        buffer.write_i8(6)?;
        buffer.write_i16(0)?;
        buffer.write_string_u8_0padded(&self.node, 32)?;
        buffer.write_i16(0)?;
        buffer.write_i16(-1)?;
        buffer.write_u32(anim_def.node_to_index(&self.from_node)? as u32)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        for value in self.to_pos {
            buffer.write_f32(value)?;
        }
        Ok(())
    }
}
