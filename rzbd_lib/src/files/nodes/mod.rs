//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the scene-graph node codecs shared by the mechlib and GameZ
//! files: the 208-byte node info record, and the typed node bodies.
//!
//! # Node Info Structure (208 bytes)
//!
//! | Offset | Type     | Data                                             |
//! | ------ | -------- | ------------------------------------------------ |
//! | 0      | name[36] | Node name, over the `Default_node_name` template.|
//! | 36     | u32      | Flag bitfield.                                   |
//! | 40     | u32      | 0.                                               |
//! | 44     | u32      | Unknown small integer.                           |
//! | 48     | u32      | Zone id.                                         |
//! | 52     | u32      | Node type.                                       |
//! | 56     | u32      | Data pointer.                                    |
//! | 60     | i32      | Mesh index (GameZ) or mesh pointer (mechlib).    |
//! | 64..76 | u32      | Environment data (0), action priority (1), action callback (0). |
//! | 76, 80 | i32      | Area partition x/y.                              |
//! | 84..100| u32      | Parent count/pointer, children count/pointer.    |
//! | 100..116 | u32    | 0.                                               |
//! | 116..188 | f32    | Three 6-float blocks. Semantics unknown.         |
//! | 188..208 | u32    | 0, 0, unknown (0 or 160), 0, 0.                  |

use bitflags::bitflags;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_flags, AssertionError, AssertOp};
use crate::error::Result;
use crate::utils::{ascii_zterm_node_name, pack_node_name};

pub mod camera;
pub mod display;
pub mod light;
pub mod lod;
pub mod object3d;
pub mod window;
pub mod world;

#[cfg(test)] mod nodes_test;

/// Size of a node info record.
pub const NODE_INFO_SIZE: u64 = 208;

/// Size of the node name field.
pub const NODE_NAME_SIZE: usize = 36;

/// The zone id used by nodes not assigned to a zone.
pub const ZONE_DEFAULT: u32 = 255;

/// The three 6-float blocks of most fixed nodes are all zero.
pub const BLOCK_EMPTY: [f32; 6] = [0.0; 6];

/// The first block of the sunlight node is fixed.
pub const BLOCK_LIGHT: [f32; 6] = [1.0, 1.0, -2.0, 2.0, 2.0, -1.0];

bitflags! {

    /// This represents the bitmasks a node can have applied to its flag field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NodeFlags: u32 {
        const ACTIVE            = 1 << 2;
        const ALTITUDE_SURFACE  = 1 << 3;
        const INTERSECT_SURFACE = 1 << 4;
        const INTERSECT_BBOX    = 1 << 5;
        const LANDMARK          = 1 << 7;
        const UNK08             = 1 << 8;
        const HAS_MESH          = 1 << 9;
        const UNK10             = 1 << 10;
        const UNK15             = 1 << 15;
        const CAN_MODIFY        = 1 << 16;
        const CLIP_TO           = 1 << 17;
        const TREE_VALID        = 1 << 19;
        const ID_ZONE_CHECK     = 1 << 24;
        const UNK25             = 1 << 25;
        const UNK28             = 1 << 28;
    }
}

impl NodeFlags {

    /// Bits set on every node.
    pub fn base() -> Self {
        Self::ACTIVE | Self::TREE_VALID | Self::ID_ZONE_CHECK
    }

    /// Bits set on the fixed nodes (world, window, camera, display, light).
    pub fn default_flags() -> Self {
        Self::base() | Self::ALTITUDE_SURFACE | Self::INTERSECT_SURFACE
    }
}

/// The node variants the engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Empty,
    Camera,
    World,
    Window,
    Display,
    Object3d,
    Lod,
    Light,
}

impl NodeType {

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Camera),
            2 => Some(Self::World),
            3 => Some(Self::Window),
            4 => Some(Self::Display),
            5 => Some(Self::Object3d),
            6 => Some(Self::Lod),
            9 => Some(Self::Light),
            _ => None,
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Camera => 1,
            Self::World => 2,
            Self::Window => 3,
            Self::Display => 4,
            Self::Object3d => 5,
            Self::Lod => 6,
            Self::Light => 9,
        }
    }

    /// The value of the field at offset 196 is fixed per node type.
    pub fn unk196(self) -> u32 {
        match self {
            Self::Empty | Self::Object3d | Self::Lod => 160,
            _ => 0,
        }
    }
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The decoded fields of a node info record, shared by all node variants.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub flags: NodeFlags,
    pub unk044: u32,
    pub zone_id: u32,
    pub node_type: NodeType,
    pub data_ptr: u32,
    pub mesh_index: i32,
    pub area_partition_x: i32,
    pub area_partition_y: i32,
    pub parent_count: u32,
    pub parent_array_ptr: u32,
    pub children_count: u32,
    pub children_array_ptr: u32,
    pub block1: [f32; 6],
    pub block2: [f32; 6],
    pub block3: [f32; 6],
    pub unk196: u32,
}

//---------------------------------------------------------------------------//
//                            Node info codec
//---------------------------------------------------------------------------//

fn read_block<R: ReadBytes>(data: &mut R) -> Result<[f32; 6]> {
    let mut block = [0.0; 6];
    for value in &mut block {
        *value = data.read_f32()?;
    }
    Ok(block)
}

fn write_block<W: WriteBytes>(buffer: &mut W, block: &[f32; 6]) -> Result<()> {
    for value in block {
        buffer.write_f32(*value)?;
    }
    Ok(())
}

/// This function reads a node info record, checking the invariants every node type shares.
/// Type-specific invariants are the caller's business.
pub fn read_node_info<R: ReadBytes>(data: &mut R) -> Result<NodeInfo> {
    let prev = data.stream_position()?;

    let name_raw = data.read_slice(NODE_NAME_SIZE, false)?;
    let flag_raw = data.read_u32()?;
    let zero040 = data.read_u32()?;
    let unk044 = data.read_u32()?;
    let zone_id = data.read_u32()?;
    let node_type_raw = data.read_u32()?;
    let data_ptr = data.read_u32()?;
    let mesh_index = data.read_i32()?;
    let environment_data = data.read_u32()?;
    let action_priority = data.read_u32()?;
    let action_callback = data.read_u32()?;
    let area_partition_x = data.read_i32()?;
    let area_partition_y = data.read_i32()?;
    let parent_count = data.read_u32()?;
    let parent_array_ptr = data.read_u32()?;
    let children_count = data.read_u32()?;
    let children_array_ptr = data.read_u32()?;
    let zero100 = data.read_u32()?;
    let zero104 = data.read_u32()?;
    let zero108 = data.read_u32()?;
    let zero112 = data.read_u32()?;
    let block1 = read_block(data)?;
    let block2 = read_block(data)?;
    let block3 = read_block(data)?;
    let zero188 = data.read_u32()?;
    let zero192 = data.read_u32()?;
    let unk196 = data.read_u32()?;
    let zero200 = data.read_u32()?;
    let zero204 = data.read_u32()?;

    let name = ascii_zterm_node_name("name", &name_raw, prev)?;
    let flags: NodeFlags = assert_flags("flag", flag_raw, prev + 36)?;

    assert_eq("field 040", 0, zero040, prev + 40)?;

    let node_type = NodeType::from_u32(node_type_raw)
        .ok_or_else(|| AssertionError::new("node type", AssertOp::Flags, "a known node type".to_owned(), node_type_raw.to_string(), prev + 52))?;

    assert_eq("env data", 0, environment_data, prev + 64)?;
    assert_eq("action prio", 1, action_priority, prev + 68)?;
    assert_eq("action cb", 0, action_callback, prev + 72)?;

    assert_eq("field 100", 0, zero100, prev + 100)?;
    assert_eq("field 104", 0, zero104, prev + 104)?;
    assert_eq("field 108", 0, zero108, prev + 108)?;
    assert_eq("field 112", 0, zero112, prev + 112)?;

    assert_eq("field 188", 0, zero188, prev + 188)?;
    assert_eq("field 192", 0, zero192, prev + 192)?;
    assert_eq("field 200", 0, zero200, prev + 200)?;
    assert_eq("field 204", 0, zero204, prev + 204)?;

    Ok(NodeInfo {
        name,
        flags,
        unk044,
        zone_id,
        node_type,
        data_ptr,
        mesh_index,
        area_partition_x,
        area_partition_y,
        parent_count,
        parent_array_ptr,
        children_count,
        children_array_ptr,
        block1,
        block2,
        block3,
        unk196,
    })
}

/// This function writes a node info record.
pub fn write_node_info<W: WriteBytes>(buffer: &mut W, info: &NodeInfo) -> Result<()> {
    let name_raw = pack_node_name(&info.name, NODE_NAME_SIZE)?;
    buffer.write_all(&name_raw)?;

    buffer.write_u32(info.flags.bits())?;
    buffer.write_u32(0)?;
    buffer.write_u32(info.unk044)?;
    buffer.write_u32(info.zone_id)?;
    buffer.write_u32(info.node_type.to_u32())?;
    buffer.write_u32(info.data_ptr)?;
    buffer.write_i32(info.mesh_index)?;
    buffer.write_u32(0)?;
    buffer.write_u32(1)?;
    buffer.write_u32(0)?;
    buffer.write_i32(info.area_partition_x)?;
    buffer.write_i32(info.area_partition_y)?;
    buffer.write_u32(info.parent_count)?;
    buffer.write_u32(info.parent_array_ptr)?;
    buffer.write_u32(info.children_count)?;
    buffer.write_u32(info.children_array_ptr)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    write_block(buffer, &info.block1)?;
    write_block(buffer, &info.block2)?;
    write_block(buffer, &info.block3)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(info.node_type.unk196())?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    Ok(())
}
