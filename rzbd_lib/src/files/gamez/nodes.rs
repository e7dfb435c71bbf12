//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The GameZ node table: a fixed-size array of node info records, each
//! followed by a u32 offset slot, then the typed node bodies in offset
//! order.
//!
//! The table has required positions: index 0 is the `world1` World, index 1
//! the `window1` Window, index 2 the `camera1` Camera, and Display nodes
//! follow from index 3. The free tail records are zeroed and chained by
//! index, ending in 0xFFFFFF. For Empty nodes the offset slot doesn't hold
//! a data offset but a reference into the node array, preserved verbatim.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_between, assert_eq, assert_in, assert_ne};
use crate::error::Result;
use crate::files::nodes::camera::{read_camera, write_camera, Camera, CAMERA_SIZE};
use crate::files::nodes::display::{read_display, write_display, Display, DISPLAY_SIZE};
use crate::files::nodes::light::{read_light, write_light, Light, LIGHT_SIZE};
use crate::files::nodes::lod::{read_lod, write_lod, Lod, LOD_SIZE};
use crate::files::nodes::object3d::{read_object3d, write_object3d, Object3d, OBJECT3D_SIZE};
use crate::files::nodes::window::{read_window, write_window, Window, WINDOW_SIZE};
use crate::files::nodes::world::{read_world, size_world, write_world, World};
use crate::files::nodes::{read_node_info, write_node_info, NodeFlags, NodeInfo, NodeType, BLOCK_EMPTY, BLOCK_LIGHT, NODE_INFO_SIZE, NODE_NAME_SIZE, ZONE_DEFAULT};

/// The index chain terminator of the free tail.
const LAST_FREE_INDEX: u32 = 0xFFFFFF;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A single GameZ node: its info record, its typed body, and its parent and
/// children references.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub info: NodeInfo,

    /// Parent node reference. For Empty nodes, this holds the reference
    /// their offset slot carried instead.
    pub parent: u32,
    pub children: Vec<u32>,
    pub data: NodeData,
}

/// The typed body of a node.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum NodeData {
    Empty,
    Camera(Camera),
    World(World),
    Window(Window),
    Display(Display),
    Object3d(Object3d),
    Lod(Lod),
    Light(Light),
}

//---------------------------------------------------------------------------//
//                         Per-type info invariants
//---------------------------------------------------------------------------//

fn assert_parent_child_arrays(info: &NodeInfo, offset: u64) -> Result<()> {
    if info.parent_count > 0 {
        assert_ne("parent array ptr", 0, info.parent_array_ptr, offset + 88)?;
    } else {
        assert_eq("parent array ptr", 0, info.parent_array_ptr, offset + 88)?;
    }

    if info.children_count > 0 {
        assert_ne("children array ptr", 0, info.children_array_ptr, offset + 96)?;
    } else {
        assert_eq("children array ptr", 0, info.children_array_ptr, offset + 96)?;
    }

    Ok(())
}

fn assert_no_relations(info: &NodeInfo, offset: u64) -> Result<()> {
    assert_eq("area partition x", -1, info.area_partition_x, offset + 76)?;
    assert_eq("area partition y", -1, info.area_partition_y, offset + 80)?;
    assert_eq("parent count", 0, info.parent_count, offset + 84)?;
    assert_eq("parent array ptr", 0, info.parent_array_ptr, offset + 88)?;
    assert_eq("children count", 0, info.children_count, offset + 92)?;
    assert_eq("children array ptr", 0, info.children_array_ptr, offset + 96)?;
    Ok(())
}

fn assert_fixed_node(info: &NodeInfo, offset: u64, name: &str, block1: [f32; 6], unk196: u32) -> Result<()> {
    assert_eq("name", name, info.name.as_str(), offset)?;
    assert_eq("field 044", 0, info.unk044, offset + 44)?;
    assert_eq("zone id", ZONE_DEFAULT, info.zone_id, offset + 48)?;
    assert_ne("data ptr", 0, info.data_ptr, offset + 56)?;
    assert_eq("mesh index", -1, info.mesh_index, offset + 60)?;
    assert_eq("block 1", block1, info.block1, offset + 116)?;
    assert_eq("block 2", BLOCK_EMPTY, info.block2, offset + 140)?;
    assert_eq("block 3", BLOCK_EMPTY, info.block3, offset + 164)?;
    assert_eq("field 196", unk196, info.unk196, offset + 196)?;
    Ok(())
}

/// This function checks the node-type-specific invariants of an info record.
pub fn assert_node_info(info: &NodeInfo, offset: u64, mesh_count: u32) -> Result<()> {
    let flag_base = info.flags & NodeFlags::base();

    match info.node_type {
        NodeType::Empty => {
            // The name varies, and so do the blocks.
            assert_eq("flag base", NodeFlags::base(), flag_base, offset + 36)?;
            assert_in("field 044", &[1, 3, 5, 7], info.unk044, offset + 44)?;
            assert_in("zone id", &[1, ZONE_DEFAULT], info.zone_id, offset + 48)?;
            assert_eq("data ptr", 0, info.data_ptr, offset + 56)?;
            assert_eq("mesh index", -1, info.mesh_index, offset + 60)?;
            assert_no_relations(info, offset)?;
            assert_eq("field 196", 160, info.unk196, offset + 196)?;
        }
        NodeType::Camera => {
            assert_eq("flag", NodeFlags::default_flags(), info.flags, offset + 36)?;
            assert_fixed_node(info, offset, "camera1", BLOCK_EMPTY, 0)?;
            assert_no_relations(info, offset)?;
        }
        NodeType::World => {
            assert_eq("flag", NodeFlags::default_flags(), info.flags, offset + 36)?;
            assert_fixed_node(info, offset, "world1", BLOCK_EMPTY, 0)?;
            assert_eq("area partition x", -1, info.area_partition_x, offset + 76)?;
            assert_eq("area partition y", -1, info.area_partition_y, offset + 80)?;
            assert_eq("parent count", 0, info.parent_count, offset + 84)?;
            assert_eq("parent array ptr", 0, info.parent_array_ptr, offset + 88)?;

            // Must have at least one child. The upper bound is arbitrary.
            assert_between("children count", 1, 64, info.children_count, offset + 92)?;
            assert_ne("children array ptr", 0, info.children_array_ptr, offset + 96)?;
        }
        NodeType::Window => {
            assert_eq("flag", NodeFlags::default_flags(), info.flags, offset + 36)?;
            assert_fixed_node(info, offset, "window1", BLOCK_EMPTY, 0)?;
            assert_no_relations(info, offset)?;
        }
        NodeType::Display => {
            assert_eq("flag", NodeFlags::default_flags(), info.flags, offset + 36)?;
            assert_fixed_node(info, offset, "display", BLOCK_EMPTY, 0)?;
            assert_no_relations(info, offset)?;
        }
        NodeType::Object3d => {
            // The name varies, and so do the blocks.
            assert_eq("flag base", NodeFlags::base(), flag_base, offset + 36)?;
            assert_eq("field 044", 1, info.unk044, offset + 44)?;
            if info.zone_id != ZONE_DEFAULT {
                assert_between("zone id", 1, 80, info.zone_id, offset + 48)?;
            }
            assert_ne("data ptr", 0, info.data_ptr, offset + 56)?;

            if info.flags.contains(NodeFlags::HAS_MESH) {
                assert_between("mesh index", 0, mesh_count as i32, info.mesh_index, offset + 60)?;
            } else {
                assert_eq("mesh index", -1, info.mesh_index, offset + 60)?;
            }

            assert_between("area partition x", -1, 64, info.area_partition_x, offset + 76)?;
            assert_between("area partition y", -1, 64, info.area_partition_y, offset + 80)?;

            // Can only have one parent.
            assert_in("parent count", &[0, 1], info.parent_count, offset + 84)?;
            assert_between("children count", 0, 64, info.children_count, offset + 92)?;
            assert_parent_child_arrays(info, offset)?;

            assert_eq("field 196", 160, info.unk196, offset + 196)?;
        }
        NodeType::Lod => {
            assert_eq("flag base", NodeFlags::base(), flag_base, offset + 36)?;
            assert_eq("field 044", 1, info.unk044, offset + 44)?;
            if info.zone_id != ZONE_DEFAULT {
                assert_between("zone id", 1, 80, info.zone_id, offset + 48)?;
            }
            assert_ne("data ptr", 0, info.data_ptr, offset + 56)?;
            assert_eq("mesh index", -1, info.mesh_index, offset + 60)?;
            assert_between("area partition x", -1, 64, info.area_partition_x, offset + 76)?;
            assert_between("area partition y", -1, 64, info.area_partition_y, offset + 80)?;

            // Must have one parent, and at least one child.
            assert_eq("parent count", 1, info.parent_count, offset + 84)?;
            assert_between("children count", 1, 32, info.children_count, offset + 92)?;
            assert_parent_child_arrays(info, offset)?;

            assert_ne("block 1", BLOCK_EMPTY, info.block1, offset + 116)?;
            assert_eq("block 2", BLOCK_EMPTY, info.block2, offset + 140)?;
            assert_eq("block 3", info.block1, info.block3, offset + 164)?;
            assert_eq("field 196", 160, info.unk196, offset + 196)?;
        }
        NodeType::Light => {
            assert_eq("flag", NodeFlags::default_flags() | NodeFlags::UNK08, info.flags, offset + 36)?;
            assert_fixed_node(info, offset, "sunlight", BLOCK_LIGHT, 0)?;

            // Lights keep an internal parent pointer in their body instead.
            assert_no_relations(info, offset)?;
        }
    }

    Ok(())
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn read_node_infos_zero<R: ReadBytes>(data: &mut R, index: u32, array_size: u32) -> Result<()> {
    for i in index..array_size {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NODE_NAME_SIZE, false)?;
        assert_all_zero("name", &name_raw, prev)?;

        for j in 0..43 {
            let offset = j * 4 + 36;
            if j == 6 {
                let value = data.read_i32()?;
                assert_eq("mesh index", -1, value, prev + offset)?;
            } else {
                let value = data.read_u32()?;
                assert_eq("field", 0, value, prev + offset)?;
            }
        }

        let mut expected_index = i + 1;
        if expected_index == array_size {
            // We'll never know why.
            expected_index = LAST_FREE_INDEX;
        }

        let index_offset = data.stream_position()?;
        let actual_index = data.read_u32()?;
        assert_eq("index", expected_index, actual_index, index_offset)?;
    }

    Ok(())
}

fn read_node_data<R: ReadBytes>(data: &mut R, info: &NodeInfo) -> Result<NodeData> {
    match info.node_type {
        NodeType::Empty => Ok(NodeData::Empty),
        NodeType::Camera => Ok(NodeData::Camera(read_camera(data)?)),
        NodeType::World => Ok(NodeData::World(read_world(data)?)),
        NodeType::Window => Ok(NodeData::Window(read_window(data)?)),
        NodeType::Display => Ok(NodeData::Display(read_display(data)?)),
        NodeType::Object3d => Ok(NodeData::Object3d(read_object3d(data)?)),
        NodeType::Lod => Ok(NodeData::Lod(read_lod(data)?)),
        NodeType::Light => Ok(NodeData::Light(read_light(data)?)),
    }
}

fn write_node_data<W: WriteBytes>(buffer: &mut W, node: &Node) -> Result<()> {
    match &node.data {
        NodeData::Empty => Ok(()),
        NodeData::Camera(camera) => write_camera(buffer, camera),
        NodeData::World(world) => write_world(buffer, world),
        NodeData::Window(window) => write_window(buffer, window),
        NodeData::Display(display) => write_display(buffer, display),
        NodeData::Object3d(object3d) => write_object3d(buffer, object3d),
        NodeData::Lod(lod) => write_lod(buffer, lod),
        NodeData::Light(light) => write_light(buffer, light),
    }
}

fn size_node_data(node: &Node) -> u64 {
    match &node.data {
        NodeData::Empty => 0,
        NodeData::Camera(_) => CAMERA_SIZE,
        NodeData::World(world) => size_world(world),
        NodeData::Window(_) => WINDOW_SIZE,
        NodeData::Display(_) => DISPLAY_SIZE,
        NodeData::Object3d(_) => OBJECT3D_SIZE,
        NodeData::Lod(_) => LOD_SIZE,
        NodeData::Light(_) => LIGHT_SIZE,
    }
}

fn assert_area_partitions(nodes: &[Node]) -> Result<()> {
    let (x_count, y_count) = match nodes.first().map(|node| &node.data) {
        Some(NodeData::World(world)) => (world.virt_partition_x_count as i32, world.virt_partition_y_count as i32),
        _ => {
            return Err(crate::check::AssertionError::new("world node", crate::check::AssertOp::Eq, "a World at index 0".to_owned(), "none".to_owned(), 0u64).into());
        }
    };

    for node in nodes {
        let x = node.info.area_partition_x;
        let y = node.info.area_partition_y;
        if x > -1 && y > -1 {
            assert_between("partition x", 0, x_count, x, node.info.name.as_str())?;
            assert_between("partition y", 0, y_count, y, node.info.name.as_str())?;
        } else {
            assert_eq("partition x", -1, x, node.info.name.as_str())?;
            assert_eq("partition y", -1, y, node.info.name.as_str())?;
        }
    }

    Ok(())
}

/// This function reads the node table and the node bodies.
pub fn read_nodes<R: ReadBytes>(data: &mut R, array_size: u32, mesh_count: u32) -> Result<Vec<Node>> {
    let end_offset = data.stream_position()? + (NODE_INFO_SIZE + 4) * array_size as u64;
    let end_of_file = data.len()?;

    let mut nodes: Vec<(NodeInfo, u32)> = vec![];
    let mut prev_offset = end_offset;
    let mut used = 0;

    // The node count in the header is wildly inaccurate for some files. If
    // the first byte of the name is null, the node is reliably unused.
    for i in 0..array_size {
        let peek = data.read_slice(1, true)?;
        if peek[0] == 0 {
            break;
        }

        let info_offset = data.stream_position()?;
        let info = read_node_info(data)?;
        assert_node_info(&info, info_offset, mesh_count)?;

        match info.node_type {
            NodeType::World => assert_eq("world node pos", 0, i, info_offset)?,
            NodeType::Window => assert_eq("window node pos", 1, i, info_offset)?,
            NodeType::Camera => assert_eq("camera node pos", 2, i, info_offset)?,
            // The Display node is at position 3, but more than one display
            // node is allowed.
            _ => {}
        }

        let offset_pos = data.stream_position()?;
        let offset = data.read_u32()?;

        if info.node_type == NodeType::Empty {
            // For empty nodes, this points to other members of the tree.
            assert_between("empty ref index", 4, array_size, offset, offset_pos)?;
        } else {
            // For other nodes, this is the location of the node data.
            assert_between("node data offset", prev_offset, end_of_file - 1, offset as u64, offset_pos)?;
            prev_offset = offset as u64;
        }

        nodes.push((info, offset));
        used = i + 1;
    }

    read_node_infos_zero(data, used, array_size)?;
    assert_eq("node info end", end_offset, data.stream_position()?, end_offset)?;

    let mut decoded = Vec::with_capacity(nodes.len());
    for (info, offset) in nodes {
        if info.node_type == NodeType::Empty {
            decoded.push(Node {
                parent: offset,
                children: vec![],
                data: NodeData::Empty,
                info,
            });
            continue;
        }

        let data_offset = data.stream_position()?;
        assert_eq("node data offset", offset as u64, data_offset, data_offset)?;

        let node_data = read_node_data(data, &info)?;

        let parent = if info.parent_count > 0 {
            data.read_u32()?
        } else {
            0
        };

        let mut children = Vec::with_capacity(info.children_count as usize);
        for _ in 0..info.children_count {
            children.push(data.read_u32()?);
        }

        decoded.push(Node {
            parent,
            children,
            data: node_data,
            info,
        });
    }

    assert_area_partitions(&decoded)?;
    assert_eq("node data end", end_of_file, data.stream_position()?, end_of_file)?;

    Ok(decoded)
}

/// This function writes the node table and the node bodies. `offset` is the absolute offset
/// of the table itself.
pub fn write_nodes<W: WriteBytes>(buffer: &mut W, array_size: u32, nodes: &[Node], offset: u64) -> Result<()> {
    let node_count = nodes.len() as u32;
    let mut data_offset = offset + (NODE_INFO_SIZE + 4) * array_size as u64;

    for node in nodes {
        write_node_info(buffer, &node.info)?;

        if node.info.node_type == NodeType::Empty {
            buffer.write_u32(node.parent)?;
        } else {
            buffer.write_u32(data_offset as u32)?;
            data_offset += size_node_data(node);
            if node.info.parent_count > 0 {
                data_offset += 4;
            }
            data_offset += 4 * node.info.children_count as u64;
        }
    }

    for i in node_count..array_size {
        buffer.write_all(&[0; NODE_NAME_SIZE])?;
        for j in 0..43 {
            if j == 6 {
                buffer.write_i32(-1)?;
            } else {
                buffer.write_u32(0)?;
            }
        }

        let mut chain = i + 1;
        if chain == array_size {
            chain = LAST_FREE_INDEX;
        }
        buffer.write_u32(chain)?;
    }

    for node in nodes {
        if node.info.node_type == NodeType::Empty {
            continue;
        }

        write_node_data(buffer, node)?;

        if node.info.parent_count > 0 {
            buffer.write_u32(node.parent)?;
        }
        for child in &node.children {
            buffer.write_u32(*child)?;
        }
    }

    Ok(())
}
