//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The mechlib is a ZArchive whose entries are the mech models.
//!
//! Fixed entries: `version` (a single u32, 27), `format` (a single u32, 1),
//! and `materials` (see [`materials`]). Every other entry is a model: a
//! recursive tree of Object3D nodes, each carrying the 208-byte node info
//! (with the mesh-index slot holding a pointer), an Object3D body, an
//! optional mesh, and its children.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in, assert_ne};
use crate::error::Result;
use crate::files::mesh::{read_mesh_data, read_mesh_info, write_mesh_data, write_mesh_info, Mesh};
use crate::files::nodes::object3d::{read_object3d, write_object3d, Object3d};
use crate::files::nodes::{read_node_info, write_node_info, NodeFlags, NodeInfo, NodeType, ZONE_DEFAULT};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::check_size_mismatch;

pub mod materials;

#[cfg(test)] mod mechlib_test;

/// Names of the fixed archive entries.
pub const VERSION_ENTRY: &str = "version";
pub const FORMAT_ENTRY: &str = "format";
pub const MATERIALS_ENTRY: &str = "materials";

/// The only known mechlib version.
pub const VERSION: u32 = 27;

/// The only known mechlib format.
pub const FORMAT: u32 = 1;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single mechlib model decoded in memory: a tree of nodes.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    root: ModelNode,
}

/// A single node of a model tree.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct ModelNode {
    pub name: String,
    pub flags: NodeFlags,

    /// The node's own runtime pointer. Preserved verbatim.
    pub node_ptr: u32,

    /// The mesh's runtime pointer, stored in the mesh-index slot. Non-zero
    /// exactly when the node has a mesh.
    pub model_ptr: u32,
    pub parent_array_ptr: u32,
    pub children_array_ptr: u32,
    pub block1: [f32; 6],
    pub block2: [f32; 6],
    pub block3: [f32; 6],
    pub object3d: Object3d,
    pub mesh: Option<Mesh>,
    pub children: Vec<ModelNode>,
}

//---------------------------------------------------------------------------//
//                      Fixed entries (version/format)
//---------------------------------------------------------------------------//

/// This function checks a `version` entry.
pub fn read_version(data: &[u8]) -> Result<()> {
    assert_eq("version end", 4, data.len(), 0u64)?;
    let version = u32::from_le_bytes(data.try_into().unwrap_or_default());
    assert_eq("version", VERSION, version, 0u64)?;
    Ok(())
}

/// This function checks a `format` entry.
pub fn read_format(data: &[u8]) -> Result<()> {
    assert_eq("format end", 4, data.len(), 0u64)?;
    let format = u32::from_le_bytes(data.try_into().unwrap_or_default());
    assert_eq("format", FORMAT, format, 0u64)?;
    Ok(())
}

/// This function returns the payload of a `version` entry.
pub fn version_data() -> Vec<u8> {
    VERSION.to_le_bytes().to_vec()
}

/// This function returns the payload of a `format` entry.
pub fn format_data() -> Vec<u8> {
    FORMAT.to_le_bytes().to_vec()
}

//---------------------------------------------------------------------------//
//                           Implementation of Model
//---------------------------------------------------------------------------//

fn assert_model_node_info(info: &NodeInfo, offset: u64) -> Result<()> {
    assert_eq("node type", NodeType::Object3d, info.node_type, offset + 52)?;

    let flag_base = info.flags & NodeFlags::base();
    assert_eq("flag base", NodeFlags::base(), flag_base, offset + 36)?;

    assert_eq("field 044", 1, info.unk044, offset + 44)?;
    assert_eq("zone id", ZONE_DEFAULT, info.zone_id, offset + 48)?;
    assert_ne("node ptr", 0, info.data_ptr, offset + 56)?;
    assert_eq("area partition x", -1, info.area_partition_x, offset + 76)?;
    assert_eq("area partition y", -1, info.area_partition_y, offset + 80)?;

    assert_in("parent count", &[0, 1], info.parent_count, offset + 84)?;
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

    assert_eq("field 196", 160, info.unk196, offset + 196)?;
    Ok(())
}

impl ModelNode {

    fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let offset = data.stream_position()?;
        let info = read_node_info(data)?;
        assert_model_node_info(&info, offset)?;

        let object3d = read_object3d(data)?;

        let model_ptr = info.mesh_index as u32;
        let mesh = if model_ptr != 0 {
            let wrapper = read_mesh_info(data)?;
            Some(read_mesh_data(data, wrapper)?)
        } else {
            None
        };

        let mut children = Vec::with_capacity(info.children_count as usize);
        for _ in 0..info.children_count {
            children.push(Self::read(data)?);
        }

        Ok(Self {
            name: info.name,
            flags: info.flags,
            node_ptr: info.data_ptr,
            model_ptr,
            parent_array_ptr: info.parent_array_ptr,
            children_array_ptr: info.children_array_ptr,
            block1: info.block1,
            block2: info.block2,
            block3: info.block3,
            object3d,
            mesh,
            children,
        })
    }

    fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        let info = NodeInfo {
            name: self.name.to_owned(),
            flags: self.flags,
            unk044: 1,
            zone_id: ZONE_DEFAULT,
            node_type: NodeType::Object3d,
            data_ptr: self.node_ptr,
            mesh_index: self.model_ptr as i32,
            area_partition_x: -1,
            area_partition_y: -1,
            parent_count: u32::from(self.parent_array_ptr != 0),
            parent_array_ptr: self.parent_array_ptr,
            children_count: self.children.len() as u32,
            children_array_ptr: self.children_array_ptr,
            block1: self.block1,
            block2: self.block2,
            block3: self.block3,
            unk196: 160,
        };
        write_node_info(buffer, &info)?;
        write_object3d(buffer, &self.object3d)?;

        assert_eq("has mesh", self.model_ptr != 0, self.mesh.is_some(), self.name.as_str())?;
        if let Some(mesh) = &self.mesh {
            write_mesh_info(buffer, mesh)?;
            write_mesh_data(buffer, mesh)?;
        }

        for child in &self.children {
            child.write(buffer)?;
        }

        Ok(())
    }
}

impl Model {

    pub fn new(root: ModelNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ModelNode {
        &self.root
    }
}

impl Decodeable for Model {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let root = ModelNode::read(data)?;

        // Make sure all the data is processed.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        Ok(Self { root })
    }
}

impl Encodeable for Model {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        self.root.write(buffer)
    }
}
