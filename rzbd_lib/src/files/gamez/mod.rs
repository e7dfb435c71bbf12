//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! GameZ files hold an entire level: the texture table, the material array,
//! the mesh array, and the full node graph with its spatial partition tree.
//!
//! # GameZ Structure
//!
//! | Bytes | Type      | Data                                                   |
//! | ----- | --------- | ------------------------------------------------------ |
//! | 36    | Header    | `{sig = 0x02971222, version = 27, texture_count, texture/material/mesh offsets, node_array_size, node_count, node offset}`. |
//! | *     | Textures  | `texture_count` 40-byte records.                        |
//! | *     | Materials | Fixed-size array with live/free chains and cycle data.  |
//! | *     | Meshes    | Fixed-size array of mesh infos plus the mesh bodies.    |
//! | *     | Nodes     | Fixed-size node table plus the typed node bodies.       |

use getset::*;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_lt};
use crate::error::Result;
use crate::files::mesh::Mesh;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::check_size_mismatch;

pub mod materials;
pub mod meshes;
pub mod nodes;
pub mod textures;

#[cfg(test)] mod gamez_test;

/// Extension used by GameZ files.
pub const EXTENSION: &str = ".zbd";

const SIGNATURE: u32 = 0x02971222;
const VERSION: u32 = 27;

/// Size of the header.
const HEADER_SIZE: u64 = 36;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire GameZ file decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct GameZ {
    textures: Vec<textures::TextureRef>,
    materials: Vec<materials::Material>,
    meshes: Vec<Mesh>,
    nodes: Vec<nodes::Node>,
    metadata: GameZMetadata,
}

/// The array sizes the file was saved with. The arrays are bigger than
/// their live contents, so these can't be derived and must be kept.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct GameZMetadata {
    material_array_size: u32,
    mesh_array_size: u32,
    node_array_size: u32,
    node_data_count: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of GameZ
//---------------------------------------------------------------------------//

impl Decodeable for GameZ {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_u32()?;
        let version = data.read_u32()?;
        let texture_count = data.read_u32()?;
        let texture_offset = data.read_u32()?;
        let material_offset = data.read_u32()?;
        let mesh_offset = data.read_u32()?;
        let node_array_size = data.read_u32()?;
        let node_count = data.read_u32()?;
        let node_offset = data.read_u32()?;

        assert_eq("signature", SIGNATURE, signature, 0u64)?;
        assert_eq("version", VERSION, version, 4u64)?;
        assert_lt("texture count", 4096, texture_count, 8u64)?;
        assert_lt("node count", node_array_size, node_count, 28u64)?;

        assert_eq("texture offset", texture_offset as u64, data.stream_position()?, 12u64)?;
        let textures = textures::read_textures(data, texture_count)?;

        assert_eq("material offset", material_offset as u64, data.stream_position()?, 16u64)?;
        let (material_array_size, materials) = materials::read_materials(data, texture_count)?;

        assert_eq("mesh offset", mesh_offset as u64, data.stream_position()?, 20u64)?;
        let (mesh_array_size, meshes) = meshes::read_meshes(data, mesh_offset as u64, node_offset as u64 - 1)?;

        assert_eq("node offset", node_offset as u64, data.stream_position()?, 32u64)?;
        let nodes = nodes::read_nodes(data, node_array_size, meshes.len() as u32)?;

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(Self {
            textures,
            materials,
            meshes,
            nodes,
            metadata: GameZMetadata {
                material_array_size,
                mesh_array_size,
                node_array_size,
                node_data_count: node_count,
            },
        })
    }
}

impl Encodeable for GameZ {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let texture_count = self.textures.len() as u32;
        assert_lt("texture count", 4096, texture_count, 8u64)?;

        let material_array_size = *self.metadata.material_array_size();
        let mesh_array_size = *self.metadata.mesh_array_size();

        let texture_offset = HEADER_SIZE;
        let material_offset = texture_offset + textures::size_textures(texture_count);
        let mesh_offset = material_offset + materials::size_materials(material_array_size, &self.materials);
        let (meshes_size, mesh_offsets) = meshes::size_meshes(mesh_array_size, &self.meshes, mesh_offset);
        let node_offset = mesh_offset + meshes_size;

        buffer.write_u32(SIGNATURE)?;
        buffer.write_u32(VERSION)?;
        buffer.write_u32(texture_count)?;
        buffer.write_u32(texture_offset as u32)?;
        buffer.write_u32(material_offset as u32)?;
        buffer.write_u32(mesh_offset as u32)?;
        buffer.write_u32(*self.metadata.node_array_size())?;
        buffer.write_u32(*self.metadata.node_data_count())?;
        buffer.write_u32(node_offset as u32)?;

        textures::write_textures(buffer, &self.textures)?;
        materials::write_materials(buffer, material_array_size, &self.materials)?;
        meshes::write_meshes(buffer, mesh_array_size, &self.meshes, &mesh_offsets)?;
        nodes::write_nodes(buffer, *self.metadata.node_array_size(), &self.nodes, node_offset)?;

        Ok(())
    }
}
