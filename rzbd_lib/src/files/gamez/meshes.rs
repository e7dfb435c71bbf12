//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The GameZ mesh array: a fixed-size array of mesh info records (the free
//! tail zeroed and chained by index), one body offset per live mesh, then
//! the mesh bodies in offset order.

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_between, assert_eq, assert_le};
use crate::error::Result;
use crate::files::mesh::{read_mesh_data, read_mesh_info, size_mesh_data, write_mesh_data, write_mesh_info, Mesh, MESH_INFO_SIZE};

/// Size of the mesh array header.
pub const MESHES_HEADER_SIZE: u64 = 12;

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn read_meshes_zero<R: ReadBytes>(data: &mut R, count: u32, array_size: u32) -> Result<()> {
    for index in count..array_size {
        let prev = data.stream_position()?;
        let record = data.read_slice(MESH_INFO_SIZE as usize, false)?;
        assert_all_zero("mesh info", &record, prev)?;

        let mut expected = index as i32 + 1;
        if expected == array_size as i32 {
            expected = -1;
        }

        let index_offset = data.stream_position()?;
        let actual = data.read_i32()?;
        assert_eq("index", expected, actual, index_offset)?;
    }

    Ok(())
}

/// This function reads the mesh array, returning the array size and the live meshes.
///
/// `start_offset` is the absolute offset of the array itself, `end_offset`
/// the last offset a mesh body may start at (the node offset minus one).
pub fn read_meshes<R: ReadBytes>(data: &mut R, start_offset: u64, end_offset: u64) -> Result<(u32, Vec<Mesh>)> {
    let prev = data.stream_position()?;
    let array_size = data.read_u32()?;
    let mesh_count = data.read_u32()?;
    let index_max = data.read_u32()?;

    assert_le("mesh count", array_size, mesh_count, prev + 4)?;
    assert_le("mesh index", mesh_count, index_max, prev + 8)?;

    let mut wrapped_meshes = Vec::with_capacity(mesh_count as usize);
    let mut prev_offset = start_offset;
    for _ in 0..mesh_count {
        let wrapper = read_mesh_info(data)?;

        let offset_pos = data.stream_position()?;
        let mesh_offset = data.read_u32()?;
        assert_between("mesh offset", prev_offset, end_offset, mesh_offset as u64, offset_pos)?;
        wrapped_meshes.push((mesh_offset, wrapper));
        prev_offset = mesh_offset as u64;
    }

    read_meshes_zero(data, mesh_count, array_size)?;

    let mut meshes = Vec::with_capacity(mesh_count as usize);
    for (mesh_offset, wrapper) in wrapped_meshes {
        let offset = data.stream_position()?;
        assert_eq("mesh offset", mesh_offset as u64, offset, offset)?;
        meshes.push(read_mesh_data(data, wrapper)?);
    }

    Ok((array_size, meshes))
}

/// This function writes the mesh array.
pub fn write_meshes<W: WriteBytes>(buffer: &mut W, array_size: u32, meshes: &[Mesh], mesh_offsets: &[u64]) -> Result<()> {
    let mesh_count = meshes.len() as u32;
    buffer.write_u32(array_size)?;
    buffer.write_u32(mesh_count)?;
    buffer.write_u32(mesh_count)?;

    for (mesh, offset) in meshes.iter().zip(mesh_offsets.iter()) {
        write_mesh_info(buffer, mesh)?;
        buffer.write_u32(*offset as u32)?;
    }

    for index in mesh_count..array_size {
        let mut chain = index as i32 + 1;
        if chain == array_size as i32 {
            chain = -1;
        }
        buffer.write_all(&[0; MESH_INFO_SIZE as usize])?;
        buffer.write_i32(chain)?;
    }

    for mesh in meshes {
        write_mesh_data(buffer, mesh)?;
    }

    Ok(())
}

/// This function returns the encoded size of the mesh array and the absolute body offset of
/// every live mesh, given the array's own absolute offset.
pub fn size_meshes(array_size: u32, meshes: &[Mesh], start_offset: u64) -> (u64, Vec<u64>) {
    let mut size = MESHES_HEADER_SIZE + (MESH_INFO_SIZE + 4) * array_size as u64;

    let mut mesh_offsets = Vec::with_capacity(meshes.len());
    for mesh in meshes {
        mesh_offsets.push(start_offset + size);
        size += size_mesh_data(mesh);
    }

    (size, mesh_offsets)
}
