//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the mesh sub-codec shared by the mechlib and GameZ files.
//!
//! A mesh is split on disk: a fixed 92-byte info record with counts and
//! pointers, and a variable body with the vertex, normal, morph, light, and
//! polygon data. The two parts are not adjacent in GameZ files, so the
//! codec mirrors that split: [`read_mesh_info`] returns a [`MeshWrapper`]
//! holding the counts, and [`read_mesh_data`] consumes it once the cursor
//! reaches the body.
//!
//! # Mesh Info Structure (92 bytes)
//!
//! | Offset | Type | Data                                         |
//! | ------ | ---- | -------------------------------------------- |
//! | 0      | u32  | File pointer flag, 0 or 1.                   |
//! | 4      | u32  | 0 or 1.                                      |
//! | 8      | u32  | Unknown.                                     |
//! | 12     | u32  | Parent count, > 0.                           |
//! | 16..36 | u32  | Polygon/vertex/normal/morph/light counts, 0. |
//! | 40, 44 | f32  | Unknown.                                     |
//! | 48     | u32  | 0.                                           |
//! | 52..68 | u32  | Polygon/vertex/normal/light/morph pointers.  |
//! | 72..84 | f32  | Unknown.                                     |
//! | 88     | u32  | 0.                                           |

use getset::*;
use nalgebra::Vector3;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_between, assert_eq, assert_gt, assert_in, assert_lt, assert_ne};
use crate::error::Result;

#[cfg(test)] mod mesh_test;

/// Size of a mesh info record.
pub const MESH_INFO_SIZE: u64 = 92;

/// Size of a mesh light record.
pub const LIGHT_SIZE: u64 = 76;

/// Size of a polygon info record.
pub const POLYGON_SIZE: u64 = 36;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single mesh decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Mesh {
    vertices: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    morphs: Vec<Vector3<f32>>,
    lights: Vec<MeshLight>,
    polygons: Vec<Polygon>,
    polygon_ptr: u32,
    vertex_ptr: u32,
    normal_ptr: u32,
    light_ptr: u32,
    morph_ptr: u32,
    file_ptr: u32,
    zero04: u32,
    has_parents: u32,
    unk08: u32,
    unk40: f32,
    unk44: f32,
    unk72: f32,
    unk76: f32,
    unk80: f32,
    unk84: f32,
}

/// A per-mesh point light. Almost entirely unidentified, preserved verbatim.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct MeshLight {
    unk00: u32,
    unk04: u32,
    unk08: u32,
    extra: Vec<Vector3<f32>>,
    unk16: u32,
    unk20: u32,
    unk24: u32,
    unk28: f32,
    unk32: f32,
    unk36: f32,
    unk40: f32,
    ptr: u32,
    unk48: f32,
    unk52: f32,
    unk56: f32,
    unk60: f32,
    unk64: f32,
    unk68: f32,
    unk72: f32,
}

/// A single polygon: indices into the mesh-local arrays, plus per-vertex
/// UVs and colors.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Polygon {
    vertex_indices: Vec<u32>,
    normal_indices: Vec<u32>,
    uv_coords: Vec<(f32, f32)>,
    vertex_colors: Vec<Vector3<f32>>,
    texture_index: u32,
    texture_info: u32,
    unk04: u32,
    unk_bit: bool,
    vtx_bit: bool,
    vertex_ptr: u32,
    normal_ptr: u32,
    uv_ptr: u32,
    color_ptr: u32,
    unk_ptr: u32,
}

/// A mesh whose info record has been read, but whose body hasn't.
#[derive(PartialEq, Clone, Debug)]
pub struct MeshWrapper {
    mesh: Mesh,
    polygon_count: u32,
    vertex_count: u32,
    normal_count: u32,
    morph_count: u32,
    light_count: u32,
}

//---------------------------------------------------------------------------//
//                             Mesh info codec
//---------------------------------------------------------------------------//

/// This function reads a 92-byte mesh info record.
pub fn read_mesh_info<R: ReadBytes>(data: &mut R) -> Result<MeshWrapper> {
    let prev = data.stream_position()?;

    let file_ptr = data.read_u32()?;
    let zero04 = data.read_u32()?;
    let unk08 = data.read_u32()?;
    let has_parents = data.read_u32()?;
    let polygon_count = data.read_u32()?;
    let vertex_count = data.read_u32()?;
    let normal_count = data.read_u32()?;
    let morph_count = data.read_u32()?;
    let light_count = data.read_u32()?;
    let zero36 = data.read_u32()?;
    let unk40 = data.read_f32()?;
    let unk44 = data.read_f32()?;
    let zero48 = data.read_u32()?;
    let polygon_ptr = data.read_u32()?;
    let vertex_ptr = data.read_u32()?;
    let normal_ptr = data.read_u32()?;
    let light_ptr = data.read_u32()?;
    let morph_ptr = data.read_u32()?;
    let unk72 = data.read_f32()?;
    let unk76 = data.read_f32()?;
    let unk80 = data.read_f32()?;
    let unk84 = data.read_f32()?;
    let zero88 = data.read_u32()?;

    assert_in("file ptr", &[0, 1], file_ptr, prev)?;
    assert_in("field 04", &[0, 1], zero04, prev + 4)?;
    assert_gt("has parents", 0, has_parents, prev + 12)?;
    assert_eq("field 36", 0, zero36, prev + 36)?;
    assert_eq("field 48", 0, zero48, prev + 48)?;

    if polygon_count == 0 {
        assert_eq("polygon ptr", 0, polygon_ptr, prev + 52)?;

        // A really weird case where the mesh only has light info.
        assert_eq("vertex count", 0, vertex_count, prev + 20)?;
        assert_eq("normal count", 0, normal_count, prev + 24)?;
        assert_eq("morph count", 0, morph_count, prev + 28)?;
        assert_gt("light count", 0, light_count, prev + 32)?;
    } else {
        assert_ne("polygon ptr", 0, polygon_ptr, prev + 52)?;
    }

    check_count_ptr("vertex ptr", vertex_count, vertex_ptr, prev + 56)?;
    check_count_ptr("normal ptr", normal_count, normal_ptr, prev + 60)?;
    check_count_ptr("light ptr", light_count, light_ptr, prev + 64)?;
    check_count_ptr("morph ptr", morph_count, morph_ptr, prev + 68)?;

    assert_eq("field 88", 0, zero88, prev + 88)?;

    let mesh = Mesh {
        vertices: vec![],
        normals: vec![],
        morphs: vec![],
        lights: vec![],
        polygons: vec![],
        polygon_ptr,
        vertex_ptr,
        normal_ptr,
        light_ptr,
        morph_ptr,
        file_ptr,
        zero04,
        has_parents,
        unk08,
        unk40,
        unk44,
        unk72,
        unk76,
        unk80,
        unk84,
    };

    Ok(MeshWrapper {
        mesh,
        polygon_count,
        vertex_count,
        normal_count,
        morph_count,
        light_count,
    })
}

fn check_count_ptr(name: &str, count: u32, ptr: u32, offset: u64) -> Result<()> {
    if count == 0 {
        assert_eq(name, 0, ptr, offset)?;
    } else {
        assert_ne(name, 0, ptr, offset)?;
    }
    Ok(())
}

/// This function writes a 92-byte mesh info record.
pub fn write_mesh_info<W: WriteBytes>(buffer: &mut W, mesh: &Mesh) -> Result<()> {
    buffer.write_u32(*mesh.file_ptr())?;
    buffer.write_u32(*mesh.zero04())?;
    buffer.write_u32(*mesh.unk08())?;
    buffer.write_u32(*mesh.has_parents())?;
    buffer.write_u32(mesh.polygons().len() as u32)?;
    buffer.write_u32(mesh.vertices().len() as u32)?;
    buffer.write_u32(mesh.normals().len() as u32)?;
    buffer.write_u32(mesh.morphs().len() as u32)?;
    buffer.write_u32(mesh.lights().len() as u32)?;
    buffer.write_u32(0)?;
    buffer.write_f32(*mesh.unk40())?;
    buffer.write_f32(*mesh.unk44())?;
    buffer.write_u32(0)?;
    buffer.write_u32(*mesh.polygon_ptr())?;
    buffer.write_u32(*mesh.vertex_ptr())?;
    buffer.write_u32(*mesh.normal_ptr())?;
    buffer.write_u32(*mesh.light_ptr())?;
    buffer.write_u32(*mesh.morph_ptr())?;
    buffer.write_f32(*mesh.unk72())?;
    buffer.write_f32(*mesh.unk76())?;
    buffer.write_f32(*mesh.unk80())?;
    buffer.write_f32(*mesh.unk84())?;
    buffer.write_u32(0)?;
    Ok(())
}

//---------------------------------------------------------------------------//
//                             Mesh body codec
//---------------------------------------------------------------------------//

fn read_vec3s<R: ReadBytes>(data: &mut R, count: u32) -> Result<Vec<Vector3<f32>>> {
    let mut vecs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        vecs.push(data.read_vector_3_f32()?);
    }
    Ok(vecs)
}

fn write_vec3s<W: WriteBytes>(buffer: &mut W, vecs: &[Vector3<f32>]) -> Result<()> {
    for vec in vecs {
        buffer.write_vector_3_f32(vec)?;
    }
    Ok(())
}

fn read_lights<R: ReadBytes>(data: &mut R, count: u32) -> Result<Vec<MeshLight>> {
    // The light records come first, then the extra vectors of every light,
    // in light order. So the counts have to be remembered across the array.
    let mut lights_and_counts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let unk00 = data.read_u32()?;
        let unk04 = data.read_u32()?;
        let unk08 = data.read_u32()?;
        let extra_count = data.read_u32()?;
        let light = MeshLight {
            unk00,
            unk04,
            unk08,
            extra: vec![],
            unk16: data.read_u32()?,
            unk20: data.read_u32()?,
            unk24: data.read_u32()?,
            unk28: data.read_f32()?,
            unk32: data.read_f32()?,
            unk36: data.read_f32()?,
            unk40: data.read_f32()?,
            ptr: data.read_u32()?,
            unk48: data.read_f32()?,
            unk52: data.read_f32()?,
            unk56: data.read_f32()?,
            unk60: data.read_f32()?,
            unk64: data.read_f32()?,
            unk68: data.read_f32()?,
            unk72: data.read_f32()?,
        };
        lights_and_counts.push((light, extra_count));
    }

    let mut lights = Vec::with_capacity(count as usize);
    for (mut light, extra_count) in lights_and_counts {
        light.extra = read_vec3s(data, extra_count)?;
        lights.push(light);
    }

    Ok(lights)
}

fn read_polygons<R: ReadBytes>(data: &mut R, count: u32) -> Result<Vec<Polygon>> {
    let mut poly_info = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let prev = data.stream_position()?;

        let vertex_info = data.read_u32()?;
        let unk04 = data.read_u32()?;
        let vertex_ptr = data.read_u32()?;
        let normal_ptr = data.read_u32()?;
        let uv_ptr = data.read_u32()?;
        let color_ptr = data.read_u32()?;
        let unk_ptr = data.read_u32()?;
        let texture_index = data.read_u32()?;
        let texture_info = data.read_u32()?;

        assert_lt("vertex info", 0x3FF, vertex_info, prev)?;
        assert_between("field 4", 0, 20, unk04, prev + 4)?;

        let unk_bit = (vertex_info & 0x100) != 0;
        let vtx_bit = (vertex_info & 0x200) != 0;
        let verts_in_poly = vertex_info & 0xFF;

        assert_gt("verts in poly", 0, verts_in_poly, prev)?;
        assert_ne("vertex ptr", 0, vertex_ptr, prev + 8)?;

        let has_normals = vtx_bit && (normal_ptr != 0);
        let has_uvs = uv_ptr != 0;

        assert_ne("color ptr", 0, color_ptr, prev + 20)?;
        assert_ne("unknown ptr", 0, unk_ptr, prev + 24)?;

        let polygon = Polygon {
            vertex_indices: vec![],
            normal_indices: vec![],
            uv_coords: vec![],
            vertex_colors: vec![],
            texture_index,
            texture_info,
            unk04,
            unk_bit,
            vtx_bit,
            vertex_ptr,
            normal_ptr,
            uv_ptr,
            color_ptr,
            unk_ptr,
        };
        poly_info.push((verts_in_poly, has_normals, has_uvs, polygon));
    }

    let mut polygons = Vec::with_capacity(count as usize);
    for (verts_in_poly, has_normals, has_uvs, mut polygon) in poly_info {
        for _ in 0..verts_in_poly {
            polygon.vertex_indices.push(data.read_u32()?);
        }

        if has_normals {
            for _ in 0..verts_in_poly {
                polygon.normal_indices.push(data.read_u32()?);
            }
        }

        if has_uvs {
            for _ in 0..verts_in_poly {
                let u = data.read_f32()?;
                let v = data.read_f32()?;
                polygon.uv_coords.push((u, 1.0 - v));
            }
        }

        polygon.vertex_colors = read_vec3s(data, verts_in_poly)?;
        polygons.push(polygon);
    }

    Ok(polygons)
}

/// This function reads a mesh body into the wrapper produced by [`read_mesh_info`].
pub fn read_mesh_data<R: ReadBytes>(data: &mut R, wrapper: MeshWrapper) -> Result<Mesh> {
    let mut mesh = wrapper.mesh;

    mesh.vertices = read_vec3s(data, wrapper.vertex_count)?;
    mesh.normals = read_vec3s(data, wrapper.normal_count)?;
    mesh.morphs = read_vec3s(data, wrapper.morph_count)?;

    if wrapper.light_count > 0 {
        mesh.lights = read_lights(data, wrapper.light_count)?;
    }

    if wrapper.polygon_count > 0 {
        mesh.polygons = read_polygons(data, wrapper.polygon_count)?;
    }

    Ok(mesh)
}

/// This function writes a mesh body.
pub fn write_mesh_data<W: WriteBytes>(buffer: &mut W, mesh: &Mesh) -> Result<()> {
    write_vec3s(buffer, mesh.vertices())?;
    write_vec3s(buffer, mesh.normals())?;
    write_vec3s(buffer, mesh.morphs())?;

    for light in mesh.lights() {
        buffer.write_u32(*light.unk00())?;
        buffer.write_u32(*light.unk04())?;
        buffer.write_u32(*light.unk08())?;
        buffer.write_u32(light.extra().len() as u32)?;
        buffer.write_u32(*light.unk16())?;
        buffer.write_u32(*light.unk20())?;
        buffer.write_u32(*light.unk24())?;
        buffer.write_f32(*light.unk28())?;
        buffer.write_f32(*light.unk32())?;
        buffer.write_f32(*light.unk36())?;
        buffer.write_f32(*light.unk40())?;
        buffer.write_u32(*light.ptr())?;
        buffer.write_f32(*light.unk48())?;
        buffer.write_f32(*light.unk52())?;
        buffer.write_f32(*light.unk56())?;
        buffer.write_f32(*light.unk60())?;
        buffer.write_f32(*light.unk64())?;
        buffer.write_f32(*light.unk68())?;
        buffer.write_f32(*light.unk72())?;
    }

    for light in mesh.lights() {
        write_vec3s(buffer, light.extra())?;
    }

    for polygon in mesh.polygons() {
        let mut vertex_info = polygon.vertex_indices().len() as u32 & 0xFF;
        if *polygon.unk_bit() {
            vertex_info |= 0x100;
        }
        if *polygon.vtx_bit() {
            vertex_info |= 0x200;
        }

        buffer.write_u32(vertex_info)?;
        buffer.write_u32(*polygon.unk04())?;
        buffer.write_u32(*polygon.vertex_ptr())?;
        buffer.write_u32(*polygon.normal_ptr())?;
        buffer.write_u32(*polygon.uv_ptr())?;
        buffer.write_u32(*polygon.color_ptr())?;
        buffer.write_u32(*polygon.unk_ptr())?;
        buffer.write_u32(*polygon.texture_index())?;
        buffer.write_u32(*polygon.texture_info())?;
    }

    for polygon in mesh.polygons() {
        for index in polygon.vertex_indices() {
            buffer.write_u32(*index)?;
        }
        for index in polygon.normal_indices() {
            buffer.write_u32(*index)?;
        }
        for (u, v) in polygon.uv_coords() {
            buffer.write_f32(*u)?;
            buffer.write_f32(1.0 - *v)?;
        }
        write_vec3s(buffer, polygon.vertex_colors())?;
    }

    Ok(())
}

/// This function returns the encoded size of a mesh body, in bytes.
pub fn size_mesh_data(mesh: &Mesh) -> u64 {
    let mut size = 12 * (mesh.vertices().len() + mesh.normals().len() + mesh.morphs().len()) as u64;

    for light in mesh.lights() {
        size += LIGHT_SIZE + 12 * light.extra().len() as u64;
    }

    for polygon in mesh.polygons() {
        size += POLYGON_SIZE
            + 4 * polygon.vertex_indices().len() as u64
            + 4 * polygon.normal_indices().len() as u64
            + 8 * polygon.uv_coords().len() as u64
            + 12 * polygon.vertex_colors().len() as u64;
    }

    size
}
