//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the shared mesh sub-codec.

use std::io::Cursor;

use nalgebra::Vector3;

use super::*;

fn triangle_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    *mesh.file_ptr_mut() = 1;
    *mesh.has_parents_mut() = 1;
    *mesh.unk08_mut() = 2;
    *mesh.polygon_ptr_mut() = 0x1000;
    *mesh.vertex_ptr_mut() = 0x2000;
    *mesh.normal_ptr_mut() = 0x3000;
    mesh.vertices_mut().extend([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ]);
    mesh.normals_mut().extend([
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, 1.0),
    ]);

    let mut polygon = Polygon::default();
    *polygon.vtx_bit_mut() = true;
    *polygon.vertex_ptr_mut() = 0x4000;
    *polygon.normal_ptr_mut() = 0x5000;
    *polygon.uv_ptr_mut() = 0x6000;
    *polygon.color_ptr_mut() = 0x7000;
    *polygon.unk_ptr_mut() = 0x8000;
    *polygon.texture_index_mut() = 3;
    *polygon.texture_info_mut() = 0xFFFF0101;
    polygon.vertex_indices_mut().extend([0, 1, 2]);
    polygon.normal_indices_mut().extend([0, 1, 2]);
    polygon.uv_coords_mut().extend([(0.0, 0.25), (0.5, 0.5), (1.0, 0.75)]);
    polygon.vertex_colors_mut().extend([
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
    ]);
    mesh.polygons_mut().push(polygon);
    mesh
}

#[test]
fn test_mesh_round_trip() {
    let mesh = triangle_mesh();

    let mut info = vec![];
    write_mesh_info(&mut info, &mesh).unwrap();
    assert_eq!(info.len() as u64, MESH_INFO_SIZE);

    let mut body = vec![];
    write_mesh_data(&mut body, &mesh).unwrap();
    assert_eq!(body.len() as u64, size_mesh_data(&mesh));

    let wrapper = read_mesh_info(&mut Cursor::new(info.to_vec())).unwrap();
    let decoded = read_mesh_data(&mut Cursor::new(body.to_vec()), wrapper).unwrap();
    assert_eq!(decoded, mesh);

    let mut info_again = vec![];
    write_mesh_info(&mut info_again, &decoded).unwrap();
    assert_eq!(info, info_again);

    let mut body_again = vec![];
    write_mesh_data(&mut body_again, &decoded).unwrap();
    assert_eq!(body, body_again);
}

#[test]
fn test_mesh_uv_v_axis_is_flipped() {
    let mesh = triangle_mesh();
    let mut body = vec![];
    write_mesh_data(&mut body, &mesh).unwrap();

    // Body layout: 3 vertices, 3 normals, 1 polygon info, 3 vertex indices,
    // 3 normal indices, then the UVs. The first stored v is 1.0 - 0.25.
    let uv_offset = 36 + 36 + 36 + 12 + 12;
    let stored_v = f32::from_le_bytes(body[uv_offset + 4..uv_offset + 8].try_into().unwrap());
    assert_eq!(stored_v, 0.75);
}

#[test]
fn test_mesh_light_only_case() {
    let mut mesh = Mesh::default();
    *mesh.has_parents_mut() = 1;
    *mesh.light_ptr_mut() = 0x9000;
    mesh.lights_mut().push(MeshLight {
        unk00: 1,
        ptr: 0xA000,
        extra: vec![Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)],
        ..Default::default()
    });

    let mut info = vec![];
    write_mesh_info(&mut info, &mesh).unwrap();
    let mut body = vec![];
    write_mesh_data(&mut body, &mesh).unwrap();
    assert_eq!(body.len() as u64, LIGHT_SIZE + 24);

    let wrapper = read_mesh_info(&mut Cursor::new(info)).unwrap();
    let decoded = read_mesh_data(&mut Cursor::new(body), wrapper).unwrap();
    assert_eq!(decoded, mesh);
}

#[test]
fn test_mesh_zero_polygon_with_vertices_fails() {
    let mut mesh = Mesh::default();
    *mesh.has_parents_mut() = 1;
    *mesh.vertex_ptr_mut() = 0x2000;
    mesh.vertices_mut().push(Vector3::new(0.0, 0.0, 0.0));

    let mut info = vec![];
    write_mesh_info(&mut info, &mesh).unwrap();

    // No polygons but vertices present: the light-only invariants reject it.
    assert!(read_mesh_info(&mut Cursor::new(info)).is_err());
}
