//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding mechlib entries.

use std::io::Cursor;

use nalgebra::Vector3;

use crate::files::archive::{Archive, ArchiveEntry, Filetime};
use crate::files::mesh::{Mesh, Polygon};
use crate::files::nodes::object3d::Object3d;
use crate::files::nodes::NodeFlags;
use crate::files::*;

use super::materials::{Material, Materials};
use super::*;

fn leg_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    *mesh.file_ptr_mut() = 1;
    *mesh.has_parents_mut() = 1;
    *mesh.unk08_mut() = 3;
    *mesh.polygon_ptr_mut() = 0x1000;
    *mesh.vertex_ptr_mut() = 0x2000;
    mesh.vertices_mut().extend([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ]);

    let mut polygon = Polygon::default();
    *polygon.vertex_ptr_mut() = 0x4000;
    *polygon.color_ptr_mut() = 0x7000;
    *polygon.unk_ptr_mut() = 0x8000;
    *polygon.texture_index_mut() = 1;
    polygon.vertex_indices_mut().extend([0, 1, 2]);
    polygon.vertex_colors_mut().extend([
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
    ]);
    mesh.polygons_mut().push(polygon);
    mesh
}

fn mech_model() -> Model {
    let foot = ModelNode {
        name: "foot_l".to_owned(),
        flags: NodeFlags::base(),
        node_ptr: 0x20,
        model_ptr: 0,
        parent_array_ptr: 0x30,
        children_array_ptr: 0,
        block1: [1.0; 6],
        block2: [2.0; 6],
        block3: [3.0; 6],
        object3d: Object3d {
            rotation: Some([0.1, 0.2, 0.3]),
            translation: Some([0.0, -1.0, 0.0]),
            matrix: None,
            matrix_sign: 0,
        },
        mesh: None,
        children: vec![],
    };

    let hip = ModelNode {
        name: "hip".to_owned(),
        flags: NodeFlags::base() | NodeFlags::HAS_MESH,
        node_ptr: 0x10,
        model_ptr: 0x99,
        parent_array_ptr: 0,
        children_array_ptr: 0x40,
        block1: [4.0; 6],
        block2: [5.0; 6],
        block3: [6.0; 6],
        object3d: Object3d::default(),
        mesh: Some(leg_mesh()),
        children: vec![foot],
    };

    Model::new(hip)
}

#[test]
fn test_mechlib_model_round_trip() {
    let mut model = mech_model();

    let mut before = vec![];
    model.encode(&mut before, &None).unwrap();

    let mut decoded = Model::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded, model);
    assert_eq!(decoded.root().children.len(), 1);
    assert_eq!(decoded.root().children[0].name, "foot_l");
    assert!(decoded.root().mesh.is_some());
    assert!(decoded.root().children[0].mesh.is_none());

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_mechlib_materials_round_trip() {
    let mut materials = Materials::default();
    materials.materials_mut().push(Material {
        name: Some("mech_skin".to_owned()),
        ..Default::default()
    });
    materials.materials_mut().push(Material {
        name: None,
        flag: 16,
        unk00: 0,
        rgb: 0,
        red: 128.0,
        green: 64.0,
        blue: 32.0,
        pointer: 0,
    });

    let mut before = vec![];
    materials.encode(&mut before, &None).unwrap();

    let mut decoded = Materials::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded, materials);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_mechlib_version_and_format_entries() {
    assert!(read_version(&version_data()).is_ok());
    assert!(read_format(&format_data()).is_ok());

    assert!(read_version(&format_data()).is_err());
    assert!(read_version(&[27, 0, 0]).is_err());
    assert!(read_format(&[2, 0, 0, 0]).is_err());
}

#[test]
fn test_mechlib_whole_archive_round_trip() {
    // The mechlib is just a ZArchive whose payloads are the codecs above.
    let mut model = mech_model();
    let mut model_data = vec![];
    model.encode(&mut model_data, &None).unwrap();

    let mut materials = Materials::default();
    materials.materials_mut().push(Material {
        name: Some("mech_skin".to_owned()),
        ..Default::default()
    });
    let mut materials_data = vec![];
    materials.encode(&mut materials_data, &None).unwrap();

    let mut archive = Archive::default();
    for (name, data) in [
        (VERSION_ENTRY, version_data()),
        (FORMAT_ENTRY, format_data()),
        (MATERIALS_ENTRY, materials_data),
        ("hip.flt", model_data),
    ] {
        archive.entries_mut().push(ArchiveEntry {
            name: name.to_owned(),
            data,
            start: 0,
            flag: 0,
            comment: vec![0; 64],
            write_time: Filetime::from_raw(7),
        });
    }

    let mut before = vec![];
    archive.encode(&mut before, &None).unwrap();

    let mut decoded = Archive::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    read_version(decoded.entries()[0].data()).unwrap();
    read_format(decoded.entries()[1].data()).unwrap();
    Materials::decode(&mut Cursor::new(decoded.entries()[2].data().to_vec()), &None).unwrap();
    Model::decode(&mut Cursor::new(decoded.entries()[3].data().to_vec()), &None).unwrap();

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}
