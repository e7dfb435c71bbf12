//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding GameZ files.

use std::io::Cursor;

use nalgebra::Vector3;

use crate::files::mesh::{Mesh, Polygon};
use crate::files::nodes::camera::Camera;
use crate::files::nodes::display::Display;
use crate::files::nodes::light::Light;
use crate::files::nodes::object3d::Object3d;
use crate::files::nodes::window::Window;
use crate::files::nodes::world::{Area, Partition, World};
use crate::files::nodes::{NodeFlags, NodeInfo, NodeType, BLOCK_EMPTY, BLOCK_LIGHT, ZONE_DEFAULT};
use crate::files::*;

use super::materials::{Cycle, Material};
use super::nodes::{Node, NodeData};
use super::textures::TextureRef;
use super::*;

fn fixed_info(name: &str, node_type: NodeType, data_ptr: u32, block1: [f32; 6]) -> NodeInfo {
    NodeInfo {
        name: name.to_owned(),
        flags: NodeFlags::default_flags(),
        unk044: 0,
        zone_id: ZONE_DEFAULT,
        node_type,
        data_ptr,
        mesh_index: -1,
        area_partition_x: -1,
        area_partition_y: -1,
        parent_count: 0,
        parent_array_ptr: 0,
        children_count: 0,
        children_array_ptr: 0,
        block1,
        block2: BLOCK_EMPTY,
        block3: BLOCK_EMPTY,
        unk196: 0,
    }
}

fn small_world() -> World {
    let mut partitions = vec![];
    for y in [0, -256] {
        let mut subpartitions = vec![];
        for x in [0, 256] {
            subpartitions.push(Partition {
                x,
                y,
                nodes: if x == 0 && y == 0 { vec![4] } else { vec![] },
                unk: (0.0, 0.0, 0.0),
                ptr: if x == 0 && y == 0 { 0xBEEF } else { 0 },
            });
        }
        partitions.push(subpartitions);
    }

    World {
        area: Area { left: 0, top: -512, right: 512, bottom: 0 },
        partitions,
        children: vec![1],
        virt_partition_x_count: 2,
        virt_partition_y_count: 2,
        fudge_count: false,
        area_partition_ptr: 0x100,
        virt_partition_ptr: 0x200,
        children_ptr: 0x300,
        lights_ptr: 0x400,
    }
}

fn small_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    *mesh.has_parents_mut() = 1;
    *mesh.unk08_mut() = 2;
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
    polygon.vertex_indices_mut().extend([0, 1, 2]);
    polygon.vertex_colors_mut().extend([
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
    ]);
    mesh.polygons_mut().push(polygon);
    mesh
}

fn small_gamez() -> GameZ {
    let mut gamez = GameZ::default();

    gamez.textures_mut().push(TextureRef { name: "rock_a".to_owned(), suffix: "tif".to_owned() });
    gamez.textures_mut().push(TextureRef { name: "rock_b".to_owned(), suffix: "".to_owned() });

    // A textured, cycled material and a plain color.
    gamez.materials_mut().push(Material {
        texture: Some(0),
        color: None,
        cycle: Some(Cycle {
            textures: vec![0, 1],
            unk00: true,
            unk04: 2,
            unk12: 4.0,
            info_ptr: 0xC0FE,
            data_ptr: 0xC1FE,
        }),
        unk00: 255,
        unk32: 0,
        unknown: false,
    });
    gamez.materials_mut().push(Material {
        texture: None,
        color: Some([64.0, 128.0, 192.0]),
        cycle: None,
        unk00: 0,
        unk32: 6,
        unknown: false,
    });

    gamez.meshes_mut().push(small_mesh());

    // World, window, camera, display at their required positions, then an
    // Object3D with the mesh, then an empty node referencing it.
    gamez.nodes_mut().push(Node {
        info: {
            let mut info = fixed_info("world1", NodeType::World, 0xA000, BLOCK_EMPTY);
            info.children_count = 1;
            info.children_array_ptr = 0xA100;
            info
        },
        parent: 0,
        children: vec![4],
        data: NodeData::World(small_world()),
    });
    gamez.nodes_mut().push(Node {
        info: fixed_info("window1", NodeType::Window, 0xB000, BLOCK_EMPTY),
        parent: 0,
        children: vec![],
        data: NodeData::Window(Window { resolution: (320, 200) }),
    });
    gamez.nodes_mut().push(Node {
        info: fixed_info("camera1", NodeType::Camera, 0xC000, BLOCK_EMPTY),
        parent: 0,
        children: vec![],
        data: NodeData::Camera(Camera { clip: (1.0, 5000.0), fov: (1.5, 1.2) }),
    });
    gamez.nodes_mut().push(Node {
        info: fixed_info("display", NodeType::Display, 0xD000, BLOCK_EMPTY),
        parent: 0,
        children: vec![],
        data: NodeData::Display(Display { resolution: (640, 400), clear_color: [0.392, 0.392, 1.0] }),
    });
    gamez.nodes_mut().push(Node {
        info: NodeInfo {
            name: "rock".to_owned(),
            flags: NodeFlags::base() | NodeFlags::HAS_MESH,
            unk044: 1,
            zone_id: 1,
            node_type: NodeType::Object3d,
            data_ptr: 0xE000,
            mesh_index: 0,
            area_partition_x: 0,
            area_partition_y: 1,
            parent_count: 0,
            parent_array_ptr: 0,
            children_count: 0,
            children_array_ptr: 0,
            block1: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            block2: [0.5; 6],
            block3: [0.25; 6],
            unk196: 160,
        },
        parent: 0,
        children: vec![],
        data: NodeData::Object3d(Object3d {
            rotation: Some([0.5, -0.5, 1.0]),
            translation: Some([10.0, 20.0, 30.0]),
            matrix: None,
            matrix_sign: 0,
        }),
    });
    gamez.nodes_mut().push(Node {
        info: NodeInfo {
            name: "spawn".to_owned(),
            flags: NodeFlags::base(),
            unk044: 1,
            zone_id: 1,
            node_type: NodeType::Empty,
            data_ptr: 0,
            mesh_index: -1,
            area_partition_x: -1,
            area_partition_y: -1,
            parent_count: 0,
            parent_array_ptr: 0,
            children_count: 0,
            children_array_ptr: 0,
            block1: [7.0; 6],
            block2: [8.0; 6],
            block3: [9.0; 6],
            unk196: 160,
        },
        parent: 4,
        children: vec![],
        data: NodeData::Empty,
    });

    *gamez.metadata_mut() = GameZMetadata {
        material_array_size: 3,
        mesh_array_size: 2,
        node_array_size: 7,
        node_data_count: 6,
    };

    gamez
}

#[test]
fn test_gamez_round_trip() {
    let mut gamez = small_gamez();

    let mut before = vec![];
    gamez.encode(&mut before, &None).unwrap();

    let mut decoded = GameZ::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded.textures().len(), 2);
    assert_eq!(decoded.textures()[0].suffix, "tif");
    assert_eq!(decoded.materials().len(), 2);
    assert_eq!(decoded.materials()[0].cycle.as_ref().unwrap().textures, vec![0, 1]);
    assert_eq!(decoded.meshes().len(), 1);
    assert_eq!(decoded.nodes().len(), 6);
    assert_eq!(*decoded.metadata(), *gamez.metadata());
    assert_eq!(decoded, gamez);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_gamez_bad_signature_fails() {
    let mut gamez = small_gamez();
    let mut data = vec![];
    gamez.encode(&mut data, &None).unwrap();
    data[0] = 0;

    assert!(GameZ::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_gamez_node_positions_are_enforced() {
    let mut gamez = small_gamez();
    // Swap window and camera: camera is then at index 1, which must fail.
    gamez.nodes_mut().swap(1, 2);

    let mut data = vec![];
    gamez.encode(&mut data, &None).unwrap();
    assert!(GameZ::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_gamez_cycle_texture_out_of_range_fails() {
    let mut gamez = small_gamez();
    gamez.materials_mut()[0].cycle.as_mut().unwrap().textures[1] = 99;

    let mut data = vec![];
    gamez.encode(&mut data, &None).unwrap();
    assert!(GameZ::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_gamez_light_node_shape() {
    // The sunlight node info has its fixed flag and block shape.
    let mut info = fixed_info("sunlight", NodeType::Light, 0xF000, BLOCK_LIGHT);
    info.flags |= NodeFlags::UNK08;

    let mut data = vec![];
    crate::files::nodes::write_node_info(&mut data, &info).unwrap();

    let decoded = crate::files::nodes::read_node_info(&mut Cursor::new(data)).unwrap();
    super::nodes::assert_node_info(&decoded, 0, 0).unwrap();

    let light = Light {
        direction: Vector3::new(0.0, -1.0, 0.0),
        diffuse: 1.0,
        ambient: 0.2,
        range: (30.0, 1000.0),
        parent_ptr: 1,
    };
    let mut body = vec![];
    crate::files::nodes::light::write_light(&mut body, &light).unwrap();
    assert_eq!(crate::files::nodes::light::read_light(&mut Cursor::new(body)).unwrap(), light);
}
