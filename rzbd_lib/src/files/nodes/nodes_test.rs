//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the shared node codecs.

use std::io::Cursor;

use nalgebra::Vector3;

use crate::float::euler_to_matrix;

use super::camera::*;
use super::display::*;
use super::light::*;
use super::lod::*;
use super::object3d::*;
use super::window::*;
use super::world::*;
use super::*;

#[test]
fn test_node_info_round_trip() {
    let info = NodeInfo {
        name: "torso".to_owned(),
        flags: NodeFlags::base() | NodeFlags::HAS_MESH,
        unk044: 1,
        zone_id: ZONE_DEFAULT,
        node_type: NodeType::Object3d,
        data_ptr: 0x1234,
        mesh_index: 2,
        area_partition_x: -1,
        area_partition_y: -1,
        parent_count: 1,
        parent_array_ptr: 0x5678,
        children_count: 0,
        children_array_ptr: 0,
        block1: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        block2: [0.0; 6],
        block3: [0.0; 6],
        unk196: 160,
    };

    let mut data = vec![];
    write_node_info(&mut data, &info).unwrap();
    assert_eq!(data.len() as u64, NODE_INFO_SIZE);

    let decoded = read_node_info(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, info);

    let mut again = vec![];
    write_node_info(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_node_info_unknown_flag_bit_fails() {
    let info = NodeInfo {
        name: "x".to_owned(),
        flags: NodeFlags::base(),
        unk044: 1,
        zone_id: 1,
        node_type: NodeType::Object3d,
        data_ptr: 1,
        mesh_index: -1,
        area_partition_x: -1,
        area_partition_y: -1,
        parent_count: 0,
        parent_array_ptr: 0,
        children_count: 0,
        children_array_ptr: 0,
        block1: [0.0; 6],
        block2: [0.0; 6],
        block3: [0.0; 6],
        unk196: 160,
    };

    let mut data = vec![];
    write_node_info(&mut data, &info).unwrap();

    // Bit 0 is not a known node flag.
    data[36] |= 1;
    assert!(read_node_info(&mut Cursor::new(data)).is_err());
}

#[test]
fn test_object3d_euler_matrix_is_recomputed() {
    let object3d = Object3d {
        rotation: Some([0.5, -0.5, 1.0]),
        translation: Some([10.0, 20.0, 30.0]),
        matrix: None,
        matrix_sign: 0,
    };

    let mut data = vec![];
    write_object3d(&mut data, &object3d).unwrap();
    assert_eq!(data.len() as u64, OBJECT3D_SIZE);

    let decoded = read_object3d(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, object3d);

    let mut again = vec![];
    write_object3d(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_object3d_raw_matrix_is_preserved() {
    // Write a transformed node, then stomp the matrix with something the
    // Euler derivation cannot produce.
    let object3d = Object3d {
        rotation: Some([0.25, 0.0, 0.0]),
        translation: Some([0.0, 0.0, 0.0]),
        matrix: None,
        matrix_sign: 0,
    };
    let mut data = vec![];
    write_object3d(&mut data, &object3d).unwrap();

    for (i, value) in [2.0f32; 9].iter().enumerate() {
        data[48 + i * 4..52 + i * 4].copy_from_slice(&value.to_le_bytes());
    }

    let decoded = read_object3d(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded.matrix, Some([2.0; 9]));
    assert_eq!(decoded.matrix_sign, 0);

    let mut again = vec![];
    write_object3d(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_object3d_negative_zero_survives_via_sign_mask() {
    // An Euler rotation whose derived matrix contains -0.0 entries. The
    // written matrix must carry them, and the round trip must keep them.
    let rotation = [0.0f32, std::f32::consts::FRAC_PI_2, 0.0];
    let matrix = euler_to_matrix(rotation[0], rotation[1], rotation[2]);
    assert!(matrix.iter().any(|value| *value == 0.0 && value.is_sign_negative()));

    let object3d = Object3d {
        rotation: Some(rotation),
        translation: Some([0.0, 0.0, 0.0]),
        matrix: None,
        matrix_sign: crate::float::extract_zero_signs(&matrix),
    };

    let mut data = vec![];
    write_object3d(&mut data, &object3d).unwrap();

    let decoded = read_object3d(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded.matrix_sign, object3d.matrix_sign);

    let mut again = vec![];
    write_object3d(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_world_partition_grid() {
    // A 512x512 world: 2x2 partitions.
    let area = Area { left: 0, top: -512, right: 512, bottom: 0 };
    let mut partitions = vec![];
    for y in [0, -256] {
        let mut subpartitions = vec![];
        for x in [0, 256] {
            subpartitions.push(Partition {
                x,
                y,
                nodes: if x == 0 && y == 0 { vec![4, 5] } else { vec![] },
                unk: (0.0, 0.0, 0.0),
                ptr: if x == 0 && y == 0 { 0xBEEF } else { 0 },
            });
        }
        partitions.push(subpartitions);
    }

    let world = World {
        area,
        partitions,
        children: vec![1],
        virt_partition_x_count: 2,
        virt_partition_y_count: 2,
        fudge_count: false,
        area_partition_ptr: 0x100,
        virt_partition_ptr: 0x200,
        children_ptr: 0x300,
        lights_ptr: 0x400,
    };

    let mut data = vec![];
    write_world(&mut data, &world).unwrap();
    assert_eq!(data.len() as u64, size_world(&world));
    assert_eq!(data.len() as u64, 188 + 4 + 4 * 72 + 2 * 4);

    // The diagonal comes out as the approximate sqrt, not the real one.
    let diag = f32::from_le_bytes(data[124..128].try_into().unwrap());
    assert_eq!(diag, -192.0);

    let decoded = read_world(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, world);
    assert_eq!(decoded.partitions[0][0].x, 0);
    assert_eq!(decoded.partitions[0][0].y, 0);
    assert_eq!(decoded.partitions[1][1].x, 256);
    assert_eq!(decoded.partitions[1][1].y, -256);

    let mut again = vec![];
    write_world(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_camera_round_trip() {
    let camera = Camera {
        clip: (1.0, 5000.0),
        fov: (1.5, 1.2),
    };

    let mut data = vec![];
    write_camera(&mut data, &camera).unwrap();
    assert_eq!(data.len() as u64, CAMERA_SIZE);

    let decoded = read_camera(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, camera);

    let mut again = vec![];
    write_camera(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_camera_clip_ordering_fails() {
    let camera = Camera {
        clip: (1.0, 5000.0),
        fov: (1.5, 1.2),
    };
    let mut data = vec![];
    write_camera(&mut data, &camera).unwrap();

    // Far clip below near clip.
    data[180..184].copy_from_slice(&0.5f32.to_le_bytes());
    assert!(read_camera(&mut Cursor::new(data)).is_err());
}

#[test]
fn test_window_and_display_round_trip() {
    let window = Window { resolution: (320, 200) };
    let mut data = vec![];
    write_window(&mut data, &window).unwrap();
    assert_eq!(data.len() as u64, WINDOW_SIZE);
    assert_eq!(read_window(&mut Cursor::new(data)).unwrap(), window);

    let display = Display {
        resolution: (640, 400),
        clear_color: [0.392, 0.392, 1.0],
    };
    let mut data = vec![];
    write_display(&mut data, &display).unwrap();
    assert_eq!(data.len() as u64, DISPLAY_SIZE);
    assert_eq!(read_display(&mut Cursor::new(data)).unwrap(), display);
}

#[test]
fn test_lod_round_trip() {
    let lod = Lod {
        level: true,
        range_near_sq: 10000.0,
        range_far: 300.0,
        unk60: 0.0,
        unk76: 0,
    };

    let mut data = vec![];
    write_lod(&mut data, &lod).unwrap();
    assert_eq!(data.len() as u64, LOD_SIZE);

    let decoded = read_lod(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, lod);

    // The far range square is stored and checked bit-exactly.
    let far_sq = f32::from_le_bytes(data[12..16].try_into().unwrap());
    assert_eq!(far_sq, 90000.0);
}

#[test]
fn test_light_round_trip() {
    let light = Light {
        direction: Vector3::new(0.5, -1.0, 0.3),
        diffuse: 1.0,
        ambient: 0.2,
        range: (30.0, 1000.0),
        parent_ptr: 0xCAFE,
    };

    let mut data = vec![];
    write_light(&mut data, &light).unwrap();
    assert_eq!(data.len() as u64, LIGHT_SIZE);

    let decoded = read_light(&mut Cursor::new(data.to_vec())).unwrap();
    assert_eq!(decoded, light);

    let mut again = vec![];
    write_light(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_light_range_ordering_fails() {
    let light = Light {
        direction: Vector3::new(0.0, -1.0, 0.0),
        diffuse: 1.0,
        ambient: 0.2,
        range: (30.0, 1000.0),
        parent_ptr: 1,
    };
    let mut data = vec![];
    write_light(&mut data, &light).unwrap();

    // range max below range min.
    data[184..188].copy_from_slice(&1.0f32.to_le_bytes());
    assert!(read_light(&mut Cursor::new(data)).is_err());
}
