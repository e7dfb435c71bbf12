//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding motions.

use std::io::Cursor;

use nalgebra::{Vector3, Vector4};

use crate::files::*;

use super::*;

fn one_bone_motion() -> Motion {
    let mut motion = Motion::default();
    *motion.loop_time_mut() = 1.0;
    *motion.frame_count_mut() = 2;
    motion.parts_mut().push(MotionPart {
        name: "a".to_owned(),
        frames: vec![
            MotionFrame {
                translation: Vector3::new(0.0, 0.0, 0.0),
                rotation: Vector4::new(1.0, 0.0, 0.0, 0.0),
            },
            MotionFrame {
                translation: Vector3::new(1.0, 0.0, 0.0),
                rotation: Vector4::new(1.0, 0.0, 0.0, 0.0),
            },
        ],
    });
    motion
}

#[test]
fn test_motion_on_disk_size() {
    // 24 header + (4 + 1 name + 4 flag) + 2 * (12 + 16) = 89 bytes.
    let mut motion = one_bone_motion();
    let mut data = vec![];
    motion.encode(&mut data, &None).unwrap();
    assert_eq!(data.len(), 89);

    // The on-disk frame count is stored decremented by one.
    assert_eq!(&data[8..12], &1u32.to_le_bytes());
}

#[test]
fn test_motion_round_trip() {
    let mut motion = one_bone_motion();
    let mut before = vec![];
    motion.encode(&mut before, &None).unwrap();

    let mut decoded = Motion::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded, motion);
    assert_eq!(*decoded.frame_count(), 2);
    assert_eq!(decoded.parts()[0].frames().len(), 2);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_motion_zero_loop_time_fails() {
    let mut motion = one_bone_motion();
    let mut data = vec![];
    motion.encode(&mut data, &None).unwrap();
    data[4..8].copy_from_slice(&0.0f32.to_le_bytes());

    assert!(Motion::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_motion_bad_flag_fails() {
    let mut motion = one_bone_motion();
    let mut data = vec![];
    motion.encode(&mut data, &None).unwrap();
    // The flag sits right after the header and the 1-char name.
    data[29..33].copy_from_slice(&8u32.to_le_bytes());

    assert!(Motion::decode(&mut Cursor::new(data), &None).is_err());
}
