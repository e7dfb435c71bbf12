//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the [`ReadBytes`] trait.

use std::io::Cursor;

use super::ReadBytes;

#[test]
fn test_read_integers_are_little_endian() {
    let mut cursor = Cursor::new(vec![0x22, 0x12, 0x97, 0x02]);
    assert_eq!(cursor.read_u32().unwrap(), 0x02971222);

    let mut cursor = Cursor::new(vec![0xFF, 0xFF]);
    assert_eq!(cursor.read_i16().unwrap(), -1);

    let mut cursor = Cursor::new(vec![0x38, 0xFF]);
    assert_eq!(cursor.read_i16().unwrap(), -200);
}

#[test]
fn test_read_past_the_end_fails() {
    let mut cursor = Cursor::new(vec![0x01]);
    assert!(cursor.read_u32().is_err());
    assert!(cursor.read_f32().is_err());
}

#[test]
fn test_read_slice_advances_and_rewinds() {
    let mut cursor = Cursor::new(vec![1, 2, 3, 4]);
    let data = cursor.read_slice(4, true).unwrap();
    assert_eq!(data, vec![1, 2, 3, 4]);
    assert_eq!(cursor.position(), 0);

    let data = cursor.read_slice(2, false).unwrap();
    assert_eq!(data, vec![1, 2]);
    assert_eq!(cursor.position(), 2);
}

#[test]
fn test_read_sized_string_u8_u32() {
    let mut cursor = Cursor::new(vec![2, 0, 0, 0, b'h', b'i', 0xAA]);
    assert_eq!(cursor.read_sized_string_u8_u32().unwrap(), "hi");
    assert_eq!(cursor.position(), 6);
}

#[test]
fn test_read_vectors() {
    let mut cursor = Cursor::new(vec![
        0x00, 0x00, 0x80, 0x3F,
        0x00, 0x00, 0x00, 0xC0,
        0x00, 0x00, 0x00, 0x00,
    ]);
    let vector = cursor.read_vector_3_f32().unwrap();
    assert_eq!(vector.x, 1.0);
    assert_eq!(vector.y, -2.0);
    assert_eq!(vector.z, 0.0);
}
