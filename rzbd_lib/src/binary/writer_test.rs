//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the [`WriteBytes`] trait.

use std::io::Cursor;

use super::ReadBytes;
use super::WriteBytes;

#[test]
fn test_write_integers_round_trip() {
    let mut data = vec![];
    data.write_u32(0x08170616).unwrap();
    data.write_i32(-1).unwrap();
    data.write_u16(0xFF38).unwrap();
    data.write_f32(-192.0).unwrap();

    let mut cursor = Cursor::new(data);
    assert_eq!(cursor.read_u32().unwrap(), 0x08170616);
    assert_eq!(cursor.read_i32().unwrap(), -1);
    assert_eq!(cursor.read_i16().unwrap(), -200);
    assert_eq!(cursor.read_f32().unwrap(), -192.0);
}

#[test]
fn test_write_string_u8_0padded() {
    let mut data = vec![];
    data.write_string_u8_0padded("camera1", 36).unwrap();
    assert_eq!(data.len(), 36);
    assert_eq!(&data[..8], b"camera1\0");
    assert!(data[7..].iter().all(|byte| *byte == 0));

    let mut data = vec![];
    assert!(data.write_string_u8_0padded("this name is way too long", 8).is_err());
}

#[test]
fn test_write_sized_string_u8_u32() {
    let mut data = vec![];
    data.write_sized_string_u8_u32("a").unwrap();
    assert_eq!(data, vec![1, 0, 0, 0, b'a']);
}

#[test]
fn test_negative_zero_survives() {
    let mut data = vec![];
    data.write_f32(-0.0).unwrap();
    assert_eq!(data, vec![0, 0, 0, 0x80]);

    let mut cursor = Cursor::new(data);
    let value = cursor.read_f32().unwrap();
    assert_eq!(value.to_bits(), (-0.0f32).to_bits());
}
