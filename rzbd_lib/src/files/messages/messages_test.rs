//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the message table decoding.
//!
//! Full PE files are too unwieldy to embed; the resource payload decoding
//! is what carries the format knowledge, so that's what gets the fixture.

use std::io::Write;

use crate::binary::WriteBytes;

use super::*;

fn message_table_fixture() -> Vec<u8> {
    let mut data: Vec<u8> = vec![];

    // One block, two messages, ids 100 and 101.
    data.write_u32(1).unwrap();
    data.write_u32(100).unwrap();
    data.write_u32(102).unwrap();
    data.write_u32(16).unwrap();

    // Entry 100: length 4 + text, no flags, CRLF-NUL terminated.
    let text_1 = b"Mission accomplished\r\n\0\0";
    data.write_u16(4 + text_1.len() as u16).unwrap();
    data.write_u16(0).unwrap();
    data.write_all(text_1).unwrap();

    // Entry 101: cp1252 high byte (e-acute).
    let text_2 = b"D\xE9truit\0";
    data.write_u16(4 + text_2.len() as u16).unwrap();
    data.write_u16(0).unwrap();
    data.write_all(text_2).unwrap();

    data
}

#[test]
fn test_messagetable_resource_decoding() {
    let data = message_table_fixture();
    let messages = read_messagetable_resource(&data).unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], (100, "Mission accomplished".to_owned()));
    assert_eq!(messages[1], (101, "D\u{e9}truit".to_owned()));
}

#[test]
fn test_messagetable_unicode_flag_fails() {
    let mut data = message_table_fixture();
    // Set the flags of the first entry (offset 16 + 2).
    data[18] = 1;

    assert!(read_messagetable_resource(&data).is_err());
}

#[test]
fn test_locale_constants() {
    assert_eq!(LOCALE_DEFAULT, 1033);
    assert_eq!(LOCALE_GERMAN, 1031);
    assert_eq!(LOCALE_FRENCH, 1036);
}
