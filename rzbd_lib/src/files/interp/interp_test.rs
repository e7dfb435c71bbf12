//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding interpreter archives.

use std::io::{Cursor, Write};

use time::macros::datetime;

use crate::files::*;

use super::*;

#[test]
fn test_interp_round_trip() {
    let mut interp = Interp::default();
    interp.scripts_mut().push(Script {
        name: "gamewin.gw".to_owned(),
        timestamp: datetime!(1999-03-15 12:30:00 UTC),
        lines: vec![
            "StartMission c1m1".to_owned(),
            "ifdef shell".to_owned(),
            "endif".to_owned(),
        ],
    });
    interp.scripts_mut().push(Script {
        name: "briefing.gw".to_owned(),
        timestamp: datetime!(1999-03-15 12:30:01 UTC),
        lines: vec!["ShowBriefing".to_owned()],
    });

    let mut before = vec![];
    interp.encode(&mut before, &None).unwrap();

    let mut decoded = Interp::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded, interp);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_interp_wire_format() {
    let mut interp = Interp::default();
    interp.scripts_mut().push(Script {
        name: "a".to_owned(),
        timestamp: datetime!(1970-01-01 00:00:00 UTC),
        lines: vec!["cmd arg".to_owned()],
    });

    let mut data = vec![];
    interp.encode(&mut data, &None).unwrap();

    // Header.
    assert_eq!(&data[0..4], &0x08971119u32.to_le_bytes());
    assert_eq!(&data[4..8], &7u32.to_le_bytes());
    assert_eq!(&data[8..12], &1u32.to_le_bytes());

    // Entry: name, timestamp 0, start right after the table.
    assert_eq!(data[12], b'a');
    assert_eq!(&data[132..136], &0u32.to_le_bytes());
    assert_eq!(&data[136..140], &140u32.to_le_bytes());

    // Body: size 8 ("cmd\0arg\0"), two arguments, NUL-separated.
    assert_eq!(&data[140..144], &8u32.to_le_bytes());
    assert_eq!(&data[144..148], &2u32.to_le_bytes());
    assert_eq!(&data[148..156], b"cmd\0arg\0");
    // Terminator.
    assert_eq!(&data[156..160], &0u32.to_le_bytes());
    assert_eq!(data.len(), 160);
}

#[test]
fn test_interp_bad_signature_fails() {
    let mut data: Vec<u8> = vec![];
    data.write_u32(0xDEADBEEF).unwrap();
    data.write_u32(7).unwrap();
    data.write_u32(0).unwrap();

    assert!(Interp::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_interp_argument_count_mismatch_fails() {
    let mut data: Vec<u8> = vec![];
    data.write_u32(0x08971119).unwrap();
    data.write_u32(7).unwrap();
    data.write_u32(1).unwrap();
    data.write_string_u8_0padded("a", 120).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(140).unwrap();
    // Size 4, but claims 3 arguments while only one NUL is present.
    data.write_u32(4).unwrap();
    data.write_u32(3).unwrap();
    data.write_all(b"cmd\0").unwrap();
    data.write_u32(0).unwrap();

    assert!(Interp::decode(&mut Cursor::new(data), &None).is_err());
}
