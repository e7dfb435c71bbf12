//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding ZArchives.

use std::io::Cursor;

use time::macros::datetime;

use crate::files::*;

use super::*;

fn two_entry_archive() -> Archive {
    let mut archive = Archive::default();
    archive.entries_mut().push(ArchiveEntry {
        name: "X".to_owned(),
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        start: 0,
        flag: 0,
        comment: vec![0; 64],
        write_time: Filetime::DateTime(datetime!(1601-01-01 00:00:00 UTC)),
    });
    archive.entries_mut().push(ArchiveEntry {
        name: "X".to_owned(),
        data: vec![9, 10, 11, 12, 13, 14, 15, 16],
        start: 0,
        flag: 1,
        comment: vec![0; 64],
        write_time: Filetime::DateTime(datetime!(1601-01-01 00:00:00.000001 UTC)),
    });
    archive
}

#[test]
fn test_archive_duplicate_names_round_trip() {
    let mut archive = two_entry_archive();

    let mut before = vec![];
    archive.encode(&mut before, &None).unwrap();

    // 16 payload bytes + 2 * 148 TOC bytes + 8 footer bytes.
    assert_eq!(before.len(), 320);

    let mut decoded = Archive::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded.entries().len(), 2);
    assert_eq!(decoded.entries()[0].name(), "X");
    assert_eq!(decoded.entries()[1].name(), "X");
    assert_eq!(*decoded.entries()[0].flag(), 0);
    assert_eq!(*decoded.entries()[1].flag(), 1);
    assert_eq!(*decoded.entries()[0].start(), 0);
    assert_eq!(*decoded.entries()[1].start(), 8);

    // The epoch encodes as filetime 0, the microsecond after as 10 ticks.
    assert_eq!(decoded.entries()[0].write_time().to_raw(), 0);
    assert_eq!(decoded.entries()[1].write_time().to_raw(), 10);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_archive_preserves_garbage_comments_and_raw_filetimes() {
    let mut comment = vec![0u8; 64];
    comment[..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    let mut archive = Archive::default();
    archive.entries_mut().push(ArchiveEntry {
        name: "mech_hips".to_owned(),
        data: vec![0xAA; 3],
        start: 0,
        flag: 0,
        comment,
        // 123456789 ticks is not a whole microsecond, so the raw integer
        // must survive the round trip.
        write_time: Filetime::from_raw(123_456_789),
    });

    assert_eq!(*archive.entries()[0].write_time(), Filetime::Raw(123_456_789));

    let mut before = vec![];
    archive.encode(&mut before, &None).unwrap();

    let mut decoded = Archive::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_archive_bad_version_fails() {
    let mut archive = two_entry_archive();
    let mut data = vec![];
    archive.encode(&mut data, &None).unwrap();

    // Corrupt the version in the footer.
    let footer = data.len() - 8;
    data[footer] = 2;

    let result = Archive::decode(&mut Cursor::new(data), &None);
    assert!(matches!(result, Err(crate::error::ZbdError::Archive(_))));
}

#[test]
fn test_archive_non_ascii_name_fails() {
    let mut archive = two_entry_archive();
    let mut data = vec![];
    archive.encode(&mut data, &None).unwrap();

    // Corrupt the first byte of the first TOC entry's name.
    let toc = data.len() - 8 - 2 * 148;
    data[toc + 8] = 0xFF;

    let result = Archive::decode(&mut Cursor::new(data), &None);
    assert!(matches!(result, Err(crate::error::ZbdError::Archive(_))));
}

#[test]
fn test_filetime_codec() {
    assert_eq!(Filetime::from_raw(0), Filetime::DateTime(datetime!(1601-01-01 00:00:00 UTC)));
    assert_eq!(Filetime::from_raw(10).to_raw(), 10);
    assert_eq!(Filetime::from_raw(7), Filetime::Raw(7));
    assert_eq!(Filetime::from_raw(7).to_raw(), 7);

    // A real date: 1998-01-01 00:00:00 UTC.
    let filetime = Filetime::from_raw(125_280_864_000_000_000);
    assert_eq!(filetime, Filetime::DateTime(datetime!(1998-01-01 00:00:00 UTC)));
    assert_eq!(filetime.to_raw(), 125_280_864_000_000_000);
}
