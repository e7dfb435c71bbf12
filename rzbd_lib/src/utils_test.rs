//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the string-field helpers.

use crate::utils::*;

#[test]
fn test_ascii_zterm_padded() {
    let buffer = b"sunlight\0\0\0\0";
    assert_eq!(ascii_zterm_padded("name", buffer, 0).unwrap(), "sunlight");

    // Garbage after the terminator is an error for padded fields.
    let buffer = b"sunlight\0ZZ\0";
    assert!(ascii_zterm_padded("name", buffer, 0).is_err());

    // A missing terminator is an error.
    let buffer = b"sunlightsunl";
    assert!(ascii_zterm_padded("name", buffer, 0).is_err());
}

#[test]
fn test_ascii_zterm_partition_preserves_garbage() {
    let buffer = b"mech\0\xDE\xAD\xBE\xEF";
    let (name, pad) = ascii_zterm_partition("name", buffer, 0).unwrap();
    assert_eq!(name, "mech");
    assert_eq!(pad, vec![0xDE, 0xAD, 0xBE, 0xEF]);

    let repacked = pack_zterm_partition("name", &name, &pad, buffer.len()).unwrap();
    assert_eq!(repacked, buffer);
}

#[test]
fn test_ascii_zterm_node_name_accepts_template_padding() {
    // "foo\0" copied over "Default_node_name": the template shines through
    // after the terminator.
    let mut buffer = vec![0u8; 36];
    buffer[..DEFAULT_NODE_NAME.len()].copy_from_slice(DEFAULT_NODE_NAME);
    buffer[..3].copy_from_slice(b"foo");
    buffer[3] = 0;

    assert_eq!(ascii_zterm_node_name("name", &buffer, 0).unwrap(), "foo");
    assert_eq!(pack_node_name("foo", 36).unwrap(), buffer);

    // All-zero padding is also accepted.
    let mut buffer = vec![0u8; 36];
    buffer[..3].copy_from_slice(b"foo");
    assert_eq!(ascii_zterm_node_name("name", &buffer, 0).unwrap(), "foo");

    // Anything else is not.
    let mut buffer = vec![0u8; 36];
    buffer[..3].copy_from_slice(b"foo");
    buffer[10] = b'X';
    assert!(ascii_zterm_node_name("name", &buffer, 0).is_err());
}

#[test]
fn test_ascii_zterm_suffix() {
    let mut buffer = vec![0u8; 20];
    buffer[..7].copy_from_slice(b"rock_a\0");
    buffer[7..10].copy_from_slice(b"tif");
    let (name, suffix) = ascii_zterm_suffix("texture", &buffer, 0).unwrap();
    assert_eq!(name, "rock_a");
    assert_eq!(suffix, "tif");
    assert_eq!(pack_texture_name(&name, &suffix, 20).unwrap(), buffer);

    // No suffix at all.
    let mut buffer = vec![0u8; 20];
    buffer[..7].copy_from_slice(b"rock_a\0");
    let (name, suffix) = ascii_zterm_suffix("texture", &buffer, 0).unwrap();
    assert_eq!(name, "rock_a");
    assert_eq!(suffix, "");
    assert_eq!(pack_texture_name(&name, &suffix, 20).unwrap(), buffer);

    // A cut-off suffix on a long name still matches.
    let mut buffer = vec![0u8; 20];
    buffer[..18].copy_from_slice(b"very_long_texture\0");
    buffer[18..20].copy_from_slice(b"ti");
    let (name, suffix) = ascii_zterm_suffix("texture", &buffer, 0).unwrap();
    assert_eq!(name, "very_long_texture");
    assert_eq!(suffix, "tif");
    assert_eq!(pack_texture_name(&name, &suffix, 20).unwrap(), buffer);

    // Unknown padding is an error.
    let mut buffer = vec![0u8; 20];
    buffer[..7].copy_from_slice(b"rock_a\0");
    buffer[7..10].copy_from_slice(b"bmp");
    assert!(ascii_zterm_suffix("texture", &buffer, 0).is_err());
}

#[test]
fn test_check_size_mismatch() {
    assert!(check_size_mismatch(100, 100).is_ok());
    assert!(check_size_mismatch(99, 100).is_err());
}
