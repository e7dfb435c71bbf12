//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding texture archives.

use std::io::{Cursor, Write};

use crate::files::*;

use super::colors::*;
use super::*;

/// Builds the raw bytes of an archive with one unpaletted 2x2 texture.
fn rgb_2x2_archive() -> Vec<u8> {
    let mut data: Vec<u8> = vec![];
    // Header.
    data.write_u32(0).unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(0).unwrap();
    // Entry.
    data.write_string_u8_0padded("test", 32).unwrap();
    data.write_u32(64).unwrap();
    data.write_i32(-1).unwrap();
    // Info: flag = BytesPerPixels2 | NoAlpha, 2x2, no palette, no stretch.
    data.write_u32(0b101).unwrap();
    data.write_u16(2).unwrap();
    data.write_u16(2).unwrap();
    data.write_u32(0).unwrap();
    data.write_u16(0).unwrap();
    data.write_u16(0).unwrap();
    // Pixels: pure red, green, blue, white.
    data.write_u16(0xF800).unwrap();
    data.write_u16(0x07E0).unwrap();
    data.write_u16(0x001F).unwrap();
    data.write_u16(0xFFFF).unwrap();
    data
}

#[test]
fn test_textures_rgb_decode_then_encode() {
    let before = rgb_2x2_archive();

    let mut decoded = Textures::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded.textures().len(), 1);

    let texture = &decoded.textures()[0];
    assert_eq!(texture.name(), "test");
    assert_eq!(*texture.width(), 2);
    assert_eq!(*texture.height(), 2);
    assert_eq!(*texture.stretch(), 0);

    match texture.image() {
        TextureImage::Color { data, alpha } => {
            assert_eq!(data, &vec![
                255, 0, 0,
                0, 255, 0,
                0, 0, 255,
                255, 255, 255,
            ]);
            assert!(alpha.is_none());
        }
        _ => panic!("expected a full-color image"),
    }

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_textures_simple_alpha_is_synthesized_and_dropped() {
    let mut before = rgb_2x2_archive();
    // Switch the flag to BytesPerPixels2 | HasAlpha and zero out one pixel.
    before[64] = 0b011;
    before[80] = 0;
    before[81] = 0;

    let mut decoded = Textures::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    match decoded.textures()[0].image() {
        TextureImage::Color { alpha, .. } => {
            assert_eq!(alpha.as_deref(), Some(&[0, 255, 255, 255][..]));
        }
        _ => panic!("expected a full-color image"),
    }

    // The synthesized alpha must not leak into the encoded bytes.
    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_textures_paletted_with_full_alpha_round_trip() {
    let mut before: Vec<u8> = vec![];
    before.write_u32(0).unwrap();
    before.write_u32(1).unwrap();
    before.write_u32(0).unwrap();
    before.write_u32(1).unwrap();
    before.write_u32(0).unwrap();
    before.write_u32(0).unwrap();
    before.write_string_u8_0padded("pal", 32).unwrap();
    before.write_u32(64).unwrap();
    before.write_i32(-1).unwrap();
    // Info: flag = BytesPerPixels2 | HasAlpha | FullAlpha, 2x2, 3 palette entries.
    before.write_u32(0b1011).unwrap();
    before.write_u16(2).unwrap();
    before.write_u16(2).unwrap();
    before.write_u32(0).unwrap();
    before.write_u16(3).unwrap();
    before.write_u16(0).unwrap();
    // Indices.
    before.write_all(&[0, 1, 2, 1]).unwrap();
    // Alpha plane.
    before.write_all(&[255, 128, 0, 255]).unwrap();
    // Palette: red, green, blue.
    before.write_u16(0xF800).unwrap();
    before.write_u16(0x07E0).unwrap();
    before.write_u16(0x001F).unwrap();

    let mut decoded = Textures::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    match decoded.textures()[0].image() {
        TextureImage::Indexed { data, palette, alpha } => {
            assert_eq!(data, &vec![0, 1, 2, 1]);
            assert_eq!(palette, &vec![255, 0, 0, 0, 255, 0, 0, 0, 255]);
            assert_eq!(alpha.as_deref(), Some(&[255, 128, 0, 255][..]));
        }
        _ => panic!("expected an indexed image"),
    }

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_textures_out_of_range_palette_index_fails() {
    let mut before: Vec<u8> = vec![];
    before.write_u32(0).unwrap();
    before.write_u32(1).unwrap();
    before.write_u32(0).unwrap();
    before.write_u32(1).unwrap();
    before.write_u32(0).unwrap();
    before.write_u32(0).unwrap();
    before.write_string_u8_0padded("bad", 32).unwrap();
    before.write_u32(64).unwrap();
    before.write_i32(-1).unwrap();
    before.write_u32(0b0001).unwrap();
    before.write_u16(2).unwrap();
    before.write_u16(1).unwrap();
    before.write_u32(0).unwrap();
    before.write_u16(2).unwrap();
    before.write_u16(0).unwrap();
    // Index 7 is out of range for a 2-entry palette.
    before.write_all(&[0, 7]).unwrap();
    before.write_u16(0xF800).unwrap();
    before.write_u16(0x07E0).unwrap();

    let result = Textures::decode(&mut Cursor::new(before), &None);
    assert!(matches!(result, Err(crate::error::ZbdError::Texture(_))));
}

#[test]
fn test_textures_global_palette_is_rejected() {
    let mut before = rgb_2x2_archive();
    // Set UseGlobalPalette on the texture flag.
    before[64] |= 1 << 4;

    let result = Textures::decode(&mut Cursor::new(before), &None);
    assert!(matches!(result, Err(crate::error::ZbdError::Texture(_))));
}

#[test]
fn test_color_tables_are_stable_under_round_trip() {
    // For every 16-bit color, expanding to 888 and packing back must return
    // the same 16-bit color, and re-expanding must be a fixed point.
    for color in [0u16, 1, 0x001F, 0x07E0, 0xF800, 0x1234, 0x8421, 0xFFFF] {
        let rgb = rgb565to888(&[color]);
        let packed = rgb888to565(&rgb);
        assert_eq!(packed, vec![color]);
        assert_eq!(rgb565to888(&packed), rgb);
    }
}

#[test]
fn test_rgb_to_palette_prefers_first_duplicate() {
    // Duplicate color in the palette: the first index wins.
    let palette = vec![10, 20, 30, 10, 20, 30, 40, 50, 60];
    let image = vec![40, 50, 60, 10, 20, 30];
    let indices = rgb_to_palette("dup", &image, &palette).unwrap();
    assert_eq!(indices, vec![2, 0]);

    // A color not in the palette is a texture error.
    let image = vec![1, 2, 3];
    assert!(rgb_to_palette("missing", &image, &palette).is_err());
}
