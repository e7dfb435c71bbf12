//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the RGB-565 <-> RGB-888 conversion tables.
//!
//! Naively shifting the 5/6/5 bits up would leave the bottom bits zero, so
//! colors would never reach full brightness. The game linearly interpolates
//! each channel instead, and so do we. The 65,536-entry table is shared
//! process-wide and built on first use.

use std::sync::LazyLock;

use crate::check::AssertionError;
use crate::error::{Result, ZbdError};

/// Linear interpolation from 5/6/5 bits to 8/8/8 bits, for every possible 16-bit color.
static LERP888: LazyLock<Vec<[u8; 3]>> = LazyLock::new(|| {
    (0..=0xFFFFu32).map(|color| {
        let bits = (color >> 11) & 0b11111;
        let red = (bits as f64 * 255.0 / 31.0 + 0.5) as u8;
        let bits = (color >> 5) & 0b111111;
        let green = (bits as f64 * 255.0 / 63.0 + 0.5) as u8;
        let bits = color & 0b11111;
        let blue = (bits as f64 * 255.0 / 31.0 + 0.5) as u8;
        [red, green, blue]
    }).collect()
});

/// Linear interpolation from 8 bits to 5 bits.
static LERP5: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut table = [0; 256];
    for (value, entry) in table.iter_mut().enumerate() {
        *entry = (value as f64 * 31.0 / 255.0 + 0.5) as u8;
    }
    table
});

/// Linear interpolation from 8 bits to 6 bits.
static LERP6: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut table = [0; 256];
    for (value, entry) in table.iter_mut().enumerate() {
        *entry = (value as f64 * 63.0 / 255.0 + 0.5) as u8;
    }
    table
});

/// This function expands 16-bit RGB-565 colors to RGB-888 triples.
pub fn rgb565to888(colors: &[u16]) -> Vec<u8> {
    let mut values = Vec::with_capacity(colors.len() * 3);
    for color in colors {
        values.extend_from_slice(&LERP888[*color as usize]);
    }
    values
}

/// This function packs RGB-888 triples back into 16-bit RGB-565 colors.
pub fn rgb888to565(colors: &[u8]) -> Vec<u16> {
    colors.chunks_exact(3).map(|rgb| {
        let red = LERP5[rgb[0] as usize] as u16;
        let green = LERP6[rgb[1] as usize] as u16;
        let blue = LERP5[rgb[2] as usize] as u16;
        (red << 11) | (green << 5) | blue
    }).collect()
}

/// This function synthesizes the "simple" alpha plane: fully transparent where the 16-bit
/// color is 0, fully opaque everywhere else.
pub fn simple_alpha565(colors: &[u16]) -> Vec<u8> {
    colors.iter().map(|color| if *color == 0 { 0 } else { 255 }).collect()
}

/// This function maps an RGB-888 image back to palette indices using an exact reverse lookup.
///
/// When a palette has duplicate colors, the first index wins, matching how
/// the original images were authored. A color missing from the palette is a
/// texture error.
pub fn rgb_to_palette(name: &str, image_data: &[u8], palette: &[u8]) -> Result<Vec<u8>> {
    let mut rgb_to_index = std::collections::HashMap::new();
    for (index, rgb) in palette.chunks_exact(3).enumerate() {
        rgb_to_index.entry([rgb[0], rgb[1], rgb[2]]).or_insert(index as u8);
    }

    image_data.chunks_exact(3).map(|rgb| {
        rgb_to_index.get(&[rgb[0], rgb[1], rgb[2]]).copied().ok_or_else(|| {
            ZbdError::texture(AssertionError::new("image color", crate::check::AssertOp::In, "the palette".to_owned(), format!("{rgb:?}"), name))
        })
    }).collect()
}
