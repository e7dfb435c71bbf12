//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Texture archives hold the game's 2D images: 16-bit RGB-565 colors,
//! optionally palette-indexed, optionally with an alpha plane.
//!
//! # Texture Archive Structure
//!
//! | Bytes | Type                       | Data                                                          |
//! | ----- | -------------------------- | ------------------------------------------------------------- |
//! | 24    | Header                     | `{0, has_entries=1, global_palette=0, count, 0, 0}`, all u32. |
//! | 40*n  | Entry                      | `{name[32], start (u32), palette_index (i32, always -1)}`.    |
//! | *     | [Record](#record-structure)| One per texture, at its declared `start`.                     |
//!
//! # Record Structure
//!
//! | Bytes | Type               | Data                                                          |
//! | ----- | ------------------ | ------------------------------------------------------------- |
//! | 16    | Info               | `{flag (u32), width (u16), height (u16), 0 (u32), palette_count (u16), stretch (u16)}`. |
//! | *     | Pixels             | `w*h` u16 colors, or `w*h` palette indices if palette_count > 0. |
//! | *     | Alpha              | `w*h` alpha bytes, only if `FULL_ALPHA` is set.               |
//! | *     | Palette            | `palette_count` u16 colors, only if palette_count > 0.        |
//!
//! The "simple" alpha (`HAS_ALPHA` without `FULL_ALPHA`) is synthesized on
//! decode from zero-valued colors and never written back.

use bitflags::bitflags;
use getset::*;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_flags, assert_lt};
use crate::error::{Result, ZbdError};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::{ascii_zterm_padded, check_size_mismatch};

pub mod colors;

#[cfg(test)] mod textures_test;

/// Extension used by texture archives.
pub const EXTENSION: &str = ".zbd";

/// Size of the archive header.
const HEADER_SIZE: u64 = 24;

/// Size of a table-of-contents entry.
const ENTRY_SIZE: u64 = 40;

/// Size of a texture info record.
const INFO_SIZE: u64 = 16;

/// Size of the name field.
const NAME_SIZE: usize = 32;

bitflags! {

    /// This represents the bitmasks a texture can have applied to its flag field.
    ///
    /// The three "loaded" bits track allocated buffers at runtime. They can
    /// be set in a file, but carry no information.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TextureFlags: u32 {

        /// If set, 2 bytes per pixel, else 1 byte per pixel.
        const BYTES_PER_PIXELS_2 = 1 << 0;
        const HAS_ALPHA          = 1 << 1;
        const NO_ALPHA           = 1 << 2;
        const FULL_ALPHA         = 1 << 3;
        const USE_GLOBAL_PALETTE = 1 << 4;
        const IMAGE_LOADED       = 1 << 5;
        const ALPHA_LOADED       = 1 << 6;
        const PALETTE_LOADED     = 1 << 7;
    }
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire texture archive decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Textures {
    textures: Vec<Texture>,
}

/// This holds a single decoded texture.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Texture {
    name: String,
    flags: TextureFlags,
    width: u16,
    height: u16,

    /// Stretch code: 0 = none, 1 = double width, 2 = double height, 3 = both.
    ///
    /// Stretching is a display concern. The decoded image always keeps the
    /// stored dimensions, because the round trip needs them.
    stretch: u16,
    image: TextureImage,
}

/// The decoded pixel data of a texture.
#[derive(PartialEq, Clone, Debug)]
pub enum TextureImage {

    /// Full-color image: RGB-888 triples, plus an optional alpha plane.
    Color {
        data: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },

    /// Palette-indexed image: one index per pixel, the palette as RGB-888
    /// triples, plus an optional alpha plane.
    Indexed {
        data: Vec<u8>,
        palette: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

impl Default for TextureImage {
    fn default() -> Self {
        Self::Color {
            data: vec![],
            alpha: None,
        }
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Textures
//---------------------------------------------------------------------------//

/// Implementation of `Texture`.
impl Texture {

    /// This function returns the palette colors of the texture, if it has any.
    pub fn palette(&self) -> Option<&[u8]> {
        match &self.image {
            TextureImage::Color { .. } => None,
            TextureImage::Indexed { palette, .. } => Some(palette),
        }
    }

    /// This function returns the alpha plane of the texture, if it has one.
    pub fn alpha(&self) -> Option<&[u8]> {
        match &self.image {
            TextureImage::Color { alpha, .. } => alpha.as_deref(),
            TextureImage::Indexed { alpha, .. } => alpha.as_deref(),
        }
    }

    fn validate_info(offset: u64, flag: u32, zero: u32, stretch: u16) -> Result<TextureFlags> {
        assert_eq("field 4", 0, zero, offset + 8)?;
        assert_lt("stretch", 4, stretch, offset + 14)?;

        let flags: TextureFlags = assert_flags("texture flag", flag, offset)?;

        // One byte per pixel support isn't implemented.
        assert_eq("2 bytes per pixel", true, flags.contains(TextureFlags::BYTES_PER_PIXELS_2), offset).map_err(ZbdError::texture)?;

        // Global palette support isn't implemented.
        assert_eq("use global palette", false, flags.contains(TextureFlags::USE_GLOBAL_PALETTE), offset).map_err(ZbdError::texture)?;

        Ok(flags)
    }

    fn read<R: ReadBytes>(data: &mut R, name: String) -> Result<Self> {
        let offset = data.stream_position()?;

        let flag = data.read_u32()?;
        let width = data.read_u16()?;
        let height = data.read_u16()?;
        let zero = data.read_u32()?;
        let palette_count = data.read_u16()?;
        let stretch = data.read_u16()?;

        let flags = Self::validate_info(offset, flag, zero, stretch)?;

        let size = width as usize * height as usize;
        let has_full_alpha = flags.contains(TextureFlags::FULL_ALPHA);
        let has_simple_alpha = flags.contains(TextureFlags::HAS_ALPHA) && !has_full_alpha;

        let image = if palette_count == 0 {
            let mut colors = Vec::with_capacity(size);
            for _ in 0..size {
                colors.push(data.read_u16()?);
            }

            let mut alpha = if has_simple_alpha {
                Some(colors::simple_alpha565(&colors))
            } else {
                None
            };

            if has_full_alpha {
                alpha = Some(data.read_slice(size, false)?);
            }

            TextureImage::Color {
                data: colors::rgb565to888(&colors),
                alpha,
            }
        } else {
            let index_offset = data.stream_position()?;
            let indices = data.read_slice(size, false)?;

            let in_range = indices.iter().all(|index| (*index as u16) < palette_count);
            assert_eq("image data (palette) in range", true, in_range, index_offset).map_err(ZbdError::texture)?;

            // If a palette image had simple alpha, it would have to be
            // synthesized after the palette is loaded. Never happens.
            assert_eq("has simple alpha", false, has_simple_alpha, index_offset).map_err(ZbdError::texture)?;

            let alpha = if has_full_alpha {
                Some(data.read_slice(size, false)?)
            } else {
                None
            };

            let mut palette_colors = Vec::with_capacity(palette_count as usize);
            for _ in 0..palette_count {
                palette_colors.push(data.read_u16()?);
            }

            TextureImage::Indexed {
                data: indices,
                palette: colors::rgb565to888(&palette_colors),
                alpha,
            }
        };

        Ok(Self {
            name,
            flags,
            width,
            height,
            stretch,
            image,
        })
    }

    /// This function returns the encoded size of the texture record, in bytes.
    fn encoded_size(&self) -> u64 {
        let size = self.width as u64 * self.height as u64;
        let mut total = INFO_SIZE;
        match &self.image {
            TextureImage::Color { alpha, .. } => {
                total += size * 2;
                if self.flags.contains(TextureFlags::FULL_ALPHA) && alpha.is_some() {
                    total += size;
                }
            }
            TextureImage::Indexed { palette, alpha, .. } => {
                total += size;
                if self.flags.contains(TextureFlags::FULL_ALPHA) && alpha.is_some() {
                    total += size;
                }
                total += (palette.len() as u64 / 3) * 2;
            }
        }
        total
    }

    fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        let name = self.name.as_str();
        let size = self.width as usize * self.height as usize;

        assert_eq("2 bytes per pixel", true, self.flags.contains(TextureFlags::BYTES_PER_PIXELS_2), name).map_err(ZbdError::texture)?;

        let has_full_alpha = self.flags.contains(TextureFlags::FULL_ALPHA);
        let (image_data, alpha_data, palette_data) = match &self.image {
            TextureImage::Color { data, alpha } => {
                assert_eq("image data length", size * 3, data.len(), name).map_err(ZbdError::internal)?;
                let pixels = colors::rgb888to565(data);

                let mut encoded = Vec::with_capacity(size * 2);
                for pixel in pixels {
                    encoded.write_u16(pixel)?;
                }
                (encoded, alpha.clone(), None)
            }
            TextureImage::Indexed { data, palette, alpha } => {
                assert_eq("image data length", size, data.len(), name).map_err(ZbdError::internal)?;

                let palette_count = palette.len() / 3;
                let in_range = data.iter().all(|index| (*index as usize) < palette_count);
                assert_eq("image data (palette) in range", true, in_range, name).map_err(ZbdError::internal)?;

                let colors = colors::rgb888to565(palette);
                let mut encoded = Vec::with_capacity(palette_count * 2);
                for color in colors {
                    encoded.write_u16(color)?;
                }
                (data.to_vec(), alpha.clone(), Some(encoded))
            }
        };

        // Drop the simple/fake alpha.
        let alpha_data = if has_full_alpha { alpha_data } else { None };
        assert_eq("has alpha data", has_full_alpha, alpha_data.is_some(), name).map_err(ZbdError::texture)?;

        buffer.write_u32(self.flags.bits())?;
        buffer.write_u16(self.width)?;
        buffer.write_u16(self.height)?;
        buffer.write_u32(0)?;
        buffer.write_u16(palette_data.as_ref().map_or(0, |palette| (palette.len() / 2) as u16))?;
        buffer.write_u16(self.stretch)?;

        buffer.write_all(&image_data)?;

        if let Some(alpha) = alpha_data {
            assert_eq("alpha data length", size, alpha.len(), name).map_err(ZbdError::texture)?;
            buffer.write_all(&alpha)?;
        }

        if let Some(palette) = palette_data {
            buffer.write_all(&palette)?;
        }

        Ok(())
    }
}

impl Decodeable for Textures {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;

        let zero1 = data.read_u32()?;
        let has_entries = data.read_u32()?;
        let global_palette_count = data.read_u32()?;
        let count = data.read_u32()?;
        let zero2 = data.read_u32()?;
        let zero3 = data.read_u32()?;

        assert_eq("field 1", 0, zero1, 0u64)?;
        assert_eq("has entries", 1, has_entries, 4u64)?;

        // Global palette support isn't implemented.
        assert_eq("global palette count", 0, global_palette_count, 8u64).map_err(ZbdError::texture)?;
        assert_eq("field 5", 0, zero2, 16u64)?;
        assert_eq("field 6", 0, zero3, 20u64)?;

        let mut table = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let entry_offset = data.stream_position()?;
            let name_raw = data.read_slice(NAME_SIZE, false)?;
            let start = data.read_u32()?;
            let palette_index = data.read_i32()?;

            // Global palette support isn't implemented.
            assert_eq("global palette index", -1, palette_index, entry_offset + 36).map_err(ZbdError::texture)?;

            let name = ascii_zterm_padded("texture name", &name_raw, entry_offset)?;
            table.push((name, start));
        }

        let mut textures = Vec::with_capacity(count as usize);
        for (name, start) in table {
            let offset = data.stream_position()?;
            assert_eq("texture offset", start as u64, offset, offset)?;
            textures.push(Texture::read(data, name)?);
        }

        check_size_mismatch(data.stream_position()? as usize, data_len as usize)?;
        Ok(Self { textures })
    }
}

impl Encodeable for Textures {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let count = self.textures.len() as u32;

        buffer.write_u32(0)?;
        buffer.write_u32(1)?;
        buffer.write_u32(0)?;
        buffer.write_u32(count)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;

        let mut offset = HEADER_SIZE + ENTRY_SIZE * count as u64;
        for texture in &self.textures {
            buffer.write_string_u8_0padded(&texture.name, NAME_SIZE)?;
            buffer.write_u32(offset as u32)?;
            buffer.write_i32(-1)?;
            offset += texture.encoded_size();
        }

        for texture in &self.textures {
            texture.write(buffer)?;
        }

        Ok(())
    }
}
