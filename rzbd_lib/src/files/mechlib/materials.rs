//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The `materials` entry of the mechlib archive.
//!
//! Very similar to the GameZ material array, but count-prefixed with no
//! free tail, no link chains, and textured materials carry their texture
//! name inline instead of an index.

use getset::*;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in, assert_ne};
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::check_size_mismatch;

/// Size of a material record, excluding the texture name.
pub const MATERIAL_INFO_SIZE: u64 = 40;

/// Bit 0 of the flag marks a textured material.
const FLAG_TEXTURED: u8 = 1 << 0;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds the entire mechlib material array decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Materials {
    materials: Vec<Material>,
}

/// A single mechlib material.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Material {

    /// Texture name. Only set when the textured bit is.
    pub name: Option<String>,
    pub flag: u8,
    pub unk00: u8,
    pub rgb: u16,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub pointer: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            flag: 17,
            unk00: 0xFF,
            rgb: 0x7FFF,
            red: 255.0,
            green: 255.0,
            blue: 255.0,
            pointer: 1,
        }
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Materials
//---------------------------------------------------------------------------//

impl Decodeable for Materials {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let count = data.read_u32()?;

        let mut materials = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let prev = data.stream_position()?;

            let unk00 = data.read_u8()?;
            let flag = data.read_u8()?;
            let rgb = data.read_u16()?;
            let red = data.read_f32()?;
            let green = data.read_f32()?;
            let blue = data.read_f32()?;
            let pointer = data.read_u32()?;
            let unk20 = data.read_f32()?;
            let unk24 = data.read_f32()?;
            let unk28 = data.read_f32()?;
            let unk32 = data.read_u32()?;
            let cycle_ptr = data.read_u32()?;

            assert_in("field 00", &[0x00, 0xFF], unk00, prev)?;
            assert_eq("field 20", 0.0, unk20, prev + 20)?;
            assert_eq("field 24", 0.5, unk24, prev + 24)?;
            assert_eq("field 28", 0.5, unk28, prev + 28)?;
            assert_eq("field 32", 0, unk32, prev + 32)?;
            assert_eq("cycle pointer", 0, cycle_ptr, prev + 36)?;

            let textured = (flag & FLAG_TEXTURED) != 0;
            if textured {
                assert_ne("pointer", 0, pointer, prev + 16)?;
                assert_eq("rgb", 0x7FFF, rgb, prev + 2)?;
                assert_eq("red", 255.0, red, prev + 4)?;
                assert_eq("green", 255.0, green, prev + 8)?;
                assert_eq("blue", 255.0, blue, prev + 12)?;
            } else {
                assert_eq("pointer", 0, pointer, prev + 16)?;
                assert_eq("rgb", 0, rgb, prev + 2)?;
            }

            let name = if textured {
                Some(data.read_sized_string_u8_u32()?)
            } else {
                None
            };

            materials.push(Material {
                name,
                flag,
                unk00,
                rgb,
                red,
                green,
                blue,
                pointer,
            });
        }

        // Make sure all the data is processed.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        Ok(Self { materials })
    }
}

impl Encodeable for Materials {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_u32(self.materials.len() as u32)?;

        for (index, material) in self.materials.iter().enumerate() {
            let textured = (material.flag & FLAG_TEXTURED) != 0;
            if textured {
                assert_ne("pointer", 0, material.pointer, index)?;
                assert_eq("name", true, material.name.is_some(), index)?;
            } else {
                assert_eq("pointer", 0, material.pointer, index)?;
            }

            buffer.write_u8(material.unk00)?;
            buffer.write_u8(material.flag)?;
            buffer.write_u16(material.rgb)?;
            buffer.write_f32(material.red)?;
            buffer.write_f32(material.green)?;
            buffer.write_f32(material.blue)?;
            buffer.write_u32(material.pointer)?;
            buffer.write_f32(0.0)?;
            buffer.write_f32(0.5)?;
            buffer.write_f32(0.5)?;
            buffer.write_u32(0)?;
            buffer.write_u32(0)?;

            if let Some(name) = &material.name {
                buffer.write_sized_string_u8_u32(name)?;
            }
        }

        Ok(())
    }
}
