//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The GameZ texture table: 40-byte records naming the textures the level
//! uses.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::assert_eq;
use crate::error::Result;
use crate::utils::{ascii_zterm_suffix, pack_texture_name};

/// Size of a texture record.
pub const TEXTURE_INFO_SIZE: u64 = 40;

/// Size of the name field.
const NAME_SIZE: usize = 20;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A texture reference. The name field uses a null-terminator trick: the
/// '.' of the filename became the terminator, so the original suffix (or
/// its truncation) may follow it and must be preserved.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct TextureRef {
    pub name: String,
    pub suffix: String,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

/// This function reads the texture table.
pub fn read_textures<R: ReadBytes>(data: &mut R, count: u32) -> Result<Vec<TextureRef>> {
    let mut textures = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let prev = data.stream_position()?;

        // Not sure: a pointer to the previous texture in the global array?
        let zero00 = data.read_u32()?;

        // A non-zero value here causes additional dynamic code to be called.
        let zero04 = data.read_u32()?;
        let name_raw = data.read_slice(NAME_SIZE, false)?;

        // 2 if the texture is used, 0 if unused, 1 or 3 while the engine is
        // processing it.
        let used = data.read_u32()?;

        // Stores the texture's index in the global texture array.
        let index = data.read_u32()?;

        // Not sure: a pointer to the next texture in the global array?
        let mone36 = data.read_i32()?;

        assert_eq("field 00", 0, zero00, prev)?;
        assert_eq("field 04", 0, zero04, prev + 4)?;
        assert_eq("used", 2, used, prev + 28)?;
        assert_eq("index", 0, index, prev + 32)?;
        assert_eq("field 36", -1, mone36, prev + 36)?;

        let (name, suffix) = ascii_zterm_suffix("texture", &name_raw, prev + 8)?;
        textures.push(TextureRef { name, suffix });
    }

    Ok(textures)
}

/// This function writes the texture table.
pub fn write_textures<W: WriteBytes>(buffer: &mut W, textures: &[TextureRef]) -> Result<()> {
    for texture in textures {
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_all(&pack_texture_name(&texture.name, &texture.suffix, NAME_SIZE)?)?;
        buffer.write_u32(2)?;
        buffer.write_u32(0)?;
        buffer.write_i32(-1)?;
    }
    Ok(())
}

/// This function returns the encoded size of the texture table, in bytes.
pub fn size_textures(count: u32) -> u64 {
    TEXTURE_INFO_SIZE * count as u64
}
