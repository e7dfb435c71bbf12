//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Anim files hold the animation definitions: event scripts over the node
//! graph.
//!
//! # Anim Structure
//!
//! | Bytes | Type      | Data                                                 |
//! | ----- | --------- | ---------------------------------------------------- |
//! | 12    | Header    | `{sig = 0x08170616, version = 39, name_count}`.      |
//! | 84*n  | Anim name | `{name[80] (garbage after the terminator), unk}`.    |
//! | 68    | Info      | Counts, pointers, and the world gravity.             |
//! | *     | Anim defs | A zeroed slot, then `count - 1` definitions.         |

use getset::*;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_gt, assert_ne};
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::{ascii_zterm_partition, check_size_mismatch, pack_zterm_partition, serde_base64};

pub mod activation_prereq;
pub mod anim_def;
pub mod events;

#[cfg(test)] mod anim_test;

pub use self::anim_def::AnimDef;

/// Extension used by anim files.
pub const EXTENSION: &str = ".zbd";

const SIGNATURE: u32 = 0x08170616;
const VERSION: u32 = 39;

/// The world gravity baked into every anim file.
const GRAVITY: f32 = -9.8;

/// Size of an anim name record.
const ANIM_NAME_SIZE: usize = 80;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire anim file decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Anim {
    anim_names: Vec<AnimName>,
    anim_defs: Vec<AnimDef>,
    anim_ptr: u32,
    world_ptr: u32,
}

/// A single anim name record. The padding is uninitialized memory and must
/// be preserved.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnimName {
    pub name: String,
    #[serde(with = "serde_base64")]
    pub pad: Vec<u8>,
    pub unk: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Anim
//---------------------------------------------------------------------------//

impl Decodeable for Anim {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_u32()?;
        let version = data.read_u32()?;
        let name_count = data.read_u32()?;

        assert_eq("signature", SIGNATURE, signature, 0u64)?;
        assert_eq("version", VERSION, version, 4u64)?;

        let mut anim_names = Vec::with_capacity(name_count as usize);
        for _ in 0..name_count {
            let prev = data.stream_position()?;
            let name_raw = data.read_slice(ANIM_NAME_SIZE, false)?;
            let unk = data.read_u32()?;

            let (name, pad) = ascii_zterm_partition("name", &name_raw, prev)?;
            anim_names.push(AnimName { name, pad, unk });
        }

        // The info block.
        let prev = data.stream_position()?;
        let zero00 = data.read_u32()?;
        let ptr04 = data.read_u32()?;
        let zero08 = data.read_u16()?;
        let count = data.read_u16()?;
        let anim_ptr = data.read_u32()?;
        let loc_count = data.read_u32()?;
        let loc_ptr = data.read_u32()?;
        let world_ptr = data.read_u32()?;
        let gravity = data.read_f32()?;
        let zero32 = data.read_u32()?;
        let zero36 = data.read_u32()?;
        let zero40 = data.read_u32()?;
        let zero44 = data.read_u32()?;
        let zero48 = data.read_u32()?;
        let zero52 = data.read_u32()?;
        let zero56 = data.read_u32()?;
        let one60 = data.read_u32()?;
        let zero64 = data.read_u32()?;

        assert_eq("field 00", 0, zero00, prev)?;
        assert_eq("field 04", 0, ptr04, prev + 4)?;
        assert_eq("field 08", 0, zero08, prev + 8)?;
        assert_gt("count", 0, count, prev + 10)?;
        assert_ne("anim ptr", 0, anim_ptr, prev + 12)?;

        // The localisation isn't used.
        assert_eq("loc count", 0, loc_count, prev + 16)?;
        assert_eq("loc ptr", 0, loc_ptr, prev + 20)?;
        assert_ne("world ptr", 0, world_ptr, prev + 24)?;

        // The gravity is always the same.
        assert_eq("gravity", GRAVITY, gravity, prev + 28)?;

        assert_eq("field 32", 0, zero32, prev + 32)?;
        assert_eq("field 36", 0, zero36, prev + 36)?;
        assert_eq("field 40", 0, zero40, prev + 40)?;
        assert_eq("field 44", 0, zero44, prev + 44)?;
        assert_eq("field 48", 0, zero48, prev + 48)?;
        assert_eq("field 52", 0, zero52, prev + 52)?;
        assert_eq("field 56", 0, zero56, prev + 56)?;
        assert_eq("field 60", 1, one60, prev + 60)?;
        assert_eq("field 64", 0, zero64, prev + 64)?;

        // The first entry of the animation definition array is always zero.
        anim_def::read_anim_def_zero(data)?;

        let mut anim_defs = Vec::with_capacity(count as usize - 1);
        for _ in 1..count {
            anim_defs.push(anim_def::read_anim_def(data)?);
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(Self {
            anim_names,
            anim_defs,
            anim_ptr,
            world_ptr,
        })
    }
}

impl Encodeable for Anim {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_u32(SIGNATURE)?;
        buffer.write_u32(VERSION)?;
        buffer.write_u32(self.anim_names.len() as u32)?;

        for anim_name in &self.anim_names {
            buffer.write_all(&pack_zterm_partition("anim name", &anim_name.name, &anim_name.pad, ANIM_NAME_SIZE)?)?;
            buffer.write_u32(anim_name.unk)?;
        }

        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_u16(0)?;
        buffer.write_u16(self.anim_defs.len() as u16 + 1)?;
        buffer.write_u32(self.anim_ptr)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_u32(self.world_ptr)?;
        buffer.write_f32(GRAVITY)?;
        for _ in 0..7 {
            buffer.write_u32(0)?;
        }
        buffer.write_u32(1)?;
        buffer.write_u32(0)?;

        anim_def::write_anim_def_zero(buffer)?;
        for anim_def in &self.anim_defs {
            anim_def::write_anim_def(buffer, anim_def)?;
        }

        Ok(())
    }
}
