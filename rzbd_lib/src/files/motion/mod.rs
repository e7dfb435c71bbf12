//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Motion files hold per-bone keyframe streams for the mech animations.
//!
//! # Motion Structure
//!
//! | Bytes | Type   | Data                                                                |
//! | ----- | ------ | ------------------------------------------------------------------- |
//! | 24    | Header | `{version = 4, loop_time (f32 > 0), frame_count - 1, part_count, -1.0, +1.0}`. |
//! | *     | Part   | Length-prefixed name, `flag = 12`, then the keyframes.              |
//!
//! Each part stores `frame_count` vec3 translations followed by
//! `frame_count` vec4 rotation quaternions. The flag encodes 8 =
//! translation, 4 = rotation, 2 = scaling; scaling never occurs, so the
//! flag is always 12. On decode the two runs are interleaved into frames
//! for easy indexing; on encode they are separated back out.

use getset::*;
use nalgebra::{Vector3, Vector4};
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_gt};
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::check_size_mismatch;

#[cfg(test)] mod motion_test;

/// Extension used by motion entries inside their archive.
pub const EXTENSION: &str = ".mot";

const VERSION: u32 = 4;

/// 8 = translation, 4 = rotation, 2 = scaling (never used).
const FLAG_TRANSLATE_ROTATE: u32 = 12;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire motion decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Motion {
    loop_time: f32,
    frame_count: u32,
    parts: Vec<MotionPart>,
}

/// The keyframe stream of a single bone.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct MotionPart {
    name: String,
    frames: Vec<MotionFrame>,
}

/// A single keyframe: translation and rotation quaternion.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct MotionFrame {
    pub translation: Vector3<f32>,
    pub rotation: Vector4<f32>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Motion
//---------------------------------------------------------------------------//

impl Decodeable for Motion {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let version = data.read_u32()?;
        let loop_time = data.read_f32()?;
        let frame_count = data.read_u32()?;
        let part_count = data.read_u32()?;
        let minus_one = data.read_f32()?;
        let plus_one = data.read_f32()?;

        assert_eq("version", VERSION, version, 0u64)?;
        assert_gt("loop time", 0.0, loop_time, 4u64)?;
        assert_eq("field 16", -1.0, minus_one, 16u64)?;
        assert_eq("field 20", 1.0, plus_one, 20u64)?;

        // For some reason, this is off-by-one.
        let frame_count = frame_count + 1;

        let mut parts = Vec::with_capacity(part_count as usize);
        for _ in 0..part_count {
            let name = data.read_sized_string_u8_u32()?;

            let flag_offset = data.stream_position()?;
            let flag = data.read_u32()?;
            assert_eq("flag", FLAG_TRANSLATE_ROTATE, flag, flag_offset)?;

            let mut translations = Vec::with_capacity(frame_count as usize);
            for _ in 0..frame_count {
                translations.push(data.read_vector_3_f32()?);
            }

            // Scaling would be read here (never set in the corpus).

            let mut rotations = Vec::with_capacity(frame_count as usize);
            for _ in 0..frame_count {
                rotations.push(data.read_vector_4_f32()?);
            }

            // Interleave translation and rotation for easy frame access.
            let frames = translations.into_iter()
                .zip(rotations)
                .map(|(translation, rotation)| MotionFrame { translation, rotation })
                .collect();

            parts.push(MotionPart { name, frames });
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        Ok(Self {
            loop_time,
            frame_count,
            parts,
        })
    }
}

impl Encodeable for Motion {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_u32(VERSION)?;
        buffer.write_f32(self.loop_time)?;
        buffer.write_u32(self.frame_count - 1)?;
        buffer.write_u32(self.parts.len() as u32)?;
        buffer.write_f32(-1.0)?;
        buffer.write_f32(1.0)?;

        for part in &self.parts {
            buffer.write_sized_string_u8_u32(&part.name)?;
            buffer.write_u32(FLAG_TRANSLATE_ROTATE)?;

            for frame in &part.frames {
                buffer.write_vector_3_f32(&frame.translation)?;
            }
            for frame in &part.frames {
                buffer.write_vector_4_f32(&frame.rotation)?;
            }
        }

        Ok(())
    }
}
