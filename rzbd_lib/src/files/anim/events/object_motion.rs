//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Physics-driven object motion events.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_ge, assert_gt, assert_in};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

/// Payload size of OBJECT_MOTION.
pub const OBJECT_MOTION_SIZE: u32 = 320;

/// Payload size of OBJECT_MOTION_FROM_TO.
pub const OBJECT_MOTION_FROM_TO_SIZE: u32 = 132;

/// Size of a bounce sequence name field.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A bounce sound reference with a volume.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct BounceSound {
    pub name: String,
    pub volume: f32,
}

/// One of the three bounce slots of OBJECT_MOTION.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct BounceSequence {
    pub name: Option<String>,
    pub sound: Option<BounceSound>,
}

/// OBJECT_MOTION: full physics motion with gravity, random translation
/// ranges, forward rotation, scaling, and bounce sequences.
///
/// A good chunk of the payload is unidentified; those fields are preserved
/// verbatim.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectMotion {
    pub node: String,
    pub gravity: f32,
    pub translation_range_min: [f32; 4],
    pub translation_range_max: [f32; 4],
    pub translation: [f32; 4],

    /// In radians.
    pub forward_rotation: (f32, f32),

    /// In radians.
    pub xyz_rotation: [f32; 6],
    pub scale: [f32; 6],
    pub bounce: [BounceSequence; 3],
    pub run_time: f32,

    pub unk000: u32,
    pub unk068: f32,
    pub unk072: f32,
    pub unk100: f32,
    pub unk104: f32,
    pub unk108: u32,
}

/// OBJECT_MOTION_FROM_TO: interpolate morph, translation, rotation, or
/// scale between two states. The motion type selects exactly one.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectMotionFromTo {
    pub node: String,
    pub motion_type: u32,

    pub morph_from: f32,
    pub morph_to: f32,
    pub morph_delta: f32,

    pub translate_from: [f32; 3],
    pub translate_to: [f32; 3],
    pub translate_delta: [f32; 3],

    /// In radians.
    pub rotate_from: [f32; 3],
    pub rotate_to: [f32; 3],
    pub rotate_delta: [f32; 3],

    pub scale_from: [f32; 3],
    pub scale_to: [f32; 3],
    pub scale_delta: [f32; 3],

    pub run_time: f32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn read_bounce<R: ReadBytes>(data: &mut R, anim_def: &AnimDef, slot: &str, base: u64) -> Result<BounceSequence> {
    let name_raw = data.read_slice(NAME_SIZE, false)?;
    let sentinel = data.read_i16()?;
    let sound_index = data.read_i16()?;
    let volume = data.read_f32()?;

    assert_eq(slot, -1, sentinel, base + 32)?;
    let name = ascii_zterm_padded(slot, &name_raw, base)?;
    let name = if name.is_empty() { None } else { Some(name) };

    let sound = if sound_index != 0 {
        assert_gt("bounce volume", 0.0, volume, base + 36)?;
        Some(BounceSound {
            name: anim_def.sound_from_index(sound_index as i32, base + 34)?,
            volume,
        })
    } else {
        assert_eq("bounce volume", 0.0, volume, base + 36)?;
        None
    };

    Ok(BounceSequence { name, sound })
}

fn write_bounce<W: WriteBytes>(buffer: &mut W, anim_def: &AnimDef, bounce: &BounceSequence) -> Result<()> {
    buffer.write_string_u8_0padded(bounce.name.as_deref().unwrap_or(""), NAME_SIZE)?;
    buffer.write_i16(-1)?;
    match &bounce.sound {
        Some(sound) => {
            buffer.write_i16(anim_def.sound_to_index(&sound.name)? as i16)?;
            buffer.write_f32(sound.volume)?;
        }
        None => {
            buffer.write_i16(0)?;
            buffer.write_f32(0.0)?;
        }
    }
    Ok(())
}

impl ObjectMotion {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let unk000 = data.read_u32()?;
        let index = data.read_u32()?;
        let unk008 = data.read_f32()?;
        let gravity = data.read_f32()?;
        let unk016 = data.read_f32()?;

        let mut translation_range_min = [0.0; 4];
        let mut translation_range_max = [0.0; 4];
        for i in 0..4 {
            translation_range_min[i] = data.read_f32()?;
            translation_range_max[i] = data.read_f32()?;
        }

        let mut translation = [0.0; 4];
        for value in &mut translation {
            *value = data.read_f32()?;
        }

        let unk068 = data.read_f32()?;
        let unk072 = data.read_f32()?;
        let unk076 = data.read_f32()?;
        let unk080 = data.read_f32()?;
        let unk084 = data.read_f32()?;
        let unk088 = data.read_f32()?;
        let unk092 = data.read_f32()?;
        let unk096 = data.read_f32()?;
        let unk100 = data.read_f32()?;
        let unk104 = data.read_f32()?;
        let unk108 = data.read_u32()?;
        let forward_rotation_0 = data.read_f32()?;
        let forward_rotation_1 = data.read_f32()?;
        let unk120 = data.read_f32()?;

        let mut xyz_rotation = [0.0; 6];
        for value in &mut xyz_rotation {
            *value = data.read_f32()?;
        }

        let unk148 = data.read_f32()?;
        let unk152 = data.read_f32()?;
        let unk156 = data.read_f32()?;

        let mut scale = [0.0; 6];
        for value in &mut scale {
            *value = data.read_f32()?;
        }

        let unk184 = data.read_f32()?;
        let unk188 = data.read_f32()?;
        let unk192 = data.read_f32()?;

        let bounce0 = read_bounce(data, anim_def, "bounce seq 0", prev + 196)?;
        let bounce1 = read_bounce(data, anim_def, "bounce seq 1", prev + 236)?;
        let bounce2 = read_bounce(data, anim_def, "bounce seq 2", prev + 276)?;

        let run_time = data.read_f32()?;

        let node = anim_def.node_from_index(index as i32, prev + 4)?;

        assert_eq("field 008", 0.0, unk008, prev + 8)?;
        assert_eq("field 016", 0.0, unk016, prev + 16)?;
        assert_eq("field 076", 0.0, unk076, prev + 76)?;
        assert_eq("field 080", 0.0, unk080, prev + 80)?;
        assert_eq("field 084", 0.0, unk084, prev + 84)?;
        assert_eq("field 088", 0.0, unk088, prev + 88)?;
        assert_eq("field 092", 0.0, unk092, prev + 92)?;
        assert_eq("field 096", 0.0, unk096, prev + 96)?;
        assert_eq("field 120", 0.0, unk120, prev + 120)?;
        assert_eq("field 148", 0.0, unk148, prev + 148)?;
        assert_eq("field 152", 0.0, unk152, prev + 152)?;
        assert_eq("field 156", 0.0, unk156, prev + 156)?;
        assert_eq("field 184", 0.0, unk184, prev + 184)?;
        assert_eq("field 188", 0.0, unk188, prev + 188)?;
        assert_eq("field 192", 0.0, unk192, prev + 192)?;
        assert_ge("run time", 0.0, run_time, prev + 316)?;

        Ok(Self {
            node,
            gravity,
            translation_range_min,
            translation_range_max,
            translation,
            forward_rotation: (forward_rotation_0, forward_rotation_1),
            xyz_rotation,
            scale,
            bounce: [bounce0, bounce1, bounce2],
            run_time,
            unk000,
            unk068,
            unk072,
            unk100,
            unk104,
            unk108,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u32(self.unk000)?;
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(self.gravity)?;
        buffer.write_f32(0.0)?;

        for i in 0..4 {
            buffer.write_f32(self.translation_range_min[i])?;
            buffer.write_f32(self.translation_range_max[i])?;
        }
        for value in self.translation {
            buffer.write_f32(value)?;
        }

        buffer.write_f32(self.unk068)?;
        buffer.write_f32(self.unk072)?;
        for _ in 0..6 {
            buffer.write_f32(0.0)?;
        }
        buffer.write_f32(self.unk100)?;
        buffer.write_f32(self.unk104)?;
        buffer.write_u32(self.unk108)?;
        buffer.write_f32(self.forward_rotation.0)?;
        buffer.write_f32(self.forward_rotation.1)?;
        buffer.write_f32(0.0)?;

        for value in self.xyz_rotation {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;

        for value in self.scale {
            buffer.write_f32(value)?;
        }
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;
        buffer.write_f32(0.0)?;

        for bounce in &self.bounce {
            write_bounce(buffer, anim_def, bounce)?;
        }

        buffer.write_f32(self.run_time)
    }
}

impl ObjectMotionFromTo {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let motion_type = data.read_u32()?;
        let index = data.read_u32()?;

        let mut values = [0.0f32; 31];
        for value in &mut values {
            *value = data.read_f32()?;
        }
        let run_time = values[30];

        assert_in("type", &[1, 2, 4, 8], motion_type, prev)?;
        let node = anim_def.node_from_index(index as i32, prev + 4)?;

        // Exactly one of the four groups may be populated; the others must
        // be zero.
        if motion_type != 8 {
            for (i, value) in values[0..3].iter().enumerate() {
                assert_eq("morph", 0.0, *value, prev + 8 + i as u64 * 4)?;
            }
        }
        if motion_type != 1 {
            for (i, value) in values[3..12].iter().enumerate() {
                assert_eq("translate", 0.0, *value, prev + 20 + i as u64 * 4)?;
            }
        }
        if motion_type != 2 {
            for (i, value) in values[12..21].iter().enumerate() {
                assert_eq("rotate", 0.0, *value, prev + 56 + i as u64 * 4)?;
            }
        }
        if motion_type != 4 {
            for (i, value) in values[21..30].iter().enumerate() {
                assert_eq("scale", 0.0, *value, prev + 92 + i as u64 * 4)?;
            }
        }

        assert_gt("run time", 0.0, run_time, prev + 128)?;

        Ok(Self {
            node,
            motion_type,
            morph_from: values[0],
            morph_to: values[1],
            morph_delta: values[2],
            translate_from: [values[3], values[4], values[5]],
            translate_to: [values[6], values[7], values[8]],
            translate_delta: [values[9], values[10], values[11]],
            rotate_from: [values[12], values[13], values[14]],
            rotate_to: [values[15], values[16], values[17]],
            rotate_delta: [values[18], values[19], values[20]],
            scale_from: [values[21], values[22], values[23]],
            scale_to: [values[24], values[25], values[26]],
            scale_delta: [values[27], values[28], values[29]],
            run_time,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        buffer.write_u32(self.motion_type)?;
        buffer.write_u32(anim_def.node_to_index(&self.node)? as u32)?;

        buffer.write_f32(self.morph_from)?;
        buffer.write_f32(self.morph_to)?;
        buffer.write_f32(self.morph_delta)?;
        for group in [&self.translate_from, &self.translate_to, &self.translate_delta, &self.rotate_from, &self.rotate_to, &self.rotate_delta, &self.scale_from, &self.scale_to, &self.scale_delta] {
            for value in group {
                buffer.write_f32(*value)?;
            }
        }
        buffer.write_f32(self.run_time)
    }
}
