//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The particle-emitter (puffer) state event.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_ge, assert_in};
use crate::error::Result;
use crate::files::anim::AnimDef;
use crate::utils::ascii_zterm_padded;

use super::{at_node_from_index, at_node_to_index, AtNode};

/// Payload size of PUFFER_STATE.
pub const PUFFER_STATE_SIZE: u32 = 580;

/// Size of the name fields.
const NAME_SIZE: usize = 32;

/// Size of a texture name field.
const TEXTURE_NAME_SIZE: usize = 36;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// PUFFER_STATE: configure one of the animation's particle emitters.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct PufferState {
    pub name: String,
    pub active_state: i32,
    pub at_node: Option<AtNode>,

    pub local_velocity: [f32; 3],
    pub world_velocity: [f32; 3],
    pub min_random_velocity: [f32; 3],
    pub max_random_velocity: [f32; 3],
    pub world_acceleration: [f32; 3],

    pub is_distance_interval: bool,
    pub interval: f32,
    pub size_range: (f32, f32),
    pub lifetime_range: (f32, f32),
    pub start_age_range: (f32, f32),
    pub deviation_distance: f32,
    pub fade_range: (f32, f32),
    pub friction: f32,
    pub textures: Vec<String>,
    pub growth_factor: f32,

    pub unk036: u8,
    pub unk038: i16,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl PufferState {

    pub(crate) fn read<R: ReadBytes>(data: &mut R, anim_def: &AnimDef) -> Result<Self> {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let index = data.read_u32()?;
        let unk036 = data.read_u8()?;
        let unk037 = data.read_u8()?;
        let unk038 = data.read_i16()?;
        let active_state = data.read_i32()?;
        let at_index = data.read_i32()?;
        let at_tx = data.read_f32()?;
        let at_ty = data.read_f32()?;
        let at_tz = data.read_f32()?;

        let mut vectors = [[0.0f32; 3]; 5];
        for vector in &mut vectors {
            for value in vector.iter_mut() {
                *value = data.read_f32()?;
            }
        }

        let is_distance_interval = data.read_u32()?;
        let interval = data.read_f32()?;
        let size_range_min = data.read_f32()?;
        let size_range_max = data.read_f32()?;
        let lifetime_range_min = data.read_f32()?;
        let lifetime_range_max = data.read_f32()?;
        let start_age_range_min = data.read_f32()?;
        let start_age_range_max = data.read_f32()?;
        let deviation_distance = data.read_f32()?;
        let zero156 = data.read_u32()?;
        let zero160 = data.read_u32()?;
        let fade_range_min = data.read_f32()?;
        let fade_range_max = data.read_f32()?;
        let friction = data.read_f32()?;
        let zero176 = data.read_u32()?;
        let zero180 = data.read_u32()?;
        let zero184 = data.read_u32()?;
        let zero188 = data.read_u32()?;

        let mut textures = vec![];
        for i in 0..9 {
            let texture_offset = prev + 192 + i * TEXTURE_NAME_SIZE as u64;
            let texture_raw = data.read_slice(TEXTURE_NAME_SIZE, false)?;
            let texture = ascii_zterm_padded("texture", &texture_raw, texture_offset)?;
            if !texture.is_empty() {
                textures.push(texture);
            }
        }

        let zero516 = data.read_u32()?;
        let zero520 = data.read_u32()?;
        let zero524 = data.read_u32()?;
        let unk528 = data.read_u32()?;
        let zero532 = data.read_u32()?;
        let unk536 = data.read_f32()?;
        let unk540 = data.read_f32()?;
        let growth_factor = data.read_f32()?;
        let zero548 = data.read_slice(32, false)?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;
        let expected_name = anim_def.puffer_from_index(index as i32, prev + 32)?;
        assert_eq("index name", expected_name.as_str(), name.as_str(), prev + 32)?;

        assert_in("active state", &[-1, 1, 2, 3, 4, 5], active_state, prev + 40)?;
        assert_eq("field 037", 0, unk037, prev + 37)?;
        if active_state < 0 {
            assert_in("field 036", &[0, 4], unk036, prev + 36)?;
            assert_eq("field 038", 0, unk038, prev + 38)?;
        } else {
            assert_in("field 038", &[0, 2, 3], unk038, prev + 38)?;
        }

        let at_node = at_node_from_index(anim_def, at_index, [at_tx, at_ty, at_tz], prev + 44)?;

        assert_in("interval type", &[0, 1], is_distance_interval, prev + 120)?;
        assert_ge("interval", 0.0, interval, prev + 124)?;

        assert_ge("size range min", 0.0, size_range_min, prev + 128)?;
        assert_ge("size range max", size_range_min, size_range_max, prev + 132)?;

        assert_ge("lifetime range min", 0.0, lifetime_range_min, prev + 136)?;
        assert_ge("lifetime range max", 0.0, lifetime_range_max, prev + 140)?;

        assert_ge("start age range min", 0.0, start_age_range_min, prev + 144)?;
        assert_ge("start age range max", start_age_range_min, start_age_range_max, prev + 148)?;

        assert_ge("deviation distance", 0.0, deviation_distance, prev + 152)?;
        assert_eq("field 156", 0, zero156, prev + 156)?;
        assert_eq("field 160", 0, zero160, prev + 160)?;

        assert_ge("fade range min", 0.0, fade_range_min, prev + 164)?;
        assert_ge("fade range max", fade_range_min, fade_range_max, prev + 168)?;

        assert_ge("friction", 0.0, friction, prev + 172)?;
        assert_eq("field 176", 0, zero176, prev + 176)?;
        assert_eq("field 180", 0, zero180, prev + 180)?;
        assert_eq("field 184", 0, zero184, prev + 184)?;
        assert_eq("field 188", 0, zero188, prev + 188)?;

        assert_eq("field 516", 0, zero516, prev + 516)?;
        assert_eq("field 520", 0, zero520, prev + 520)?;
        assert_eq("field 524", 0, zero524, prev + 524)?;
        assert_eq("field 532", 0, zero532, prev + 532)?;

        if active_state < 0 {
            assert_eq("field 528", 0, unk528, prev + 528)?;
            assert_eq("field 536", 0.0, unk536, prev + 536)?;
            assert_eq("field 540", 0.0, unk540, prev + 540)?;
        } else {
            assert_eq("field 528", 2, unk528, prev + 528)?;
            assert_eq("field 536", 1.0, unk536, prev + 536)?;
            assert_eq("field 540", 1.0, unk540, prev + 540)?;
        }

        assert_ge("growth factor", 0.0, growth_factor, prev + 544)?;
        crate::check::assert_all_zero("field 548", &zero548, prev + 548)?;

        Ok(Self {
            name,
            active_state,
            at_node,
            local_velocity: vectors[0],
            world_velocity: vectors[1],
            min_random_velocity: vectors[2],
            max_random_velocity: vectors[3],
            world_acceleration: vectors[4],
            is_distance_interval: is_distance_interval == 1,
            interval,
            size_range: (size_range_min, size_range_max),
            lifetime_range: (lifetime_range_min, lifetime_range_max),
            start_age_range: (start_age_range_min, start_age_range_max),
            deviation_distance,
            fade_range: (fade_range_min, fade_range_max),
            friction,
            textures,
            growth_factor,
            unk036,
            unk038,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
        let (at_index, translation) = at_node_to_index(anim_def, &self.at_node)?;

        buffer.write_string_u8_0padded(&self.name, NAME_SIZE)?;
        buffer.write_u32(anim_def.puffer_to_index(&self.name)? as u32)?;
        buffer.write_u8(self.unk036)?;
        buffer.write_u8(0)?;
        buffer.write_i16(self.unk038)?;
        buffer.write_i32(self.active_state)?;
        buffer.write_i32(at_index)?;
        for value in translation {
            buffer.write_f32(value)?;
        }

        for vector in [&self.local_velocity, &self.world_velocity, &self.min_random_velocity, &self.max_random_velocity, &self.world_acceleration] {
            for value in vector {
                buffer.write_f32(*value)?;
            }
        }

        buffer.write_u32(u32::from(self.is_distance_interval))?;
        buffer.write_f32(self.interval)?;
        buffer.write_f32(self.size_range.0)?;
        buffer.write_f32(self.size_range.1)?;
        buffer.write_f32(self.lifetime_range.0)?;
        buffer.write_f32(self.lifetime_range.1)?;
        buffer.write_f32(self.start_age_range.0)?;
        buffer.write_f32(self.start_age_range.1)?;
        buffer.write_f32(self.deviation_distance)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_f32(self.fade_range.0)?;
        buffer.write_f32(self.fade_range.1)?;
        buffer.write_f32(self.friction)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;

        for i in 0..9 {
            let texture = self.textures.get(i).map(String::as_str).unwrap_or("");
            buffer.write_string_u8_0padded(texture, TEXTURE_NAME_SIZE)?;
        }

        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
        if self.active_state < 0 {
            buffer.write_u32(0)?;
            buffer.write_u32(0)?;
            buffer.write_f32(0.0)?;
            buffer.write_f32(0.0)?;
        } else {
            buffer.write_u32(2)?;
            buffer.write_u32(0)?;
            buffer.write_f32(1.0)?;
            buffer.write_f32(1.0)?;
        }
        buffer.write_f32(self.growth_factor)?;
        buffer.write_all(&[0; 32])?;
        Ok(())
    }
}
