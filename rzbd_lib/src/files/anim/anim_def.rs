//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! A single animation definition: the 316-byte header, the eight lookup
//! tables, the reset state, and the sequence definitions.

use bitflags::bitflags;
use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_eq, assert_ge, assert_gt, assert_flags, assert_in, assert_ne, AssertionError, AssertOp};
use crate::error::Result;
use crate::utils::{ascii_zterm_node_name, ascii_zterm_padded, ascii_zterm_partition, pack_node_name, pack_zterm_partition, serde_base64};

use super::activation_prereq::{count_activation_prereqs, read_activation_prereq, write_activation_prereq, ActivationPrereq};
use super::events::{Event, EventData, INPUT_NODE, INPUT_NODE_INDEX};

/// Size of an animation definition header.
pub const ANIM_DEF_SIZE: u64 = 316;

/// Size of the RESET_SEQUENCE record following the tables.
pub const RESET_STATE_SIZE: u64 = 64;

/// Size of a sequence definition header.
pub const SEQDEF_INFO_SIZE: u64 = 64;

/// The header embeds "RESET_SEQUENCE" as four little-endian integer
/// constants. Why a literal string ended up in integer fields is anyone's
/// guess; they are asserted as constants.
const RESET_SEQUENCE_INTS: [u32; 4] = [0x45534552, 0x45535F54, 0x4E455551, 0x00004543];

bitflags! {

    /// This represents the bitmasks an animation definition can have applied to its flag field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AnimDefFlags: u32 {
        const EXECUTION_BY_RANGE    = 1 << 1;
        const EXECUTION_BY_ZONE     = 1 << 3;
        const HAS_CALLBACK          = 1 << 4;
        const RESET_TIME            = 1 << 5;
        const NETWORK_LOG_SET       = 1 << 10;
        const NETWORK_LOG_ON        = 1 << 11;
        const SAVE_LOG_SET          = 1 << 12;
        const SAVE_LOG_ON           = 1 << 13;
        const AUTO_RESET_NODE_STATES = 1 << 16;
        const PROXIMITY_DAMAGE      = 1 << 20;
    }
}

/// How an animation is activated.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum AnimActivation {
    WeaponHit,
    CollideHit,
    WeaponOrCollideHit,
    #[default]
    OnCall,
    OnStartup,
}

impl AnimActivation {

    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::WeaponHit),
            1 => Some(Self::CollideHit),
            2 => Some(Self::WeaponOrCollideHit),
            3 => Some(Self::OnCall),
            4 => Some(Self::OnStartup),
            _ => None,
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Self::WeaponHit => 0,
            Self::CollideHit => 1,
            Self::WeaponOrCollideHit => 2,
            Self::OnCall => 3,
            Self::OnStartup => 4,
        }
    }
}

/// How a sequence is activated.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum SeqActivation {
    #[default]
    None,
    OnCall,
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A name field whose bytes after the terminator are preserved.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct NamePad {
    pub name: String,
    #[serde(with = "serde_base64")]
    pub pad: Vec<u8>,
}

/// A name plus a runtime pointer (and for puffers, a flag byte).
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct NamePtrFlag {
    pub name: String,
    pub ptr: u32,
    pub flag: u32,
}

/// A sequence definition with its event script.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeqDef {
    pub name: String,
    pub activation: SeqActivation,
    pub ptr: u32,
    pub script: Vec<Event>,
}

/// The reset state: a script restoring the nodes to their initial state.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResetState {
    pub ptr: u32,
    pub script: Vec<Event>,
}

/// This holds a single animation definition decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnimDef {
    pub name: String,
    pub anim_name: NamePad,
    pub anim_root: NamePad,

    pub activation: AnimActivation,
    pub auto_reset_node_states: bool,
    pub execution_by_range: Option<(f32, f32)>,
    pub execution_by_zone: bool,
    pub network_log: Option<bool>,
    pub save_log: Option<bool>,
    pub has_callback: bool,
    pub reset_time: Option<f32>,
    pub health: f32,
    pub proximity_damage: bool,

    pub objects: Vec<NamePad>,
    pub nodes: Vec<NamePtrFlag>,
    pub lights: Vec<NamePtrFlag>,
    pub puffers: Vec<NamePtrFlag>,
    pub dynamic_sounds: Vec<NamePtrFlag>,
    pub static_sounds: Vec<NamePad>,
    pub activation_prereq: Option<ActivationPrereq>,
    pub anim_refs: Vec<NamePad>,
    pub reset_state: Option<ResetState>,
    pub sequences: Vec<SeqDef>,

    pub base_node_ptr: u32,
    pub anim_root_ptr: u32,
    pub objects_ptr: u32,
    pub nodes_ptr: u32,
    pub lights_ptr: u32,
    pub puffers_ptr: u32,
    pub dynamic_sounds_ptr: u32,
    pub static_sounds_ptr: u32,
    pub activ_prereqs_ptr: u32,
    pub anim_refs_ptr: u32,
    pub reset_state_ptr: u32,
    pub seq_defs_ptr: u32,
}

//---------------------------------------------------------------------------//
//                         Index lookups for events
//---------------------------------------------------------------------------//

/// Implementation of `AnimDef`.
impl AnimDef {

    pub fn has_callback(&self) -> &bool {
        &self.has_callback
    }

    fn name_from_index<'a>(kind: &str, names: impl Iterator<Item = &'a str>, count: usize, index: i32, offset: u64) -> Result<String> {
        if index < 1 || index as usize > count {
            return Err(AssertionError::new(kind, AssertOp::Between, format!("1 and {count}"), index.to_string(), offset).into());
        }

        names.skip(index as usize - 1).next()
            .map(str::to_owned)
            .ok_or_else(|| AssertionError::new(kind, AssertOp::Between, format!("1 and {count}"), index.to_string(), offset).into())
    }

    fn name_to_index(kind: &str, position: Option<usize>, name: &str) -> Result<i32> {
        position.map(|index| index as i32 + 1)
            .ok_or_else(|| AssertionError::new(kind, AssertOp::In, "a known name".to_owned(), format!("{name:?}"), name.to_owned()).into())
    }

    /// This function resolves a 1-based node index into a node name.
    pub fn node_from_index(&self, index: i32, offset: u64) -> Result<String> {
        Self::name_from_index("node index", self.nodes.iter().map(|node| node.name.as_str()), self.nodes.len(), index, offset)
    }

    /// This function resolves a 1-based node index, or the input-node sentinel, into a name.
    pub fn node_or_input_from_index(&self, index: i32, offset: u64) -> Result<String> {
        if index == INPUT_NODE_INDEX {
            return Ok(INPUT_NODE.to_owned());
        }
        self.node_from_index(index, offset)
    }

    pub fn node_to_index(&self, name: &str) -> Result<i32> {
        Self::name_to_index("node index", self.nodes.iter().position(|node| node.name == name), name)
    }

    pub fn node_or_input_to_index(&self, name: &str) -> Result<i32> {
        if name == INPUT_NODE {
            return Ok(INPUT_NODE_INDEX);
        }
        self.node_to_index(name)
    }

    /// This function resolves a 1-based static sound index into a sound name.
    pub fn sound_from_index(&self, index: i32, offset: u64) -> Result<String> {
        Self::name_from_index("sound index", self.static_sounds.iter().map(|sound| sound.name.as_str()), self.static_sounds.len(), index, offset)
    }

    pub fn sound_to_index(&self, name: &str) -> Result<i32> {
        Self::name_to_index("sound index", self.static_sounds.iter().position(|sound| sound.name == name), name)
    }

    /// This function resolves a 1-based light index into a light name.
    pub fn light_from_index(&self, index: i32, offset: u64) -> Result<String> {
        Self::name_from_index("light index", self.lights.iter().map(|light| light.name.as_str()), self.lights.len(), index, offset)
    }

    pub fn light_to_index(&self, name: &str) -> Result<i32> {
        Self::name_to_index("light index", self.lights.iter().position(|light| light.name == name), name)
    }

    /// This function resolves a 1-based puffer index into a puffer name.
    pub fn puffer_from_index(&self, index: i32, offset: u64) -> Result<String> {
        Self::name_from_index("puffer index", self.puffers.iter().map(|puffer| puffer.name.as_str()), self.puffers.len(), index, offset)
    }

    pub fn puffer_to_index(&self, name: &str) -> Result<i32> {
        Self::name_to_index("puffer index", self.puffers.iter().position(|puffer| puffer.name == name), name)
    }
}

//---------------------------------------------------------------------------//
//                              Table codecs
//---------------------------------------------------------------------------//

fn read_zero_record<R: ReadBytes>(data: &mut R, name: &str, size: usize) -> Result<()> {
    let prev = data.stream_position()?;
    let record = data.read_slice(size, false)?;
    assert_all_zero(name, &record, prev)?;
    Ok(())
}

fn read_objects<R: ReadBytes>(data: &mut R, count: u8) -> Result<Vec<NamePad>> {
    // The first entry is always zero.
    read_zero_record(data, "object", 96)?;

    let mut objects = Vec::with_capacity(count as usize - 1);
    for _ in 1..count {
        let prev = data.stream_position()?;
        let name_raw = data.read_slice(32, false)?;
        let zero32 = data.read_u32()?;
        let blob = data.read_slice(60, false)?;

        let name = ascii_zterm_node_name("name", &name_raw, prev)?;
        assert_eq("field 32", 0, zero32, prev + 32)?;

        // Sometimes the blob holds sensible floats, other times random
        // garbage. It's preserved, minus the trailing zeros.
        let mut pad = blob;
        while pad.last() == Some(&0) {
            pad.pop();
        }

        objects.push(NamePad { name, pad });
    }

    Ok(objects)
}

fn write_objects<W: WriteBytes>(buffer: &mut W, objects: &[NamePad]) -> Result<()> {
    buffer.write_all(&[0; 96])?;
    for object in objects {
        buffer.write_all(&pack_node_name(&object.name, 32)?)?;
        buffer.write_u32(0)?;

        let mut blob = object.pad.to_vec();
        blob.resize(60, 0);
        buffer.write_all(&blob)?;
    }
    Ok(())
}

fn read_nodes<R: ReadBytes>(data: &mut R, count: u8) -> Result<Vec<NamePtrFlag>> {
    // The first entry is always zero.
    read_zero_record(data, "node", 40)?;

    let mut nodes = Vec::with_capacity(count as usize - 1);
    for _ in 1..count {
        let prev = data.stream_position()?;
        let name_raw = data.read_slice(32, false)?;
        let zero32 = data.read_u32()?;
        let ptr = data.read_u32()?;

        let name = ascii_zterm_node_name("name", &name_raw, prev)?;
        assert_eq("field 32", 0, zero32, prev + 32)?;
        assert_ne("field 36", 0, ptr, prev + 36)?;
        nodes.push(NamePtrFlag { name, ptr, flag: 0 });
    }

    Ok(nodes)
}

fn write_nodes<W: WriteBytes>(buffer: &mut W, nodes: &[NamePtrFlag]) -> Result<()> {
    buffer.write_all(&[0; 40])?;
    for node in nodes {
        buffer.write_all(&pack_node_name(&node.name, 32)?)?;
        buffer.write_u32(0)?;
        buffer.write_u32(node.ptr)?;
    }
    Ok(())
}

/// The lights, puffers, and dynamic sounds share a 44-byte record shape.
/// Puffers pad their names differently and keep a flag in the top byte.
fn read_lookups<R: ReadBytes>(data: &mut R, count: u8, is_puffer: bool) -> Result<Vec<NamePtrFlag>> {
    // The first entry is always zero.
    read_zero_record(data, "lookup", 44)?;

    let mut lookups = Vec::with_capacity(count as usize - 1);
    for _ in 1..count {
        let prev = data.stream_position()?;
        let name_raw = data.read_slice(32, false)?;
        let flag_raw = data.read_u32()?;
        let ptr = data.read_u32()?;
        let zero = data.read_u32()?;

        let (name, flag) = if is_puffer {
            let name = ascii_zterm_padded("name", &name_raw, prev)?;
            assert_eq("field 32", 0, flag_raw & 0x00FF_FFFF, prev + 32)?;
            (name, flag_raw >> 24)
        } else {
            let name = ascii_zterm_node_name("name", &name_raw, prev)?;
            assert_eq("field 32", 0, flag_raw, prev + 32)?;
            (name, 0)
        };

        assert_ne("field 36", 0, ptr, prev + 36)?;

        // If this were non-zero, the entry would be removed instead of
        // added.
        assert_eq("field 40", 0, zero, prev + 40)?;
        lookups.push(NamePtrFlag { name, ptr, flag });
    }

    Ok(lookups)
}

fn write_lookups<W: WriteBytes>(buffer: &mut W, lookups: &[NamePtrFlag], is_puffer: bool) -> Result<()> {
    buffer.write_all(&[0; 44])?;
    for lookup in lookups {
        if is_puffer {
            buffer.write_string_u8_0padded(&lookup.name, 32)?;
            buffer.write_u32(lookup.flag << 24)?;
        } else {
            buffer.write_all(&pack_node_name(&lookup.name, 32)?)?;
            buffer.write_u32(0)?;
        }
        buffer.write_u32(lookup.ptr)?;
        buffer.write_u32(0)?;
    }
    Ok(())
}

fn read_static_sounds<R: ReadBytes>(data: &mut R, count: u8) -> Result<Vec<NamePad>> {
    // The first entry is always zero.
    read_zero_record(data, "static sound", 36)?;

    let mut sounds = Vec::with_capacity(count as usize - 1);
    for _ in 1..count {
        let prev = data.stream_position()?;
        let name_raw = data.read_slice(32, false)?;
        let ptr = data.read_u32()?;

        let (name, pad) = ascii_zterm_partition("name", &name_raw, prev)?;
        assert_eq("field 32", 0, ptr, prev + 32)?;
        sounds.push(NamePad { name, pad });
    }

    Ok(sounds)
}

fn write_static_sounds<W: WriteBytes>(buffer: &mut W, sounds: &[NamePad]) -> Result<()> {
    buffer.write_all(&[0; 36])?;
    for sound in sounds {
        buffer.write_all(&pack_zterm_partition("static sound", &sound.name, &sound.pad, 32)?)?;
        buffer.write_u32(0)?;
    }
    Ok(())
}

fn read_anim_refs<R: ReadBytes>(data: &mut R, count: u8) -> Result<Vec<NamePad>> {
    // The first entry is not zero, as this is not a node list. There's one
    // ref per CALL_ANIMATION, and duplicates are possible since multiple
    // calls might need to be ordered.
    let mut anim_refs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let prev = data.stream_position()?;
        let name_raw = data.read_slice(64, false)?;
        let zero64 = data.read_u32()?;
        let zero68 = data.read_u32()?;

        // A bunch of these are properly zero-terminated at 32 and beyond,
        // but not all. Looks like a missing memset.
        let (name, mut pad) = ascii_zterm_partition("name", &name_raw, prev)?;
        while pad.last() == Some(&0) {
            pad.pop();
        }

        assert_eq("field 64", 0, zero64, prev + 64)?;
        assert_eq("field 68", 0, zero68, prev + 68)?;
        anim_refs.push(NamePad { name, pad });
    }

    Ok(anim_refs)
}

fn write_anim_refs<W: WriteBytes>(buffer: &mut W, anim_refs: &[NamePad]) -> Result<()> {
    for anim_ref in anim_refs {
        let mut name_raw = anim_ref.name.as_bytes().to_vec();
        name_raw.push(0);
        name_raw.extend_from_slice(&anim_ref.pad);
        name_raw.resize(64, 0);

        buffer.write_all(&name_raw)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
    }
    Ok(())
}

//---------------------------------------------------------------------------//
//                              Script codecs
//---------------------------------------------------------------------------//

fn read_script<R: ReadBytes>(data: &mut R, anim_def: &AnimDef, length: u32) -> Result<Vec<Event>> {
    let abs_end = data.stream_position()? + length as u64;

    let mut script = vec![];
    while data.stream_position()? < abs_end {
        script.push(Event::read(data, anim_def)?);
    }

    let end = data.stream_position()?;
    assert_eq("script end", abs_end, end, end)?;
    Ok(script)
}

fn write_script<W: WriteBytes>(buffer: &mut W, anim_def: &AnimDef, script: &[Event]) -> Result<()> {
    for event in script {
        event.write(buffer, anim_def)?;
    }
    Ok(())
}

fn size_script(script: &[Event]) -> u32 {
    script.iter().map(Event::size).sum()
}

fn read_reset_state<R: ReadBytes>(data: &mut R, anim_def: &AnimDef, length: u32, ptr: u32, offset: u64) -> Result<Option<ResetState>> {
    let prev = data.stream_position()?;

    let reset_raw = data.read_slice(56, false)?;
    let reset_ptr = data.read_u32()?;
    let reset_len = data.read_u32()?;

    let reset_name = ascii_zterm_padded("reset name", &reset_raw, prev)?;
    assert_eq("reset name", "RESET_SEQUENCE", reset_name.as_str(), prev)?;
    assert_eq("reset ptr", ptr, reset_ptr, prev + 56)?;
    assert_eq("reset len", length, reset_len, prev + 60)?;

    if length == 0 {
        assert_eq("reset ptr", 0, ptr, offset)?;
        return Ok(None);
    }

    assert_ne("reset ptr", 0, ptr, offset)?;
    let script = read_script(data, anim_def, length)?;
    Ok(Some(ResetState { ptr, script }))
}

fn write_reset_state<W: WriteBytes>(buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
    buffer.write_string_u8_0padded("RESET_SEQUENCE", 56)?;
    match &anim_def.reset_state {
        Some(reset) => {
            buffer.write_u32(reset.ptr)?;
            buffer.write_u32(size_script(&reset.script))?;
            write_script(buffer, anim_def, &reset.script)?;
        }
        None => {
            buffer.write_u32(0)?;
            buffer.write_u32(0)?;
        }
    }
    Ok(())
}

fn read_sequence_definitions<R: ReadBytes>(data: &mut R, anim_def: &AnimDef, count: u8) -> Result<Vec<SeqDef>> {
    let mut sequences = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let prev = data.stream_position()?;

        let name_raw = data.read_slice(32, false)?;
        let flag = data.read_u32()?;
        let zero36 = data.read_slice(20, false)?;
        let seqdef_ptr = data.read_u32()?;
        let seqdef_len = data.read_u32()?;

        let name = ascii_zterm_padded("name", &name_raw, prev)?;
        assert_in("activation", &[0x0, 0x303], flag, prev + 32)?;
        assert_all_zero("field 36", &zero36, prev + 36)?;
        assert_gt("seqdef length", 0, seqdef_len, prev + 60)?;
        assert_ne("seqdef ptr", 0, seqdef_ptr, prev + 56)?;

        let activation = if flag == 0x303 {
            SeqActivation::OnCall
        } else {
            SeqActivation::None
        };

        let script = read_script(data, anim_def, seqdef_len)?;
        sequences.push(SeqDef {
            name,
            activation,
            ptr: seqdef_ptr,
            script,
        });
    }

    Ok(sequences)
}

fn write_sequence_definitions<W: WriteBytes>(buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
    for sequence in &anim_def.sequences {
        let flag: u32 = match sequence.activation {
            SeqActivation::OnCall => 0x303,
            SeqActivation::None => 0,
        };

        buffer.write_string_u8_0padded(&sequence.name, 32)?;
        buffer.write_u32(flag)?;
        buffer.write_all(&[0; 20])?;
        buffer.write_u32(sequence.ptr)?;
        buffer.write_u32(size_script(&sequence.script))?;
        write_script(buffer, anim_def, &sequence.script)?;
    }
    Ok(())
}

//---------------------------------------------------------------------------//
//                           Anim def codec
//---------------------------------------------------------------------------//

fn check_count_ptr(name: &str, count: u8, ptr: u32, offset: u64) -> Result<()> {
    if count > 0 {
        assert_ne(name, 0, ptr, offset)?;
    } else {
        assert_eq(name, 0, ptr, offset)?;
    }
    Ok(())
}

/// This function reads one animation definition, header, tables, and scripts.
pub fn read_anim_def<R: ReadBytes>(data: &mut R) -> Result<AnimDef> {
    let prev = data.stream_position()?;

    let anim_name_raw = data.read_slice(32, false)?;
    let name_raw = data.read_slice(32, false)?;
    let base_node_ptr = data.read_u32()?;
    let anim_root_raw = data.read_slice(32, false)?;
    let anim_root_ptr = data.read_u32()?;
    let zero104 = data.read_slice(44, false)?;
    let flag_raw = data.read_u32()?;
    let zero152 = data.read_u8()?;
    let activation_value = data.read_u8()?;
    let action_prio = data.read_u8()?;
    let byte155 = data.read_u8()?;
    let exec_by_range_min = data.read_f32()?;
    let exec_by_range_max = data.read_f32()?;
    let reset_time = data.read_f32()?;
    let zero168 = data.read_f32()?;
    let max_health = data.read_f32()?;
    let cur_health = data.read_f32()?;
    let zero180 = data.read_u32()?;
    let zero184 = data.read_u32()?;
    let zero188 = data.read_u32()?;
    let zero192 = data.read_u32()?;
    let seq_defs_ptr = data.read_u32()?;
    let int200 = data.read_u32()?;
    let int204 = data.read_u32()?;
    let int208 = data.read_u32()?;
    let int212 = data.read_u32()?;
    let zero216 = data.read_slice(40, false)?;
    let reset_state_ptr = data.read_u32()?;
    let reset_state_length = data.read_u32()?;
    let seq_def_count = data.read_u8()?;
    let object_count = data.read_u8()?;
    let node_count = data.read_u8()?;
    let light_count = data.read_u8()?;
    let puffer_count = data.read_u8()?;
    let dynamic_sound_count = data.read_u8()?;
    let static_sound_count = data.read_u8()?;
    let unknown_count = data.read_u8()?;
    let activ_prereq_count = data.read_u8()?;
    let activ_prereq_min_to_satisfy = data.read_u8()?;
    let anim_ref_count = data.read_u8()?;
    let zero275 = data.read_u8()?;
    let objects_ptr = data.read_u32()?;
    let nodes_ptr = data.read_u32()?;
    let lights_ptr = data.read_u32()?;
    let puffers_ptr = data.read_u32()?;
    let dynamic_sounds_ptr = data.read_u32()?;
    let static_sounds_ptr = data.read_u32()?;
    let unknown_ptr = data.read_u32()?;
    let activ_prereqs_ptr = data.read_u32()?;
    let anim_refs_ptr = data.read_u32()?;
    let zero312 = data.read_u32()?;

    let (anim_name, anim_name_pad) = ascii_zterm_partition("anim name", &anim_name_raw, prev)?;
    let name = ascii_zterm_padded("name", &name_raw, prev + 32)?;
    assert_ne("base node ptr", 0, base_node_ptr, prev + 64)?;
    let (anim_root, anim_root_pad) = ascii_zterm_partition("anim root", &anim_root_raw, prev + 68)?;

    if name != anim_root {
        assert_ne("anim root ptr", base_node_ptr, anim_root_ptr, prev + 100)?;
    } else {
        assert_eq("anim root ptr", base_node_ptr, anim_root_ptr, prev + 100)?;
    }

    assert_all_zero("field 104", &zero104, prev + 104)?;

    let flags: AnimDefFlags = assert_flags("flag", flag_raw, prev + 148)?;

    let network_log = if flags.contains(AnimDefFlags::NETWORK_LOG_SET) {
        Some(flags.contains(AnimDefFlags::NETWORK_LOG_ON))
    } else {
        None
    };
    let save_log = if flags.contains(AnimDefFlags::SAVE_LOG_SET) {
        Some(flags.contains(AnimDefFlags::SAVE_LOG_ON))
    } else {
        None
    };

    assert_eq("field 152", 0, zero152, prev + 152)?;
    let activation = AnimActivation::from_u8(activation_value)
        .ok_or_else(|| AssertionError::new("activation", AssertOp::Between, "0 and 4".to_owned(), activation_value.to_string(), prev + 153))?;
    assert_eq("field 154", 4, action_prio, prev + 154)?;
    assert_eq("field 155", 2, byte155, prev + 155)?;

    let execution_by_zone = flags.contains(AnimDefFlags::EXECUTION_BY_ZONE);
    let execution_by_range = if flags.contains(AnimDefFlags::EXECUTION_BY_RANGE) {
        assert_eq("exec by zone", false, execution_by_zone, prev + 148)?;
        assert_ge("exec by range min", 0.0, exec_by_range_min, prev + 156)?;
        assert_ge("exec by range max", exec_by_range_min, exec_by_range_max, prev + 160)?;
        Some((exec_by_range_min, exec_by_range_max))
    } else {
        assert_eq("exec by range min", 0.0, exec_by_range_min, prev + 156)?;
        assert_eq("exec by range max", 0.0, exec_by_range_max, prev + 160)?;
        None
    };

    let reset_time = if flags.contains(AnimDefFlags::RESET_TIME) {
        Some(reset_time)
    } else {
        assert_eq("reset time", -1.0, reset_time, prev + 164)?;
        None
    };

    assert_eq("field 168", 0.0, zero168, prev + 168)?;
    assert_ge("health", 0.0, max_health, prev + 172)?;
    assert_eq("health", max_health, cur_health, prev + 176)?;
    assert_eq("field 180", 0, zero180, prev + 180)?;
    assert_eq("field 184", 0, zero184, prev + 184)?;
    assert_eq("field 188", 0, zero188, prev + 188)?;
    assert_eq("field 192", 0, zero192, prev + 192)?;

    assert_eq("field 200", RESET_SEQUENCE_INTS[0], int200, prev + 200)?;
    assert_eq("field 204", RESET_SEQUENCE_INTS[1], int204, prev + 204)?;
    assert_eq("field 208", RESET_SEQUENCE_INTS[2], int208, prev + 208)?;
    assert_eq("field 212", RESET_SEQUENCE_INTS[3], int212, prev + 212)?;

    assert_all_zero("field 216", &zero216, prev + 216)?;
    assert_eq("field 275", 0, zero275, prev + 275)?;
    assert_eq("field 312", 0, zero312, prev + 312)?;

    check_count_ptr("object ptr", object_count, objects_ptr, prev + 276)?;
    check_count_ptr("node ptr", node_count, nodes_ptr, prev + 280)?;
    check_count_ptr("light ptr", light_count, lights_ptr, prev + 284)?;
    check_count_ptr("puffer ptr", puffer_count, puffers_ptr, prev + 288)?;
    check_count_ptr("dynamic sound ptr", dynamic_sound_count, dynamic_sounds_ptr, prev + 292)?;
    check_count_ptr("static sound ptr", static_sound_count, static_sounds_ptr, prev + 296)?;

    // This isn't set in any known file; it would be read like the static
    // sound data.
    assert_eq("unknown count", 0, unknown_count, prev + 271)?;
    assert_eq("unknown ptr", 0, unknown_ptr, prev + 300)?;

    check_count_ptr("activ prereq ptr", activ_prereq_count, activ_prereqs_ptr, prev + 304)?;
    check_count_ptr("anim ref ptr", anim_ref_count, anim_refs_ptr, prev + 308)?;

    let objects = if object_count > 0 { read_objects(data, object_count)? } else { vec![] };
    let nodes = if node_count > 0 { read_nodes(data, node_count)? } else { vec![] };
    let lights = if light_count > 0 { read_lookups(data, light_count, false)? } else { vec![] };
    let puffers = if puffer_count > 0 { read_lookups(data, puffer_count, true)? } else { vec![] };
    let dynamic_sounds = if dynamic_sound_count > 0 { read_lookups(data, dynamic_sound_count, false)? } else { vec![] };
    let static_sounds = if static_sound_count > 0 { read_static_sounds(data, static_sound_count)? } else { vec![] };

    let activation_prereq = if activ_prereq_count > 0 {
        assert_in("activ prereq min", &[0, 1, 2], activ_prereq_min_to_satisfy, prev + 273)?;
        Some(read_activation_prereq(data, activ_prereq_count, activ_prereq_min_to_satisfy)?)
    } else {
        assert_eq("activ prereq min", 0, activ_prereq_min_to_satisfy, prev + 273)?;
        None
    };

    let anim_refs = if anim_ref_count > 0 { read_anim_refs(data, anim_ref_count)? } else { vec![] };

    let mut anim_def = AnimDef {
        name,
        anim_name: NamePad { name: anim_name, pad: anim_name_pad },
        anim_root: NamePad { name: anim_root, pad: anim_root_pad },
        activation,
        auto_reset_node_states: flags.contains(AnimDefFlags::AUTO_RESET_NODE_STATES),
        execution_by_range,
        execution_by_zone,
        network_log,
        save_log,
        has_callback: flags.contains(AnimDefFlags::HAS_CALLBACK),
        reset_time,
        health: max_health,
        proximity_damage: flags.contains(AnimDefFlags::PROXIMITY_DAMAGE),
        objects,
        nodes,
        lights,
        puffers,
        dynamic_sounds,
        static_sounds,
        activation_prereq,
        anim_refs,
        reset_state: None,
        sequences: vec![],
        base_node_ptr,
        anim_root_ptr,
        objects_ptr,
        nodes_ptr,
        lights_ptr,
        puffers_ptr,
        dynamic_sounds_ptr,
        static_sounds_ptr,
        activ_prereqs_ptr,
        anim_refs_ptr,
        reset_state_ptr,
        seq_defs_ptr,
    };

    // The reset state record is read unconditionally.
    anim_def.reset_state = read_reset_state(data, &anim_def, reset_state_length, reset_state_ptr, prev + 256)?;

    if seq_def_count > 0 {
        assert_ne("seq ptr", 0, seq_defs_ptr, prev + 196)?;
        anim_def.sequences = read_sequence_definitions(data, &anim_def, seq_def_count)?;
    } else {
        assert_eq("seq ptr", 0, seq_defs_ptr, prev + 196)?;
    }

    // The Callback event checks callbacks are allowed; also catch the case
    // where the flag was set but no callback is in any script.
    if anim_def.has_callback {
        let callbacks = anim_def.sequences.iter()
            .flat_map(|sequence| sequence.script.iter())
            .filter(|event| matches!(event.data, EventData::Callback(_)))
            .count();
        assert_gt("callbacks", 0, callbacks, prev + 148)?;
    }

    Ok(anim_def)
}

/// This function writes one animation definition, header, tables, and scripts.
pub fn write_anim_def<W: WriteBytes>(buffer: &mut W, anim_def: &AnimDef) -> Result<()> {
    let mut flags = AnimDefFlags::empty();
    if anim_def.execution_by_range.is_some() {
        flags |= AnimDefFlags::EXECUTION_BY_RANGE;
    }
    if anim_def.execution_by_zone {
        flags |= AnimDefFlags::EXECUTION_BY_ZONE;
    }
    if anim_def.has_callback {
        flags |= AnimDefFlags::HAS_CALLBACK;
    }
    if anim_def.reset_time.is_some() {
        flags |= AnimDefFlags::RESET_TIME;
    }
    match anim_def.network_log {
        Some(true) => flags |= AnimDefFlags::NETWORK_LOG_SET | AnimDefFlags::NETWORK_LOG_ON,
        Some(false) => flags |= AnimDefFlags::NETWORK_LOG_SET,
        None => {}
    }
    match anim_def.save_log {
        Some(true) => flags |= AnimDefFlags::SAVE_LOG_SET | AnimDefFlags::SAVE_LOG_ON,
        Some(false) => flags |= AnimDefFlags::SAVE_LOG_SET,
        None => {}
    }
    if anim_def.auto_reset_node_states {
        flags |= AnimDefFlags::AUTO_RESET_NODE_STATES;
    }
    if anim_def.proximity_damage {
        flags |= AnimDefFlags::PROXIMITY_DAMAGE;
    }

    let (exec_by_range_min, exec_by_range_max) = anim_def.execution_by_range.unwrap_or((0.0, 0.0));
    let reset_state_length = anim_def.reset_state.as_ref().map_or(0, |reset| size_script(&reset.script));

    let table_count = |len: usize| if len > 0 { len as u8 + 1 } else { 0 };

    buffer.write_all(&pack_zterm_partition("anim name", &anim_def.anim_name.name, &anim_def.anim_name.pad, 32)?)?;
    buffer.write_string_u8_0padded(&anim_def.name, 32)?;
    buffer.write_u32(anim_def.base_node_ptr)?;
    buffer.write_all(&pack_zterm_partition("anim root", &anim_def.anim_root.name, &anim_def.anim_root.pad, 32)?)?;
    buffer.write_u32(anim_def.anim_root_ptr)?;
    buffer.write_all(&[0; 44])?;
    buffer.write_u32(flags.bits())?;
    buffer.write_u8(0)?;
    buffer.write_u8(anim_def.activation.to_u8())?;
    buffer.write_u8(4)?;
    buffer.write_u8(2)?;
    buffer.write_f32(exec_by_range_min)?;
    buffer.write_f32(exec_by_range_max)?;
    buffer.write_f32(anim_def.reset_time.unwrap_or(-1.0))?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(anim_def.health)?;
    buffer.write_f32(anim_def.health)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(0)?;
    buffer.write_u32(anim_def.seq_defs_ptr)?;
    for value in RESET_SEQUENCE_INTS {
        buffer.write_u32(value)?;
    }
    buffer.write_all(&[0; 40])?;
    buffer.write_u32(anim_def.reset_state.as_ref().map_or(0, |reset| reset.ptr))?;
    buffer.write_u32(reset_state_length)?;
    buffer.write_u8(anim_def.sequences.len() as u8)?;
    buffer.write_u8(table_count(anim_def.objects.len()))?;
    buffer.write_u8(table_count(anim_def.nodes.len()))?;
    buffer.write_u8(table_count(anim_def.lights.len()))?;
    buffer.write_u8(table_count(anim_def.puffers.len()))?;
    buffer.write_u8(table_count(anim_def.dynamic_sounds.len()))?;
    buffer.write_u8(table_count(anim_def.static_sounds.len()))?;
    buffer.write_u8(0)?;
    buffer.write_u8(anim_def.activation_prereq.as_ref().map_or(0, count_activation_prereqs))?;
    buffer.write_u8(anim_def.activation_prereq.as_ref().map_or(0, |prereq| prereq.min_to_satisfy))?;
    buffer.write_u8(anim_def.anim_refs.len() as u8)?;
    buffer.write_u8(0)?;
    buffer.write_u32(anim_def.objects_ptr)?;
    buffer.write_u32(anim_def.nodes_ptr)?;
    buffer.write_u32(anim_def.lights_ptr)?;
    buffer.write_u32(anim_def.puffers_ptr)?;
    buffer.write_u32(anim_def.dynamic_sounds_ptr)?;
    buffer.write_u32(anim_def.static_sounds_ptr)?;
    buffer.write_u32(0)?;
    buffer.write_u32(anim_def.activ_prereqs_ptr)?;
    buffer.write_u32(anim_def.anim_refs_ptr)?;
    buffer.write_u32(0)?;

    if !anim_def.objects.is_empty() {
        write_objects(buffer, &anim_def.objects)?;
    }
    if !anim_def.nodes.is_empty() {
        write_nodes(buffer, &anim_def.nodes)?;
    }
    if !anim_def.lights.is_empty() {
        write_lookups(buffer, &anim_def.lights, false)?;
    }
    if !anim_def.puffers.is_empty() {
        write_lookups(buffer, &anim_def.puffers, true)?;
    }
    if !anim_def.dynamic_sounds.is_empty() {
        write_lookups(buffer, &anim_def.dynamic_sounds, false)?;
    }
    if !anim_def.static_sounds.is_empty() {
        write_static_sounds(buffer, &anim_def.static_sounds)?;
    }
    if let Some(prereq) = &anim_def.activation_prereq {
        write_activation_prereq(buffer, prereq)?;
    }
    if !anim_def.anim_refs.is_empty() {
        write_anim_refs(buffer, &anim_def.anim_refs)?;
    }

    write_reset_state(buffer, anim_def)?;
    write_sequence_definitions(buffer, anim_def)?;

    Ok(())
}

/// This function reads the zeroed first slot of the animation definition array.
pub fn read_anim_def_zero<R: ReadBytes>(data: &mut R) -> Result<()> {
    let prev = data.stream_position()?;
    let mut header = data.read_slice(ANIM_DEF_SIZE as usize, false)?;

    // The first entry is always zero, except for this one byte.
    assert_eq("anim def header byte 153", 3, header[153], prev + 153)?;
    header[153] = 0;
    assert_all_zero("anim def header", &header, prev)?;

    let reset_offset = data.stream_position()?;
    let reset = data.read_slice(RESET_STATE_SIZE as usize, false)?;
    assert_all_zero("anim def reset", &reset, reset_offset)?;
    Ok(())
}

/// This function writes the zeroed first slot of the animation definition array.
pub fn write_anim_def_zero<W: WriteBytes>(buffer: &mut W) -> Result<()> {
    let mut header = vec![0; ANIM_DEF_SIZE as usize];
    header[153] = 3;
    buffer.write_all(&header)?;
    buffer.write_all(&[0; RESET_STATE_SIZE as usize])?;
    Ok(())
}
