//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Activation prerequisites: the mini-language gating when an animation may
//! start.
//!
//! Three record types: 1 references an animation by name, 2 references a
//! node object, and 3 latches a parent object for the type-2 record that
//! follows it, producing a parent/child link in the document.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_in, assert_ne};
use crate::error::Result;
use crate::utils::ascii_zterm_padded;

/// Size of a prerequisite record, including its 8-byte header.
pub const PREREQ_SIZE: u64 = 48;

const PREREQ_TYPE_ANIM: u32 = 1;
const PREREQ_TYPE_OBJECT: u32 = 2;
const PREREQ_TYPE_PARENT: u32 = 3;

/// Size of the name fields.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The decoded activation prerequisites of an animation definition.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivationPrereq {
    pub min_to_satisfy: u8,
    pub anim_list: Vec<String>,
    pub obj_list: Vec<PrereqObject>,
}

/// A node-object prerequisite, possibly linked to a parent object.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct PrereqObject {
    pub required: bool,
    pub active: bool,
    pub name: String,
    pub ptr: u32,
    pub parent_name: String,
    pub parent_ptr: u32,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

/// This function reads `count` prerequisite records.
pub fn read_activation_prereq<R: ReadBytes>(data: &mut R, count: u8, min_to_satisfy: u8) -> Result<ActivationPrereq> {
    let mut anim_list = vec![];
    let mut obj_list: Vec<PrereqObject> = vec![];
    let mut prev_object: Option<(bool, String, u32)> = None;

    for _ in 0..count {
        let prev = data.stream_position()?;

        let optional = data.read_u32()?;
        let prereq_type = data.read_u32()?;

        // This is actually a byte in the engine, but reading it as an u32
        // also validates the padding.
        assert_in("activ prereq type", &[PREREQ_TYPE_ANIM, PREREQ_TYPE_OBJECT, PREREQ_TYPE_PARENT], prereq_type, prev + 4)?;

        if prereq_type == PREREQ_TYPE_ANIM {
            // Animation prerequisites are always required.
            assert_eq("activ prereq optional", 0, optional, prev)?;

            let name_raw = data.read_slice(NAME_SIZE, false)?;
            let zero32 = data.read_u32()?;
            let zero36 = data.read_u32()?;

            let name = ascii_zterm_padded("activ prereq name", &name_raw, prev + 8)?;
            assert_eq("activ prereq field 40", 0, zero32, prev + 40)?;
            assert_eq("activ prereq field 44", 0, zero36, prev + 44)?;
            anim_list.push(name);
            continue;
        }

        assert_in("activ prereq optional", &[0, 1], optional, prev)?;
        let required = optional == 0;

        let active = data.read_u32()?;
        let name_raw = data.read_slice(NAME_SIZE, false)?;
        let ptr = data.read_u32()?;

        let name = ascii_zterm_padded("activ prereq name", &name_raw, prev + 12)?;
        assert_ne("activ prereq ptr", 0, ptr, prev + 44)?;

        if prereq_type == PREREQ_TYPE_PARENT {
            assert_eq("activ prereq active", 0, active, prev + 8)?;

            // Remember the current object as the parent of the next one.
            prev_object = Some((required, name, ptr));
        } else {
            assert_in("activ prereq active", &[0, 1], active, prev + 8)?;

            let (parent_name, parent_ptr) = match prev_object.take() {
                Some((parent_required, parent_name, parent_ptr)) => {
                    assert_eq("activ prereq required", parent_required, required, prev)?;
                    (parent_name, parent_ptr)
                }
                None => (String::new(), 0),
            };

            obj_list.push(PrereqObject {
                required,
                active: active == 1,
                name,
                ptr,
                parent_name,
                parent_ptr,
            });
        }
    }

    Ok(ActivationPrereq {
        min_to_satisfy,
        anim_list,
        obj_list,
    })
}

/// This function writes the prerequisite records.
pub fn write_activation_prereq<W: WriteBytes>(buffer: &mut W, prereq: &ActivationPrereq) -> Result<()> {
    for name in &prereq.anim_list {
        buffer.write_u32(0)?;
        buffer.write_u32(PREREQ_TYPE_ANIM)?;
        buffer.write_string_u8_0padded(name, NAME_SIZE)?;
        buffer.write_u32(0)?;
        buffer.write_u32(0)?;
    }

    for object in &prereq.obj_list {
        let optional = u32::from(!object.required);

        if !object.parent_name.is_empty() {
            buffer.write_u32(optional)?;
            buffer.write_u32(PREREQ_TYPE_PARENT)?;
            buffer.write_u32(0)?;
            buffer.write_string_u8_0padded(&object.parent_name, NAME_SIZE)?;
            buffer.write_u32(object.parent_ptr)?;
        }

        buffer.write_u32(optional)?;
        buffer.write_u32(PREREQ_TYPE_OBJECT)?;
        buffer.write_u32(u32::from(object.active))?;
        buffer.write_string_u8_0padded(&object.name, NAME_SIZE)?;
        buffer.write_u32(object.ptr)?;
    }

    Ok(())
}

/// This function returns the number of records [`write_activation_prereq`] will produce.
pub fn count_activation_prereqs(prereq: &ActivationPrereq) -> u8 {
    let mut count = prereq.anim_list.len() + prereq.obj_list.len();
    for object in &prereq.obj_list {
        if !object.parent_name.is_empty() {
            count += 1;
        }
    }
    count as u8
}
