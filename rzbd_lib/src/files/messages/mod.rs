//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The game's localized strings live in a message DLL: a standard PE
//! message table resource, plus a name table in the `.data` section mapping
//! message names to message table ids.
//!
//! This is the only read-only family. There is no writer.

use encoding_rs::WINDOWS_1252;
use getset::*;
use pelite::pe32::{Pe, PeFile};
use pelite::resources::{Directory, Entry, Name};
use serde_derive::{Deserialize, Serialize};

use crate::binary::ReadBytes;
use crate::check::assert_eq;
use crate::error::{Result, ZbdError};
use crate::files::{Decodeable, DecodeableExtraData};

#[cfg(test)] mod messages_test;

/// Extension used by message DLLs.
pub const EXTENSION: &str = ".dll";

/// The resource type id of message tables.
const RT_MESSAGETABLE: u32 = 11;

/// All supported locale ids map to the same code page, 1252.
pub const LOCALE_ENGLISH: u32 = 1033;
pub const LOCALE_GERMAN: u32 = 1031;
pub const LOCALE_FRENCH: u32 = 1036;

/// The default locale.
pub const LOCALE_DEFAULT: u32 = LOCALE_ENGLISH;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds the recovered messages, in `.data` table order.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Messages {
    entries: Vec<MessageEntry>,
}

/// A single message: its internal name, its message table id, and the
/// localized text (missing for a few orphaned names).
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct MessageEntry {
    pub key: String,
    pub id: u32,
    pub value: Option<String>,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn find_id<'a>(directory: Directory<'a>, id: u32) -> Option<Entry<'a>> {
    directory.entries().find_map(|entry| match entry.name() {
        Ok(Name::Id(found)) if found == id => entry.entry().ok(),
        _ => None,
    })
}

/// This function decodes the standard message table resource into (id, text) pairs.
fn read_messagetable_resource(data: &[u8]) -> Result<Vec<(u32, String)>> {
    let mut cursor = std::io::Cursor::new(data);

    let count = cursor.read_u32()?;
    let mut messages = vec![];

    for _ in 0..count {
        let low_id = cursor.read_u32()?;
        let high_id = cursor.read_u32()?;
        let mut offset_to_entries = cursor.read_u32()? as u64;

        let block_pos = cursor.position();
        for entry_id in low_id..high_id {
            cursor.set_position(offset_to_entries);
            let length = cursor.read_u16()?;
            let flags = cursor.read_u16()?;

            // Unicode messages would have flag 0x0001.
            assert_eq("no unicode flags", 0, flags, offset_to_entries + 2)?;

            let length = length.checked_sub(4).unwrap_or(0) as usize;
            let text = cursor.read_slice(length, false)?;
            offset_to_entries += 4 + length as u64;

            let (decoded, _, _) = WINDOWS_1252.decode(&text);
            let value = decoded.trim_end_matches(['\0', '\r', '\n']).to_string();

            // The ids are not contiguous across blocks.
            messages.push((entry_id, value));
        }
        cursor.set_position(block_pos);
    }

    Ok(messages)
}

/// This function extracts the message table for a locale from the resource directory.
fn extract_messagetable(file: PeFile, locale_id: u32) -> Result<Vec<(u32, String)>> {
    let resources = file.resources()?;
    let root = resources.root()?;

    let table = find_id(root, RT_MESSAGETABLE)
        .and_then(|entry| entry.dir())
        .and_then(|directory| find_id(directory, 1))
        .and_then(|entry| entry.dir())
        .and_then(|directory| find_id(directory, locale_id))
        .and_then(|entry| entry.data())
        .ok_or(ZbdError::PeMessageTableNotFound(locale_id))?;

    read_messagetable_resource(table.bytes()?)
}

/// This function scans the `.data` section for the backwards-written table of
/// `{virt_offset (u16), hi_offset (u16), entry_id (u32)}` records mapping message names to
/// message table ids.
fn extract_message_ids(file: PeFile) -> Result<Vec<(String, u32)>> {
    let section = file.section_headers()
        .iter()
        .find(|section| section.Name.starts_with(b".data\0"))
        .ok_or_else(|| ZbdError::PeSectionNotFound(".data".to_owned()))?;

    let data = file.get_section_bytes(section)?;
    let virtual_address = section.VirtualAddress;

    let mut cursor = std::io::Cursor::new(data);
    let mut entries = vec![];

    loop {
        let virt_offset = cursor.read_u16()?;
        let hi_offset = cursor.read_u16()?;
        let entry_id = cursor.read_u32()?;

        // The first few records can be zeroed out (table padding?).
        if hi_offset == 0 {
            continue;
        }

        // The high word no longer matching the base address is the only
        // known end condition.
        if hi_offset as u32 > 0x1000 {
            break;
        }

        let rel_offset = (virt_offset as u32).wrapping_sub(virtual_address) as usize;
        let end = data[rel_offset..].iter().position(|byte| *byte == 0)
            .map(|null| rel_offset + null)
            .unwrap_or(data.len());

        let name = String::from_utf8_lossy(&data[rel_offset..end]).to_string();
        entries.push((name, entry_id));
    }

    Ok(entries)
}

impl Decodeable for Messages {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let locale_id = extra_data.as_ref()
            .and_then(|extra_data| *extra_data.locale_id())
            .unwrap_or(LOCALE_DEFAULT);

        let len = data.len()?;
        let bytes = data.read_slice(len as usize, false)?;
        let file = PeFile::from_bytes(&bytes)?;

        let message_table = extract_messagetable(file, locale_id)?;
        let message_ids = extract_message_ids(file)?;

        let entries = message_ids.into_iter()
            .map(|(key, id)| {
                let value = message_table.iter()
                    .find(|(entry_id, _)| *entry_id == id)
                    .map(|(_, text)| text.to_owned());
                MessageEntry { key, id, value }
            })
            .collect();

        Ok(Self { entries })
    }
}
