//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! ZArchives are a container-type file, used to contain sounds, reader
//! scripts, motions, and the mechlib.
//!
//! A binary accurate output is produced by default. This requires reading
//! and writing the useless values in the table of contents: the comments
//! are uninitialized memory the engine wrote out, and some write times are
//! not representable as timestamps. Duplicate names are also allowed, and
//! entries must be written back in their original order.
//!
//! # ZArchive Structure
//!
//! | Bytes | Type                       | Data                                             |
//! | ----- | -------------------------- | ------------------------------------------------ |
//! | *     | Payloads                   | Entry data, packed front-to-back.                |
//! | 148*n | [Entry](#entry-structure)  | Table of contents, one entry per payload.        |
//! | 8     | Footer                     | `version` (u32, always 1) and `count` (u32).     |
//!
//! # Entry Structure
//!
//! | Bytes | Type               | Data                                                  |
//! | ----- | ------------------ | ----------------------------------------------------- |
//! | 4     | u32                | Start offset of the payload.                          |
//! | 4     | u32                | Length of the payload, in bytes.                      |
//! | 64    | 00-Padded StringU8 | Entry name. Duplicates allowed.                       |
//! | 4     | u32                | Flag. Preserved verbatim.                             |
//! | 64    | Vec<u8>            | Comment. Usually garbage. Preserved verbatim.         |
//! | 8     | u64                | Write time as a Windows FILETIME.                     |

use getset::*;
use serde_derive::{Deserialize, Serialize};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use std::io::SeekFrom;
use std::io::Write;

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, assert_le};
use crate::error::{Result, ZbdError};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::ascii_zterm_padded;

#[cfg(test)] mod archive_test;

/// Extension used by ZArchives.
pub const EXTENSION: &str = ".zbd";

/// Size of a table-of-contents entry.
const TOC_ENTRY_SIZE: u64 = 148;

/// Size of the footer.
const TOC_FOOTER_SIZE: u64 = 8;

/// Size of the name and comment fields.
const FIELD_SIZE: usize = 64;

/// The only known archive version.
const VERSION: u32 = 1;

/// Windows FILETIMEs count 100ns ticks from this instant.
const WINDOWS_EPOCH: OffsetDateTime = datetime!(1601-01-01 00:00:00 UTC);

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire ZArchive decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

/// This holds a single ZArchive entry: its payload, plus everything the table
/// of contents stores about it.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ArchiveEntry {

    /// Entry name. Not necessarily unique within the archive.
    pub(crate) name: String,

    /// The payload.
    pub(crate) data: Vec<u8>,

    /// Start offset the payload had in the original file.
    pub(crate) start: u32,

    /// Flag field. Meaning unknown.
    pub(crate) flag: u32,

    /// 64 bytes of comment. May be uninitialized memory.
    pub(crate) comment: Vec<u8>,

    /// Write time of the entry.
    pub(crate) write_time: Filetime,
}

/// A per-entry write timestamp.
///
/// FILETIMEs are 100ns ticks since 1601. Tick counts that aren't a whole
/// microsecond are likely garbage (the mechlib has them), and converting
/// them would lose information, so the raw integer is kept instead.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filetime {
    DateTime(OffsetDateTime),
    Raw(u64),
}

impl Default for Filetime {
    fn default() -> Self {
        Self::DateTime(WINDOWS_EPOCH)
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Filetime
//---------------------------------------------------------------------------//

impl Filetime {

    /// This function decodes a raw FILETIME value, keeping the raw integer when the tick
    /// count has sub-microsecond precision.
    pub fn from_raw(filetime: u64) -> Self {
        if filetime == 0 {
            return Self::DateTime(WINDOWS_EPOCH);
        }

        let micros = filetime / 10;
        let ticks = filetime % 10;

        if ticks != 0 {
            return Self::Raw(filetime);
        }

        Self::DateTime(WINDOWS_EPOCH + Duration::microseconds(micros as i64))
    }

    /// This function re-encodes the timestamp into a raw FILETIME value.
    pub fn to_raw(&self) -> u64 {
        match self {
            Self::Raw(filetime) => *filetime,
            Self::DateTime(datetime) => {
                if *datetime == WINDOWS_EPOCH {
                    0
                } else {
                    let micros = (*datetime - WINDOWS_EPOCH).whole_microseconds();
                    (micros as u64) * 10
                }
            }
        }
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Archive
//---------------------------------------------------------------------------//

impl Decodeable for Archive {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < TOC_FOOTER_SIZE {
            return Err(ZbdError::DecodingNotMoreBytesToDecode);
        }

        let footer_offset = data_len - TOC_FOOTER_SIZE;
        data.seek(SeekFrom::Start(footer_offset))?;

        let version = data.read_u32()?;
        let count = data.read_u32()?;
        assert_eq("archive version", VERSION, version, footer_offset).map_err(ZbdError::archive)?;

        let toc_size = TOC_ENTRY_SIZE * count as u64;
        assert_le("archive toc size", footer_offset, toc_size, footer_offset + 4).map_err(ZbdError::archive)?;

        // The engine reads the TOC forward.
        let toc_offset = footer_offset - toc_size;
        data.seek(SeekFrom::Start(toc_offset))?;

        let mut specs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let entry_offset = data.stream_position()?;

            let start = data.read_u32()?;
            let length = data.read_u32()?;
            let name_raw = data.read_slice(FIELD_SIZE, false)?;
            let flag = data.read_u32()?;
            let comment = data.read_slice(FIELD_SIZE, false)?;
            let filetime = data.read_u64()?;

            let name = ascii_zterm_padded("archive name", &name_raw, entry_offset + 8).map_err(ZbdError::archive)?;
            let end = start as u64 + length as u64;
            assert_le("archive entry end", toc_offset, end, entry_offset).map_err(ZbdError::archive)?;

            specs.push((name, start, length, flag, comment, Filetime::from_raw(filetime)));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for (name, start, length, flag, comment, write_time) in specs {
            data.seek(SeekFrom::Start(start as u64))?;
            let payload = data.read_slice(length as usize, false)?;

            entries.push(ArchiveEntry {
                name,
                data: payload,
                start,
                flag,
                comment,
                write_time,
            });
        }

        Ok(Self { entries })
    }
}

impl Encodeable for Archive {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let mut toc = vec![];
        let mut offset: u32 = 0;

        // Payloads go first, in original order, packed front-to-back.
        for (index, entry) in self.entries.iter_mut().enumerate() {
            assert_le("archive name length", FIELD_SIZE - 1, entry.name.len(), index)?;
            assert_eq("archive comment length", FIELD_SIZE, entry.comment.len(), index)?;

            let length = entry.data.len() as u32;
            toc.write_u32(offset)?;
            toc.write_u32(length)?;
            toc.write_string_u8_0padded(&entry.name, FIELD_SIZE)?;
            toc.write_u32(entry.flag)?;
            toc.write_all(&entry.comment)?;
            toc.write_u64(entry.write_time.to_raw())?;

            entry.start = offset;
            buffer.write_all(&entry.data)?;
            offset += length;
        }

        buffer.write_all(&toc)?;
        buffer.write_u32(VERSION)?;
        buffer.write_u32(self.entries.len() as u32)?;

        Ok(())
    }
}
