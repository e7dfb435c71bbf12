//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Interpreter archives hold the named command scripts the game's scripting
//! interpreter runs.
//!
//! # Interpreter Archive Structure
//!
//! | Bytes | Type  | Data                                                        |
//! | ----- | ----- | ----------------------------------------------------------- |
//! | 12    | Header| `{signature = 0x08971119, version = 7, count}`, all u32.    |
//! | 128*n | Entry | `{name[120], last_modified (u32 unix time), start (u32)}`.  |
//! | *     | Body  | One script per entry, at its declared start.                |
//!
//! A script body is a sequence of `{size (u32), arg_count (u32),
//! bytes[size]}` records, terminated by a record with `size == 0`. Each
//! command is a NUL-separated argument list with a trailing NUL; the
//! extracted form replaces the NULs with spaces, so commands must not
//! contain spaces on the wire.

use getset::*;
use serde_derive::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_eq, AssertionError, AssertOp};
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::{ascii_zterm_padded, check_size_mismatch};

#[cfg(test)] mod interp_test;

/// Extension used by interpreter archives.
pub const EXTENSION: &str = ".zbd";

const SIGNATURE: u32 = 0x08971119;
const VERSION: u32 = 7;

/// Size of the header.
const HEADER_SIZE: u64 = 12;

/// Size of a table-of-contents entry.
const ENTRY_SIZE: u64 = 128;

/// Size of the name field.
const NAME_SIZE: usize = 120;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire interpreter archive decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Interp {
    scripts: Vec<Script>,
}

/// This holds a single interpreter script.
#[derive(PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Script {
    name: String,
    timestamp: OffsetDateTime,
    lines: Vec<String>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Interp
//---------------------------------------------------------------------------//

fn read_script_lines<R: ReadBytes>(data: &mut R) -> Result<Vec<String>> {
    let mut lines = vec![];

    loop {
        let size = data.read_u32()?;

        // End of script.
        if size == 0 {
            break;
        }

        let arg_count = data.read_u32()?;
        let offset = data.stream_position()?;
        let command = data.read_string_u8(size as usize)?;

        let null_count = command.matches('\0').count() as u32;
        assert_eq("argument count", arg_count, null_count, offset)?;
        assert_eq("command end", Some('\0'), command.chars().last(), offset)?;

        if command.contains(' ') {
            return Err(AssertionError::new("command", AssertOp::Ne, "without spaces".to_owned(), format!("{command:?}"), offset).into());
        }

        lines.push(command.trim_end_matches('\0').replace('\0', " "));
    }

    Ok(lines)
}

impl Decodeable for Interp {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;

        let signature = data.read_u32()?;
        let version = data.read_u32()?;
        let count = data.read_u32()?;

        assert_eq("signature", SIGNATURE, signature, 0u64)?;
        assert_eq("version", VERSION, version, 4u64)?;

        let mut script_info = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let entry_offset = data.stream_position()?;
            let name_raw = data.read_slice(NAME_SIZE, false)?;
            let last_modified = data.read_u32()?;
            let start = data.read_u32()?;

            let name = ascii_zterm_padded("script name", &name_raw, entry_offset)?;
            let timestamp = OffsetDateTime::from_unix_timestamp(last_modified as i64)
                .map_err(|_| AssertionError::new("script timestamp", AssertOp::Between, "a valid unix time".to_owned(), last_modified.to_string(), entry_offset + 120))?;
            script_info.push((name, timestamp, start));
        }

        let mut scripts = Vec::with_capacity(count as usize);
        for (name, timestamp, start) in script_info {
            let offset = data.stream_position()?;
            assert_eq("script offset", start as u64, offset, name.as_str())?;

            let lines = read_script_lines(data)?;
            scripts.push(Script {
                name,
                timestamp,
                lines,
            });
        }

        check_size_mismatch(data.stream_position()? as usize, data_len as usize)?;
        Ok(Self { scripts })
    }
}

impl Encodeable for Interp {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let mut encoded = Vec::with_capacity(self.scripts.len());
        for script in &self.scripts {
            let mut body: Vec<u8> = vec![];
            for command in &script.lines {

                // Include the trailing NUL in the size and count.
                let size = command.len() as u32 + 1;
                let arg_count = command.matches(' ').count() as u32 + 1;
                body.write_u32(size)?;
                body.write_u32(arg_count)?;
                body.write_string_u8(&command.replace(' ', "\0"))?;
                body.write_u8(0)?;
            }

            // End of script.
            body.write_u32(0)?;
            encoded.push(body);
        }

        let count = self.scripts.len() as u32;
        buffer.write_u32(SIGNATURE)?;
        buffer.write_u32(VERSION)?;
        buffer.write_u32(count)?;

        let mut offset = HEADER_SIZE + ENTRY_SIZE * count as u64;
        for (script, body) in self.scripts.iter().zip(encoded.iter()) {
            buffer.write_string_u8_0padded(&script.name, NAME_SIZE)?;
            buffer.write_u32(script.timestamp.unix_timestamp() as u32)?;
            buffer.write_u32(offset as u32)?;
            offset += body.len() as u64;
        }

        for body in &encoded {
            buffer.write_all(body)?;
        }

        Ok(())
    }
}
