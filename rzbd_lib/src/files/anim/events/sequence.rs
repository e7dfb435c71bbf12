//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Events that call other sequences of the same animation definition.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::assert_eq;
use crate::error::Result;
use crate::utils::ascii_zterm_padded;

/// Payload size of CALL_SEQUENCE and STOP_SEQUENCE.
pub const SEQUENCE_SIZE: u32 = 36;

/// Size of the name field.
const NAME_SIZE: usize = 32;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// CALL_SEQUENCE: start a sequence by name.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct CallSequence {
    pub name: String,
}

/// STOP_SEQUENCE: stop a sequence by name.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct StopSequence {
    pub name: String,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

fn read_sequence_name<R: ReadBytes>(data: &mut R) -> Result<String> {
    let prev = data.stream_position()?;
    let name_raw = data.read_slice(NAME_SIZE, false)?;
    let sentinel = data.read_i32()?;

    let name = ascii_zterm_padded("name", &name_raw, prev)?;
    assert_eq("sentinel", -1, sentinel, prev + 32)?;
    Ok(name)
}

fn write_sequence_name<W: WriteBytes>(buffer: &mut W, name: &str) -> Result<()> {
    buffer.write_string_u8_0padded(name, NAME_SIZE)?;
    buffer.write_i32(-1)
}

impl CallSequence {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { name: read_sequence_name(data)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        write_sequence_name(buffer, &self.name)
    }
}

impl StopSequence {

    pub(crate) fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self { name: read_sequence_name(data)? })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        write_sequence_name(buffer, &self.name)
    }
}
