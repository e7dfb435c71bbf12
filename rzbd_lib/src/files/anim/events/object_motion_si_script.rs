//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The scripted interpolation motion event.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;
use crate::utils::serde_base64;

/// OBJECT_MOTION_SI_SCRIPT: a variable-length sub-script of keyframed
/// translation/rotation/scale frames.
///
/// The frame encoding has never been fully identified, and the payload is
/// the only variable-length one in the event set, so it is preserved
/// verbatim.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectMotionSiScript {
    #[serde(with = "serde_base64")]
    pub content: Vec<u8>,
}

//---------------------------------------------------------------------------//
//                              Codec functions
//---------------------------------------------------------------------------//

impl ObjectMotionSiScript {

    pub fn size(&self) -> u32 {
        self.content.len() as u32
    }

    pub(crate) fn read<R: ReadBytes>(data: &mut R, length: u32) -> Result<Self> {
        Ok(Self {
            content: data.read_slice(length as usize, false)?,
        })
    }

    pub(crate) fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_all(&self.content).map_err(From::from)
    }
}
