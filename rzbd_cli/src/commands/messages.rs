//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Extract the localized messages from the game's message DLL. Read-only.

use anyhow::Result;
use log::info;

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::messages::Messages;
use rzbd_lib::files::{Decodeable, DecodeableExtraData};

use super::output_resolve;

pub fn from_dll(input: &Path, output: Option<&Path>, locale_id: u32) -> Result<()> {
    let output = output_resolve(input, output, ".json");
    info!("Extracting messages (locale {}) from {} to {}", locale_id, input.display(), output.display());

    let mut extra_data = DecodeableExtraData::default();
    extra_data.set_locale_id(Some(locale_id));

    let data = std::fs::read(input)?;
    let messages = Messages::decode(&mut Cursor::new(data), &Some(extra_data))?;

    std::fs::write(&output, serde_json::to_string_pretty(&messages)?)?;
    Ok(())
}
