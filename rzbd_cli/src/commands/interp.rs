//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `interp.zbd` files to JSON files. The only family small enough
//! not to warrant a ZIP.

use anyhow::Result;
use log::info;

use std::io::{Cursor, Write};
use std::path::Path;

use rzbd_lib::files::interp::Interp;
use rzbd_lib::files::{Decodeable, Encodeable};

use super::output_resolve;

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".json");
    info!("Extracting interpreter scripts from {} to {}", input.display(), output.display());

    let data = std::fs::read(input)?;
    let interp = Interp::decode(&mut Cursor::new(data), &None)?;

    std::fs::write(&output, serde_json::to_string_pretty(&interp)?)?;
    Ok(())
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking interpreter scripts from {} to {}", input.display(), output.display());

    let mut interp: Interp = serde_json::from_slice(&std::fs::read(input)?)?;

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&output)?);
    interp.encode(&mut writer, &None)?;
    writer.flush()?;
    Ok(())
}
