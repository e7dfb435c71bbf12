//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `sounds*.zbd` files to ZIP files.
//!
//! The payloads are plain WAV files, so they go into the ZIP untouched.

use anyhow::Result;
use log::info;

use std::path::Path;

use super::{archive_to_zip, output_resolve, zip_to_archive};

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting sounds from {} to {}", input.display(), output.display());

    archive_to_zip(input, &output, |entry| {
        Ok((entry.name().to_owned(), entry.data().to_vec()))
    })
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking sounds from {} to {}", input.display(), output.display());

    zip_to_archive(input, &output, |_info, data| Ok(data))
}
