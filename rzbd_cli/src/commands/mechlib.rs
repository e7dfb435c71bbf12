//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `mechlib.zbd` files to ZIP files.
//!
//! The fixed `version` and `format` entries extract as empty files (their
//! contents are constants); `materials` and the models extract as JSON.

use anyhow::Result;
use log::info;

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::mechlib::materials::Materials;
use rzbd_lib::files::mechlib::{format_data, read_format, read_version, version_data, Model, FORMAT_ENTRY, MATERIALS_ENTRY, VERSION_ENTRY};
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{archive_to_zip, output_resolve, zip_to_archive};

const MATERIALS_JSON: &str = "materials.json";

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting mechlib from {} to {}", input.display(), output.display());

    archive_to_zip(input, &output, |entry| {
        match entry.name().as_str() {
            VERSION_ENTRY => {
                read_version(entry.data())?;
                Ok((VERSION_ENTRY.to_owned(), vec![]))
            }
            FORMAT_ENTRY => {
                read_format(entry.data())?;
                Ok((FORMAT_ENTRY.to_owned(), vec![]))
            }
            MATERIALS_ENTRY => {
                let materials = Materials::decode(&mut Cursor::new(entry.data().to_vec()), &None)?;
                Ok((MATERIALS_JSON.to_owned(), serde_json::to_vec_pretty(&materials)?))
            }
            name => {
                let model = Model::decode(&mut Cursor::new(entry.data().to_vec()), &None)?;
                Ok((format!("{}.json", name.trim_end_matches(".flt")), serde_json::to_vec_pretty(&model)?))
            }
        }
    })
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking mechlib from {} to {}", input.display(), output.display());

    zip_to_archive(input, &output, |info, data| {
        match info.name.as_str() {
            VERSION_ENTRY => Ok(version_data()),
            FORMAT_ENTRY => Ok(format_data()),
            MATERIALS_ENTRY => {
                let mut materials: Materials = serde_json::from_slice(&data)?;
                let mut encoded = vec![];
                materials.encode(&mut encoded, &None)?;
                Ok(encoded)
            }
            _ => {
                let mut model: Model = serde_json::from_slice(&data)?;
                let mut encoded = vec![];
                model.encode(&mut encoded, &None)?;
                Ok(encoded)
            }
        }
    })
}
