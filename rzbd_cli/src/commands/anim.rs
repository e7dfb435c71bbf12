//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `anim.zbd` files to ZIP files: one JSON document per animation
//! definition, plus the file-level metadata.

use anyhow::Result;
use log::info;
use serde_derive::{Deserialize, Serialize};

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::anim::{Anim, AnimDef, AnimName};
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{output_resolve, zip_read, zip_reader, zip_write, zip_writer, Renamer};

const METADATA: &str = "metadata.json";

/// The file-level data that doesn't belong to any single definition: the
/// name table, the runtime pointers, and the extraction order.
#[derive(Serialize, Deserialize)]
struct AnimMetadata {
    anim_ptr: u32,
    world_ptr: u32,
    anim_names: Vec<AnimName>,
    anim_def_files: Vec<String>,
}

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting animation definitions from {} to {}", input.display(), output.display());

    let data = std::fs::read(input)?;
    let anim = Anim::decode(&mut Cursor::new(data), &None)?;

    let mut zip = zip_writer(&output)?;
    let mut renamer = Renamer::default();
    let mut anim_def_files = vec![];

    for anim_def in anim.anim_defs() {
        let rename = renamer.rename(&format!("{}-{}.json", anim_def.anim_name.name, anim_def.name));
        zip_write(&mut zip, &rename, &serde_json::to_vec_pretty(anim_def)?)?;
        anim_def_files.push(rename);
    }

    let metadata = AnimMetadata {
        anim_ptr: *anim.anim_ptr(),
        world_ptr: *anim.world_ptr(),
        anim_names: anim.anim_names().to_vec(),
        anim_def_files,
    };
    zip_write(&mut zip, METADATA, &serde_json::to_vec_pretty(&metadata)?)?;
    zip.finish()?;
    Ok(())
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking animation definitions from {} to {}", input.display(), output.display());

    let mut zip = zip_reader(input)?;
    let metadata: AnimMetadata = serde_json::from_slice(&zip_read(&mut zip, METADATA)?)?;

    let mut anim = Anim::default();
    *anim.anim_ptr_mut() = metadata.anim_ptr;
    *anim.world_ptr_mut() = metadata.world_ptr;
    *anim.anim_names_mut() = metadata.anim_names;

    for file in &metadata.anim_def_files {
        let anim_def: AnimDef = serde_json::from_slice(&zip_read(&mut zip, file)?)?;
        anim.anim_defs_mut().push(anim_def);
    }

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&output)?);
    anim.encode(&mut writer, &None)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}
