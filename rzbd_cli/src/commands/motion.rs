//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `motion.zbd` files to ZIP files of JSON motions.
//!
//! Entries are named `<mech>_<motion>`, so a helper index grouping the
//! motions by mech is written alongside the manifest.

use anyhow::Result;
use log::info;

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::motion::Motion;
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{output_resolve, zip_to_archive, zip_write, zip_writer, ArchiveInfo, Renamer, MANIFEST};

/// Helper file to make loading motions by mech easier.
const MECH_MOTIONS: &str = "mech_motions.json";

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting motions from {} to {}", input.display(), output.display());

    // The generic helper can't also write the mech index, so this command
    // drives the archive directly.
    let data = std::fs::read(input)?;
    let archive = rzbd_lib::files::archive::Archive::decode(&mut Cursor::new(data), &None)?;

    let mut zip = zip_writer(&output)?;
    let mut renamer = Renamer::default();
    let mut infos = vec![];
    let mut mech_motions: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for entry in archive.entries() {
        let motion = Motion::decode(&mut Cursor::new(entry.data().to_vec()), &None)?;
        let rename = renamer.rename(&format!("{}.json", entry.name()));
        zip_write(&mut zip, &rename, &serde_json::to_vec_pretty(&motion)?)?;
        infos.push(ArchiveInfo::from_entry(entry, &rename));

        if let Some((mech_name, motion_name)) = entry.name().split_once('_') {
            mech_motions.entry(mech_name.to_owned())
                .or_default()
                .insert(motion_name.to_owned(), rename);
        }
    }

    zip_write(&mut zip, MECH_MOTIONS, &serde_json::to_vec_pretty(&mech_motions)?)?;
    zip_write(&mut zip, MANIFEST, &serde_json::to_vec_pretty(&infos)?)?;
    zip.finish()?;
    Ok(())
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking motions from {} to {}", input.display(), output.display());

    zip_to_archive(input, &output, |_info, data| {
        let mut motion: Motion = serde_json::from_slice(&data)?;
        let mut encoded = vec![];
        motion.encode(&mut encoded, &None)?;
        Ok(encoded)
    })
}
