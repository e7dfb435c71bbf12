//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `reader*.zbd` files to ZIP files of JSON value trees.

use anyhow::Result;
use log::info;

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::reader::ReaderTree;
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{archive_to_zip, output_resolve, zip_to_archive};

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting reader trees from {} to {}", input.display(), output.display());

    archive_to_zip(input, &output, |entry| {
        let tree = ReaderTree::decode(&mut Cursor::new(entry.data().to_vec()), &None)?;
        let name = entry.name().replace(".zrd", ".json");
        Ok((name, serde_json::to_vec_pretty(&tree)?))
    })
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking reader trees from {} to {}", input.display(), output.display());

    zip_to_archive(input, &output, |_info, data| {
        let mut tree: ReaderTree = serde_json::from_slice(&data)?;
        let mut encoded = vec![];
        tree.encode(&mut encoded, &None)?;
        Ok(encoded)
    })
}
