//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert `gamez.zbd` files to ZIP files.
//!
//! GameZ files contain a lot of data, so the meshes go into one JSON file
//! each, and everything else into one document per table.

use anyhow::Result;
use log::info;

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::gamez::{GameZ, GameZMetadata};
use rzbd_lib::files::mesh::Mesh;
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{output_resolve, zip_read, zip_reader, zip_write, zip_writer};

const METADATA: &str = "metadata.json";
const TEXTURES: &str = "textures.json";
const MATERIALS: &str = "materials.json";
const NODES: &str = "nodes.json";

pub fn from_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting GameZ from {} to {}", input.display(), output.display());

    let data = std::fs::read(input)?;
    let gamez = GameZ::decode(&mut Cursor::new(data), &None)?;

    let mut zip = zip_writer(&output)?;
    zip_write(&mut zip, METADATA, &serde_json::to_vec_pretty(gamez.metadata())?)?;
    zip_write(&mut zip, TEXTURES, &serde_json::to_vec_pretty(gamez.textures())?)?;
    zip_write(&mut zip, MATERIALS, &serde_json::to_vec_pretty(gamez.materials())?)?;
    zip_write(&mut zip, NODES, &serde_json::to_vec_pretty(gamez.nodes())?)?;

    for (index, mesh) in gamez.meshes().iter().enumerate() {
        zip_write(&mut zip, &format!("mesh_{index:04}.json"), &serde_json::to_vec_pretty(mesh)?)?;
    }

    zip.finish()?;
    Ok(())
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking GameZ from {} to {}", input.display(), output.display());

    let mut zip = zip_reader(input)?;

    let metadata: GameZMetadata = serde_json::from_slice(&zip_read(&mut zip, METADATA)?)?;
    let textures = serde_json::from_slice(&zip_read(&mut zip, TEXTURES)?)?;
    let materials = serde_json::from_slice(&zip_read(&mut zip, MATERIALS)?)?;
    let nodes = serde_json::from_slice(&zip_read(&mut zip, NODES)?)?;

    let mut meshes: Vec<Mesh> = vec![];
    loop {
        let name = format!("mesh_{:04}.json", meshes.len());
        match zip_read(&mut zip, &name) {
            Ok(data) => meshes.push(serde_json::from_slice(&data)?),
            Err(_) => break,
        }
    }

    let mut gamez = GameZ::default();
    *gamez.textures_mut() = textures;
    *gamez.materials_mut() = materials;
    *gamez.meshes_mut() = meshes;
    *gamez.nodes_mut() = nodes;
    *gamez.metadata_mut() = metadata;

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&output)?);
    gamez.encode(&mut writer, &None)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}
