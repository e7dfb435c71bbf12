//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains one submodule per container family, plus the shared
//! archive-manifest plumbing.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_derive::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rzbd_lib::files::archive::{Archive, ArchiveEntry, Filetime};
use rzbd_lib::files::{Decodeable, Encodeable};

pub mod anim;
pub mod gamez;
pub mod interp;
pub mod mechlib;
pub mod messages;
pub mod motion;
pub mod reader;
pub mod sounds;
pub mod textures;

/// Name of the manifest inside every output ZIP.
pub const MANIFEST: &str = "manifest.json";

//---------------------------------------------------------------------------//
//                              Path helpers
//---------------------------------------------------------------------------//

/// This function derives the output path from the input when none was given.
pub fn output_resolve(input: &Path, output: Option<&Path>, suffix: &str) -> PathBuf {
    let file_name = input.with_extension(suffix.trim_start_matches('.'))
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("output{suffix}")));

    match output {
        None => file_name,
        Some(output) if output.is_dir() => output.join(file_name),
        Some(output) => output.to_owned(),
    }
}

pub fn zip_writer(path: &Path) -> Result<ZipWriter<BufWriter<File>>> {
    Ok(ZipWriter::new(BufWriter::new(File::create(path)?)))
}

pub fn zip_reader(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    Ok(ZipArchive::new(BufReader::new(File::open(path)?))?)
}

pub fn zip_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

pub fn zip_write(zip: &mut ZipWriter<BufWriter<File>>, name: &str, data: &[u8]) -> Result<()> {
    zip.start_file(name, zip_options())?;
    zip.write_all(data)?;
    Ok(())
}

pub fn zip_read(zip: &mut ZipArchive<BufReader<File>>, name: &str) -> Result<Vec<u8>> {
    let mut file = zip.by_name(name)?;
    let mut data = vec![];
    file.read_to_end(&mut data)?;
    Ok(data)
}

//---------------------------------------------------------------------------//
//                           Archive manifests
//---------------------------------------------------------------------------//

/// Renames duplicate entry names, keeping the originals for repacking.
#[derive(Default)]
pub struct Renamer {
    names: HashSet<String>,
}

impl Renamer {

    pub fn rename(&mut self, name: &str) -> String {
        let (stem, suffix) = match name.rfind('.') {
            Some(index) => name.split_at(index),
            None => (name, ""),
        };

        let mut rename = name.to_owned();
        let mut counter = 1;
        while self.names.contains(&rename) {
            rename = format!("{stem}_{counter}{suffix}");
            counter += 1;
        }

        self.names.insert(rename.to_owned());
        rename
    }
}

/// The manifest record of one archive entry. Everything the table of
/// contents stores, plus the name the payload was extracted under.
#[derive(Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub name: String,
    pub rename: String,
    pub start: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub flag: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_ascii: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_bytes: Option<String>,
    pub write_time: Filetime,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ArchiveInfo {

    pub fn from_entry(entry: &ArchiveEntry, rename: &str) -> Self {
        // Prefer a readable comment. Don't use the strict zero-terminated
        // decoding: comments can hold garbage after their zeros.
        let stripped: Vec<u8> = {
            let comment = entry.comment();
            let end = comment.iter().rposition(|byte| *byte != 0).map_or(0, |index| index + 1);
            comment[..end].to_vec()
        };

        let (comment_ascii, comment_bytes) = match String::from_utf8(stripped) {
            Ok(text) if text.is_ascii() => (Some(text), None),
            _ => (None, Some(STANDARD.encode(entry.comment()))),
        };

        Self {
            name: entry.name().to_owned(),
            rename: rename.to_owned(),
            start: *entry.start(),
            flag: *entry.flag(),
            comment_ascii,
            comment_bytes,
            write_time: entry.write_time().clone(),
        }
    }

    pub fn to_entry(&self, data: Vec<u8>) -> Result<ArchiveEntry> {
        let comment = match (&self.comment_ascii, &self.comment_bytes) {
            (_, Some(encoded)) => STANDARD.decode(encoded)?,
            (Some(text), None) => {
                // Re-pad the readable form back out to the field width.
                let mut comment = text.as_bytes().to_vec();
                comment.resize(64, 0);
                comment
            }
            (None, None) => vec![0; 64],
        };

        let mut entry = ArchiveEntry::default();
        entry.set_name(self.name.to_owned());
        entry.set_data(data);
        entry.set_start(self.start);
        entry.set_flag(self.flag);
        entry.set_comment(comment);
        entry.set_write_time(self.write_time.clone());
        Ok(entry)
    }
}

/// This function extracts an archive-based file: every payload goes through `convert` and
/// into the ZIP under its (de-duplicated, possibly re-suffixed) name.
pub fn archive_to_zip<F>(input: &Path, output: &Path, mut convert: F) -> Result<()>
    where F: FnMut(&ArchiveEntry) -> Result<(String, Vec<u8>)> {
    let data = std::fs::read(input)?;
    let archive = Archive::decode(&mut std::io::Cursor::new(data), &None)?;

    let mut zip = zip_writer(output)?;
    let mut renamer = Renamer::default();
    let mut infos = vec![];

    for entry in archive.entries() {
        let (name, converted) = convert(entry)?;
        let rename = renamer.rename(&name);
        zip_write(&mut zip, &rename, &converted)?;
        infos.push(ArchiveInfo::from_entry(entry, &rename));
    }

    zip_write(&mut zip, MANIFEST, serde_json::to_string_pretty(&infos)?.as_bytes())?;
    zip.finish()?;
    Ok(())
}

/// This function repacks an archive-based file: every manifest entry's payload is read from
/// the ZIP and put through `convert`.
pub fn zip_to_archive<F>(input: &Path, output: &Path, mut convert: F) -> Result<()>
    where F: FnMut(&ArchiveInfo, Vec<u8>) -> Result<Vec<u8>> {
    let mut zip = zip_reader(input)?;
    let infos: Vec<ArchiveInfo> = serde_json::from_slice(&zip_read(&mut zip, MANIFEST)?)?;

    let mut archive = Archive::default();
    for info in &infos {
        let data = zip_read(&mut zip, &info.rename)?;
        let converted = convert(info, data)?;
        archive.entries_mut().push(info.to_entry(converted)?);
    }

    let mut writer = BufWriter::new(File::create(output)?);
    archive.encode(&mut writer, &None)?;
    writer.flush()?;
    Ok(())
}
