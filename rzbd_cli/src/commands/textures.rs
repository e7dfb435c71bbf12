//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Convert texture archives to ZIP files of PNG images.
//!
//! Palette-indexed textures are rendered to full color for the PNG; their
//! palette goes into the manifest so repacking can map the colors back to
//! indices with an exact reverse lookup.

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::{info, warn};
use serde_derive::{Deserialize, Serialize};

use std::io::Cursor;
use std::path::Path;

use rzbd_lib::files::textures::colors::rgb_to_palette;
use rzbd_lib::files::textures::{Texture, TextureFlags, TextureImage, Textures};
use rzbd_lib::files::{Decodeable, Encodeable};

use super::{output_resolve, zip_read, zip_reader, zip_write, zip_writer, Renamer, MANIFEST};

/// The manifest record of one texture: everything the PNG can't carry.
#[derive(Serialize, Deserialize)]
struct TextureInfo {
    name: String,
    rename: String,
    flags: TextureFlags,
    stretch: u16,
    width: u16,
    height: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    palette: Option<String>,
}

//---------------------------------------------------------------------------//
//                              PNG rendering
//---------------------------------------------------------------------------//

fn interleave_rgba(rgb: &[u8], alpha: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .zip(alpha.iter())
        .flat_map(|(rgb, alpha)| [rgb[0], rgb[1], rgb[2], *alpha])
        .collect()
}

fn indices_to_rgb(indices: &[u8], palette: &[u8]) -> Vec<u8> {
    indices.iter()
        .flat_map(|index| {
            let base = *index as usize * 3;
            [palette[base], palette[base + 1], palette[base + 2]]
        })
        .collect()
}

fn render_png(texture: &Texture, do_stretch: bool) -> Result<Vec<u8>> {
    let width = *texture.width() as u32;
    let height = *texture.height() as u32;

    let (rgb, alpha) = match texture.image() {
        TextureImage::Color { data, alpha } => (data.to_vec(), alpha.to_owned()),
        TextureImage::Indexed { data, palette, alpha } => (indices_to_rgb(data, palette), alpha.to_owned()),
    };

    let mut image = match alpha {
        Some(alpha) => {
            let raw = interleave_rgba(&rgb, &alpha);
            DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, raw)
                .ok_or_else(|| anyhow!("buffer size mismatch for {}", texture.name()))?)
        }
        None => DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| anyhow!("buffer size mismatch for {}", texture.name()))?),
    };

    if do_stretch && *texture.stretch() > 0 {
        let (scale_x, scale_y) = match texture.stretch() {
            1 => (2, 1),
            2 => (1, 2),
            _ => (2, 2),
        };
        image = image.resize_exact(width * scale_x, height * scale_y, FilterType::CatmullRom);
    }

    let mut data = vec![];
    image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
    Ok(data)
}

//---------------------------------------------------------------------------//
//                              Commands
//---------------------------------------------------------------------------//

pub fn from_zbd(input: &Path, output: Option<&Path>, stretch: bool) -> Result<()> {
    let output = output_resolve(input, output, ".zip");
    info!("Extracting textures from {} to {}", input.display(), output.display());

    if stretch {
        warn!("Stretched images cannot be repacked; use --stretch for viewing only");
    }

    let data = std::fs::read(input)?;
    let textures = Textures::decode(&mut Cursor::new(data), &None)?;

    let mut zip = zip_writer(&output)?;
    let mut renamer = Renamer::default();
    let mut infos = vec![];

    for texture in textures.textures() {
        let rename = renamer.rename(&format!("{}.png", texture.name()));
        zip_write(&mut zip, &rename, &render_png(texture, stretch)?)?;

        infos.push(TextureInfo {
            name: texture.name().to_owned(),
            rename,
            flags: *texture.flags(),
            stretch: *texture.stretch(),
            width: *texture.width(),
            height: *texture.height(),
            palette: texture.palette().map(|palette| STANDARD.encode(palette)),
        });
    }

    zip_write(&mut zip, MANIFEST, &serde_json::to_vec_pretty(&infos)?)?;
    zip.finish()?;
    Ok(())
}

pub fn to_zbd(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output_resolve(input, output, ".zbd");
    info!("Repacking textures from {} to {}", input.display(), output.display());

    let mut zip = zip_reader(input)?;
    let infos: Vec<TextureInfo> = serde_json::from_slice(&zip_read(&mut zip, MANIFEST)?)?;

    let mut textures = Textures::default();
    for info in &infos {
        let png = zip_read(&mut zip, &info.rename)?;
        let image = image::load_from_memory_with_format(&png, ImageFormat::Png)?;

        if image.width() != info.width as u32 || image.height() != info.height as u32 {
            return Err(anyhow!(
                "image size mismatch for {}: expected {}x{}, got {}x{} (was it stretched?)",
                info.name, info.width, info.height, image.width(), image.height()
            ));
        }

        let has_alpha = info.flags.intersects(TextureFlags::HAS_ALPHA | TextureFlags::FULL_ALPHA);
        let has_full_alpha = info.flags.contains(TextureFlags::FULL_ALPHA);

        let (rgb, alpha) = if has_alpha && info.palette.is_none() || has_full_alpha {
            let rgba = image.to_rgba8().into_raw();
            let rgb: Vec<u8> = rgba.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect();
            let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();
            (rgb, Some(alpha))
        } else {
            (image.to_rgb8().into_raw(), None)
        };

        let texture_image = match &info.palette {
            Some(encoded) => {
                let palette = STANDARD.decode(encoded)?;
                let indices = rgb_to_palette(&info.name, &rgb, &palette)?;
                TextureImage::Indexed {
                    data: indices,
                    palette,
                    alpha,
                }
            }
            None => TextureImage::Color { data: rgb, alpha },
        };

        let mut texture = Texture::default();
        texture.set_name(info.name.to_owned());
        texture.set_flags(info.flags);
        texture.set_width(info.width);
        texture.set_height(info.height);
        texture.set_stretch(info.stretch);
        texture.set_image(texture_image);
        textures.textures_mut().push(texture);
    }

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&output)?);
    textures.encode(&mut writer, &None)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}
