//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with generic functions used by the crate.
//!
//! Most of these deal with the game's zero-terminated, fixed-width ASCII
//! string fields. The engine was sloppy about what it left after the
//! terminator (zeros, a padding template, or plain garbage), so each field
//! kind has its own decoder that both validates and preserves exactly what
//! repacking needs.

use memchr::memchr;

use crate::check::{assert_ascii, AssertionError, AssertLoc, AssertOp};
use crate::error::{Result, ZbdError};

/// The engine initializes node-name buffers with this template before
/// copying the real name over it, so the bytes after the terminator are
/// whatever the template had at those positions.
pub const DEFAULT_NODE_NAME: &[u8] = b"Default_node_name";

/// The suffixes the GameZ texture-name trick may leave after the terminator.
const TEXTURE_SUFFIXES: [&[u8]; 3] = [b"tif", b"TIF", b""];

//--------------------------------------------------------//
// Generic utils.
//--------------------------------------------------------//

/// This function checks that the whole input was consumed (on decode) or produced (on encode).
pub fn check_size_mismatch(curr_pos: usize, expected_pos: usize) -> Result<()> {
    if curr_pos != expected_pos {
        return Err(ZbdError::DecodingMismatchSizeError(expected_pos, curr_pos));
    }

    Ok(())
}

//--------------------------------------------------------//
// Zero-terminated ASCII fields.
//--------------------------------------------------------//

/// This function decodes a zero-terminated ASCII buffer whose trailing bytes must all be zero.
pub fn ascii_zterm_padded(name: &str, buffer: &[u8], offset: u64) -> Result<String, AssertionError> {
    let null_index = find_null(name, buffer, offset)?;
    assert_ascii(name, &buffer[..null_index], offset)?;

    if !buffer[null_index..].iter().all(|byte| *byte == 0) {
        return Err(AssertionError::new(name, AssertOp::AllZero, "[0, ...]".to_owned(), format!("{:?}", &buffer[null_index..]), offset));
    }

    Ok(String::from_utf8_lossy(&buffer[..null_index]).to_string())
}

/// This function decodes a zero-terminated ASCII buffer, returning the string and whatever
/// bytes followed the terminator, verbatim.
///
/// Some fields are written from uninitialized memory, so the trailing bytes
/// can be anything and must be kept for repacking.
pub fn ascii_zterm_partition(name: &str, buffer: &[u8], offset: u64) -> Result<(String, Vec<u8>), AssertionError> {
    let null_index = find_null(name, buffer, offset)?;
    assert_ascii(name, &buffer[..null_index], offset)?;

    let string = String::from_utf8_lossy(&buffer[..null_index]).to_string();
    let pad = buffer[null_index + 1..].to_vec();
    Ok((string, pad))
}

/// This function decodes a zero-terminated ASCII node name. The trailing bytes must either be
/// all zero, or match the [`DEFAULT_NODE_NAME`] template at the same positions.
pub fn ascii_zterm_node_name(name: &str, buffer: &[u8], offset: u64) -> Result<String, AssertionError> {
    let null_index = find_null(name, buffer, offset)?;
    assert_ascii(name, &buffer[..null_index], offset)?;

    let trailing = &buffer[null_index + 1..];
    let all_zero = trailing.iter().all(|byte| *byte == 0);
    let matches_template = trailing.iter().enumerate().all(|(i, byte)| {
        let template = DEFAULT_NODE_NAME.get(null_index + 1 + i).copied().unwrap_or(0);
        *byte == template
    });

    if !all_zero && !matches_template {
        return Err(AssertionError::new(name, AssertOp::Eq, "node name padding".to_owned(), format!("{trailing:?}"), offset));
    }

    Ok(String::from_utf8_lossy(&buffer[..null_index]).to_string())
}

/// This function encodes a zero-terminated string with its preserved trailing bytes, the
/// inverse of [`ascii_zterm_partition`].
pub fn pack_zterm_partition(name: &str, string: &str, pad: &[u8], size: usize) -> Result<Vec<u8>> {
    if string.len() + 1 + pad.len() != size {
        return Err(ZbdError::EncodingPaddedStringError(name.to_owned(), string.to_owned(), string.len() + 1 + pad.len(), size));
    }

    let mut buffer = Vec::with_capacity(size);
    buffer.extend_from_slice(string.as_bytes());
    buffer.push(0);
    buffer.extend_from_slice(pad);
    Ok(buffer)
}

/// This function encodes a node name the way the engine wrote it: the [`DEFAULT_NODE_NAME`]
/// template, with the name and its terminator copied over the start.
pub fn pack_node_name(name: &str, size: usize) -> Result<Vec<u8>> {
    let name_bytes = name.as_bytes();
    if name_bytes.len() >= size {
        return Err(ZbdError::EncodingPaddedStringError("node name".to_owned(), name.to_owned(), name_bytes.len(), size));
    }

    let mut buffer = vec![0; size];
    let template_len = DEFAULT_NODE_NAME.len().min(size);
    buffer[..template_len].copy_from_slice(&DEFAULT_NODE_NAME[..template_len]);

    buffer[..name_bytes.len()].copy_from_slice(name_bytes);
    buffer[name_bytes.len()] = 0;
    Ok(buffer)
}

/// This function decodes a GameZ texture name. The '.' of the filename was replaced with the
/// terminator, so the trailing bytes are one of the known suffixes (possibly cut off) followed
/// by zeros. Returns the name and the suffix, which must be preserved for repacking.
pub fn ascii_zterm_suffix(name: &str, buffer: &[u8], offset: u64) -> Result<(String, String), AssertionError> {
    let null_index = find_null(name, buffer, offset)?;
    assert_ascii(name, &buffer[..null_index], offset)?;

    for suffix in TEXTURE_SUFFIXES {
        let mut compare = vec![0; buffer.len().max(null_index + 1 + suffix.len())];
        compare[..null_index + 1].copy_from_slice(&buffer[..null_index + 1]);
        compare[null_index + 1..null_index + 1 + suffix.len()].copy_from_slice(suffix);

        if buffer == &compare[..buffer.len()] {
            let string = String::from_utf8_lossy(&buffer[..null_index]).to_string();
            let suffix = String::from_utf8_lossy(suffix).to_string();
            return Ok((string, suffix));
        }
    }

    Err(AssertionError::new(name, AssertOp::In, format!("{TEXTURE_SUFFIXES:?}"), format!("{:?}", &buffer[null_index + 1..]), offset))
}

/// This function encodes a GameZ texture name with its preserved suffix.
pub fn pack_texture_name(name: &str, suffix: &str, size: usize) -> Result<Vec<u8>> {
    let name_bytes = name.as_bytes();
    if name_bytes.len() >= size {
        return Err(ZbdError::EncodingPaddedStringError("texture name".to_owned(), name.to_owned(), name_bytes.len(), size));
    }

    let mut buffer = vec![0; size];
    buffer[..name_bytes.len()].copy_from_slice(name_bytes);

    let start = name_bytes.len() + 1;
    let end = (start + suffix.len()).min(size);
    buffer[start..end].copy_from_slice(&suffix.as_bytes()[..end - start]);
    Ok(buffer)
}

fn find_null(name: &str, buffer: &[u8], offset: u64) -> Result<usize, AssertionError> {
    memchr(0, buffer).ok_or_else(|| {
        AssertionError::new(name, AssertOp::Eq, "zero-terminated".to_owned(), format!("{buffer:?}"), AssertLoc::Offset(offset))
    })
}

//--------------------------------------------------------//
// Serde helpers.
//--------------------------------------------------------//

/// Serde adapter to serialize opaque byte blobs as base-64 strings.
pub mod serde_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(&text).map_err(serde::de::Error::custom)
    }
}
