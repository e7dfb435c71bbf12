//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains all kind of errors used inside this crate.
//!
//! Not much to say appart of that, really.

use thiserror::Error;

use crate::check::AssertionError;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = ZbdError> = core::result::Result<T, E>;

/// Custom error type for the lib.
///
/// The first four variants are the error kinds surfaced to callers: a
/// generic parse failure, an archive-structure failure, an image-codec
/// failure, and an internal failure. All of them carry an offset-tagged
/// [`AssertionError`] so the exact file location of the violation survives
/// up to the CLI.
#[derive(Error, Debug)]
pub enum ZbdError {

    /// Generic invariant violation while reading or writing a container.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// Structural violation in a ZArchive footer or table of contents.
    #[error("Archive error: {0}")]
    Archive(#[source] AssertionError),

    /// Violation in the texture codec: unsupported mode, out-of-range
    /// palette index, mismatched image mode on encode.
    #[error("Texture error: {0}")]
    Texture(#[source] AssertionError),

    /// A condition the lib considers impossible. This means the programmer
    /// messed up the code, not that the file is damaged.
    #[error("Internal error: {0}")]
    Internal(#[source] AssertionError),

    #[error("There are no more bytes to decode in the data you provided.")]
    DecodingNotMoreBytesToDecode,

    #[error("Error trying to decode an {0}: Not enough bytes to get his size.")]
    DecodingStringSizeError(String),

    #[error("Error trying to encode an {0}: \"{1}\" has a length of {2} chars, but his length should be less or equal than {3}.")]
    EncodingPaddedStringError(String, String, usize, usize),

    #[error("This file's reported size is '{0}' bytes, but we expected it to be '{1}' bytes. This means the decoding logic in RZBD is broken for this file, or this file is corrupted.")]
    DecodingMismatchSizeError(usize, usize),

    #[error("The PE file has no '{0}' section.")]
    PeSectionNotFound(String),

    #[error("The PE file has no message table resource for locale {0}.")]
    PeMessageTableNotFound(u32),

    /// Represents all other cases of `std::string::FromUtf8Error`.
    #[error(transparent)]
    DecodeUTF8Error(#[from] std::string::FromUtf8Error),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Represents all other cases of `serde_json::Error`.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// Represents all other cases of `pelite::Error`.
    #[error(transparent)]
    PeliteError(#[from] pelite::Error),

    /// Represents all other cases of `pelite::resources::FindError`.
    #[error(transparent)]
    PeliteFindError(#[from] pelite::resources::FindError),
}

/// Implementation of `ZbdError`.
impl ZbdError {

    /// This function re-tags an assertion as an archive-structure failure.
    pub fn archive(error: AssertionError) -> Self {
        Self::Archive(error)
    }

    /// This function re-tags an assertion as a texture-codec failure.
    pub fn texture(error: AssertionError) -> Self {
        Self::Texture(error)
    }

    /// This function re-tags an assertion as an internal failure.
    pub fn internal(error: AssertionError) -> Self {
        Self::Internal(error)
    }
}
