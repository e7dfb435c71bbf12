//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the generic traits all the container codecs implement, one
//! submodule per container family.
//!
//! Data flow is uniform across families: container bytes go through a
//! codec's [`Decodeable`] implementation into an owned, structured document;
//! the document goes through [`Encodeable`] back into bytes. For every
//! supported input, decode-then-encode must reproduce the input bit for bit.

use getset::*;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;

pub mod anim;
pub mod archive;
pub mod gamez;
pub mod interp;
pub mod mechlib;
pub mod mesh;
pub mod messages;
pub mod motion;
pub mod nodes;
pub mod reader;
pub mod textures;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This is a generic struct to easily pass additional data to a [`Decodeable::decode`] method.
///
/// To know what you need to provide to each file type, please check their documentation.
#[derive(Clone, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct DecodeableExtraData<'a> {

    /// Name of the file we're trying to decode.
    file_name: Option<&'a str>,

    /// Locale ID to extract messages for. Only for message DLLs.
    locale_id: Option<u32>,
}

/// This is a generic struct to easily pass additional data to a [`Encodeable::encode`] method.
///
/// To know what you need to provide to each file type, please check their documentation.
#[derive(Clone, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct EncodeableExtraData<'a> {

    /// Name of the file we're trying to encode.
    file_name: Option<&'a str>,
}

//---------------------------------------------------------------------------//
//                           Trait Definitions
//---------------------------------------------------------------------------//

/// A generic trait to implement decoding logic from anything implementing [`ReadBytes`]
/// into structured types.
pub trait Decodeable: Send + Sync {

    /// This method provides a generic and expandable way to decode anything implementing [`ReadBytes`]
    /// into the implementor's structure.
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the decoding process.
    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> where Self: Sized;
}

/// A generic trait to implement encoding logic from structured types into anything implementing [`WriteBytes`].
pub trait Encodeable: Send + Sync {

    /// This method provides a generic and expandable way to encode any implementor's structure into anything
    /// implementing [`WriteBytes`].
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the encoding process.
    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()>;
}
