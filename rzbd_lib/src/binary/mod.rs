//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the traits to decode/encode the basic wire types of the ZBD
//! formats: little-endian fixed-width integers, IEEE-754 single-precision
//! floats, fixed-size byte arrays, and a few vector shapes.
//!
//! All container codecs in this crate read through [`ReadBytes`] and write
//! through [`WriteBytes`]. The cursor advances monotonically; none of the
//! codecs ever seek backward mid-record.

mod reader;
mod writer;

#[cfg(test)] mod reader_test;
#[cfg(test)] mod writer_test;

pub use self::reader::ReadBytes;
pub use self::writer::WriteBytes;
