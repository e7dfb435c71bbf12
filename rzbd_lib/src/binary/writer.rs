//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the [`WriteBytes`] trait, to write bytes from known types to a [`Writer`].
//!
//! [`Writer`]: std::io::Write

use byteorder::{LittleEndian, WriteBytesExt};
use nalgebra::{Vector3, Vector4};

use std::io::Write;

use crate::error::{Result, ZbdError};

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily write all kind of data types to something that implements [`Write`].
pub trait WriteBytes: Write {

    /// This function tries to write a byte value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_u8(10).is_ok());
    /// assert_eq!(data, vec![10]);
    /// ```
    fn write_u8(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value).map_err(From::from)
    }

    /// This function tries to write an u16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_u16(258).is_ok());
    /// assert_eq!(data, vec![2, 1]);
    /// ```
    fn write_u16(&mut self, integer: u16) -> Result<()> {
        WriteBytesExt::write_u16::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an u32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_u32(258).is_ok());
    /// assert_eq!(data, vec![2, 1, 0, 0]);
    /// ```
    fn write_u32(&mut self, integer: u32) -> Result<()> {
        WriteBytesExt::write_u32::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an u64 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_u64(258).is_ok());
    /// assert_eq!(data, vec![2, 1, 0, 0, 0, 0, 0, 0]);
    /// ```
    fn write_u64(&mut self, integer: u64) -> Result<()> {
        WriteBytesExt::write_u64::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an i8 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_i8(-2).is_ok());
    /// assert_eq!(data, vec![254]);
    /// ```
    fn write_i8(&mut self, integer: i8) -> Result<()> {
        WriteBytesExt::write_i8(self, integer).map_err(From::from)
    }

    /// This function tries to write an i16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_i16(-258).is_ok());
    /// assert_eq!(data, vec![254, 254]);
    /// ```
    fn write_i16(&mut self, integer: i16) -> Result<()> {
        WriteBytesExt::write_i16::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an i32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_i32(-258).is_ok());
    /// assert_eq!(data, vec![254, 254, 255, 255]);
    /// ```
    fn write_i32(&mut self, integer: i32) -> Result<()> {
        WriteBytesExt::write_i32::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an f32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_f32(10.0).is_ok());
    /// assert_eq!(data, vec![0, 0, 32, 65]);
    /// ```
    fn write_f32(&mut self, value: f32) -> Result<()> {
        WriteBytesExt::write_f32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an UTF-8 String to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_string_u8("Waha").is_ok());
    /// assert_eq!(data, vec![87, 97, 104, 97]);
    /// ```
    fn write_string_u8(&mut self, string: &str) -> Result<()> {
        self.write_all(string.as_bytes()).map_err(From::from)
    }

    /// This function tries to write an UTF-8 String to `self`, padding it with zeros to the provided `size`.
    ///
    /// It may fail if the String is longer than `size` or `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_string_u8_0padded("Waha", 6).is_ok());
    /// assert_eq!(data, vec![87, 97, 104, 97, 0, 0]);
    /// assert!(data.write_string_u8_0padded("Wahahaha", 6).is_err());
    /// ```
    fn write_string_u8_0padded(&mut self, string: &str, size: usize) -> Result<()> {
        if string.len() > size {
            return Err(ZbdError::EncodingPaddedStringError("UTF-8 0-Padded String".to_owned(), string.to_owned(), string.len(), size));
        }

        self.write_all(string.as_bytes())?;
        self.write_all(&vec![0; size - string.len()]).map_err(From::from)
    }

    /// This function tries to write an UTF-8 String to `self`, prefixed with its length as an u32.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_sized_string_u8_u32("Waha").is_ok());
    /// assert_eq!(data, vec![4, 0, 0, 0, 87, 97, 104, 97]);
    /// ```
    fn write_sized_string_u8_u32(&mut self, string: &str) -> Result<()> {
        self.write_u32(string.len() as u32)?;
        self.write_all(string.as_bytes()).map_err(From::from)
    }

    /// This function tries to write a Vector of 3 f32 values to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    ///
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_vector_3_f32(&Vector3::new(10.0, 0.0, 0.0)).is_ok());
    /// assert_eq!(data, vec![0, 0, 32, 65, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// ```
    fn write_vector_3_f32(&mut self, vector: &Vector3<f32>) -> Result<()> {
        self.write_f32(vector.x)?;
        self.write_f32(vector.y)?;
        self.write_f32(vector.z)
    }

    /// This function tries to write a Vector of 4 f32 values to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use nalgebra::Vector4;
    ///
    /// use rzbd_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// assert!(data.write_vector_4_f32(&Vector4::new(10.0, 0.0, 0.0, 0.0)).is_ok());
    /// assert_eq!(data, vec![0, 0, 32, 65, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// ```
    fn write_vector_4_f32(&mut self, vector: &Vector4<f32>) -> Result<()> {
        self.write_f32(vector.x)?;
        self.write_f32(vector.y)?;
        self.write_f32(vector.z)?;
        self.write_f32(vector.w)
    }
}

// Automatic implementation for everything that implements `Write`.
impl<W: Write> WriteBytes for W {}
