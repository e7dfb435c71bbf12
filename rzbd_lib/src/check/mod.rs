//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the invariant-checking helpers every codec is built on.
//!
//! The container formats enforce hundreds of cross-field invariants. All of
//! them go through the helpers in this module, so every failure carries the
//! field name, the comparison performed, both values, and the exact byte
//! offset (or symbolic location) the value was read from. This is what makes
//! a parse failure on a 20 MiB GameZ file debuggable.

use bitflags::Flags;

use std::fmt;
use std::fmt::{Debug, Display, LowerHex};

#[cfg(test)] mod check_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The comparison a failed check performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Between,
    AllZero,
    Ascii,
    Flags,
}

/// Where a failed check happened: a byte offset into the file, or a symbolic
/// location for checks performed outside of wire reads (encoding, lookups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertLoc {
    Offset(u64),
    Name(String),
}

/// A failed invariant check, with full provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionError {
    name: String,
    op: AssertOp,
    expected: String,
    actual: String,
    location: AssertLoc,
}

//---------------------------------------------------------------------------//
//                           Structs Implementations
//---------------------------------------------------------------------------//

impl From<u64> for AssertLoc {
    fn from(offset: u64) -> Self {
        Self::Offset(offset)
    }
}

impl From<usize> for AssertLoc {
    fn from(offset: usize) -> Self {
        Self::Offset(offset as u64)
    }
}

impl From<&str> for AssertLoc {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for AssertLoc {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl Display for AssertLoc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Offset(offset) => write!(f, "{offset}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl Display for AssertOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let phrase = match self {
            Self::Eq => "to be",
            Self::Ne => "to not be",
            Self::Lt => "to be less than",
            Self::Le => "to be at most",
            Self::Gt => "to be greater than",
            Self::Ge => "to be at least",
            Self::In => "to be one of",
            Self::Between => "to be between",
            Self::AllZero => "to be all zeroes, not",
            Self::Ascii => "to be valid ASCII, not",
            Self::Flags => "to be a valid flag, not",
        };
        write!(f, "{phrase}")
    }
}

impl Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Expected {} {} {}, but was {} (at {})", self.name, self.op, self.expected, self.actual, self.location)
    }
}

impl std::error::Error for AssertionError {}

/// Implementation of `AssertionError`.
impl AssertionError {

    pub fn new<L: Into<AssertLoc>>(name: &str, op: AssertOp, expected: String, actual: String, location: L) -> Self {
        Self {
            name: name.to_owned(),
            op,
            expected,
            actual,
            location: location.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> AssertOp {
        self.op
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn location(&self) -> &AssertLoc {
        &self.location
    }
}

//---------------------------------------------------------------------------//
//                              Check helpers
//---------------------------------------------------------------------------//

/// This function checks that `actual` is equal to `expected`.
///
/// ```rust
/// use rzbd_lib::check::assert_eq;
///
/// assert!(assert_eq("version", 1u32, 1u32, 24u64).is_ok());
/// assert!(assert_eq("version", 1u32, 2u32, 24u64).is_err());
/// ```
pub fn assert_eq<T: PartialEq + Debug, L: Into<AssertLoc>>(name: &str, expected: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Eq, format!("{expected:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is different from `forbidden`.
pub fn assert_ne<T: PartialEq + Debug, L: Into<AssertLoc>>(name: &str, forbidden: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual != forbidden {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Ne, format!("{forbidden:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is strictly less than `than`.
pub fn assert_lt<T: PartialOrd + Debug, L: Into<AssertLoc>>(name: &str, than: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual < than {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Lt, format!("{than:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is less than or equal to `than`.
pub fn assert_le<T: PartialOrd + Debug, L: Into<AssertLoc>>(name: &str, than: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual <= than {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Le, format!("{than:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is strictly greater than `than`.
pub fn assert_gt<T: PartialOrd + Debug, L: Into<AssertLoc>>(name: &str, than: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual > than {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Gt, format!("{than:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is greater than or equal to `than`.
pub fn assert_ge<T: PartialOrd + Debug, L: Into<AssertLoc>>(name: &str, than: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual >= than {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Ge, format!("{than:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is one of the values in `expected`.
pub fn assert_in<T: PartialEq + Debug, L: Into<AssertLoc>>(name: &str, expected: &[T], actual: T, location: L) -> Result<(), AssertionError> {
    if expected.contains(&actual) {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::In, format!("{expected:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that `actual` is in the inclusive range `min..=max`.
pub fn assert_between<T: PartialOrd + Debug, L: Into<AssertLoc>>(name: &str, min: T, max: T, actual: T, location: L) -> Result<(), AssertionError> {
    if actual >= min && actual <= max {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Between, format!("{min:?} and {max:?}"), format!("{actual:?}"), location))
    }
}

/// This function checks that every byte in `buffer` is zero.
pub fn assert_all_zero<L: Into<AssertLoc>>(name: &str, buffer: &[u8], location: L) -> Result<(), AssertionError> {
    if buffer.iter().all(|byte| *byte == 0) {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::AllZero, "[0, ...]".to_owned(), format!("{buffer:?}"), location))
    }
}

/// This function checks that every byte in `buffer` is ASCII.
pub fn assert_ascii<L: Into<AssertLoc>>(name: &str, buffer: &[u8], location: L) -> Result<(), AssertionError> {
    if buffer.is_ascii() {
        Ok(())
    } else {
        Err(AssertionError::new(name, AssertOp::Ascii, "ASCII".to_owned(), format!("{buffer:?}"), location))
    }
}

/// This function checks that every bit set in `bits` is a known flag of `T`,
/// and returns the decoded flag set.
pub fn assert_flags<T, L>(name: &str, bits: T::Bits, location: L) -> Result<T, AssertionError>
    where T: Flags,
          T::Bits: LowerHex + Copy,
          L: Into<AssertLoc> {
    T::from_bits(bits).ok_or_else(|| AssertionError::new(name, AssertOp::Flags, "a known flag set".to_owned(), format!("{bits:#010x}"), location))
}
