//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the invariant-checking helpers.

use super::*;

#[test]
fn test_assert_eq_carries_provenance() {
    let error = assert_eq("version", 1u32, 27u32, 148u64).unwrap_err();
    assert_eq!(error.name(), "version");
    assert_eq!(error.op(), AssertOp::Eq);
    assert_eq!(error.expected(), "1");
    assert_eq!(error.actual(), "27");
    assert_eq!(*error.location(), AssertLoc::Offset(148));
    assert_eq!(error.to_string(), "Expected version to be 1, but was 27 (at 148)");
}

#[test]
fn test_assert_eq_symbolic_location() {
    let error = assert_eq("image mode", "RGB", "RGBA", "bigmap01").unwrap_err();
    assert_eq!(error.to_string(), "Expected image mode to be \"RGB\", but was \"RGBA\" (at 'bigmap01')");
}

#[test]
fn test_assert_orderings() {
    assert!(assert_lt("texture count", 4096u32, 12, 8u64).is_ok());
    assert!(assert_lt("texture count", 4096u32, 4096, 8u64).is_err());

    assert!(assert_le("mesh count", 10u32, 10, 4u64).is_ok());
    assert!(assert_le("mesh count", 10u32, 11, 4u64).is_err());

    assert!(assert_gt("loop time", 0.0f32, 1.5, 4u64).is_ok());
    assert!(assert_gt("loop time", 0.0f32, 0.0, 4u64).is_err());

    assert!(assert_ge("range max", 2.0f32, 2.0, 184u64).is_ok());
    assert!(assert_ge("range max", 2.0f32, 1.0, 184u64).is_err());

    assert!(assert_ne("pointer", 0u32, 1, 16u64).is_ok());
    assert!(assert_ne("pointer", 0u32, 0, 16u64).is_err());
}

#[test]
fn test_assert_in() {
    assert!(assert_in("flag", &[32u32, 40], 40, 0u64).is_ok());
    let error = assert_in("flag", &[32u32, 40], 33, 0u64).unwrap_err();
    assert_eq!(error.to_string(), "Expected flag to be one of [32, 40], but was 33 (at 0)");
}

#[test]
fn test_assert_between() {
    assert!(assert_between("zone id", 1u32, 80, 1, 48u64).is_ok());
    assert!(assert_between("zone id", 1u32, 80, 80, 48u64).is_ok());
    assert!(assert_between("zone id", 1u32, 80, 81, 48u64).is_err());
    assert!(assert_between("rot x", -3.15f32, 3.15, 0.5, 24u64).is_ok());
}

#[test]
fn test_assert_all_zero() {
    assert!(assert_all_zero("padding", &[0, 0, 0, 0], 96u64).is_ok());
    assert!(assert_all_zero("padding", &[], 96u64).is_ok());
    assert!(assert_all_zero("padding", &[0, 1, 0], 96u64).is_err());
}

#[test]
fn test_assert_ascii() {
    assert!(assert_ascii("name", b"sunlight\0\0", 0u64).is_ok());
    assert!(assert_ascii("name", &[0x73, 0xFF], 0u64).is_err());
}

#[test]
fn test_assert_flags() {
    bitflags::bitflags! {
        #[derive(Debug, PartialEq)]
        struct TestFlags: u32 {
            const A = 1 << 0;
            const B = 1 << 1;
        }
    }

    let flags: TestFlags = assert_flags("flag", 3, 36u64).unwrap();
    assert_eq!(flags, TestFlags::A | TestFlags::B);

    let error = assert_flags::<TestFlags, _>("flag", 5, 36u64).unwrap_err();
    assert_eq!(error.op(), AssertOp::Flags);
}
