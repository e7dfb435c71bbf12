//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the engine's float subroutines.

use crate::float::*;

#[test]
fn test_approx_sqrt_matches_the_hardware_path() {
    // The partition diagonal: 128 * 128 + 128 * 128 comes out as 192.0, not
    // the mathematically correct ~181.02.
    assert_eq!(approx_sqrt(32768.0), 192.0);
    // Powers of four with even exponents are exact.
    assert_eq!(approx_sqrt(4.0), 2.0);
    assert_eq!(approx_sqrt(16.0), 4.0);
}

#[test]
fn test_euler_to_matrix_zero_rotation_is_identity() {
    let matrix = euler_to_matrix(0.0, 0.0, 0.0);
    assert_eq!(matrix, IDENTITY_MATRIX);
}

#[test]
fn test_euler_to_matrix_round_trips_through_bits() {
    // The same input must always produce the same bits, or the comparison
    // against stored matrices becomes flaky.
    let a = euler_to_matrix(0.5, -1.25, 3.0);
    let b = euler_to_matrix(0.5, -1.25, 3.0);
    for (lhs, rhs) in a.iter().zip(b.iter()) {
        assert_eq!(lhs.to_bits(), rhs.to_bits());
    }
}

#[test]
fn test_zero_signs_round_trip() {
    let matrix: Matrix = [
        0.0, -0.0, 1.0,
        -0.0, 1.0, 0.0,
        1.0, 0.0, -0.0,
    ];

    let signs = extract_zero_signs(&matrix);
    assert_eq!(signs, 0b100001010);

    // Positive zeros in, signs applied out.
    let stripped: Matrix = [
        0.0, 0.0, 1.0,
        0.0, 1.0, 0.0,
        1.0, 0.0, 0.0,
    ];
    let restored = apply_zero_signs(signs, &stripped);
    for (lhs, rhs) in restored.iter().zip(matrix.iter()) {
        assert_eq!(lhs.to_bits(), rhs.to_bits());
    }
}

#[test]
fn test_matrix_eq_ignores_zero_signs_only() {
    let a: Matrix = [0.0, -0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0];
    let b: Matrix = [-0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0];
    assert!(matrix_eq_ignoring_zero_signs(&a, &b));

    let c: Matrix = [0.0, 0.0, 1.0000001, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0];
    assert!(!matrix_eq_ignoring_zero_signs(&a, &c));
}
