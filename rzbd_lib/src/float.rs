//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the floating-point subroutines the engine baked into its
//! files, reproduced bit-for-bit.
//!
//! The scene-graph codecs compare stored values against these calculations,
//! so the math must match the engine exactly: intermediate products in
//! double precision narrowed to single precision at the end, and the
//! bit-twiddling square-root approximation the original hardware path used.

/// A 3x3 rotation matrix in row-major order, as stored on disk.
pub type Matrix = [f32; 9];

pub const IDENTITY_MATRIX: Matrix = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];

/// This function reproduces the engine's approximate square root: halve the exponent, add a
/// magic constant. For 128*128 + 128*128 it yields 192.0 instead of ~181.02, and the world
/// data stores the approximated value.
pub fn approx_sqrt(value: f32) -> f32 {
    let cast = value.to_bits() as i32;
    let approx = (cast >> 1) + 0x1FC0_0000;
    f32::from_bits(approx as u32)
}

/// This function converts an Euler rotation (negated, ZYX composition) to the rotation matrix
/// the engine caches in Object3D nodes.
///
/// The engine computed the products in double precision and stored singles,
/// so we do the same. Anything else fails the bit-exact comparison on a
/// large chunk of the corpus.
pub fn euler_to_matrix(x: f32, y: f32, z: f32) -> Matrix {
    let sin_x = f64::sin(-x as f64);
    let cos_x = f64::cos(-x as f64);
    let sin_y = f64::sin(-y as f64);
    let cos_y = f64::cos(-y as f64);
    let sin_z = f64::sin(-z as f64);
    let cos_z = f64::cos(-z as f64);

    [
        (cos_z * cos_y) as f32,
        (cos_z * sin_y * sin_x - sin_z * cos_x) as f32,
        (cos_z * sin_y * cos_x + sin_z * sin_x) as f32,
        (sin_z * cos_y) as f32,
        (sin_z * sin_y * sin_x + cos_z * cos_x) as f32,
        (sin_z * sin_y * cos_x - cos_z * sin_x) as f32,
        (-sin_y) as f32,
        (cos_y * sin_x) as f32,
        (cos_y * cos_x) as f32,
    ]
}

/// This function extracts a 9-bit mask recording which matrix entries hold a negative zero.
///
/// `0.0 == -0.0` under IEEE-754 comparison, so matching a stored matrix
/// against a recomputed one loses the zero signs. The mask restores them on
/// write, which is required for byte-identical repacking.
pub fn extract_zero_signs(matrix: &Matrix) -> u32 {
    let mut signs = 0;
    for (i, value) in matrix.iter().enumerate() {
        if *value == 0.0 && value.is_sign_negative() {
            signs |= 1 << i;
        }
    }
    signs
}

/// This function applies a zero-sign mask extracted by [`extract_zero_signs`].
pub fn apply_zero_signs(signs: u32, matrix: &Matrix) -> Matrix {
    let mut values = *matrix;
    for (i, value) in values.iter_mut().enumerate() {
        if *value == 0.0 {
            let has_sign = value.is_sign_negative();
            let has_bit = signs & (1 << i) != 0;
            if has_sign != has_bit {
                *value = -*value;
            }
        }
    }
    values
}

/// This function compares two matrices bit-for-bit, except for zero signs (which are handled
/// by the mask separately).
pub fn matrix_eq_ignoring_zero_signs(a: &Matrix, b: &Matrix) -> bool {
    a.iter().zip(b.iter()).all(|(lhs, rhs)| {
        if *lhs == 0.0 && *rhs == 0.0 {
            true
        } else {
            lhs.to_bits() == rhs.to_bits()
        }
    })
}
