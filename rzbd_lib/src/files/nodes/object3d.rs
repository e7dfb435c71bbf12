//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Object3D node bodies: a local translation, an Euler rotation, and the
//! rotation matrix the engine derives from it.
//!
//! When the stored matrix matches the Euler-derived one bit for bit, only
//! the rotation is kept and the matrix is recomputed on repack. For a small
//! number of nodes the comparison fails, and the raw matrix is preserved
//! instead. Either way a 9-bit mask records which matrix entries carry a
//! negative zero, because the comparison cannot see them.

use serde_derive::{Deserialize, Serialize};

use std::f64::consts::PI;

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_between, assert_eq, assert_in};
use crate::error::Result;
use crate::float::{apply_zero_signs, euler_to_matrix, extract_zero_signs, matrix_eq_ignoring_zero_signs, Matrix, IDENTITY_MATRIX};

/// Size of an Object3D node body.
pub const OBJECT3D_SIZE: u64 = 144;

/// Flag value when translation/rotation are present.
const FLAG_TRANSFORMED: u32 = 32;

/// Flag value when the node sits at the identity transform.
const FLAG_IDENTITY: u32 = 40;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single Object3D node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Object3d {

    /// Euler rotation, each component in (-pi, pi). None at identity.
    pub rotation: Option<[f32; 3]>,

    /// Local translation. None at identity.
    pub translation: Option<[f32; 3]>,

    /// The raw matrix, only kept when it doesn't match the Euler-derived one.
    pub matrix: Option<Matrix>,

    /// 9-bit negative-zero mask over the matrix entries.
    pub matrix_sign: u32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Object3d
//---------------------------------------------------------------------------//

/// This function reads a 144-byte Object3D node body.
pub fn read_object3d<R: ReadBytes>(data: &mut R) -> Result<Object3d> {
    let prev = data.stream_position()?;

    let flag_raw = data.read_u32()?;
    let opacity = data.read_f32()?;
    let zero008 = data.read_f32()?;
    let zero012 = data.read_f32()?;
    let zero016 = data.read_f32()?;
    let zero020 = data.read_f32()?;
    let rot_x = data.read_f32()?;
    let rot_y = data.read_f32()?;
    let rot_z = data.read_f32()?;
    let scale_x = data.read_f32()?;
    let scale_y = data.read_f32()?;
    let scale_z = data.read_f32()?;

    let mut matrix = [0.0; 9];
    for value in &mut matrix {
        *value = data.read_f32()?;
    }

    let trans_x = data.read_f32()?;
    let trans_y = data.read_f32()?;
    let trans_z = data.read_f32()?;
    let zero096 = data.read_slice(48, false)?;

    assert_in("flag", &[FLAG_TRANSFORMED, FLAG_IDENTITY], flag_raw, prev)?;
    assert_eq("opacity", 0.0, opacity, prev + 4)?;

    assert_eq("field 008", 0.0, zero008, prev + 8)?;
    assert_eq("field 012", 0.0, zero012, prev + 12)?;
    assert_eq("field 016", 0.0, zero016, prev + 16)?;
    assert_eq("field 020", 0.0, zero020, prev + 20)?;

    assert_eq("scale x", 1.0, scale_x, prev + 36)?;
    assert_eq("scale y", 1.0, scale_y, prev + 40)?;
    assert_eq("scale z", 1.0, scale_z, prev + 44)?;

    assert_all_zero("field 096", &zero096, prev + 96)?;

    let matrix_sign = extract_zero_signs(&matrix);

    if flag_raw == FLAG_IDENTITY {
        assert_eq("rot x", 0.0, rot_x, prev + 24)?;
        assert_eq("rot y", 0.0, rot_y, prev + 28)?;
        assert_eq("rot z", 0.0, rot_z, prev + 32)?;

        assert_eq("trans x", 0.0, trans_x, prev + 84)?;
        assert_eq("trans y", 0.0, trans_y, prev + 88)?;
        assert_eq("trans z", 0.0, trans_z, prev + 92)?;

        assert_eq("matrix", true, matrix_eq_ignoring_zero_signs(&matrix, &IDENTITY_MATRIX), prev + 48)?;

        Ok(Object3d {
            rotation: None,
            translation: None,
            matrix: None,
            matrix_sign,
        })
    } else {
        let pi = PI as f32;
        assert_between("rot x", -pi, pi, rot_x, prev + 24)?;
        assert_between("rot y", -pi, pi, rot_y, prev + 28)?;
        assert_between("rot z", -pi, pi, rot_z, prev + 32)?;

        let expected = euler_to_matrix(rot_x, rot_y, rot_z);

        // In most cases the calculated matrix matches. For a few nodes it
        // doesn't, and the raw matrix is the only way to repack exactly.
        let (matrix, matrix_sign) = if matrix_eq_ignoring_zero_signs(&matrix, &expected) {
            (None, matrix_sign)
        } else {
            (Some(matrix), 0)
        };

        Ok(Object3d {
            rotation: Some([rot_x, rot_y, rot_z]),
            translation: Some([trans_x, trans_y, trans_z]),
            matrix,
            matrix_sign,
        })
    }
}

/// This function writes a 144-byte Object3D node body.
pub fn write_object3d<W: WriteBytes>(buffer: &mut W, object3d: &Object3d) -> Result<()> {
    let (flag, rotation, translation, matrix) = match (&object3d.rotation, &object3d.translation) {
        (Some(rotation), Some(translation)) => {
            let matrix = match &object3d.matrix {
                // In this case, we have the raw matrix with the correct zero signs.
                Some(matrix) => *matrix,
                None => {
                    let matrix = euler_to_matrix(rotation[0], rotation[1], rotation[2]);
                    apply_zero_signs(object3d.matrix_sign, &matrix)
                }
            };
            (FLAG_TRANSFORMED, *rotation, *translation, matrix)
        }
        _ => {
            let matrix = apply_zero_signs(object3d.matrix_sign, &IDENTITY_MATRIX);
            (FLAG_IDENTITY, [0.0; 3], [0.0; 3], matrix)
        }
    };

    buffer.write_u32(flag)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;
    buffer.write_f32(0.0)?;

    for value in rotation {
        buffer.write_f32(value)?;
    }

    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;

    for value in matrix {
        buffer.write_f32(value)?;
    }

    for value in translation {
        buffer.write_f32(value)?;
    }

    buffer.write_all(&[0; 48])?;
    Ok(())
}
