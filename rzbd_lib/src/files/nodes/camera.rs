//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Camera node bodies. Almost everything in the 488 bytes is fixed; only
//! the clip planes and the field-of-view survive into the document.

use serde_derive::{Deserialize, Serialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_all_zero, assert_eq, assert_gt};
use crate::error::Result;

/// Size of a Camera node body.
pub const CAMERA_SIZE: u64 = 488;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds a single Camera node body decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Camera {

    /// Near and far clip plane distances, `0 < near < far`.
    pub clip: (f32, f32),

    /// Horizontal and vertical field of view.
    pub fov: (f32, f32),
}

//---------------------------------------------------------------------------//
//                           Implementation of Camera
//---------------------------------------------------------------------------//

/// The stored inverse tangents must match this derivation bit for bit.
fn fov_tan_inv(fov_half: f32) -> f32 {
    (1.0 / (fov_half as f64).tan()) as f32
}

/// This function reads a 488-byte Camera node body.
pub fn read_camera<R: ReadBytes>(data: &mut R) -> Result<Camera> {
    let prev = data.stream_position()?;

    let world_index = data.read_i32()?;
    let window_index = data.read_i32()?;
    let focus_node_xy = data.read_i32()?;
    let focus_node_xz = data.read_i32()?;
    let flag_raw = data.read_i32()?;
    let trans_x = data.read_f32()?;
    let trans_y = data.read_f32()?;
    let trans_z = data.read_f32()?;
    let rot_x = data.read_f32()?;
    let rot_y = data.read_f32()?;
    let rot_z = data.read_f32()?;

    // WorldTranslate, WorldRotate, MtwMatrix, Unk, ViewVector, Matrix,
    // AltTranslate: all zero at save time.
    let zero044 = data.read_slice(132, false)?;

    let clip_near_z = data.read_f32()?;
    let clip_far_z = data.read_f32()?;
    let zero184 = data.read_slice(24, false)?;
    let lod_multiplier = data.read_f32()?;
    let lod_inv_sq = data.read_f32()?;
    let fov_h_zoom_factor = data.read_f32()?;
    let fov_v_zoom_factor = data.read_f32()?;
    let fov_h_base = data.read_f32()?;
    let fov_v_base = data.read_f32()?;
    let fov_h = data.read_f32()?;
    let fov_v = data.read_f32()?;
    let fov_h_half = data.read_f32()?;
    let fov_v_half = data.read_f32()?;
    let one248 = data.read_u32()?;
    let zero252 = data.read_slice(60, false)?;
    let one312 = data.read_u32()?;
    let zero316 = data.read_slice(72, false)?;
    let one388 = data.read_u32()?;
    let zero392 = data.read_slice(72, false)?;
    let zero464 = data.read_u32()?;
    let fov_h_tan_inv = data.read_f32()?;
    let fov_v_tan_inv = data.read_f32()?;
    let stride = data.read_i32()?;
    let zone_set = data.read_i32()?;
    let unk484 = data.read_i32()?;

    assert_eq("world index", 0, world_index, prev)?;
    assert_eq("window index", 1, window_index, prev + 4)?;
    assert_eq("focus node xy", -1, focus_node_xy, prev + 8)?;
    assert_eq("focus node xz", -1, focus_node_xz, prev + 12)?;
    assert_eq("flag", 0, flag_raw, prev + 16)?;

    assert_eq("trans x", 0.0, trans_x, prev + 20)?;
    assert_eq("trans y", 0.0, trans_y, prev + 24)?;
    assert_eq("trans z", 0.0, trans_z, prev + 28)?;

    assert_eq("rot x", 0.0, rot_x, prev + 32)?;
    assert_eq("rot y", 0.0, rot_y, prev + 36)?;
    assert_eq("rot z", 0.0, rot_z, prev + 40)?;

    assert_all_zero("field 044", &zero044, prev + 44)?;

    assert_gt("clip near z", 0.0, clip_near_z, prev + 176)?;
    assert_gt("clip far z", clip_near_z, clip_far_z, prev + 180)?;

    assert_all_zero("field 184", &zero184, prev + 184)?;

    assert_eq("LOD mul", 1.0, lod_multiplier, prev + 208)?;
    assert_eq("LOD inv sq", 1.0, lod_inv_sq, prev + 212)?;

    assert_eq("FOV H zoom factor", 1.0, fov_h_zoom_factor, prev + 216)?;
    assert_eq("FOV V zoom factor", 1.0, fov_v_zoom_factor, prev + 220)?;
    assert_gt("FOV H base", 0.0, fov_h_base, prev + 224)?;
    assert_gt("FOV V base", 0.0, fov_v_base, prev + 228)?;
    assert_eq("FOV H zoomed", fov_h_base, fov_h, prev + 232)?;
    assert_eq("FOV V zoomed", fov_v_base, fov_v, prev + 236)?;
    assert_eq("FOV H half", fov_h / 2.0, fov_h_half, prev + 240)?;
    assert_eq("FOV V half", fov_v / 2.0, fov_v_half, prev + 244)?;

    assert_eq("field 248", 1, one248, prev + 248)?;
    assert_all_zero("field 252", &zero252, prev + 252)?;

    assert_eq("field 312", 1, one312, prev + 312)?;
    assert_all_zero("field 316", &zero316, prev + 316)?;

    assert_eq("field 388", 1, one388, prev + 388)?;
    assert_all_zero("field 392", &zero392, prev + 392)?;

    assert_eq("field 464", 0, zero464, prev + 464)?;

    assert_eq("FOV H tan inv", fov_tan_inv(fov_h_half), fov_h_tan_inv, prev + 468)?;
    assert_eq("FOV V tan inv", fov_tan_inv(fov_v_half), fov_v_tan_inv, prev + 472)?;

    assert_eq("stride", 0, stride, prev + 476)?;
    assert_eq("zone set", 0, zone_set, prev + 480)?;
    assert_eq("field 484", -256, unk484, prev + 484)?;

    Ok(Camera {
        clip: (clip_near_z, clip_far_z),
        fov: (fov_h_base, fov_v_base),
    })
}

/// This function writes a 488-byte Camera node body.
pub fn write_camera<W: WriteBytes>(buffer: &mut W, camera: &Camera) -> Result<()> {
    let (clip_near_z, clip_far_z) = camera.clip;
    let (fov_h, fov_v) = camera.fov;
    let fov_h_half = fov_h / 2.0;
    let fov_v_half = fov_v / 2.0;

    buffer.write_i32(0)?;
    buffer.write_i32(1)?;
    buffer.write_i32(-1)?;
    buffer.write_i32(-1)?;
    buffer.write_i32(0)?;
    for _ in 0..6 {
        buffer.write_f32(0.0)?;
    }
    buffer.write_all(&[0; 132])?;
    buffer.write_f32(clip_near_z)?;
    buffer.write_f32(clip_far_z)?;
    buffer.write_all(&[0; 24])?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(1.0)?;
    buffer.write_f32(fov_h)?;
    buffer.write_f32(fov_v)?;
    buffer.write_f32(fov_h)?;
    buffer.write_f32(fov_v)?;
    buffer.write_f32(fov_h_half)?;
    buffer.write_f32(fov_v_half)?;
    buffer.write_u32(1)?;
    buffer.write_all(&[0; 60])?;
    buffer.write_u32(1)?;
    buffer.write_all(&[0; 72])?;
    buffer.write_u32(1)?;
    buffer.write_all(&[0; 72])?;
    buffer.write_u32(0)?;
    buffer.write_f32(fov_tan_inv(fov_h_half))?;
    buffer.write_f32(fov_tan_inv(fov_v_half))?;
    buffer.write_i32(0)?;
    buffer.write_i32(0)?;
    buffer.write_i32(-256)?;
    Ok(())
}
