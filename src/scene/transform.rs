/// Local transform math
///
/// Pure functions over glam types - the graph and the physics step share them.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Compose translation, rotation and scale into `T * R * S`
pub fn compose_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Split a local matrix back into translation, rotation and scale
pub fn decompose(matrix: &Mat4) -> (Vec3, Quat, Vec3) {
    let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
    (translation, rotation, scale)
}

/// Translation column of a transform
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    matrix.w_axis.truncate()
}

/// Quaternion from absolute (pitch, yaw, roll) angles in radians.
///
/// Rotates about X first, then Y, then Z, so yaw is applied on top of pitch.
pub fn rotation_from_angles(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x)
}
