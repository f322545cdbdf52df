//! Minimum translation vector between two overlapping boxes
//!
//! Resolution is one-sided: the vector separates `a` from `b` and is only ever
//! applied to `a`.

use glam::Vec3;

use super::aabb::{aabb_is_finite, AABB};

/// The six single-axis pushes that separate `a` from `b`, in tie-break order.
///
/// The first three push `a` towards positive axes (`b.max - a.min`), the last three
/// towards negative axes (`a.max - b.min`). Each entry is `(push, magnitude)`.
pub fn mtv_candidates(a: &AABB, b: &AABB) -> [(Vec3, f32); 6] {
    let diff_a = b.max - a.min;
    let diff_b = a.max - b.min;

    [
        (Vec3::new(diff_a.x, 0.0, 0.0), diff_a.x),
        (Vec3::new(0.0, diff_a.y, 0.0), diff_a.y),
        (Vec3::new(0.0, 0.0, diff_a.z), diff_a.z),
        (Vec3::new(-diff_b.x, 0.0, 0.0), diff_b.x),
        (Vec3::new(0.0, -diff_b.y, 0.0), diff_b.y),
        (Vec3::new(0.0, 0.0, -diff_b.z), diff_b.z),
    ]
}

/// Smallest non-negative single-axis push moving `a` out of `b`.
///
/// Ties go to the earliest candidate. Returns `None` when no candidate is a
/// finite non-negative value, so NaN or infinity never reach a translation.
pub fn minimum_translation_vector(a: &AABB, b: &AABB) -> Option<Vec3> {
    if !aabb_is_finite(a) || !aabb_is_finite(b) {
        return None;
    }

    let mut best: Option<(Vec3, f32)> = None;
    for (push, magnitude) in mtv_candidates(a, b) {
        if !magnitude.is_finite() || magnitude < 0.0 {
            continue;
        }
        match best {
            Some((_, smallest)) if magnitude >= smallest => {}
            _ => best = Some((push, magnitude)),
        }
    }

    best.map(|(push, _)| push)
}
