/// Data-Oriented Axis-Aligned Bounding Box
///
/// Pure functions for collision detection - no methods, just data transformations.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

/// Create new AABB from min/max corners
pub fn create_aabb(min: Vec3, max: Vec3) -> AABB {
    AABB { min, max }
}

/// Create AABB from center point and half extents
pub fn aabb_from_center_half_extents(center: Vec3, half_extents: Vec3) -> AABB {
    AABB {
        min: center - half_extents,
        max: center + half_extents,
    }
}

/// Closed interval overlap on one axis; touching intervals overlap
pub fn intervals_overlap(min1: f32, max1: f32, min2: f32, max2: f32) -> bool {
    !(min1 > max2 || min2 > max1)
}

/// Test if two AABBs intersect - every axis must overlap
pub fn aabb_intersects(aabb1: &AABB, aabb2: &AABB) -> bool {
    intervals_overlap(aabb1.min.x, aabb1.max.x, aabb2.min.x, aabb2.max.x)
        && intervals_overlap(aabb1.min.y, aabb1.max.y, aabb2.min.y, aabb2.max.y)
        && intervals_overlap(aabb1.min.z, aabb1.max.z, aabb2.min.z, aabb2.max.z)
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vec3) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// World-space box for a node: local box shifted by the global translation.
///
/// Ancestor rotation and scale are deliberately not applied to the extents; the
/// box stays axis-aligned in world space and only follows the node's position.
pub fn world_aabb(world_position: Vec3, local: &AABB) -> AABB {
    aabb_translated(local, world_position)
}

/// A box collapsed to a single point has nothing to collide with
pub fn aabb_is_point(aabb: &AABB) -> bool {
    aabb.min == aabb.max
}

pub fn aabb_is_finite(aabb: &AABB) -> bool {
    aabb.min.is_finite() && aabb.max.is_finite()
}
