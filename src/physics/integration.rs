/// Motion integration
///
/// Explicit Euler steps for the three kinds of moving bodies. Each function takes
/// one node and mutates it in place; the caller decides which nodes to feed in.

use glam::Vec3;

use crate::scene::{rotation_from_angles, SceneNode};

/// Rebuild the player's local matrix from its translation and the camera's
/// absolute angles. Rotation is never accumulated on the node itself.
pub fn rebake_player(node: &mut SceneNode) {
    if let Some(camera) = node.camera.as_ref() {
        node.rotation = rotation_from_angles(camera.rotation);
    }
    node.update_matrix();
}

/// Advance the player body by the camera velocity and copy its orientation
pub fn integrate_player(node: &mut SceneNode, dt: f32) {
    let Some(camera) = node.camera.as_ref() else {
        return;
    };
    let velocity = camera.velocity;

    node.velocity = velocity;
    node.translation += velocity * dt;
    rebake_player(node);
}

/// Move a flying projectile and bend its path with gravity.
/// Pinned (non-collidable) projectiles stay where they are.
pub fn integrate_projectile(node: &mut SceneNode, gravity: Vec3, dt: f32) {
    if !node.collidable {
        return;
    }

    node.translation += node.velocity * dt;
    node.velocity += gravity * dt;
    node.update_matrix();
}

/// Bounce a patrolling body between `-limit` and `+limit` on each limited axis.
/// Patrol velocity is a displacement per step, independent of the step length.
/// A body that has been hit freezes.
pub fn integrate_patrol(node: &mut SceneNode) {
    if node.hit {
        node.velocity = Vec3::ZERO;
        return;
    }

    node.translation += node.velocity;
    node.update_matrix();

    for axis in 0..3 {
        let limit = node.limits[axis];
        if limit <= 0.0 {
            continue;
        }
        let position = node.translation[axis];
        if position > limit || position < -limit {
            node.velocity[axis] = -node.velocity[axis];
        }
    }
}

/// Keep the spawn anchor on top of the player
pub fn follow_translation(anchor: &mut SceneNode, translation: Vec3) {
    anchor.translation = translation;
    anchor.update_matrix();
}
