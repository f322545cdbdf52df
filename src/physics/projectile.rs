use glam::Vec3;

use crate::camera::calculate_aim_direction;
use crate::config::GameplayConfig;
use crate::scene::{rotation_from_angles, NodeCategory, NodeId, SceneGraph};
use super::aabb::aabb_from_center_half_extents;
use super::error::{missing_component, out_of_ammo, PhysicsResult};

/// Fire a projectile from the player's spawn anchor.
///
/// The anchor is cloned into a new root node placed at the anchor's global
/// transform plus the muzzle offset. The projectile flies along the camera view
/// direction, oriented by the aim angles. Costs one ammo.
pub fn spawn_projectile(
    scene: &mut SceneGraph,
    player: NodeId,
    config: &GameplayConfig,
) -> PhysicsResult<NodeId> {
    let camera = scene
        .node(player)?
        .camera
        .ok_or_else(|| missing_component(player, "camera"))?;
    let anchor = camera
        .spawn_anchor
        .ok_or_else(|| missing_component(player, "spawn_anchor"))?;
    if camera.ammo < 1.0 {
        return Err(out_of_ammo(camera.ammo));
    }

    let launch_transform = scene.global_transform(anchor)?;
    let id = scene.clone_shallow(anchor)?;

    let velocity = calculate_aim_direction(camera.rotation.x, camera.rotation.y)
        * config.launch_strength
        + Vec3::new(0.0, config.launch_lift, 0.0);

    let projectile = scene.node_mut(id)?;
    projectile.matrix = launch_transform;
    projectile.decompose_matrix();
    projectile.translation += config.muzzle_offset;
    projectile.rotation =
        rotation_from_angles(Vec3::new(camera.aim_rotation.x, camera.aim_rotation.y, 0.0));
    projectile.update_matrix();
    projectile.category = NodeCategory::Projectile;
    projectile.aabb =
        aabb_from_center_half_extents(Vec3::ZERO, Vec3::splat(config.projectile_half_extent));
    projectile.velocity = velocity;
    projectile.collidable = true;

    let spawned_at = projectile.translation;

    if let Some(camera) = scene.node_mut(player)?.camera.as_mut() {
        camera.ammo -= 1.0;
    }

    log::debug!(
        "[Projectile] Spawned {} at {:?} with velocity {:?}",
        id,
        spawned_at,
        velocity
    );
    Ok(id)
}
