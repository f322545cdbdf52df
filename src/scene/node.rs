use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::camera::CameraComponent;
use crate::constants::scene_constants::MESH_BOUNDS_FACTOR;
use crate::physics::aabb::{create_aabb, AABB};
use super::transform::{compose_trs, decompose};

/// Handle to a node stored in a `SceneGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Gameplay category of a node. Collision rules dispatch on this, never on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// The player-controlled body carrying the camera component
    Player,
    /// A fired arrow
    Projectile,
    /// Launch origin for new projectiles, follows the player
    SpawnAnchor,
    /// Ammo pickup
    Pickup,
    /// Shootable target, may patrol
    Target,
    #[default]
    Scenery,
}

/// Bounds of the mesh POSITION accessor. The mesh itself stays with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshBounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// Configuration bundle a node is built from. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOptions {
    pub name: Option<String>,
    pub category: NodeCategory,
    pub translation: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
    /// Column-major local matrix; when present TRS is decomposed from it
    pub matrix: Option<Mat4>,
    pub mesh: Option<MeshBounds>,
    pub aabb: Option<AABB>,
    pub velocity: Option<Vec3>,
    pub collidable: Option<bool>,
    pub visible: Option<bool>,
    /// Per-axis patrol limits, zero disables the axis
    pub limits: Option<Vec3>,
    pub camera: Option<CameraComponent>,
    pub children: Vec<NodeOptions>,
}

/// A node in the transform graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: Option<String>,
    pub category: NodeCategory,

    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Local matrix, kept in sync with translation/rotation/scale
    pub matrix: Mat4,

    /// Local collision box, never used for culling
    pub aabb: AABB,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    pub velocity: Vec3,
    pub collidable: bool,
    pub visible: bool,
    pub picked_up: bool,
    pub hit: bool,
    pub limits: Vec3,

    pub camera: Option<CameraComponent>,
    pub mesh: Option<MeshBounds>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: None,
            category: NodeCategory::Scenery,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            matrix: Mat4::IDENTITY,
            aabb: create_aabb(Vec3::ZERO, Vec3::ZERO),
            parent: None,
            children: Vec::new(),
            velocity: Vec3::ZERO,
            collidable: true,
            visible: true,
            picked_up: false,
            hit: false,
            limits: Vec3::ZERO,
            camera: None,
            mesh: None,
        }
    }
}

impl SceneNode {
    /// Build a detached node from an options bundle. Children are attached by the graph.
    pub fn from_options(options: &NodeOptions) -> Self {
        let mut node = SceneNode {
            name: options.name.clone(),
            category: options.category,
            translation: options.translation.unwrap_or(Vec3::ZERO),
            rotation: options.rotation.unwrap_or(Quat::IDENTITY),
            scale: options.scale.unwrap_or(Vec3::ONE),
            velocity: options.velocity.unwrap_or(Vec3::ZERO),
            collidable: options.collidable.unwrap_or(true),
            visible: options.visible.unwrap_or(true),
            limits: options.limits.unwrap_or(Vec3::ZERO),
            camera: options.camera.clone(),
            mesh: options.mesh,
            ..SceneNode::default()
        };

        if let Some(matrix) = options.matrix {
            node.matrix = matrix;
            node.decompose_matrix();
        } else {
            node.update_matrix();
        }

        node.aabb = match (options.aabb, options.mesh) {
            (Some(aabb), _) => aabb,
            (None, Some(mesh)) => create_aabb(
                mesh.min * node.scale * MESH_BOUNDS_FACTOR,
                mesh.max * node.scale * MESH_BOUNDS_FACTOR,
            ),
            (None, None) => create_aabb(Vec3::ZERO, Vec3::ZERO),
        };

        node
    }

    /// Recompose the local matrix from translation, rotation and scale
    pub fn update_matrix(&mut self) {
        self.matrix = compose_trs(self.translation, self.rotation, self.scale);
    }

    /// Extract translation, rotation and scale from a directly set matrix
    pub fn decompose_matrix(&mut self) {
        let (translation, rotation, scale) = decompose(&self.matrix);
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// True when any patrol limit is set
    pub fn is_patrolling(&self) -> bool {
        self.limits.cmpgt(Vec3::ZERO).any()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let node = SceneNode::from_options(&NodeOptions::default());

        assert_eq!(node.translation, Vec3::ZERO);
        assert_eq!(node.rotation, Quat::IDENTITY);
        assert_eq!(node.scale, Vec3::ONE);
        assert_eq!(node.matrix, Mat4::IDENTITY);
        assert!(node.collidable);
        assert!(node.visible);
        assert!(!node.picked_up);
        assert!(!node.hit);
        assert!(!node.is_patrolling());
        assert_eq!(node.category, NodeCategory::Scenery);
    }

    #[test]
    fn test_mesh_bounds_seed_half_scaled_aabb() {
        let options = NodeOptions {
            scale: Some(Vec3::new(2.0, 1.0, 4.0)),
            mesh: Some(MeshBounds {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            }),
            ..NodeOptions::default()
        };
        let node = SceneNode::from_options(&options);

        assert_eq!(node.aabb.min, Vec3::new(-1.0, -0.5, -2.0));
        assert_eq!(node.aabb.max, Vec3::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn test_explicit_aabb_wins_over_mesh() {
        let explicit = create_aabb(Vec3::splat(-3.0), Vec3::splat(3.0));
        let options = NodeOptions {
            aabb: Some(explicit),
            mesh: Some(MeshBounds {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            }),
            ..NodeOptions::default()
        };

        assert_eq!(SceneNode::from_options(&options).aabb, explicit);
    }

    #[test]
    fn test_matrix_option_is_decomposed() {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 2.0, 2.0),
            Quat::from_rotation_y(0.5),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let node = SceneNode::from_options(&NodeOptions {
            matrix: Some(matrix),
            ..NodeOptions::default()
        });

        assert!(node.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(node.scale.abs_diff_eq(Vec3::splat(2.0), 1e-5));
        assert!(node.rotation.abs_diff_eq(Quat::from_rotation_y(0.5), 1e-5));
        assert_eq!(node.matrix, matrix);
    }

    #[test]
    fn test_patrolling_needs_positive_limit() {
        let node = SceneNode::from_options(&NodeOptions {
            limits: Some(Vec3::new(0.0, 0.0, 5.0)),
            ..NodeOptions::default()
        });
        assert!(node.is_patrolling());
    }
}
