pub mod aabb;
pub mod error;
pub mod integration;
pub mod projectile;
pub mod resolution;
pub mod rules;
pub mod world;

pub use aabb::{aabb_intersects, create_aabb, world_aabb, AABB};
pub use projectile::spawn_projectile;
pub use resolution::{minimum_translation_vector, mtv_candidates};
pub use world::{PhysicsWorld, PinEvent, StepContext, StepReport};
