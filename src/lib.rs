pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod physics;
pub mod scene;

pub use camera::{CameraComponent, CameraTuning, MovementIntent};
pub use config::{GameplayConfig, PhysicsConfig, SimulationConfig};
pub use error::{EngineError, EngineResult};
pub use physics::{spawn_projectile, PhysicsWorld, PinEvent, StepContext, StepReport, AABB};
pub use scene::{
    MeshBounds, NodeCategory, NodeId, NodeOptions, SceneDescription, SceneGraph, SceneNode,
};
