//! Physics error helpers
//!
//! Short constructors for the `EngineError` variants the physics step raises.

use crate::error::{EngineError, EngineResult};
use crate::scene::NodeId;

/// Type alias for physics operation results
pub type PhysicsResult<T> = EngineResult<T>;

/// Create a missing component error
pub fn missing_component(id: NodeId, component: &'static str) -> EngineError {
    EngineError::MissingComponent { id, component }
}

/// Create an invalid timestep error
pub fn invalid_timestep(dt: f32) -> EngineError {
    EngineError::InvalidTimestep { dt }
}

/// Create an out of ammo error
pub fn out_of_ammo(ammo: f32) -> EngineError {
    EngineError::OutOfAmmo { ammo }
}

/// Create a missing player error
pub fn missing_player() -> EngineError {
    EngineError::MissingPlayer
}
