//! Engine-wide error type
//!
//! Every fallible operation in the crate returns `EngineResult<T>`. Subsystems
//! provide small constructor helpers (see `physics::error`) so call sites stay short.

use crate::scene::NodeId;

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("Invalid hierarchy: {reason}")]
    InvalidHierarchy { reason: String },

    #[error("Hierarchy cycle detected while walking ancestors of {id}")]
    HierarchyCycle { id: NodeId },

    #[error("Node {id} is missing required component: {component}")]
    MissingComponent { id: NodeId, component: &'static str },

    #[error("Scene has no player node")]
    MissingPlayer,

    #[error("Invalid physics timestep: {dt}")]
    InvalidTimestep { dt: f32 },

    #[error("Cannot spawn projectile: ammo is {ammo}")]
    OutOfAmmo { ammo: f32 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene description parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
