//! Simulation configuration
//!
//! Loaded from TOML; every section and field falls back to the values in
//! `constants.rs`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::CameraTuning;
use crate::constants::{gameplay, physics_constants};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub projectile_gravity: Vec3,
    pub fixed_timestep: f32,
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            projectile_gravity: Vec3::from_array(physics_constants::PROJECTILE_GRAVITY),
            fixed_timestep: physics_constants::FIXED_TIMESTEP,
            max_substeps: physics_constants::MAX_SUBSTEPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub ammo_per_pickup: f32,
    pub launch_strength: f32,
    pub launch_lift: f32,
    pub muzzle_offset: Vec3,
    pub projectile_half_extent: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            ammo_per_pickup: gameplay::AMMO_PER_PICKUP,
            launch_strength: gameplay::LAUNCH_STRENGTH,
            launch_lift: gameplay::LAUNCH_LIFT,
            muzzle_offset: Vec3::from_array(gameplay::MUZZLE_OFFSET),
            projectile_half_extent: gameplay::PROJECTILE_HALF_EXTENT,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub gameplay: GameplayConfig,
    pub camera: CameraTuning,
}

impl SimulationConfig {
    pub fn from_toml_str(raw: &str) -> EngineResult<Self> {
        let config: SimulationConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("[SimulationConfig] Loaded {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let physics = &self.physics;
        if !(physics.fixed_timestep.is_finite() && physics.fixed_timestep > 0.0) {
            return Err(config_error(format!(
                "physics.fixed_timestep must be positive, got {}",
                physics.fixed_timestep
            )));
        }
        if physics.max_substeps == 0 {
            return Err(config_error("physics.max_substeps must be at least 1"));
        }
        if !physics.projectile_gravity.is_finite() {
            return Err(config_error("physics.projectile_gravity must be finite"));
        }

        let gameplay = &self.gameplay;
        if !(gameplay.projectile_half_extent.is_finite() && gameplay.projectile_half_extent > 0.0) {
            return Err(config_error("gameplay.projectile_half_extent must be positive"));
        }
        if !gameplay.muzzle_offset.is_finite()
            || !gameplay.ammo_per_pickup.is_finite()
            || !gameplay.launch_strength.is_finite()
            || !gameplay.launch_lift.is_finite()
        {
            return Err(config_error("gameplay values must be finite"));
        }

        let camera = &self.camera;
        if !(0.0..=1.0).contains(&camera.friction) {
            return Err(config_error(format!(
                "camera.friction must be within [0, 1], got {}",
                camera.friction
            )));
        }
        if !(camera.max_speed.is_finite() && camera.max_speed >= 0.0) {
            return Err(config_error("camera.max_speed must be non-negative"));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> EngineError {
    EngineError::Config {
        message: message.into(),
    }
}
