/// Data-Oriented Player Camera
///
/// The camera component is plain data attached to the player node. Input code feeds
/// it through the free functions below; the physics step reads the result.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::constants::camera_constants::*;
use crate::constants::gameplay::STARTING_AMMO;
use crate::scene::NodeId;

/// Movement tuning, overridable from `SimulationConfig`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

/// Player camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraComponent {
    pub tuning: CameraTuning,
    pub velocity: Vec3,
    /// Absolute (pitch, yaw, roll) in radians; copied onto the player node each step
    pub rotation: Vec3,
    /// Aim angles used to orient fired projectiles
    pub aim_rotation: Vec3,
    pub ammo: f32,
    /// Sibling node whose global transform is the projectile launch origin
    #[serde(skip)]
    pub spawn_anchor: Option<NodeId>,
}

impl Default for CameraComponent {
    fn default() -> Self {
        init_camera(CameraTuning::default())
    }
}

/// Directional input flags for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

pub fn init_camera(tuning: CameraTuning) -> CameraComponent {
    CameraComponent {
        tuning,
        velocity: Vec3::ZERO,
        rotation: Vec3::ZERO,
        aim_rotation: Vec3::ZERO,
        ammo: STARTING_AMMO,
        spawn_anchor: None,
    }
}

/// Horizontal forward vector for a yaw angle (yaw 0 looks down -Z)
pub fn calculate_forward_vector(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right vector for a yaw angle
pub fn calculate_right_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Unit view direction including pitch
pub fn calculate_aim_direction(pitch: f32, yaw: f32) -> Vec3 {
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(-yaw.sin() * cos_pitch, sin_pitch, -yaw.cos() * cos_pitch)
}

/// Apply a mouse delta (pixels) to the view and aim angles
pub fn apply_mouse_look(camera: &CameraComponent, dx: f32, dy: f32) -> CameraComponent {
    let mut updated = *camera;
    let sensitivity = camera.tuning.mouse_sensitivity;

    updated.rotation.x -= dy * sensitivity;
    updated.rotation.y -= dx * sensitivity;
    updated.rotation.x = updated.rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);
    updated.rotation.y = updated.rotation.y.rem_euclid(TAU);

    updated.aim_rotation.x -= dy * sensitivity;
    updated.aim_rotation.y -= dx * sensitivity;
    updated.aim_rotation.x = updated.aim_rotation.x.clamp(-AIM_PITCH_LIMIT, AIM_PITCH_LIMIT);
    if updated.aim_rotation.y >= AIM_YAW_WRAP {
        updated.aim_rotation.y -= AIM_YAW_WRAP;
    } else if updated.aim_rotation.y <= -AIM_YAW_WRAP {
        updated.aim_rotation.y += AIM_YAW_WRAP;
    }

    updated
}

/// Accelerate along the held directions, apply friction when idle, cap the speed
pub fn update_camera_velocity(
    camera: &CameraComponent,
    intent: MovementIntent,
    dt: f32,
) -> CameraComponent {
    let mut updated = *camera;
    let forward = calculate_forward_vector(camera.rotation.y);
    let right = calculate_right_vector(camera.rotation.y);

    let mut acceleration = Vec3::ZERO;
    if intent.forward {
        acceleration += forward;
    }
    if intent.backward {
        acceleration -= forward;
    }
    if intent.right {
        acceleration += right;
    }
    if intent.left {
        acceleration -= right;
    }

    updated.velocity += acceleration * (dt * camera.tuning.acceleration);

    if intent.is_idle() {
        updated.velocity *= 1.0 - camera.tuning.friction;
    }

    let speed = updated.velocity.length();
    if speed > camera.tuning.max_speed {
        updated.velocity *= camera.tuning.max_speed / speed;
    }

    updated
}
