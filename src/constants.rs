// Quiver Engine Constants - SINGLE SOURCE OF TRUTH
//
// Default tuning for the scene graph, physics step and player camera.
// Runtime overrides go through `SimulationConfig`; these values are its defaults.

/// Physics step constants
pub mod physics_constants {
    /// Downward acceleration applied to projectiles in flight (units/s²)
    pub const PROJECTILE_GRAVITY: [f32; 3] = [0.0, -0.4, 0.0];

    /// Step length used by the fixed-timestep driver (60 Hz)
    pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

    /// Upper bound on substeps per `advance` call
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Frame time clamp to prevent the spiral of death
    pub const MAX_FRAME_TIME: f32 = 0.25;
}

/// Scene graph constants
pub mod scene_constants {
    /// Mesh POSITION bounds are full extents; local AABBs keep half of them
    pub const MESH_BOUNDS_FACTOR: f32 = 0.5;
}

/// Player camera constants
pub mod camera_constants {
    pub const ACCELERATION: f32 = 20.0;
    pub const FRICTION: f32 = 0.2;
    pub const MAX_SPEED: f32 = 3.0;
    pub const MOUSE_SENSITIVITY: f32 = 0.002;

    /// Aim pitch limit (radians), slightly inside a quarter turn
    pub const AIM_PITCH_LIMIT: f32 = 1.5;

    /// Aim yaw is folded back by this amount once it reaches ±AIM_YAW_WRAP (radians)
    pub const AIM_YAW_WRAP: f32 = 6.0;
}

/// Gameplay constants
pub mod gameplay {
    /// Ammo granted by one pickup
    pub const AMMO_PER_PICKUP: f32 = 0.5;

    /// Ammo the player starts with
    pub const STARTING_AMMO: f32 = 0.0;

    /// Speed of a freshly fired projectile along the aim direction
    pub const LAUNCH_STRENGTH: f32 = 5.0;

    /// Extra upward launch speed
    pub const LAUNCH_LIFT: f32 = 1.0;

    /// World-space offset from the spawn anchor to the projectile spawn point
    pub const MUZZLE_OFFSET: [f32; 3] = [0.1, 0.0, 1.4];

    /// Half extent of the projectile collision box
    pub const PROJECTILE_HALF_EXTENT: f32 = 0.1;
}
