/// Camera Module
///
/// Player camera component and the input-facing transformations on it.

pub mod data_camera;

pub use data_camera::{
    CameraComponent, CameraTuning, MovementIntent,
    init_camera, apply_mouse_look, update_camera_velocity,
    calculate_forward_vector, calculate_right_vector, calculate_aim_direction,
};
