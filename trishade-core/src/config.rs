/// Viewer tunables
use std::f64::consts::PI;

use nalgebra::Vector3;

pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;
/// 90 degrees
pub const DEFAULT_HORIZONTAL_FOV: f64 = PI / 2.0;
pub const DEFAULT_NEAR_CLIP_DISTANCE: f64 = 0.5;
pub const DEFAULT_MOUSE_SENSITIVITY: f64 = 0.005;

/// Screen, lens and input settings shared by the projection and the frame update
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal field of view in radians
    pub horizontal_fov: f64,
    /// How far in front of the camera the projection plane sits
    pub near_clip_distance: f64,
    /// Radians of turn per unit of mouse motion
    pub mouse_sensitivity: f64,
    /// Camera speed in units per second
    pub move_speed: f64,
    /// Mesh rotation per second about each axis while spinning
    pub spin_rates: Vector3<f64>,
    /// Mesh rotation per second while an axis key is held
    pub axis_rotate_rate: f64,
    /// Scale change per second while a scale key is held
    pub scale_rate: f64,
    /// Pitch is clamped to plus or minus this angle
    pub pitch_limit: f64,
    /// Run mesh vertices and normals through the mesh transform before drawing
    pub apply_mesh_transform: bool,
}

impl ViewerConfig {
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Pixels per unit on the projection plane
    pub fn focal_scale(&self) -> f64 {
        self.screen_width as f64 / (2.0 * (self.horizontal_fov / 2.0).tan())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            horizontal_fov: DEFAULT_HORIZONTAL_FOV,
            near_clip_distance: DEFAULT_NEAR_CLIP_DISTANCE,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            move_speed: 2.0,
            spin_rates: Vector3::new(0.4 * PI, 0.3 * PI, 0.5 * PI),
            axis_rotate_rate: 0.4 * PI,
            scale_rate: 0.1,
            pitch_limit: PI / 2.0,
            apply_mesh_transform: false,
        }
    }
}
