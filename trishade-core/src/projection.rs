/// Pinhole camera and point projection
use log::trace;
use nalgebra::{Vector2, Vector3};

use crate::config::ViewerConfig;
use crate::transform::Transform;
use crate::vector::normalize;

/// Rays closer than this to parallel with the plane don't project
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Camera pose plus the fixed axes its rotation turns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vector3<f64>,
    /// Euler angles in radians; x is pitch, z is yaw
    pub rotation: Vector3<f64>,
    /// View direction before rotation
    pub default_normal: Vector3<f64>,
    pub default_up: Vector3<f64>,
}

impl CameraState {
    pub fn new(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for CameraState {
    /// Two units behind the origin looking down +y with +z up
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, -2.0, 0.0),
            rotation: Vector3::zeros(),
            default_normal: Vector3::new(0.0, 1.0, 0.0),
            default_up: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Everything needed to project points for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub position: Vector3<f64>,
    /// Centre of the projection plane
    pub plane_position: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub up: Vector3<f64>,
    pub right: Vector3<f64>,
    pub focal_scale: f64,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Projection {
    /// Derive the frame's basis and projection plane from the camera pose
    pub fn build(camera: &CameraState, config: &ViewerConfig) -> Self {
        let turn = Transform::rotation_only(camera.rotation);

        let normal = normalize(&turn.transform_point(&camera.default_normal));
        let up = normalize(&turn.transform_point(&camera.default_up));
        let plane_position = camera.position + normal * config.near_clip_distance;
        let right = normalize(&up.cross(&normal));

        Self {
            position: camera.position,
            plane_position,
            normal,
            up,
            right,
            focal_scale: config.focal_scale(),
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// Intersect the ray from the camera through `point` with the projection
    /// plane and return where it lands in pixels
    ///
    /// Pixels have their origin at the top left. Returns `None` when the ray
    /// runs parallel to the plane or meets it behind the camera.
    pub fn project_to_screen(&self, point: &Vector3<f64>) -> Option<Vector2<f64>> {
        let ray = normalize(&(point - self.position));

        let denom = ray.dot(&self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        // t = (plane - p0) . n / (ray . n)
        let t = (self.plane_position - self.position).dot(&self.normal) / denom;
        if t <= 0.0 {
            return None;
        }

        let hit = self.position + ray * t;
        let local = hit - self.plane_position;

        let x = local.dot(&self.right) * self.focal_scale;
        let y = local.dot(&self.up) * self.focal_scale;

        Some(Vector2::new(
            x + (self.screen_width / 2) as f64,
            y + (self.screen_height / 2) as f64,
        ))
    }

    /// Like [`Projection::project_to_screen`] but a failed projection lands on
    /// the `(0, 0)` pixel instead of dropping out
    pub fn project_or_origin(&self, point: &Vector3<f64>) -> Vector2<f64> {
        self.project_to_screen(point).unwrap_or_else(|| {
            trace!("Point {point:?} did not project, using the origin");
            Vector2::zeros()
        })
    }
}
