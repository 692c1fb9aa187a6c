/// Position, Euler rotation and scale applied to points
use nalgebra::{Matrix3, Vector3};

/// Transform state; rotation holds Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f64>,
    pub rotation: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl Transform {
    pub fn new(position: Vector3<f64>, rotation: Vector3<f64>, scale: Vector3<f64>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// A transform that only rotates, used to turn the camera's axes
    pub fn rotation_only(rotation: Vector3<f64>) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.x += dx;
        self.rotation.y += dy;
        self.rotation.z += dz;
    }

    /// Add `amount` to every scale component
    pub fn rescale(&mut self, amount: f64) {
        self.scale.add_scalar_mut(amount);
    }

    /// The combined Rz * Ry * Rx rotation matrix
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        let (cx, sx) = (self.rotation.x.cos(), self.rotation.x.sin());
        let (cy, sy) = (self.rotation.y.cos(), self.rotation.y.sin());
        let (cz, sz) = (self.rotation.z.cos(), self.rotation.z.sin());

        Matrix3::new(
            cy * cz,
            sx * sy * cz - cx * sz,
            cx * sy * cz + sx * sz,
            cy * sz,
            sx * sy * sz + cx * cz,
            cx * sy * sz - sx * cz,
            -sy,
            sx * cy,
            cx * cy,
        )
    }

    /// Rotate `v` without scaling or translating it
    pub fn rotate_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let m = self.rotation_matrix();
        // Written out term by term; the summation order is part of the contract.
        Vector3::new(
            v.x * m[(0, 0)] + v.y * m[(0, 1)] + v.z * m[(0, 2)],
            v.x * m[(1, 0)] + v.y * m[(1, 1)] + v.z * m[(1, 2)],
            v.x * m[(2, 0)] + v.y * m[(2, 1)] + v.z * m[(2, 2)],
        )
    }

    /// Scale, then rotate, then translate `v`
    pub fn transform_point(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let scaled = v.component_mul(&self.scale);
        self.rotate_vector(&scaled) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Free-function form of [`Transform::transform_point`]
pub fn transform_point(v: &Vector3<f64>, t: &Transform) -> Vector3<f64> {
    t.transform_point(v)
}
