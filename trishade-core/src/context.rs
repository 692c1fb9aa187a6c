/// Per-frame state and the input rules that move it
use nalgebra::{Vector2, Vector3};

use crate::config::ViewerConfig;
use crate::projection::CameraState;
use crate::transform::Transform;
use crate::vector::{clamp, normalize2};

/// Snapshot of the controls for one frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_x: bool,
    pub rotate_y: bool,
    pub rotate_z: bool,
    pub scale_up: bool,
    pub scale_down: bool,
    /// Set on the frame the spin toggle was pressed
    pub toggle_spin: bool,
    /// Accumulated look motion in mouse units, +x right, +y down
    pub look_delta: Vector2<f64>,
}

impl InputState {
    pub fn add_look(&mut self, dx: f64, dy: f64) {
        self.look_delta.x += dx;
        self.look_delta.y += dy;
    }

    /// Forget the things that only last one frame
    pub fn rollover(&mut self) {
        self.toggle_spin = false;
        self.look_delta = Vector2::zeros();
    }

    /// Planar movement intent before it is turned by the camera yaw
    ///
    /// y is forward, x is towards the left.
    pub fn planar_direction(&self) -> Vector2<f64> {
        let axis = |plus: bool, minus: bool| f64::from(u8::from(plus)) - f64::from(u8::from(minus));
        Vector2::new(axis(self.left, self.right), axis(self.forward, self.back))
    }
}

/// Camera pose and mesh transform carried from frame to frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub camera: CameraState,
    pub mesh_transform: Transform,
    pub spinning: bool,
}

impl FrameContext {
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            mesh_transform: Transform::identity(),
            spinning: false,
        }
    }

    /// Advance by `delta` seconds under `input`
    pub fn update(&mut self, input: &InputState, delta: f64, config: &ViewerConfig) {
        if input.toggle_spin {
            self.spinning = !self.spinning;
        }
        self.update_mesh(input, delta, config);
        self.look(input.look_delta, config);
        self.move_camera(input, delta, config);
    }

    fn update_mesh(&mut self, input: &InputState, delta: f64, config: &ViewerConfig) {
        let mesh = &mut self.mesh_transform;

        if self.spinning {
            mesh.rotation += config.spin_rates * delta;
        }

        let step = config.axis_rotate_rate * delta;
        if input.rotate_x {
            mesh.rotate(step, 0.0, 0.0);
        }
        if input.rotate_y {
            mesh.rotate(0.0, step, 0.0);
        }
        if input.rotate_z {
            mesh.rotate(0.0, 0.0, step);
        }

        if input.scale_up {
            mesh.rescale(config.scale_rate * delta);
        }
        if input.scale_down {
            mesh.rescale(-config.scale_rate * delta);
        }
    }

    fn move_camera(&mut self, input: &InputState, delta: f64, config: &ViewerConfig) {
        let dir = normalize2(&input.planar_direction());

        let yaw = self.camera.rotation.z;
        let (ct, st) = (yaw.cos(), yaw.sin());
        let world = Vector2::new(dir.x * ct - dir.y * st, dir.x * st + dir.y * ct);

        let step = config.move_speed * delta;
        self.camera.position += Vector3::new(world.x * step, world.y * step, 0.0);

        if input.down {
            self.camera.position.z -= step;
        }
        if input.up {
            self.camera.position.z += step;
        }
    }

    fn look(&mut self, delta: Vector2<f64>, config: &ViewerConfig) {
        let rotation = &mut self.camera.rotation;
        rotation.z += delta.x * config.mouse_sensitivity;
        rotation.x += delta.y * config.mouse_sensitivity;
        rotation.x = clamp(rotation.x, -config.pitch_limit, config.pitch_limit);
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(CameraState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Vector3<f64>, b: Vector3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut ctx = FrameContext::default();
        let before = ctx;
        ctx.update(&InputState::default(), 0.5, &ViewerConfig::default());
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let config = ViewerConfig::default();
        let input = InputState {
            forward: true,
            ..InputState::default()
        };

        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.update(&input, 0.5, &config);
        assert!(close(ctx.camera.position, Vector3::new(0.0, 1.0, 0.0)));

        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.camera.rotation.z = FRAC_PI_2;
        ctx.update(&input, 0.5, &config);
        assert!(close(ctx.camera.position, Vector3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_turn_applies_before_move() {
        let config = ViewerConfig {
            mouse_sensitivity: 1.0,
            ..ViewerConfig::default()
        };
        let mut input = InputState {
            forward: true,
            ..InputState::default()
        };
        input.add_look(FRAC_PI_2, 0.0);

        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.update(&input, 0.5, &config);
        assert!(close(ctx.camera.position, Vector3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let input = InputState {
            forward: true,
            left: true,
            ..InputState::default()
        };
        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.update(&input, 1.0, &ViewerConfig::default());
        assert!((ctx.camera.position.norm() - 2.0).abs() < 1e-9);
        assert!(ctx.camera.position.x > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputState {
            forward: true,
            back: true,
            up: true,
            down: true,
            ..InputState::default()
        };
        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.update(&input, 1.0, &ViewerConfig::default());
        assert_eq!(ctx.camera.position, Vector3::zeros());
    }

    #[test]
    fn test_vertical_movement() {
        let input = InputState {
            up: true,
            ..InputState::default()
        };
        let mut ctx = FrameContext::new(CameraState::new(Vector3::zeros()));
        ctx.update(&input, 0.25, &ViewerConfig::default());
        assert!(close(ctx.camera.position, Vector3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_look_and_pitch_clamp() {
        let config = ViewerConfig::default();
        let mut ctx = FrameContext::default();

        let mut input = InputState::default();
        input.add_look(100.0, 100.0);
        ctx.update(&input, 0.0, &config);
        assert!((ctx.camera.rotation.z - 0.5).abs() < 1e-12);
        assert!((ctx.camera.rotation.x - 0.5).abs() < 1e-12);

        let mut input = InputState::default();
        input.add_look(0.0, 10_000.0);
        ctx.update(&input, 0.0, &config);
        assert_eq!(ctx.camera.rotation.x, FRAC_PI_2);

        let mut input = InputState::default();
        input.add_look(0.0, -100_000.0);
        ctx.update(&input, 0.0, &config);
        assert_eq!(ctx.camera.rotation.x, -FRAC_PI_2);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut ctx = FrameContext::default();
        let mut input = InputState::default();
        input.add_look(10_000.0, 0.0);
        ctx.update(&input, 0.0, &ViewerConfig::default());
        assert!((ctx.camera.rotation.z - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_spin_toggle_and_rates() {
        let config = ViewerConfig::default();
        let mut ctx = FrameContext::default();
        let toggle = InputState {
            toggle_spin: true,
            ..InputState::default()
        };

        ctx.update(&toggle, 1.0, &config);
        assert!(ctx.spinning);
        assert!(close(
            ctx.mesh_transform.rotation,
            Vector3::new(0.4 * PI, 0.3 * PI, 0.5 * PI)
        ));

        ctx.update(&toggle, 1.0, &config);
        assert!(!ctx.spinning);
        ctx.update(&InputState::default(), 1.0, &config);
        assert!(close(
            ctx.mesh_transform.rotation,
            Vector3::new(0.4 * PI, 0.3 * PI, 0.5 * PI)
        ));
    }

    #[test]
    fn test_axis_rotation_and_scale() {
        let config = ViewerConfig::default();
        let mut ctx = FrameContext::default();
        let input = InputState {
            rotate_y: true,
            scale_up: true,
            ..InputState::default()
        };
        ctx.update(&input, 0.5, &config);
        assert!(close(
            ctx.mesh_transform.rotation,
            Vector3::new(0.0, 0.2 * PI, 0.0)
        ));
        assert!(close(ctx.mesh_transform.scale, Vector3::new(1.05, 1.05, 1.05)));

        let shrink = InputState {
            scale_down: true,
            ..InputState::default()
        };
        ctx.update(&shrink, 0.5, &config);
        assert!(close(ctx.mesh_transform.scale, Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rollover_keeps_held_keys() {
        let mut input = InputState {
            forward: true,
            toggle_spin: true,
            ..InputState::default()
        };
        input.add_look(3.0, -1.0);
        input.rollover();
        assert!(input.forward);
        assert!(!input.toggle_spin);
        assert_eq!(input.look_delta, Vector2::zeros());
    }
}
