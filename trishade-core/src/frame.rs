/// Per-frame visibility and flat shading pass
///
/// Faces are visited in mesh order. A face whose shared normal points along
/// the view ray from its first corner is culled; the rest get a grey level from
/// how directly they face the camera and are handed to a [`Rasterizer`].
/// There is no depth buffer and no clipping: a corner that fails to project is
/// drawn at the top-left pixel.
use log::trace;
use nalgebra::{Vector2, Vector3};

use crate::config::ViewerConfig;
use crate::geometry::{Mesh, Triangle};
use crate::projection::{CameraState, Projection};
use crate::transform::Transform;
use crate::vector::{clamp, normalize};

/// A projected corner with its flat RGBA colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixels, origin top left, +x right, +y down
    pub position: Vector2<f64>,
    pub color: [f32; 4],
}

/// Fills screen-space triangles
pub trait Rasterizer {
    fn fill_triangle(&mut self, vertices: &[ScreenVertex; 3]);
}

/// A rasterizer that just keeps what it was given
#[derive(Debug, Default, Clone)]
pub struct TriangleBuffer {
    pub triangles: Vec<[ScreenVertex; 3]>,
}

impl Rasterizer for TriangleBuffer {
    fn fill_triangle(&mut self, vertices: &[ScreenVertex; 3]) {
        self.triangles.push(*vertices);
    }
}

/// A face that survived culling, ready to submit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedTriangle {
    pub intensity: f64,
    pub vertices: [ScreenVertex; 3],
}

/// What the pass decided for one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceOutcome {
    Visible(ShadedTriangle),
    /// Faces away from the camera
    Culled,
    /// References a vertex or normal this mesh doesn't have
    Dangling,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: usize,
    pub culled: usize,
    pub dangling: usize,
}

/// Grey level for a face whose normal makes `facing` with the view ray
pub fn flat_intensity(facing: f64) -> f64 {
    clamp(-facing, 0.0, 1.0)
}

/// One frame's worth of camera state, built once and reused for every face
#[derive(Debug, Clone, Copy)]
pub struct FramePass {
    pub projection: Projection,
    mesh_transform: Option<Transform>,
}

impl FramePass {
    pub fn new(camera: &CameraState, mesh_transform: &Transform, config: &ViewerConfig) -> Self {
        Self {
            projection: Projection::build(camera, config),
            mesh_transform: config.apply_mesh_transform.then_some(*mesh_transform),
        }
    }

    pub fn shade_face(&self, mesh: &Mesh, face: &Triangle) -> FaceOutcome {
        let Some(geometry) = mesh.face_geometry(face) else {
            return FaceOutcome::Dangling;
        };

        let corners = geometry.corners.map(|corner| self.place(corner));
        let normal = self.orient(geometry.normal);

        let view_dir = normalize(&(corners[0] - self.projection.position));
        let facing = normal.dot(&view_dir);
        if facing > 0.0 {
            return FaceOutcome::Culled;
        }

        let intensity = flat_intensity(facing);
        let level = intensity as f32;
        let color = [level, level, level, 1.0];

        FaceOutcome::Visible(ShadedTriangle {
            intensity,
            vertices: corners.map(|corner| ScreenVertex {
                position: self.projection.project_or_origin(&corner),
                color,
            }),
        })
    }

    /// Shade every face of `mesh` and submit the visible ones in order
    pub fn run<R: Rasterizer + ?Sized>(&self, mesh: &Mesh, rasterizer: &mut R) -> FrameStats {
        let mut stats = FrameStats::default();

        for (index, face) in mesh.faces.iter().enumerate() {
            match self.shade_face(mesh, face) {
                FaceOutcome::Visible(triangle) => {
                    rasterizer.fill_triangle(&triangle.vertices);
                    stats.submitted += 1;
                }
                FaceOutcome::Culled => stats.culled += 1,
                FaceOutcome::Dangling => {
                    trace!("Face {} references missing geometry", index);
                    stats.dangling += 1;
                }
            }
        }

        trace!(
            "Frame: {} submitted, {} culled, {} dangling",
            stats.submitted,
            stats.culled,
            stats.dangling
        );
        stats
    }

    fn place(&self, vertex: &Vector3<f64>) -> Vector3<f64> {
        match &self.mesh_transform {
            Some(transform) => transform.transform_point(vertex),
            None => *vertex,
        }
    }

    fn orient(&self, normal: &Vector3<f64>) -> Vector3<f64> {
        match &self.mesh_transform {
            Some(transform) => normalize(&transform.rotate_vector(normal)),
            None => *normal,
        }
    }
}

/// Run a [`FramePass`] for `mesh` as seen from `camera`
pub fn render_mesh<R: Rasterizer + ?Sized>(
    mesh: &Mesh,
    camera: &CameraState,
    mesh_transform: &Transform,
    config: &ViewerConfig,
    rasterizer: &mut R,
) -> FrameStats {
    FramePass::new(camera, mesh_transform, config).run(mesh, rasterizer)
}
