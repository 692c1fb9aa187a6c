/// Indexed triangle meshes
use nalgebra::Vector3;

/// A triangular face; indices are 0-based
///
/// The whole face shares one normal, the one paired with its first corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub n0: usize,
}

impl Triangle {
    pub fn new(v0: usize, v1: usize, v2: usize, n0: usize) -> Self {
        Self { v0, v1, v2, n0 }
    }
}

/// Borrowed geometry of one face, resolved against its mesh
#[derive(Debug, Clone, Copy)]
pub struct FaceGeometry<'a> {
    pub corners: [&'a Vector3<f64>; 3],
    pub normal: &'a Vector3<f64>,
}

/// One object group: positions, normals and faces indexing into them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: Option<String>,
    pub vertices: Vec<Vector3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub faces: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Look up the corners and shared normal of `face`
    ///
    /// Returns `None` if any index points past the end of this mesh's arrays.
    pub fn face_geometry(&self, face: &Triangle) -> Option<FaceGeometry<'_>> {
        Some(FaceGeometry {
            corners: [
                self.vertices.get(face.v0)?,
                self.vertices.get(face.v1)?,
                self.vertices.get(face.v2)?,
            ],
            normal: self.normals.get(face.n0)?,
        })
    }

    /// An axis-aligned cube centred on the origin, two faces per side
    ///
    /// Faces are wound counter-clockwise seen from outside and each side
    /// carries its own outward normal.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::named("cube");

        mesh.vertices = vec![
            Vector3::new(-h, -h, -h),
            Vector3::new(h, -h, -h),
            Vector3::new(h, h, -h),
            Vector3::new(-h, h, -h),
            Vector3::new(-h, -h, h),
            Vector3::new(h, -h, h),
            Vector3::new(h, h, h),
            Vector3::new(-h, h, h),
        ];
        mesh.normals = vec![
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ];
        mesh.faces = vec![
            // +z
            Triangle::new(4, 5, 6, 0),
            Triangle::new(4, 6, 7, 0),
            // -z
            Triangle::new(0, 3, 2, 1),
            Triangle::new(0, 2, 1, 1),
            // +y
            Triangle::new(3, 7, 6, 2),
            Triangle::new(3, 6, 2, 2),
            // -y
            Triangle::new(0, 1, 5, 3),
            Triangle::new(0, 5, 4, 3),
            // +x
            Triangle::new(1, 2, 6, 4),
            Triangle::new(1, 6, 5, 4),
            // -x
            Triangle::new(0, 4, 7, 5),
            Triangle::new(0, 7, 3, 5),
        ];

        mesh
    }
}
