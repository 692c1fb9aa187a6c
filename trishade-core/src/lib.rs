/// Trishade Core Library - mesh loading, camera projection and the frame pass
///
/// This library holds everything that doesn't touch a screen: the mesh text
/// format parser, the vector and transform algebra, the pinhole camera and the
/// per-frame culling and shading pass that feeds a [`Rasterizer`].

pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use context::{FrameContext, InputState};
pub use error::{LoadError, ParseError, ParseErrorKind};
pub use frame::{render_mesh, FramePass, FrameStats, Rasterizer, ScreenVertex, TriangleBuffer};
pub use geometry::{Mesh, Triangle};
pub use loader::{load_meshes, parse_meshes, resolve_mesh_path};
pub use projection::{CameraState, Projection};
pub use transform::Transform;
