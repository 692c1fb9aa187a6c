/// Example: Load a mesh description and print what it contains
///
/// Usage: cargo run -p trishade-core --example mesh_info -- path/to/file.obj

use std::env;
use std::process::ExitCode;

use trishade_core::load_meshes;

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: mesh_info <mesh-file>");
        return ExitCode::FAILURE;
    };

    let meshes = match load_meshes(&path) {
        Ok(meshes) => meshes,
        Err(err) if err.is_fatal() => {
            eprintln!("Malformed mesh description: {err}");
            return ExitCode::from(2);
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{} object(s) in {}", meshes.len(), path);
    for (index, mesh) in meshes.iter().enumerate() {
        let dangling = mesh
            .faces
            .iter()
            .filter(|face| mesh.face_geometry(face).is_none())
            .count();
        println!(
            "  [{}] {:<16} {:>6} vertices {:>6} normals {:>6} faces ({} dangling)",
            index,
            mesh.name.as_deref().unwrap_or("-"),
            mesh.vertex_count(),
            mesh.normal_count(),
            mesh.face_count(),
            dangling,
        );
    }

    ExitCode::SUCCESS
}
