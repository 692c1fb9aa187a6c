/// Trishade - flat-shaded mesh viewer for the terminal
///
/// Loads a mesh description and walks a camera around it.
/// Controls:
///   - WASD: Move, E/Q: Up/Down
///   - Mouse / Arrow Keys: Look
///   - X/Y/Z: Rotate the mesh, J/K: Scale it, Space: Spin
///   - ESC / Ctrl-C: Quit
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::error;
use trishade_core::{load_meshes, resolve_mesh_path};
use trishade_terminal::cli::{init_logging, Cli};
use trishade_terminal::TerminalApp;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_filter, cli.log_file.as_ref())?;

    let path = resolve_mesh_path(&cli.resources_dir, &cli.mesh);
    println!("Trishade - Loading {}...", path.display());

    let mut meshes = match load_meshes(&path) {
        Ok(meshes) => meshes,
        Err(err) if err.is_fatal() => {
            error!("{}", err);
            bail!("Mesh description is malformed: {}", err);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Could not load {}", path.display()));
        }
    };

    if meshes.is_empty() {
        bail!("{} does not declare any objects", path.display());
    }
    if cli.mesh_index >= meshes.len() {
        bail!(
            "Mesh index {} is out of range, {} has {} object(s)",
            cli.mesh_index,
            path.display(),
            meshes.len()
        );
    }
    let mesh = meshes.swap_remove(cli.mesh_index);

    println!(
        "Starting viewer with {} vertices and {} faces (press Esc to quit)...",
        mesh.vertex_count(),
        mesh.face_count()
    );

    let mut app = TerminalApp::new(mesh, cli.viewer_config(), cli.fps)?;
    app.run()?;

    println!("Thank you for using Trishade!");
    Ok(())
}
