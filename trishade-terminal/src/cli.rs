/// Command line options and logger setup
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use trishade_core::config::{
    ViewerConfig, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_NEAR_CLIP_DISTANCE,
};

#[derive(Parser, Debug)]
#[command(name = "trishade", version, about = "Flat-shaded mesh viewer for the terminal")]
pub struct Cli {
    /// Mesh file, looked up in the resources directory unless it exists as given
    #[arg(default_value = "cube.obj")]
    pub mesh: PathBuf,

    #[arg(long, default_value = "resources/meshes")]
    pub resources_dir: PathBuf,

    /// Which object of the file to draw
    #[arg(long, default_value_t = 0)]
    pub mesh_index: usize,

    /// Horizontal field of view
    #[arg(long, default_value_t = 90.0)]
    pub fov_degrees: f64,

    #[arg(long, default_value_t = DEFAULT_NEAR_CLIP_DISTANCE)]
    pub near_clip: f64,

    /// Radians of turn per unit of mouse motion
    #[arg(long, default_value_t = DEFAULT_MOUSE_SENSITIVITY)]
    pub sensitivity: f64,

    /// Spin, rotate and scale the mesh on screen instead of only tracking it
    #[arg(long)]
    pub apply_mesh_transform: bool,

    /// Target frame rate
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// env_logger filter, e.g. `info` or `trishade_core=debug`
    #[arg(long, env = "TRISHADE_LOG", default_value = "warn")]
    pub log_filter: String,

    /// Write log lines here instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Viewer settings for these options; the screen size comes from the terminal later
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            horizontal_fov: self.fov_degrees.to_radians(),
            near_clip_distance: self.near_clip,
            mouse_sensitivity: self.sensitivity,
            apply_mesh_transform: self.apply_mesh_transform,
            ..ViewerConfig::default()
        }
    }
}

pub fn init_logging(filter: &str, log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialised")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["trishade"]).unwrap();
        assert_eq!(cli.mesh, PathBuf::from("cube.obj"));
        assert_eq!(cli.resources_dir, PathBuf::from("resources/meshes"));
        assert_eq!(cli.mesh_index, 0);
        assert_eq!(cli.fps, 30);
        assert!(!cli.apply_mesh_transform);

        let config = cli.viewer_config();
        assert!((config.horizontal_fov - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(config.near_clip_distance, 0.5);
        assert_eq!(config.mouse_sensitivity, 0.005);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "trishade",
            "teapot.obj",
            "--mesh-index",
            "2",
            "--fov-degrees",
            "60",
            "--near-clip",
            "1.5",
            "--apply-mesh-transform",
        ])
        .unwrap();
        assert_eq!(cli.mesh, PathBuf::from("teapot.obj"));
        assert_eq!(cli.mesh_index, 2);

        let config = cli.viewer_config();
        assert!((config.horizontal_fov - std::f64::consts::FRAC_PI_3).abs() < 1e-12);
        assert_eq!(config.near_clip_distance, 1.5);
        assert!(config.apply_mesh_transform);
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(Cli::try_parse_from(["trishade", "--fps", "0"]).is_err());
    }
}
