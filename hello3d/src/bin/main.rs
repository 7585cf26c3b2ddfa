//! hello3d - Standalone demo
//!
//! Opens an 800x800 window and draws a rotating tetrahedron with a text
//! label, redrawn every 20 ms.
//!
//! # Usage
//!
//! ```bash
//! hello3d
//! hello3d --scene bouncy
//! hello3d --backend vulkan --font /usr/share/fonts/TTF/DejaVuSans.ttf
//! hello3d --config demo.toml
//! ```
//!
//! # Keyboard Shortcuts
//!
//! - ESC: Quit

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hello3d_core::{BackendPreference, Config, FrameCounter, SceneKind};

#[derive(Parser)]
#[command(name = "hello3d")]
#[command(author, version, about = "Hello, World! Now in 3D!")]
struct Args {
    /// Configuration file (default: ~/.config/hello3d/config.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scene to draw: triangle, tetrahedron or bouncy
    #[arg(long)]
    scene: Option<SceneKind>,

    /// Graphics backend: gl, vulkan, metal, dx12 or primary
    #[arg(long)]
    backend: Option<BackendPreference>,

    /// TrueType font for the text label
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(self, config: &mut Config) {
        if let Some(scene) = self.scene {
            config.render.scene = scene;
        }
        if let Some(backend) = self.backend {
            config.render.backend = backend;
        }
        if let Some(font) = self.font {
            config.text.font_path = font;
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match try_main(args) {
        Ok(frames) => {
            info!("Clean exit after {} frames", frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: Args) -> anyhow::Result<FrameCounter> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);
    hello3d::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let args = Args::try_parse_from(["hello3d"]).unwrap();
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "hello3d",
            "--scene",
            "bouncy",
            "--backend",
            "vulkan",
            "--font",
            "fonts/demo.ttf",
        ])
        .unwrap();
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.render.scene, SceneKind::Bouncy);
        assert_eq!(config.render.backend, BackendPreference::Vulkan);
        assert_eq!(config.text.font_path, PathBuf::from("fonts/demo.ttf"));
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(Args::try_parse_from(["hello3d", "--scene", "cube"]).is_err());
    }
}
