//! Configuration management (~/.config/hello3d/config.toml)
//!
//! Every field has a default so an empty or partial file reproduces the
//! stock demo: 800x800 window, 20 ms redraw timer, tetrahedron scene,
//! `arial.ttf` at 48 px.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InitError};
use crate::scene::SceneKind;

/// Largest accepted font size; keeps every glyph bitmap within the
/// 2048 px texture limit of downlevel adapters.
pub const MAX_PIXEL_HEIGHT: f32 = 512.0;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title (default: "Hello, World! Now in 3D!")
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_window_extent")]
    pub width: u32,
    #[serde(default = "default_window_extent")]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Redraw period in milliseconds (default: 20)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Graphics API the renderer asks wgpu for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// OpenGL / OpenGL ES
    #[default]
    Gl,
    Vulkan,
    Metal,
    Dx12,
    /// Whatever wgpu considers first-class on this platform
    Primary,
}

impl BackendPreference {
    pub const ALL: [BackendPreference; 5] = [
        Self::Gl,
        Self::Vulkan,
        Self::Metal,
        Self::Dx12,
        Self::Primary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Gl => "gl",
            Self::Vulkan => "vulkan",
            Self::Metal => "metal",
            Self::Dx12 => "dx12",
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|backend| backend.name() == lower)
            .ok_or_else(|| ConfigError::UnknownBackend(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub backend: BackendPreference,
    #[serde(default)]
    pub scene: SceneKind,
    /// Framebuffer clear color, RGBA (default: 0.2, 0.3, 0.3, 1.0)
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// TrueType/OpenType font file (default: "arial.ttf", relative to the working directory)
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    /// Rasterization height in pixels (default: 48)
    #[serde(default = "default_pixel_height")]
    pub pixel_height: f32,
    /// Label drawn by the tetrahedron scene
    #[serde(default = "default_content")]
    pub content: String,
    /// Baseline origin in window pixels, measured from the bottom-left corner
    #[serde(default = "default_text_x")]
    pub x: f32,
    #[serde(default = "default_text_y")]
    pub y: f32,
    #[serde(default = "default_text_scale")]
    pub scale: f32,
    #[serde(default = "default_text_color")]
    pub color: [f32; 3],
}

fn default_title() -> String {
    "Hello, World! Now in 3D!".to_string()
}
fn default_window_extent() -> u32 {
    800
}
fn default_interval_ms() -> u64 {
    20
}
fn default_clear_color() -> [f32; 4] {
    [0.2, 0.3, 0.3, 1.0]
}
fn default_font_path() -> PathBuf {
    PathBuf::from("arial.ttf")
}
fn default_pixel_height() -> f32 {
    48.0
}
fn default_content() -> String {
    "Hello, World!".to_string()
}
fn default_text_x() -> f32 {
    275.0
}
fn default_text_y() -> f32 {
    400.0
}
fn default_text_scale() -> f32 {
    1.0
}
fn default_text_color() -> [f32; 3] {
    [0.9, 0.9, 0.9]
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_extent(),
            height: default_window_extent(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::default(),
            scene: SceneKind::default(),
            clear_color: default_clear_color(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: default_font_path(),
            pixel_height: default_pixel_height(),
            content: default_content(),
            x: default_text_x(),
            y: default_text_y(),
            scale: default_text_scale(),
            color: default_text_color(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/hello3d`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "hello3d", "hello3d")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of `config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is tried; a missing file there yields defaults and an
    /// unparsable one is logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self, InitError> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path).map_err(|source| InitError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            let config = Self::from_toml_str(&content).map_err(|e| InitError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) => {
                    tracing::warn!("Ignoring unparsable config {}: {}", path.display(), e);
                    Ok(Self::default())
                }
            },
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ZeroWindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }
        if self.timer.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !is_positive(self.text.pixel_height) {
            return Err(ConfigError::InvalidPixelHeight(self.text.pixel_height));
        }
        if self.text.pixel_height > MAX_PIXEL_HEIGHT {
            return Err(ConfigError::PixelHeightTooLarge {
                value: self.text.pixel_height,
                max: MAX_PIXEL_HEIGHT,
            });
        }
        if !is_positive(self.text.scale) {
            return Err(ConfigError::InvalidTextScale(self.text.scale));
        }
        Ok(())
    }

    pub fn timer_interval(&self) -> Duration {
        Duration::from_millis(self.timer.interval_ms)
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
