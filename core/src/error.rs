//! Startup error types
//!
//! Every failure before the first frame is fatal. The variants only exist so
//! the top-level handler can log which stage failed.

use std::path::PathBuf;

/// Fatal initialization error.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Explicit configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::Config`]
    #[error("failed to parse config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Event loop could not be created
    #[error("failed to create event loop: {0}")]
    EventLoop(String),

    /// Window creation failed
    #[error("failed to create window: {0}")]
    Window(String),

    /// Rendering surface could not be created for the window
    #[error("failed to create rendering surface: {0}")]
    Surface(String),

    /// No adapter for the requested backend
    #[error("no suitable GPU adapter for backend '{backend}': {reason}")]
    Adapter { backend: String, reason: String },

    /// Device request rejected by the adapter
    #[error("failed to create GPU device: {0}")]
    Device(String),

    /// Shader module or pipeline failed validation
    #[error("failed to build {label}: {reason}")]
    Shader { label: &'static str, reason: String },

    /// Font file missing or unreadable
    #[error("failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    /// Redraw timer thread could not be spawned
    #[error("failed to start redraw timer: {0}")]
    Timer(#[source] std::io::Error),
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("window size must be non-zero (got {width}x{height})")]
    ZeroWindowSize { width: u32, height: u32 },

    #[error("timer interval must be at least 1 ms")]
    ZeroInterval,

    #[error("font pixel height must be positive (got {0})")]
    InvalidPixelHeight(f32),

    #[error("font pixel height {value} exceeds the maximum of {max}")]
    PixelHeightTooLarge { value: f32, max: f32 },

    #[error("text scale must be positive (got {0})")]
    InvalidTextScale(f32),

    #[error("unknown backend '{0}' (expected gl, vulkan, metal, dx12 or primary)")]
    UnknownBackend(String),

    #[error("unknown scene '{0}' (expected triangle, tetrahedron or bouncy)")]
    UnknownScene(String),
}
