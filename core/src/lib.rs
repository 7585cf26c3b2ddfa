//! hello3d core - windowless half of the demo
//!
//! Everything here runs without a GPU so it can be unit tested. The
//! `hello3d` crate plugs a wgpu renderer and a winit window into it.
//!
//! # Architecture
//!
//! - [`scheduler`] - Tick timer thread, redraw gate and the [`FrameLoop`] state machine
//! - [`frame`] - [`FrameCounter`] and the per-frame rotation transform
//! - [`scene`] - Write-once scene geometry for each [`SceneKind`]
//! - [`text`] - Glyph atlas rasterization and text quad layout
//! - [`physics`] - Damped-spring world driving the `bouncy` scene
//! - [`config`] - TOML configuration with defaults for every field

pub mod config;
pub mod error;
pub mod frame;
pub mod physics;
pub mod scene;
pub mod scheduler;
pub mod text;
pub mod uniforms;

pub use config::{BackendPreference, Config};
pub use error::{ConfigError, InitError};
pub use frame::{ANGLE_STEP, FRAMES_PER_REVOLUTION, FrameCounter};
pub use scene::{Scene, SceneKind, SceneVertex};
pub use scheduler::{
    FrameLoop, FrameRenderer, LoopEvent, LoopState, RedrawGate, SignalSink, SinkClosed, TickTimer,
    TimerStats,
};
pub use text::{GlyphAtlas, GlyphMetrics, GlyphQuad, MAX_TEXT_GLYPHS, TextVertex};
pub use uniforms::{SceneUniforms, TextUniforms};
