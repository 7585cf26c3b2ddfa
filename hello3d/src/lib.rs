//! hello3d - a spinning tetrahedron in a winit window
//!
//! The windowed half of the demo: [`app`] owns the window, event loop and
//! redraw timer; [`graphics`] renders scenes from `hello3d-core` with wgpu.

pub mod app;
pub mod graphics;

pub use app::run;
