//! Uniform buffer layouts shared with the WGSL shaders

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Maps OpenGL clip depth (`-1..1`) onto wgpu clip depth (`0..1`).
///
/// The scene geometry and transform are authored for GL conventions; this is
/// applied last so the tetrahedron's back half is not clipped away.
pub const GL_TO_WGPU_CLIP: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.0, 0.0, 0.5, 1.0, //
]);

/// `scene.wgsl` group 0 binding 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub transform: [[f32; 4]; 4],
}

impl SceneUniforms {
    pub fn new(transform: Mat4) -> Self {
        Self {
            transform: (GL_TO_WGPU_CLIP * transform).to_cols_array_2d(),
        }
    }
}

/// `text.wgsl` group 0 binding 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextUniforms {
    pub projection: [[f32; 4]; 4],
    /// RGB text color, alpha multiplier in `w`
    pub color: [f32; 4],
}

impl TextUniforms {
    /// Orthographic projection over a `width` x `height` pixel area with the
    /// origin at the bottom-left corner.
    pub fn new(width: f32, height: f32, color: [f32; 3]) -> Self {
        let projection = Mat4::orthographic_rh(0.0, width, 0.0, height, -1.0, 1.0);
        Self {
            projection: projection.to_cols_array_2d(),
            color: Vec4::new(color[0], color[1], color[2], 1.0).to_array(),
        }
    }
}
