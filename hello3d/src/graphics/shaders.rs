//! Embedded WGSL sources and validated object creation

use hello3d_core::InitError;

pub(crate) const SCENE_SHADER: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/scene.wgsl"));
pub(crate) const TEXT_SHADER: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/text.wgsl"));

/// Run `build` inside a validation error scope.
///
/// wgpu reports shader and pipeline errors asynchronously through the
/// device; this turns them into an [`InitError::Shader`] instead of the
/// default uncaptured-error panic.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    label: &'static str,
    build: impl FnOnce() -> T,
) -> Result<T, InitError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(InitError::Shader {
            label,
            reason: error.to_string(),
        }),
        None => Ok(value),
    }
}

pub(crate) fn create_shader(
    device: &wgpu::Device,
    label: &'static str,
    source: &'static str,
) -> Result<wgpu::ShaderModule, InitError> {
    validated(device, label, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
}
