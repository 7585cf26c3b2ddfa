//! wgpu device, surface and depth buffer for the demo window

use std::sync::Arc;

use anyhow::{Context, Result};
use hello3d_core::{BackendPreference, InitError};
use winit::window::Window;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Map the configured backend onto wgpu's backend set.
pub fn backends_for(preference: BackendPreference) -> wgpu::Backends {
    match preference {
        BackendPreference::Gl => wgpu::Backends::GL,
        BackendPreference::Vulkan => wgpu::Backends::VULKAN,
        BackendPreference::Metal => wgpu::Backends::METAL,
        BackendPreference::Dx12 => wgpu::Backends::DX12,
        BackendPreference::Primary => wgpu::Backends::PRIMARY,
    }
}

/// Pick the surface format.
///
/// Vertex colors and the clear color are written as-is, so a linear
/// (non-sRGB) format is preferred to get the same output as a default GL
/// framebuffer.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
}

/// Device, queue and configured window surface.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    /// Adapter can rasterize triangles as lines
    polygon_line: bool,
}

impl GpuContext {
    /// Create graphics context for the given window.
    pub fn new(window: Arc<Window>, backend: BackendPreference) -> Result<Self, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: backends_for(backend),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| InitError::Adapter {
            backend: backend.to_string(),
            reason: e.to_string(),
        })?;

        let polygon_line = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if polygon_line {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("hello3d Device"),
            required_features,
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| InitError::Device(e.to_string()))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&surface_caps.formats).ok_or_else(|| {
            InitError::Surface("surface is not supported by the adapter".to_string())
        })?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        let depth_view = create_depth_view(&device, surface_config.width, surface_config.height);

        let info = adapter.get_info();
        tracing::info!(
            "Graphics initialized: {} ({:?}), {}x{}, format: {:?}, line polygons: {}",
            info.name,
            info.backend,
            surface_config.width,
            surface_config.height,
            surface_format,
            polygon_line
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            polygon_line,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn width(&self) -> u32 {
        self.surface_config.width
    }

    pub fn height(&self) -> u32 {
        self.surface_config.height
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn supports_polygon_line(&self) -> bool {
        self.polygon_line
    }

    /// Get the next surface texture.
    ///
    /// A lost or outdated surface is reconfigured and the error still
    /// returned, so the caller skips this frame.
    pub fn acquire(&mut self) -> Result<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.surface_config);
                Err(e).context("Surface needed reconfiguring")
            }
            Err(e) => Err(e).context("Failed to acquire next surface texture"),
        }
    }

    /// Resize the surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.device, width, height);
            tracing::debug!("Surface resized to {}x{}", width, height);
        }
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
