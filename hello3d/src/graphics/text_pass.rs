//! Glyph textures and the alpha-blended text pipeline

use hello3d_core::text::ATLAS_GLYPH_COUNT;
use hello3d_core::{GlyphAtlas, GlyphQuad, InitError, MAX_TEXT_GLYPHS, TextUniforms, TextVertex};
use wgpu::util::DeviceExt;

use super::context::{DEPTH_FORMAT, GpuContext};
use super::shaders::{TEXT_SHADER, create_shader, validated};

const VERTICES_PER_GLYPH: usize = 6;

/// One R8 coverage texture per ASCII glyph that has a bitmap.
pub(crate) struct TextPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    /// Indexed by ASCII code; `None` for glyphs without a bitmap
    glyph_bind_groups: Vec<Option<wgpu::BindGroup>>,
    vertex_buffer: wgpu::Buffer,
    color: [f32; 3],
    /// Codes of the quads written by the last [`Self::prepare`]
    queued: Vec<u8>,
}

impl TextPass {
    pub fn new(gpu: &GpuContext, atlas: &GlyphAtlas, color: [f32; 3]) -> Result<Self, InitError> {
        let device = gpu.device();
        let shader = create_shader(device, "Text Shader", TEXT_SHADER)?;

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Text Uniform Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let glyph_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Glyph Texture Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &glyph_layout],
            push_constant_ranges: &[],
        });

        let pipeline = validated(device, "Text Pipeline", || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Text Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<TextVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.surface_format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                // Overlay: ignore and keep the scene's depth
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        })?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniforms = TextUniforms::new(gpu.width() as f32, gpu.height() as f32, color);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Text Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Text Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let glyph_bind_groups = validated(device, "Glyph Textures", || {
            upload_glyphs(gpu, atlas, &glyph_layout)
        })?;

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Text Vertex Buffer"),
            size: (MAX_TEXT_GLYPHS * VERTICES_PER_GLYPH * std::mem::size_of::<TextVertex>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            glyph_bind_groups,
            vertex_buffer,
            color,
            queued: Vec::with_capacity(MAX_TEXT_GLYPHS),
        })
    }

    /// Rebuild the projection for a new surface size.
    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let uniforms = TextUniforms::new(width as f32, height as f32, self.color);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Upload this frame's quads. Quads beyond the buffer capacity are dropped.
    pub fn prepare(&mut self, queue: &wgpu::Queue, quads: &[GlyphQuad]) {
        if quads.len() > MAX_TEXT_GLYPHS {
            tracing::warn!(
                "Text has {} glyphs, only the first {} are drawn",
                quads.len(),
                MAX_TEXT_GLYPHS
            );
        }
        let quads = &quads[..quads.len().min(MAX_TEXT_GLYPHS)];

        let vertices: Vec<TextVertex> = quads.iter().flat_map(|q| q.vertices).collect();
        self.queued.clear();
        self.queued.extend(quads.iter().map(|q| q.code));

        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
    }

    /// Draw the quads from the last [`Self::prepare`], one glyph texture at a time.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.queued.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for (i, code) in self.queued.iter().enumerate() {
            let Some(Some(bind_group)) = self.glyph_bind_groups.get(*code as usize) else {
                continue;
            };
            let first = (i * VERTICES_PER_GLYPH) as u32;
            pass.set_bind_group(1, bind_group, &[]);
            pass.draw(first..first + VERTICES_PER_GLYPH as u32, 0..1);
        }
    }
}

fn upload_glyphs(
    gpu: &GpuContext,
    atlas: &GlyphAtlas,
    layout: &wgpu::BindGroupLayout,
) -> Vec<Option<wgpu::BindGroup>> {
    let mut bind_groups = Vec::with_capacity(ATLAS_GLYPH_COUNT);

    for (code, glyph) in atlas.glyphs().iter().enumerate() {
        if !glyph.has_bitmap() {
            bind_groups.push(None);
            continue;
        }

        let texture = gpu.device().create_texture_with_data(
            gpu.queue(),
            &wgpu::TextureDescriptor {
                label: Some("Glyph Texture"),
                size: wgpu::Extent3d {
                    width: glyph.metrics.size.x,
                    height: glyph.metrics.size.y,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &glyph.coverage,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        bind_groups.push(Some(gpu.device().create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Glyph Bind Group"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                }],
            },
        )));
        tracing::trace!("Uploaded glyph {} ({}x{})", code, glyph.metrics.size.x, glyph.metrics.size.y);
    }

    bind_groups
}
