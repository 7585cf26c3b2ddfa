//! Fill and edge passes for the static scene geometry

use hello3d_core::{InitError, Scene, SceneUniforms, SceneVertex};
use wgpu::util::DeviceExt;

use super::context::{DEPTH_FORMAT, GpuContext};
use super::shaders::{SCENE_SHADER, create_shader, validated};

/// How edges are drawn on top of the faces.
enum EdgeMode {
    /// Same triangle indices rasterized as lines
    PolygonLine,
    /// Line list of unique edges
    LineList { buffer: wgpu::Buffer, count: u32 },
}

struct EdgePass {
    pipeline: wgpu::RenderPipeline,
    mode: EdgeMode,
}

/// GPU copy of a [`Scene`], uploaded once.
pub(crate) struct ScenePass {
    fill_pipeline: wgpu::RenderPipeline,
    edges: Option<EdgePass>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ScenePass {
    pub fn new(gpu: &GpuContext, scene: &Scene) -> Result<Self, InitError> {
        let device = gpu.device();
        let shader = create_shader(device, "Scene Shader", SCENE_SHADER)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let fill_pipeline = validated(device, "Scene Fill Pipeline", || {
            create_scene_pipeline(
                gpu,
                &pipeline_layout,
                &shader,
                "Scene Fill Pipeline",
                "fs_fill",
                wgpu::PrimitiveTopology::TriangleList,
                wgpu::PolygonMode::Fill,
                wgpu::CompareFunction::Less,
            )
        })?;

        let edges = if scene.kind().draws_edges() {
            let (topology, polygon_mode, mode) = if gpu.supports_polygon_line() {
                (
                    wgpu::PrimitiveTopology::TriangleList,
                    wgpu::PolygonMode::Line,
                    EdgeMode::PolygonLine,
                )
            } else {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Scene Edge Buffer"),
                    contents: scene.edge_bytes(),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let count = scene.edge_indices().len() as u32;
                (
                    wgpu::PrimitiveTopology::LineList,
                    wgpu::PolygonMode::Fill,
                    EdgeMode::LineList { buffer, count },
                )
            };
            // Edges lie exactly on the filled faces
            let pipeline = validated(device, "Scene Edge Pipeline", || {
                create_scene_pipeline(
                    gpu,
                    &pipeline_layout,
                    &shader,
                    "Scene Edge Pipeline",
                    "fs_edge",
                    topology,
                    polygon_mode,
                    wgpu::CompareFunction::LessEqual,
                )
            })?;
            Some(EdgePass { pipeline, mode })
        } else {
            None
        };

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Vertex Buffer"),
            contents: scene.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Index Buffer"),
            contents: scene.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::new(glam::Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        tracing::debug!(
            "Uploaded {} scene: {} vertices, {} indices",
            scene.kind(),
            scene.vertices().len(),
            scene.indices().len()
        );

        Ok(Self {
            fill_pipeline,
            edges,
            vertex_buffer,
            index_buffer,
            index_count: scene.indices().len() as u32,
            uniform_buffer,
            bind_group,
        })
    }

    /// Write this frame's model transform.
    pub fn update(&self, queue: &wgpu::Queue, transform: glam::Mat4) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(transform)),
        );
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        pass.set_pipeline(&self.fill_pipeline);
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);

        if let Some(edges) = &self.edges {
            pass.set_pipeline(&edges.pipeline);
            match &edges.mode {
                EdgeMode::PolygonLine => {
                    pass.draw_indexed(0..self.index_count, 0, 0..1);
                }
                EdgeMode::LineList { buffer, count } => {
                    pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..*count, 0, 0..1);
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn create_scene_pipeline(
    gpu: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &'static str,
    fragment_entry: &'static str,
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
    depth_compare: wgpu::CompareFunction,
) -> wgpu::RenderPipeline {
    gpu.device()
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Faces are wound inconsistently; draw both sides
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare,
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
}
