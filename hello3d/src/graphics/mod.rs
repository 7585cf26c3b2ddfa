//! wgpu renderer for the demo scenes
//!
//! Everything is created once in [`Renderer::new`]. Per frame only the model
//! transform (and, for the bouncy scene, the text quads) are rewritten.

mod context;
mod scene_pass;
mod shaders;
mod text_pass;

pub use context::{GpuContext, backends_for, pick_surface_format};

use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use hello3d_core::physics::BouncyText;
use hello3d_core::text::{layout_text, rotate_quads, text_width};
use hello3d_core::{Config, FrameCounter, FrameRenderer, GlyphAtlas, GlyphQuad, InitError, Scene};
use winit::window::Window;

use scene_pass::ScenePass;
use text_pass::TextPass;

/// Words following the spring world, re-laid out every frame.
struct BouncyLabels {
    atlas: GlyphAtlas,
    bouncy: BouncyText,
    scale: f32,
}

impl BouncyLabels {
    /// Advance the physics one frame and lay out both words centered on their bodies.
    fn step(&mut self, width: f32, height: f32) -> Vec<GlyphQuad> {
        self.bouncy.step_frame();

        let mut quads = Vec::new();
        for label in self.bouncy.labels() {
            let center = label.pixel_position(width, height);
            let half_width = text_width(label.text, self.scale, &self.atlas) / 2.0;
            let origin = center - Vec2::new(half_width, 0.0);
            let mut word = layout_text(label.text, origin, self.scale, &self.atlas);
            rotate_quads(&mut word, center, label.angle);
            quads.append(&mut word);
        }
        quads
    }
}

pub struct Renderer {
    scene: Scene,
    scene_pass: Option<ScenePass>,
    text_pass: Option<TextPass>,
    bouncy: Option<BouncyLabels>,
    clear_color: wgpu::Color,
    gpu: GpuContext,
}

impl Renderer {
    /// Build the GPU context, upload the scene and rasterize the font.
    pub fn new(window: Arc<Window>, config: &Config) -> Result<Self, InitError> {
        let gpu = GpuContext::new(window, config.render.backend)?;

        let kind = config.render.scene;
        let scene = Scene::new(kind);
        let scene_pass = if scene.has_geometry() {
            Some(ScenePass::new(&gpu, &scene)?)
        } else {
            None
        };

        let (text_pass, bouncy) = if kind.uses_font() {
            let text_config = &config.text;
            let atlas = GlyphAtlas::load(&text_config.font_path, text_config.pixel_height)?;
            let mut text_pass = TextPass::new(&gpu, &atlas, text_config.color)?;

            let bouncy = if kind.simulates_physics() {
                Some(BouncyLabels {
                    atlas,
                    bouncy: BouncyText::new(),
                    scale: text_config.scale,
                })
            } else {
                // Fixed label: upload once
                let quads = layout_text(
                    &text_config.content,
                    Vec2::new(text_config.x, text_config.y),
                    text_config.scale,
                    &atlas,
                );
                text_pass.prepare(gpu.queue(), &quads);
                None
            };
            (Some(text_pass), bouncy)
        } else {
            (None, None)
        };

        let [r, g, b, a] = config.render.clear_color;
        tracing::info!("Renderer ready: scene={}", kind);

        Ok(Self {
            scene,
            scene_pass,
            text_pass,
            bouncy,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            gpu,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        if let Some(text_pass) = &self.text_pass {
            text_pass.resize(self.gpu.queue(), self.gpu.width(), self.gpu.height());
        }
    }
}

impl FrameRenderer for Renderer {
    fn render_frame(&mut self, frame: FrameCounter) -> Result<()> {
        let surface_texture = self.gpu.acquire()?;

        if let Some(scene_pass) = &self.scene_pass {
            let transform = if self.scene.kind().rotates() {
                frame.transform()
            } else {
                glam::Mat4::IDENTITY
            };
            scene_pass.update(self.gpu.queue(), transform);
        }

        // Physics only advances for frames that will be presented
        if let (Some(bouncy), Some(text_pass)) = (&mut self.bouncy, &mut self.text_pass) {
            let quads = bouncy.step(self.gpu.width() as f32, self.gpu.height() as f32);
            text_pass.prepare(self.gpu.queue(), &quads);
        }

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.gpu.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(scene_pass) = &self.scene_pass {
                scene_pass.draw(&mut render_pass);
            }
            if let Some(text_pass) = &self.text_pass {
                text_pass.draw(&mut render_pass);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
