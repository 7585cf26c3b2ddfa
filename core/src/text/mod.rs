//! Bitmap text: glyph atlas and quad layout
//!
//! Text is laid out in window pixels with the origin at the bottom-left
//! corner. Each visible character becomes one [`GlyphQuad`] (two triangles)
//! sampling that character's coverage texture.

mod atlas;

pub use atlas::{ATLAS_GLYPH_COUNT, AtlasGlyph, GlyphAtlas};

use bytemuck::{Pod, Zeroable};
use glam::{IVec2, UVec2, Vec2};

/// Most glyphs drawn per frame; longer strings are truncated by the renderer.
pub const MAX_TEXT_GLYPHS: usize = 256;

/// Placement metrics of one rasterized glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Bitmap width and height
    pub size: UVec2,
    /// Offset from the pen position to the bitmap's left edge and top edge
    /// (y up, so a glyph rising above the baseline has a positive `bearing.y`)
    pub bearing: IVec2,
    /// Horizontal pen advance
    pub advance: f32,
}

impl GlyphMetrics {
    pub fn has_area(&self) -> bool {
        self.size.x > 0 && self.size.y > 0
    }
}

/// Anything that can report [`GlyphMetrics`] for an ASCII code.
pub trait GlyphMetricsSource {
    fn metrics(&self, code: u8) -> GlyphMetrics;
}

/// Atlas slot used for `c`: its ASCII code, or `?` for anything else.
pub fn glyph_code(c: char) -> u8 {
    if c.is_ascii() { c as u8 } else { b'?' }
}

/// Vertex layout shared with `text.wgsl`: pixel position then texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TextVertex {
    const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

/// Two triangles covering one glyph bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Atlas slot whose texture this quad samples
    pub code: u8,
    pub vertices: [TextVertex; 6],
}

/// Lay out `text` starting at the baseline point `origin`.
///
/// Characters without a bitmap (space, control codes) only move the pen.
pub fn layout_text<S: GlyphMetricsSource + ?Sized>(
    text: &str,
    origin: Vec2,
    scale: f32,
    source: &S,
) -> Vec<GlyphQuad> {
    let mut quads = Vec::with_capacity(text.len());
    let mut pen_x = origin.x;

    for c in text.chars() {
        let code = glyph_code(c);
        let metrics = source.metrics(code);

        if metrics.has_area() {
            let size = metrics.size.as_vec2() * scale;
            let xpos = pen_x + metrics.bearing.x as f32 * scale;
            let ypos = origin.y - (metrics.size.y as f32 - metrics.bearing.y as f32) * scale;
            let (w, h) = (size.x, size.y);

            // Bitmap row 0 is the top row, so v is flipped
            quads.push(GlyphQuad {
                code,
                vertices: [
                    TextVertex::new(xpos, ypos + h, 0.0, 0.0),
                    TextVertex::new(xpos, ypos, 0.0, 1.0),
                    TextVertex::new(xpos + w, ypos, 1.0, 1.0),
                    TextVertex::new(xpos, ypos + h, 0.0, 0.0),
                    TextVertex::new(xpos + w, ypos, 1.0, 1.0),
                    TextVertex::new(xpos + w, ypos + h, 1.0, 0.0),
                ],
            });
        }

        pen_x += metrics.advance * scale;
    }

    quads
}

/// Total pen advance of `text` in pixels.
pub fn text_width<S: GlyphMetricsSource + ?Sized>(text: &str, scale: f32, source: &S) -> f32 {
    text.chars()
        .map(|c| source.metrics(glyph_code(c)).advance * scale)
        .sum()
}

/// Rotate every quad vertex by `angle` radians (counter-clockwise) about `pivot`.
pub fn rotate_quads(quads: &mut [GlyphQuad], pivot: Vec2, angle: f32) {
    let rotation = Vec2::from_angle(angle);
    for vertex in quads.iter_mut().flat_map(|q| q.vertices.iter_mut()) {
        let p = Vec2::from_array(vertex.position) - pivot;
        vertex.position = (pivot + rotation.rotate(p)).to_array();
    }
}
