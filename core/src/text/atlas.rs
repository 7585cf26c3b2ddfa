//! ASCII glyph atlas rasterized with ab_glyph

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use glam::{IVec2, UVec2};
use tracing::{debug, warn};

use super::{GlyphMetrics, GlyphMetricsSource, glyph_code};
use crate::error::InitError;

/// Number of atlas slots (ASCII 0..128)
pub const ATLAS_GLYPH_COUNT: usize = 128;

/// One rasterized glyph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtlasGlyph {
    pub metrics: GlyphMetrics,
    /// 8-bit coverage, `size.x * size.y` bytes, top row first. Empty when the
    /// glyph has no outline.
    pub coverage: Vec<u8>,
}

impl AtlasGlyph {
    pub fn has_bitmap(&self) -> bool {
        !self.coverage.is_empty()
    }
}

/// Metrics and coverage bitmaps for every ASCII code.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    pixel_height: f32,
    glyphs: Vec<AtlasGlyph>,
}

impl GlyphAtlas {
    /// Read and rasterize a TrueType/OpenType font file.
    pub fn load(path: &Path, pixel_height: f32) -> Result<Self, InitError> {
        let data = std::fs::read(path).map_err(|e| InitError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = FontVec::try_from_vec(data).map_err(|e| InitError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let atlas = Self::from_font(&font, pixel_height);
        debug!(
            "Loaded font {} at {}px ({} glyph bitmaps)",
            path.display(),
            pixel_height,
            atlas.bitmap_count()
        );
        Ok(atlas)
    }

    /// Rasterize ASCII 0..128 from `font` with an em size of `pixel_height`.
    pub fn from_font<F: Font>(font: &F, pixel_height: f32) -> Self {
        // PxScale is ascent-to-descent height; convert so one em is pixel_height
        let scale = match font.units_per_em() {
            Some(units_per_em) => PxScale::from(pixel_height * font.height_unscaled() / units_per_em),
            None => PxScale::from(pixel_height),
        };
        let scaled = font.as_scaled(scale);

        let mut missing = Vec::new();
        let glyphs = (0..ATLAS_GLYPH_COUNT as u8)
            .map(|code| {
                let c = code as char;
                let id = font.glyph_id(c);
                if id.0 == 0 && c.is_ascii_graphic() {
                    missing.push(c);
                }

                let advance = scaled.h_advance(id).round();
                let blank = AtlasGlyph {
                    metrics: GlyphMetrics {
                        advance,
                        ..Default::default()
                    },
                    coverage: Vec::new(),
                };
                // Unmapped control codes would otherwise draw the notdef box
                if id.0 == 0 && c.is_ascii_control() {
                    return blank;
                }

                let glyph = id.with_scale_and_position(scale, point(0.0, 0.0));
                let Some(outlined) = font.outline_glyph(glyph) else {
                    return blank;
                };

                let bounds = outlined.px_bounds();
                let width = bounds.width().max(0.0) as u32;
                let height = bounds.height().max(0.0) as u32;
                let mut coverage = vec![0u8; (width * height) as usize];
                outlined.draw(|x, y, c| {
                    if x < width && y < height {
                        coverage[(y * width + x) as usize] = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                    }
                });

                AtlasGlyph {
                    metrics: GlyphMetrics {
                        size: UVec2::new(width, height),
                        bearing: IVec2::new(bounds.min.x as i32, -bounds.min.y as i32),
                        advance,
                    },
                    coverage,
                }
            })
            .collect();

        if !missing.is_empty() {
            warn!("Font has no glyph for {:?}", missing.iter().collect::<String>());
        }

        Self {
            pixel_height,
            glyphs,
        }
    }

    pub fn pixel_height(&self) -> f32 {
        self.pixel_height
    }

    /// All slots, indexed by ASCII code.
    pub fn glyphs(&self) -> &[AtlasGlyph] {
        &self.glyphs
    }

    /// Glyph drawn for `c` (non-ASCII characters use `?`).
    pub fn glyph(&self, c: char) -> &AtlasGlyph {
        &self.glyphs[glyph_code(c) as usize]
    }

    /// Slots that carry a coverage bitmap.
    pub fn bitmap_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.has_bitmap()).count()
    }
}

impl GlyphMetricsSource for GlyphAtlas {
    fn metrics(&self, code: u8) -> GlyphMetrics {
        self.glyphs
            .get(code as usize)
            .map(|g| g.metrics)
            .unwrap_or_default()
    }
}
