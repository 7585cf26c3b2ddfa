//! Scene geometry
//!
//! A [`Scene`] is built once at startup, uploaded to the GPU once and never
//! mutated afterwards. It exposes read-only slices only.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Vertex layout shared with `scene.wgsl`: position then color, 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl SceneVertex {
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Which demo scene to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Static colored triangle
    Triangle,
    /// Rotating tetrahedron with wireframe edges and a text label
    #[default]
    Tetrahedron,
    /// "Hello," and "World!" hanging on damped springs
    Bouncy,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [Self::Triangle, Self::Tetrahedron, Self::Bouncy];

    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Tetrahedron => "tetrahedron",
            Self::Bouncy => "bouncy",
        }
    }

    /// Whether the model transform follows the frame counter.
    pub fn rotates(self) -> bool {
        matches!(self, Self::Tetrahedron)
    }

    /// Whether a white edge pass is drawn over the faces.
    pub fn draws_edges(self) -> bool {
        matches!(self, Self::Tetrahedron)
    }

    /// Whether the configured text label is drawn.
    pub fn draws_label(self) -> bool {
        matches!(self, Self::Tetrahedron)
    }

    /// Whether the label words are driven by the spring world.
    pub fn simulates_physics(self) -> bool {
        matches!(self, Self::Bouncy)
    }

    /// Whether the font is needed at all.
    pub fn uses_font(self) -> bool {
        self.draws_label() || self.simulates_physics()
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| ConfigError::UnknownScene(s.to_string()))
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

/// Immutable geometry for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    kind: SceneKind,
    vertices: Box<[SceneVertex]>,
    indices: Box<[u32]>,
    edges: Box<[u32]>,
}

impl Scene {
    /// Build the geometry for `kind`.
    pub fn new(kind: SceneKind) -> Self {
        let (vertices, indices): (Vec<SceneVertex>, Vec<u32>) = match kind {
            SceneKind::Triangle => (
                vec![
                    SceneVertex::new([-0.5, -0.5, 0.0], RED),
                    SceneVertex::new([0.5, -0.5, 0.0], GREEN),
                    SceneVertex::new([0.0, 0.5, 0.0], BLUE),
                ],
                vec![0, 1, 2],
            ),
            SceneKind::Tetrahedron => {
                let a = (8.0f32 / 9.0).sqrt();
                let b = (2.0f32 / 9.0).sqrt();
                let c = (2.0f32 / 3.0).sqrt();
                let z = -1.0 / 3.0;
                (
                    vec![
                        SceneVertex::new([a, 0.0, z], RED),
                        SceneVertex::new([-b, c, z], GREEN),
                        SceneVertex::new([-b, -c, z], BLUE),
                        SceneVertex::new([0.0, 0.0, 1.0], YELLOW),
                    ],
                    vec![0, 1, 2, 0, 1, 3, 0, 2, 3, 1, 2, 3],
                )
            }
            // Text only
            SceneKind::Bouncy => (Vec::new(), Vec::new()),
        };

        let edges = edge_list(&indices);
        Self {
            kind,
            vertices: vertices.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn vertices(&self) -> &[SceneVertex] {
        &self.vertices
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Line list indices, one pair per unique edge of the triangle list.
    pub fn edge_indices(&self) -> &[u32] {
        &self.edges
    }

    pub fn has_geometry(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn edge_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.edges)
    }
}

/// Unique undirected edges of a triangle list as line-list index pairs.
///
/// Edges keep first-seen order; a trailing partial triangle is ignored.
pub fn edge_list(triangles: &[u32]) -> Vec<u32> {
    let mut seen: Vec<(u32, u32)> = Vec::new();
    for tri in triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
    }
    seen.into_iter().flat_map(|(a, b)| [a, b]).collect()
}
