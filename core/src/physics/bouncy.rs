//! "Hello," and "World!" hanging on springs

use glam::Vec2;

use super::{Body, BodyHandle, DampedSpring, World, moment_for_box};

/// Physics substeps per rendered frame
pub const SUBSTEPS_PER_FRAME: u32 = 20;

/// Length of one substep in seconds
pub const SUBSTEP: f32 = 0.001;

const GRAVITY: Vec2 = Vec2::new(0.0, -1.0);
const ANCHOR_POSITION: Vec2 = Vec2::new(0.0, 1.0);
const HELLO_POSITION: Vec2 = Vec2::new(0.5, 0.75);
const WORLD_POSITION: Vec2 = Vec2::new(0.5, 0.333);
const LABEL_MASS: f32 = 1.0;
/// Pixel box of a label, used only for its moment of inertia
const LABEL_BOX: Vec2 = Vec2::new(160.0, 120.0);
const REST_LENGTH: f32 = 0.667;
const STIFFNESS: f32 = 30.0;
const DAMPING: f32 = 0.0001;

/// A word and where its body currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub text: &'static str,
    /// Normalized window coordinates, `[0, 1]` with y up
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise
    pub angle: f32,
}

impl Label {
    /// Position in window pixels (origin bottom-left).
    pub fn pixel_position(&self, width: f32, height: f32) -> Vec2 {
        self.position * Vec2::new(width, height)
    }
}

/// Two labels chained to a static anchor: anchor → "Hello," → "World!".
#[derive(Debug, Clone)]
pub struct BouncyText {
    world: World,
    hello: BodyHandle,
    world_label: BodyHandle,
}

impl Default for BouncyText {
    fn default() -> Self {
        Self::new()
    }
}

impl BouncyText {
    pub const HELLO: &'static str = "Hello,";
    pub const WORLD: &'static str = "World!";

    pub fn new() -> Self {
        let mut world = World::new(GRAVITY);
        let moment = moment_for_box(LABEL_MASS, LABEL_BOX.x, LABEL_BOX.y) / 2.0;

        let anchor = world.add_body(Body::new_static(ANCHOR_POSITION));
        let hello = world.add_body(Body::new_dynamic(LABEL_MASS, moment, HELLO_POSITION));
        let world_label = world.add_body(Body::new_dynamic(LABEL_MASS, moment, WORLD_POSITION));

        world.add_spring(DampedSpring::new(
            anchor,
            hello,
            Vec2::ZERO,
            Vec2::new(0.0, 0.01),
            REST_LENGTH,
            STIFFNESS,
            DAMPING,
        ));
        world.add_spring(DampedSpring::new(
            hello,
            world_label,
            Vec2::new(0.0, -0.01),
            Vec2::new(0.0, 0.01),
            REST_LENGTH,
            STIFFNESS,
            DAMPING,
        ));

        Self {
            world,
            hello,
            world_label,
        }
    }

    /// Advance one rendered frame ([`SUBSTEPS_PER_FRAME`] x [`SUBSTEP`]).
    pub fn step_frame(&mut self) {
        for _ in 0..SUBSTEPS_PER_FRAME {
            self.world.step(SUBSTEP);
        }
    }

    pub fn labels(&self) -> [Label; 2] {
        [
            self.label(Self::HELLO, self.hello),
            self.label(Self::WORLD, self.world_label),
        ]
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn label(&self, text: &'static str, handle: BodyHandle) -> Label {
        let body = self.world.body(handle);
        Label {
            text,
            position: body.position,
            angle: body.angle,
        }
    }
}
