//! Damped spring constraint

use glam::Vec2;

use super::{Body, BodyHandle};

/// Spring between an anchor on body `a` and an anchor on body `b`.
///
/// The force along the anchor axis is `(rest_length - dist) * stiffness`
/// minus `damping` times the relative velocity along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedSpring {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// Anchor on `a`, body-local
    pub anchor_a: Vec2,
    /// Anchor on `b`, body-local
    pub anchor_b: Vec2,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl DampedSpring {
    pub fn new(
        a: BodyHandle,
        b: BodyHandle,
        anchor_a: Vec2,
        anchor_b: Vec2,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    ) -> Self {
        Self {
            a,
            b,
            anchor_a,
            anchor_b,
            rest_length,
            stiffness,
            damping,
        }
    }

    /// Current anchor-to-anchor distance.
    pub fn length(&self, bodies: &[Body]) -> f32 {
        let (pa, pb) = self.anchor_points(bodies);
        pa.distance(pb)
    }

    fn anchor_points(&self, bodies: &[Body]) -> (Vec2, Vec2) {
        (
            bodies[self.a.0].local_to_world(self.anchor_a),
            bodies[self.b.0].local_to_world(self.anchor_b),
        )
    }

    /// Accumulate this spring's force on both bodies.
    pub(super) fn apply(&self, bodies: &mut [Body]) {
        let (pa, pb) = self.anchor_points(bodies);
        let delta = pb - pa;
        let dist = delta.length();
        // Direction is undefined when the anchors coincide
        let Some(axis) = delta.try_normalize() else {
            return;
        };

        let relative = bodies[self.b.0].velocity_at(pb) - bodies[self.a.0].velocity_at(pa);
        let magnitude = (self.rest_length - dist) * self.stiffness - self.damping * relative.dot(axis);
        let force = axis * magnitude;

        bodies[self.b.0].apply_force_at(force, pb);
        bodies[self.a.0].apply_force_at(-force, pa);
    }
}
