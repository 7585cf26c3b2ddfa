//! Minimal 2D rigid-body world
//!
//! Static and dynamic bodies connected by damped springs, integrated with
//! semi-implicit Euler. Only what the `bouncy` scene needs: no collision,
//! no joints besides springs.

mod bouncy;
mod spring;

pub use bouncy::{BouncyText, Label, SUBSTEP, SUBSTEPS_PER_FRAME};
pub use spring::DampedSpring;

use glam::Vec2;

/// Moment of inertia of a solid `width` x `height` box about its center.
pub fn moment_for_box(mass: f32, width: f32, height: f32) -> f32 {
    mass * (width * width + height * height) / 12.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves; infinite mass
    Static,
    Dynamic,
}

/// Index of a body inside its [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub mass: f32,
    pub moment: f32,
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    force: Vec2,
    torque: f32,
}

impl Body {
    pub fn new_static(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            mass: f32::INFINITY,
            moment: f32::INFINITY,
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
        }
    }

    pub fn new_dynamic(mass: f32, moment: f32, position: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            moment,
            ..Self::new_static(position)
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// World position of a point given in body-local coordinates.
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.angle).rotate(local)
    }

    /// Velocity of the body at a world-space point.
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let r = point - self.position;
        self.velocity + r.perp() * self.angular_velocity
    }

    /// Accumulate a force applied at a world-space point.
    fn apply_force_at(&mut self, force: Vec2, point: Vec2) {
        if self.is_static() {
            return;
        }
        self.force += force;
        self.torque += (point - self.position).perp_dot(force);
    }

    fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if self.is_static() {
            return;
        }
        self.velocity += (gravity + self.force / self.mass) * dt;
        self.angular_velocity += self.torque / self.moment * dt;
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}

/// Bodies, springs and gravity.
#[derive(Debug, Clone, Default)]
pub struct World {
    gravity: Vec2,
    bodies: Vec<Body>,
    springs: Vec<DampedSpring>,
    elapsed: f32,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn add_spring(&mut self, spring: DampedSpring) {
        self.springs.push(spring);
    }

    /// Panics if `handle` came from another world.
    pub fn body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0]
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn springs(&self) -> &[DampedSpring] {
        &self.springs
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        for spring in &self.springs {
            spring.apply(&mut self.bodies);
        }
        for body in &mut self.bodies {
            body.integrate(self.gravity, dt);
        }
        self.elapsed += dt;
    }
}

#[cfg(test)]
mod tests;
