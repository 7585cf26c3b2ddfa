//! Frame counter and the rotation derived from it

use std::f32::consts::PI;

use glam::Mat4;

/// Rotation added per rendered frame (half a degree).
pub const ANGLE_STEP: f32 = PI / 360.0;

/// Frames in one full revolution about the Y axis.
pub const FRAMES_PER_REVOLUTION: u32 = 720;

/// Number of frames presented so far.
///
/// Incremented once per successful redraw. Wraps at `u32::MAX`; it only feeds
/// a periodic rotation so the wrap shows up as a single jump in angle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameCounter(u32);

impl FrameCounter {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Rotation angle in radians, reduced to `[0, 2π)`.
    ///
    /// Reducing the frame index before converting keeps full f32 precision
    /// for large counters.
    pub fn angle(self) -> f32 {
        (self.0 % FRAMES_PER_REVOLUTION) as f32 * ANGLE_STEP
    }

    /// Model transform for this frame: identity rotated about +Y by [`Self::angle`].
    pub fn transform(self) -> Mat4 {
        Mat4::from_rotation_y(self.angle())
    }
}

impl std::fmt::Display for FrameCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn assert_mat_close(a: Mat4, b: Mat4) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn test_counter_starts_at_zero() {
        let frame = FrameCounter::default();
        assert_eq!(frame, FrameCounter::ZERO);
        assert_eq!(frame.angle(), 0.0);
        assert_mat_close(frame.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_angle_is_half_degree_per_frame() {
        for f in [1u32, 2, 10, 90, 180, 359, 719] {
            let expected = f as f32 * PI / 360.0;
            assert!((FrameCounter::new(f).angle() - expected).abs() < 1e-5, "frame {f}");
        }
    }

    #[test]
    fn test_fifty_frames_is_about_0_436_rad() {
        let mut frame = FrameCounter::ZERO;
        for _ in 0..50 {
            frame.advance();
        }
        assert_eq!(frame.get(), 50);
        assert!((frame.angle() - 50.0 * PI / 360.0).abs() < 1e-6);
        assert!((frame.angle() - 0.436).abs() < 1e-3);
    }

    #[test]
    fn test_transform_is_periodic() {
        for f in [0u32, 1, 37, 500, 719] {
            let a = FrameCounter::new(f).transform();
            let b = FrameCounter::new(f + FRAMES_PER_REVOLUTION).transform();
            let c = FrameCounter::new(f + 7 * FRAMES_PER_REVOLUTION).transform();
            assert_mat_close(a, b);
            assert_mat_close(a, c);
        }
    }

    #[test]
    fn test_quarter_turn_maps_x_to_minus_z() {
        // 180 frames = π/2 about +Y (right-handed)
        let t = FrameCounter::new(180).transform();
        let v = t.transform_point3(Vec3::X);
        assert!(v.abs_diff_eq(Vec3::NEG_Z, 1e-5), "{v:?}");
        // Y axis is the rotation axis and stays fixed
        let y = t.transform_point3(Vec3::Y);
        assert!(y.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_counter_wraps() {
        let mut frame = FrameCounter::new(u32::MAX);
        frame.advance();
        assert_eq!(frame, FrameCounter::ZERO);
    }

    #[test]
    fn test_angle_precision_for_large_counters() {
        let big = FrameCounter::new(FRAMES_PER_REVOLUTION * 1_000_000 + 90);
        assert!((big.angle() - FrameCounter::new(90).angle()).abs() < 1e-6);
    }
}
