use super::*;
use glam::Vec2;

const DT: f32 = 0.001;

// ============================================================================
// Bodies
// ============================================================================

#[test]
fn test_moment_for_box() {
    assert!((moment_for_box(1.0, 160.0, 120.0) - 40000.0 / 12.0).abs() < 1e-2);
    assert!((moment_for_box(2.0, 1.0, 1.0) - 2.0 / 6.0).abs() < 1e-6);
}

#[test]
fn test_free_fall() {
    let mut world = World::new(Vec2::new(0.0, -1.0));
    let body = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));

    for _ in 0..1000 {
        world.step(DT);
    }

    let body = world.body(body);
    assert!((body.velocity.y + 1.0).abs() < 1e-3);
    // Semi-implicit Euler lands within a step of y = -t²/2
    assert!((body.position.y + 0.5).abs() < 2e-3, "{}", body.position.y);
    assert_eq!(body.position.x, 0.0);
    assert!((world.elapsed() - 1.0).abs() < 1e-3);
}

#[test]
fn test_static_body_never_moves() {
    let mut world = World::new(Vec2::new(0.0, -10.0));
    let anchor = world.add_body(Body::new_static(Vec2::new(0.0, 1.0)));
    let bob = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    world.add_spring(DampedSpring::new(anchor, bob, Vec2::ZERO, Vec2::ZERO, 0.5, 100.0, 0.1));

    for _ in 0..500 {
        world.step(DT);
    }

    let anchor = world.body(anchor);
    assert_eq!(anchor.position, Vec2::new(0.0, 1.0));
    assert_eq!(anchor.velocity, Vec2::ZERO);
    assert_eq!(anchor.angle, 0.0);
}

#[test]
fn test_hanging_spring_settles_at_equilibrium() {
    let mut world = World::new(Vec2::new(0.0, -10.0));
    let anchor = world.add_body(Body::new_static(Vec2::new(0.0, 1.0)));
    let bob = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    world.add_spring(DampedSpring::new(anchor, bob, Vec2::ZERO, Vec2::ZERO, 0.5, 100.0, 5.0));
    assert!((world.springs()[0].length(world.bodies()) - 1.0).abs() < 1e-6);

    for _ in 0..10_000 {
        world.step(DT);
    }

    // Stretch balances gravity: m*g / k = 0.1
    let length = world.springs()[0].length(world.bodies());
    assert!((length - 0.6).abs() < 1e-3, "{length}");
    assert!(world.body(bob).position.x.abs() < 1e-6);
}

#[test]
fn test_local_to_world_rotates_anchor() {
    let mut body = Body::new_dynamic(1.0, 1.0, Vec2::new(1.0, 1.0));
    body.angle = std::f32::consts::FRAC_PI_2;
    let p = body.local_to_world(Vec2::new(1.0, 0.0));
    assert!(p.abs_diff_eq(Vec2::new(1.0, 2.0), 1e-6));
}

#[test]
fn test_velocity_at_includes_spin() {
    let mut body = Body::new_dynamic(1.0, 1.0, Vec2::ZERO);
    body.angular_velocity = 2.0;
    // Counter-clockwise spin moves a point on +X upward
    assert!(body.velocity_at(Vec2::X).abs_diff_eq(Vec2::new(0.0, 2.0), 1e-6));
}

// ============================================================================
// Springs
// ============================================================================

#[test]
fn test_spring_at_rest_length_exerts_no_force() {
    let mut world = World::new(Vec2::ZERO);
    let a = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    let b = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::new(1.0, 0.0)));
    world.add_spring(DampedSpring::new(a, b, Vec2::ZERO, Vec2::ZERO, 1.0, 50.0, 0.5));

    world.step(DT);

    assert_eq!(world.body(a).velocity, Vec2::ZERO);
    assert_eq!(world.body(b).velocity, Vec2::ZERO);
}

#[test]
fn test_stretched_spring_pulls_bodies_together() {
    let mut world = World::new(Vec2::ZERO);
    let a = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    let b = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::new(2.0, 0.0)));
    world.add_spring(DampedSpring::new(a, b, Vec2::ZERO, Vec2::ZERO, 1.0, 10.0, 0.0));

    world.step(DT);

    assert!(world.body(a).velocity.x > 0.0);
    assert!(world.body(b).velocity.x < 0.0);
    // Equal and opposite
    assert!((world.body(a).velocity.x + world.body(b).velocity.x).abs() < 1e-6);
    assert!(world.springs()[0].length(world.bodies()) < 2.0);
}

#[test]
fn test_damping_opposes_relative_motion() {
    let mut undamped = World::new(Vec2::ZERO);
    let mut damped = World::new(Vec2::ZERO);
    for (world, damping) in [(&mut undamped, 0.0), (&mut damped, 5.0)] {
        let a = world.add_body(Body::new_static(Vec2::ZERO));
        let mut bob = Body::new_dynamic(1.0, 1.0, Vec2::new(1.0, 0.0));
        bob.velocity = Vec2::new(1.0, 0.0);
        let b = world.add_body(bob);
        world.add_spring(DampedSpring::new(a, b, Vec2::ZERO, Vec2::ZERO, 1.0, 10.0, damping));
    }

    undamped.step(DT);
    damped.step(DT);

    let free = undamped.bodies()[1].velocity.x;
    let slowed = damped.bodies()[1].velocity.x;
    assert_eq!(free, 1.0);
    assert!(slowed < free);
}

#[test]
fn test_off_center_anchor_produces_torque() {
    let mut world = World::new(Vec2::ZERO);
    let anchor = world.add_body(Body::new_static(Vec2::new(0.0, 2.0)));
    let bob = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    // Anchor on the bob's +X side, spring stretched upward
    world.add_spring(DampedSpring::new(
        anchor,
        bob,
        Vec2::ZERO,
        Vec2::new(0.5, 0.0),
        1.0,
        10.0,
        0.0,
    ));

    world.step(DT);

    assert!(world.body(bob).angular_velocity != 0.0);
}

#[test]
fn test_coincident_anchors_are_skipped() {
    let mut world = World::new(Vec2::ZERO);
    let a = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    let b = world.add_body(Body::new_dynamic(1.0, 1.0, Vec2::ZERO));
    world.add_spring(DampedSpring::new(a, b, Vec2::ZERO, Vec2::ZERO, 1.0, 10.0, 0.0));

    world.step(DT);

    assert!(world.body(a).position.is_finite());
    assert!(world.body(b).position.is_finite());
}

// ============================================================================
// Bouncy text
// ============================================================================

#[test]
fn test_bouncy_initial_layout() {
    let bouncy = BouncyText::new();
    let [hello, world] = bouncy.labels();
    assert_eq!(hello.text, "Hello,");
    assert_eq!(world.text, "World!");
    assert_eq!(hello.position, Vec2::new(0.5, 0.75));
    assert_eq!(world.position, Vec2::new(0.5, 0.333));
    assert_eq!(hello.pixel_position(800.0, 800.0), Vec2::new(400.0, 600.0));

    let expected_moment = moment_for_box(1.0, 160.0, 120.0) / 2.0;
    assert!((bouncy.world().bodies()[1].moment - expected_moment).abs() < 1e-3);
    assert_eq!(bouncy.world().gravity(), Vec2::new(0.0, -1.0));
    assert_eq!(bouncy.world().springs().len(), 2);
}

#[test]
fn test_bouncy_frame_is_twenty_substeps() {
    let mut bouncy = BouncyText::new();
    bouncy.step_frame();
    assert!((bouncy.world().elapsed() - 0.02).abs() < 1e-6);

    let [hello, world] = bouncy.labels();
    // The first frame moves both labels
    assert_ne!(hello.position, Vec2::new(0.5, 0.75));
    assert_ne!(world.position, Vec2::new(0.5, 0.333));
}

#[test]
fn test_bouncy_stays_bounded() {
    let mut bouncy = BouncyText::new();
    // Two minutes of frames at 50 Hz
    for _ in 0..6000 {
        bouncy.step_frame();
    }
    for label in bouncy.labels() {
        assert!(label.position.is_finite());
        assert!(label.position.length() < 5.0, "{label:?}");
        assert!(label.angle.is_finite());
    }
}
