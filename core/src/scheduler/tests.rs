use super::*;
use std::sync::mpsc;

use crate::frame::FrameCounter;
use crate::scene::{Scene, SceneKind};

/// Records the counter passed to each render; optionally fails some frames.
struct RecordingRenderer {
    rendered: Vec<FrameCounter>,
    fail_calls: Vec<usize>,
    calls: usize,
}

impl RecordingRenderer {
    fn new() -> Self {
        Self {
            rendered: Vec::new(),
            fail_calls: Vec::new(),
            calls: 0,
        }
    }

    fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_calls: calls.to_vec(),
            ..Self::new()
        }
    }
}

impl FrameRenderer for RecordingRenderer {
    fn render_frame(&mut self, frame: FrameCounter) -> anyhow::Result<()> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_calls.contains(&call) {
            anyhow::bail!("surface lost");
        }
        self.rendered.push(frame);
        Ok(())
    }
}

// ============================================================================
// FrameLoop state machine
// ============================================================================

#[test]
fn test_new_loop_is_running_at_zero() {
    let frame_loop = FrameLoop::new(RedrawGate::new());
    assert_eq!(frame_loop.state(), LoopState::Running);
    assert_eq!(frame_loop.frame(), FrameCounter::ZERO);
}

#[test]
fn test_fifty_redraws_advance_counter_to_fifty() {
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();

    for _ in 0..50 {
        frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    }

    assert_eq!(frame_loop.frame().get(), 50);
    assert_eq!(frame_loop.stats().len(), 50);
    assert!((frame_loop.frame().angle() - 0.436).abs() < 1e-3);
    // Each render saw the counter before its own increment
    let expected: Vec<FrameCounter> = (0..50).map(FrameCounter::new).collect();
    assert_eq!(renderer.rendered, expected);
}

#[test]
fn test_quit_after_tenth_redraw_halts() {
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();

    for _ in 0..10 {
        frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    }
    assert_eq!(
        frame_loop.handle(LoopEvent::Quit, &mut renderer),
        LoopState::Terminated
    );

    for _ in 0..5 {
        frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    }

    assert_eq!(frame_loop.frame().get(), 10);
    assert_eq!(renderer.rendered.len(), 10);
}

#[test]
fn test_terminated_is_terminal() {
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();

    frame_loop.handle(LoopEvent::Quit, &mut renderer);
    for event in [LoopEvent::Redraw, LoopEvent::Other, LoopEvent::Quit] {
        assert_eq!(frame_loop.handle(event, &mut renderer), LoopState::Terminated);
    }
    assert!(renderer.rendered.is_empty());
    assert_eq!(renderer.calls, 0);
}

#[test]
fn test_other_events_are_ignored() {
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();

    for _ in 0..3 {
        assert_eq!(frame_loop.handle(LoopEvent::Other, &mut renderer), LoopState::Running);
    }
    assert_eq!(frame_loop.frame(), FrameCounter::ZERO);
    assert_eq!(renderer.calls, 0);
}

#[test]
fn test_failed_frame_does_not_advance_counter() {
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::failing_on(&[1, 2]);

    for _ in 0..5 {
        frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    }

    assert_eq!(renderer.calls, 5);
    assert_eq!(frame_loop.frame().get(), 3);
    // Only presented frames enter the render-time history
    assert_eq!(frame_loop.stats().len(), 3);
    // The failed frames are retried with the same counter
    assert_eq!(
        renderer.rendered,
        vec![FrameCounter::new(0), FrameCounter::new(1), FrameCounter::new(2)]
    );
    assert_eq!(frame_loop.state(), LoopState::Running);
}

#[test]
fn test_redraw_releases_gate() {
    let gate = RedrawGate::new();
    let mut frame_loop = FrameLoop::new(gate.clone());
    let mut renderer = RecordingRenderer::new();

    assert!(gate.try_arm());
    assert!(frame_loop.gate().is_pending());
    frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    assert!(!gate.is_pending());
}

#[test]
fn test_geometry_unchanged_by_frames() {
    struct SceneRenderer {
        scene: Scene,
    }
    impl FrameRenderer for SceneRenderer {
        fn render_frame(&mut self, _frame: FrameCounter) -> anyhow::Result<()> {
            // A renderer only ever reads the scene
            let _ = self.scene.vertex_bytes();
            Ok(())
        }
    }

    let mut renderer = SceneRenderer {
        scene: Scene::new(SceneKind::Tetrahedron),
    };
    let before = renderer.scene.clone();
    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    for _ in 0..100 {
        frame_loop.handle(LoopEvent::Redraw, &mut renderer);
    }
    assert_eq!(renderer.scene, before);
}

// ============================================================================
// Blocking run loop
// ============================================================================

#[test]
fn test_run_stops_on_quit() {
    let (tx, rx) = mpsc::channel();
    for _ in 0..10 {
        tx.send(LoopEvent::Redraw).unwrap();
    }
    tx.send(LoopEvent::Quit).unwrap();
    // Still queued behind the quit
    tx.send(LoopEvent::Redraw).unwrap();

    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();
    let frame = frame_loop.run(&rx, &mut renderer);

    assert_eq!(frame.get(), 10);
    assert_eq!(renderer.rendered.len(), 10);
    assert_eq!(frame_loop.state(), LoopState::Terminated);
    // The trailing redraw was never consumed
    assert_eq!(rx.try_recv(), Ok(LoopEvent::Redraw));
}

#[test]
fn test_run_stops_when_senders_drop() {
    let (tx, rx) = mpsc::channel();
    tx.send(LoopEvent::Redraw).unwrap();
    tx.send(LoopEvent::Other).unwrap();
    drop(tx);

    let mut frame_loop = FrameLoop::new(RedrawGate::new());
    let mut renderer = RecordingRenderer::new();
    assert_eq!(frame_loop.run(&rx, &mut renderer).get(), 1);
    assert_eq!(frame_loop.state(), LoopState::Terminated);
}

// ============================================================================
// Signals
// ============================================================================

#[test]
fn test_gate_arms_once() {
    let gate = RedrawGate::new();
    let shared = gate.clone();
    assert!(!gate.is_pending());
    assert!(gate.try_arm());
    assert!(!shared.try_arm());
    shared.release();
    assert!(gate.try_arm());
}

#[test]
fn test_sender_sink_reports_closed() {
    let (tx, rx) = mpsc::channel::<LoopEvent>();
    assert_eq!(tx.post(LoopEvent::Redraw), Ok(()));
    assert_eq!(rx.recv(), Ok(LoopEvent::Redraw));
    drop(rx);
    assert_eq!(tx.post(LoopEvent::Redraw), Err(SinkClosed));
}
