//! Window, event loop and redraw timer
//!
//! The timer thread posts [`LoopEvent::Redraw`] as a winit user event; the
//! main thread feeds those and close/Escape into the [`FrameLoop`].

use std::sync::Arc;

use anyhow::Context;
use hello3d_core::config::WindowConfig;
use hello3d_core::{
    Config, FrameCounter, FrameLoop, InitError, LoopEvent, LoopState, RedrawGate, SignalSink,
    SinkClosed, TickTimer,
};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::graphics::Renderer;

/// Timer sink that wakes the winit event loop.
pub struct ProxySink(pub EventLoopProxy<LoopEvent>);

impl SignalSink for ProxySink {
    fn post(&self, event: LoopEvent) -> Result<(), SinkClosed> {
        self.0.send_event(event).map_err(|_| SinkClosed)
    }
}

/// Everything the demo owns while running.
///
/// Field order is drop order: the timer stops before the GPU resources go,
/// and those go before the window.
struct DemoApp {
    timer: Option<TickTimer>,
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    frame_loop: FrameLoop,
    proxy: EventLoopProxy<LoopEvent>,
    config: Config,
    init_error: Option<anyhow::Error>,
}

impl DemoApp {
    fn new(config: Config, proxy: EventLoopProxy<LoopEvent>) -> Self {
        Self {
            timer: None,
            renderer: None,
            window: None,
            frame_loop: FrameLoop::new(RedrawGate::new()),
            proxy,
            config,
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(window_attributes(&self.config.window))
            .map_err(|e| InitError::Window(e.to_string()))?;
        let window = Arc::new(window);

        let renderer = Renderer::new(window.clone(), &self.config)?;

        let timer = TickTimer::start(
            self.config.timer_interval(),
            ProxySink(self.proxy.clone()),
            self.frame_loop.gate().clone(),
        )
        .map_err(InitError::Timer)?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.timer = Some(timer);
        Ok(())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: LoopEvent) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if self.frame_loop.handle(event, renderer) == LoopState::Terminated {
            // Stop ticks before the loop winds down
            self.timer = None;
            event_loop.exit();
        }
    }

    fn handle_key_input(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state == ElementState::Pressed
            && let PhysicalKey::Code(KeyCode::Escape) = event.physical_key
        {
            self.dispatch(event_loop, LoopEvent::Quit);
        }
    }
}

/// Fixed-size window in physical pixels, matching the surface that text
/// and label positions are laid out in.
fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
}

impl ApplicationHandler<LoopEvent> for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: LoopEvent) {
        self.dispatch(event_loop, event);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.dispatch(event_loop, LoopEvent::Quit);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key_input(event_loop, event);
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            _ => self.dispatch(event_loop, LoopEvent::Other),
        }
    }
}

/// Open the window and run until quit.
///
/// Returns the number of frames presented. Any initialization failure is
/// returned after everything created so far has been dropped.
pub fn run(config: Config) -> anyhow::Result<FrameCounter> {
    config.validate().map_err(InitError::from)?;

    let event_loop = EventLoop::<LoopEvent>::with_user_event()
        .build()
        .map_err(|e| InitError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    tracing::info!(
        "Starting {} scene, redraw every {:?}",
        config.render.scene,
        config.timer_interval()
    );

    let mut app = DemoApp::new(config, event_loop.create_proxy());
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }

    let frames = app.frame_loop.frame();
    tracing::info!(
        "Presented {} frames (avg {:.2} ms, max {:.2} ms over the last {})",
        frames,
        app.frame_loop.stats().average_ms(),
        app.frame_loop.stats().max_ms(),
        app.frame_loop.stats().len()
    );
    Ok(frames)
}
