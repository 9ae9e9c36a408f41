use anyhow::{anyhow, Context};
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::{FramePacing, HostError, HostLoop};

/// Window configuration for [`WindowHost`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "frameloop".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Host backed by a `winit` event loop with a single window.
///
/// One frame is dispatched per `RedrawRequested`. Closing the window tears the
/// loop down.
pub struct WindowHost {
    config:     WindowConfig,
    event_loop: Option<EventLoop<()>>,
    pacing:     Option<FramePacing>,
}

impl WindowHost {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            event_loop: None,
            pacing: None,
        }
    }
}

impl Default for WindowHost {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl HostLoop for WindowHost {
    fn register(&mut self, pacing: FramePacing) -> Result<(), HostError> {
        if self.pacing.is_some() {
            return Err(HostError::AlreadyRegistered);
        }

        let event_loop = EventLoop::new()
            .context("failed to create winit EventLoop")
            .map_err(HostError::Platform)?;

        log::debug!("window host: registered ({pacing})");
        self.event_loop = Some(event_loop);
        self.pacing = Some(pacing);
        Ok(())
    }

    fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError> {
        let (Some(event_loop), Some(pacing)) = (self.event_loop.take(), self.pacing) else {
            return Err(HostError::NotRegistered);
        };

        let mut state = LoopState {
            config: self.config.clone(),
            pacing,
            frame,
            window: None,
            next_frame: Instant::now(),
            failure: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")
            .map_err(HostError::Platform)?;

        match state.failure.take() {
            Some(err) => Err(HostError::Platform(err)),
            None => Ok(()),
        }
    }
}

struct LoopState<'f> {
    config: WindowConfig,
    pacing: FramePacing,
    frame: &'f mut dyn FnMut(),

    window: Option<Window>,
    next_frame: Instant,
    failure: Option<anyhow::Error>,
}

impl LoopState<'_> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for LoopState<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, anyhow!(e).context("failed to create window")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_frame {
            window.request_redraw();
        }
        event_loop.set_control_flow(control_flow(self.pacing, self.next_frame));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(Window::id) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed; tearing down main loop");
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if now < self.next_frame {
                    return;
                }
                (self.frame)();
                self.next_frame = next_deadline(self.pacing, self.next_frame, now);
            }

            _ => {}
        }
    }
}

fn control_flow(pacing: FramePacing, next_frame: Instant) -> ControlFlow {
    match pacing {
        FramePacing::Unthrottled => ControlFlow::Poll,
        FramePacing::TargetFps(_) => ControlFlow::WaitUntil(next_frame),
    }
}

fn next_deadline(pacing: FramePacing, previous: Instant, now: Instant) -> Instant {
    match pacing.frame_period() {
        None => now,
        Some(period) => {
            let deadline = previous + period;
            // Resynchronize after a stall instead of replaying missed frames.
            if deadline < now { now } else { deadline }
        }
    }
}
