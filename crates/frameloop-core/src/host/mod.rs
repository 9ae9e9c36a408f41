//! Host run-loop facilities.
//!
//! A host owns frame scheduling. The driver registers once, then calls
//! [`HostLoop::drive`] and stays out of the way until the host tears down.

mod error;
mod headless;
mod window;

use std::num::NonZeroU32;
use std::time::Duration;

pub use error::HostError;
pub use headless::{HeadlessConfig, HeadlessHost, ShutdownHandle};
pub use window::{WindowConfig, WindowHost};

/// Pacing requested when registering a loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FramePacing {
    /// Iterate as fast as the host's own scheduling allows.
    Unthrottled,
    /// Iterate at (roughly) the given rate.
    TargetFps(NonZeroU32),
}

impl FramePacing {
    pub const UNTHROTTLED: FramePacing = FramePacing::Unthrottled;

    /// `0` means unthrottled, matching the emscripten main-loop convention.
    pub fn from_fps(fps: u32) -> Self {
        NonZeroU32::new(fps).map_or(Self::Unthrottled, Self::TargetFps)
    }

    pub fn fps(self) -> u32 {
        match self {
            Self::Unthrottled => 0,
            Self::TargetFps(fps) => fps.get(),
        }
    }

    /// Time between iterations, or `None` when unthrottled.
    pub fn frame_period(self) -> Option<Duration> {
        match self {
            Self::Unthrottled => None,
            Self::TargetFps(fps) => Some(Duration::from_secs_f64(1.0 / fps.get() as f64)),
        }
    }
}

impl std::fmt::Display for FramePacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unthrottled => f.write_str("unthrottled"),
            Self::TargetFps(fps) => write!(f, "{fps} fps"),
        }
    }
}

/// A scheduling facility that repeatedly invokes a registered frame callback.
///
/// Contract:
/// - `register` is accepted at most once per host instance
/// - `drive` invokes `frame` once per iteration, never concurrently, and
///   returns only when the host tears the loop down
pub trait HostLoop {
    fn register(&mut self, pacing: FramePacing) -> Result<(), HostError>;

    fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError>;
}

impl<H: HostLoop + ?Sized> HostLoop for &mut H {
    fn register(&mut self, pacing: FramePacing) -> Result<(), HostError> {
        (**self).register(pacing)
    }

    fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError> {
        (**self).drive(frame)
    }
}

impl<H: HostLoop + ?Sized> HostLoop for Box<H> {
    fn register(&mut self, pacing: FramePacing) -> Result<(), HostError> {
        (**self).register(pacing)
    }

    fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError> {
        (**self).drive(frame)
    }
}
