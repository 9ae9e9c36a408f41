//! Frame timing for application code.
//!
//! The driver imposes no timing of its own. Frame callbacks that need `dt`
//! keep a `FrameClock` and call `tick()` once per invocation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
