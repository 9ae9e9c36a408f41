//! Application-facing contracts.
//!
//! The driver only knows the two entry points defined here. Everything the
//! application does inside them is opaque to the runtime.

mod app;

pub use app::{App, Hooks};
