//! frameloop core crate.
//!
//! Runs an application's one-time initializer, then hands control to a host
//! run-loop that invokes the application's frame callback until the host
//! tears the loop down.

pub mod core;
pub mod driver;
pub mod host;
pub mod time;

pub mod logging;
