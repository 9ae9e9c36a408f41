//! Main loop driver.
//!
//! Sequences the one-time initializer before loop registration, then hands
//! the rest of the process over to the host.

mod error;
mod lifecycle;
mod main_loop;

pub use error::DriverError;
pub use lifecycle::{Lifecycle, Termination};
pub use main_loop::Driver;
