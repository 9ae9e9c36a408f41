use std::fmt;

use crate::host::HostError;

/// Failure observed by the driver. Every variant is fatal; nothing is retried.
#[derive(Debug)]
pub enum DriverError {
    /// The driver (or the process) has already been started.
    AlreadyStarted,
    /// The application's initializer failed.
    Init(anyhow::Error),
    /// The host refused the loop registration.
    Registration(HostError),
    /// The host loop itself failed after registration.
    Host(HostError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => f.write_str("main loop driver was already started"),
            Self::Init(e) => write!(f, "application initialization failed: {e:#}"),
            Self::Registration(e) => write!(f, "main loop registration failed: {e}"),
            Self::Host(e) => write!(f, "host loop failed: {e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AlreadyStarted => None,
            Self::Init(e) => Some(&**e),
            Self::Registration(e) | Self::Host(e) => Some(e),
        }
    }
}
