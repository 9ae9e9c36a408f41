use std::fmt;

/// Failure reported by a host run-loop.
#[derive(Debug)]
pub enum HostError {
    /// The host already accepted a loop registration.
    AlreadyRegistered,
    /// `drive` was called before a successful `register`.
    NotRegistered,
    /// The underlying platform refused or aborted the loop.
    Platform(anyhow::Error),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered => f.write_str("host already has a registered main loop"),
            Self::NotRegistered => f.write_str("host has no registered main loop"),
            Self::Platform(e) => write!(f, "host platform error: {e:#}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(&**e),
            _ => None,
        }
    }
}
