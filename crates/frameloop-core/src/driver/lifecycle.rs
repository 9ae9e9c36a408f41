/// Driver lifecycle.
///
/// Transitions only move forward; once the driver leaves `Uninitialized` it
/// can never be started again.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    /// `App::on_init` is executing.
    Initializing,
    /// Init succeeded; the frame callback is being registered with the host.
    Registering,
    /// The host owns the loop. Terminal for the driver.
    Running,
    Terminated(Termination),
}

/// Why the driver stopped before reaching `Running`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Termination {
    InitFailed,
    RegistrationFailed,
}

impl Lifecycle {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}
