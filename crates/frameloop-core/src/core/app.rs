use anyhow::Result;

/// Application contract consumed by the driver.
pub trait App {
    /// Called exactly once, before any frame.
    ///
    /// All application-wide setup must be complete when this returns. An `Err`
    /// is fatal: the loop is never started.
    fn on_init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per host-scheduled iteration.
    ///
    /// The callback must not rely on the driver for timing or for knowing
    /// which iteration it is in.
    fn on_frame(&mut self);
}

/// An [`App`] assembled from two closures.
///
/// The init slot is `FnOnce` and is consumed on first use; later calls to
/// `on_init` are no-ops.
pub struct Hooks<I, F> {
    on_init:  Option<I>,
    on_frame: F,
}

impl<I, F> Hooks<I, F>
where
    I: FnOnce() -> Result<()>,
    F: FnMut(),
{
    pub fn new(on_init: I, on_frame: F) -> Self {
        Self {
            on_init: Some(on_init),
            on_frame,
        }
    }
}

impl<I, F> App for Hooks<I, F>
where
    I: FnOnce() -> Result<()>,
    F: FnMut(),
{
    fn on_init(&mut self) -> Result<()> {
        match self.on_init.take() {
            Some(init) => init(),
            None => Ok(()),
        }
    }

    fn on_frame(&mut self) {
        (self.on_frame)();
    }
}
