use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::App;
use crate::host::{FramePacing, HostLoop};

use super::error::DriverError;
use super::lifecycle::{Lifecycle, Termination};

/// Set by the first `Driver::start` in the process.
static STARTED: AtomicBool = AtomicBool::new(false);

/// Runs `App::on_init` once, then gives the frame callback to a host loop.
pub struct Driver<A, H> {
    app:   A,
    host:  H,
    state: Lifecycle,
}

impl<A, H> Driver<A, H>
where
    A: App,
    H: HostLoop,
{
    pub fn new(app: A, host: H) -> Self {
        Self {
            app,
            host,
            state: Lifecycle::Uninitialized,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Process entry point. Never returns.
    ///
    /// Exits with status `0` once the host tears the loop down and `1` on any
    /// driver-observed failure. Only the first `start` in a process runs.
    pub fn start(mut self) -> ! {
        let result = if STARTED.swap(true, Ordering::AcqRel) {
            Err(DriverError::AlreadyStarted)
        } else {
            self.run()
        };

        // Release the app and the host before the process goes away.
        drop(self);

        match result {
            Ok(()) => {
                log::info!("host loop torn down");
                std::process::exit(0)
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1)
            }
        }
    }

    /// Initializes the app, registers the frame callback and drives the host
    /// loop until the host tears it down.
    ///
    /// Valid only from `Uninitialized`; any other state yields
    /// [`DriverError::AlreadyStarted`] without touching the app or host.
    pub fn run(&mut self) -> Result<(), DriverError> {
        if self.state != Lifecycle::Uninitialized {
            return Err(DriverError::AlreadyStarted);
        }

        self.transition(Lifecycle::Initializing);
        log::info!("initializing application");
        if let Err(e) = self.app.on_init() {
            self.transition(Lifecycle::Terminated(Termination::InitFailed));
            return Err(DriverError::Init(e));
        }

        self.transition(Lifecycle::Registering);
        let pacing = FramePacing::UNTHROTTLED;
        log::info!("registering frame callback ({pacing})");
        if let Err(e) = self.host.register(pacing) {
            self.transition(Lifecycle::Terminated(Termination::RegistrationFailed));
            return Err(DriverError::Registration(e));
        }

        self.transition(Lifecycle::Running);
        log::info!("handing control to host loop");

        // Split borrows: the host drives while the closure holds the app.
        let (app, host) = (&mut self.app, &mut self.host);
        host.drive(&mut || app.on_frame()).map_err(DriverError::Host)
    }

    fn transition(&mut self, next: Lifecycle) {
        log::debug!("driver: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hooks;
    use crate::host::{HeadlessHost, HostError};
    use std::cell::Cell;

    /// Host stub that records what the driver asked of it.
    #[derive(Default)]
    struct RecordingHost {
        frames:        u32,
        refuse:        bool,
        registrations: Vec<FramePacing>,
        drives:        u32,
    }

    impl RecordingHost {
        fn running(frames: u32) -> Self {
            Self { frames, ..Self::default() }
        }

        fn refusing() -> Self {
            Self { refuse: true, ..Self::default() }
        }
    }

    impl HostLoop for RecordingHost {
        fn register(&mut self, pacing: FramePacing) -> Result<(), HostError> {
            self.registrations.push(pacing);
            if self.refuse {
                return Err(HostError::Platform(anyhow::anyhow!("loop slot taken")));
            }
            Ok(())
        }

        fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError> {
            self.drives += 1;
            for _ in 0..self.frames {
                frame();
            }
            Ok(())
        }
    }

    #[test]
    fn init_effects_visible_on_first_frame() {
        let initialized = Cell::new(false);
        let seen_on_first = Cell::new(None);

        let app = Hooks::new(
            || {
                initialized.set(true);
                Ok(())
            },
            || {
                if seen_on_first.get().is_none() {
                    seen_on_first.set(Some(initialized.get()));
                }
            },
        );

        Driver::new(app, RecordingHost::running(3)).run().unwrap();
        assert_eq!(seen_on_first.get(), Some(true));
    }

    #[test]
    fn init_runs_once_regardless_of_frame_count() {
        let inits = Cell::new(0u32);
        let frames = Cell::new(0u32);

        let app = Hooks::new(
            || {
                inits.set(inits.get() + 1);
                Ok(())
            },
            || frames.set(frames.get() + 1),
        );

        let mut driver = Driver::new(app, RecordingHost::running(250));
        driver.run().unwrap();

        assert_eq!(inits.get(), 1);
        assert_eq!(frames.get(), 250);
    }

    #[test]
    fn registration_requests_unthrottled_pacing() {
        let mut driver = Driver::new(Hooks::new(|| Ok(()), || {}), RecordingHost::running(1));
        driver.run().unwrap();

        assert_eq!(driver.host().registrations, vec![FramePacing::UNTHROTTLED]);
        assert_eq!(driver.host().drives, 1);
    }

    #[test]
    fn failed_init_never_reaches_the_host() {
        let frames = Cell::new(0u32);
        let app = Hooks::new(
            || Err(anyhow::anyhow!("missing save data")),
            || frames.set(frames.get() + 1),
        );

        let mut driver = Driver::new(app, RecordingHost::running(5));
        let err = driver.run().unwrap_err();

        assert!(matches!(err, DriverError::Init(_)));
        assert_eq!(frames.get(), 0);
        assert!(driver.host().registrations.is_empty());
        assert_eq!(driver.host().drives, 0);
        assert_eq!(driver.state(), Lifecycle::Terminated(Termination::InitFailed));
    }

    #[test]
    fn refused_registration_is_fatal() {
        let frames = Cell::new(0u32);
        let app = Hooks::new(|| Ok(()), || frames.set(frames.get() + 1));

        let mut driver = Driver::new(app, RecordingHost::refusing());
        let err = driver.run().unwrap_err();

        assert!(matches!(err, DriverError::Registration(HostError::Platform(_))));
        assert_eq!(frames.get(), 0);
        assert_eq!(driver.host().drives, 0);
        assert_eq!(
            driver.state(),
            Lifecycle::Terminated(Termination::RegistrationFailed)
        );
    }

    #[test]
    fn driver_cannot_be_rerun() {
        let inits = Cell::new(0u32);
        let app = Hooks::new(
            || {
                inits.set(inits.get() + 1);
                Ok(())
            },
            || {},
        );

        let mut driver = Driver::new(app, RecordingHost::running(2));
        driver.run().unwrap();
        assert!(driver.state().is_running());

        assert!(matches!(driver.run(), Err(DriverError::AlreadyStarted)));
        assert_eq!(inits.get(), 1);
        assert_eq!(driver.host().registrations.len(), 1);
        assert_eq!(driver.host().drives, 1);
    }

    #[test]
    fn failed_driver_cannot_be_rerun() {
        let mut driver = Driver::new(
            Hooks::new(|| Err(anyhow::anyhow!("boom")), || {}),
            RecordingHost::running(1),
        );
        driver.run().unwrap_err();
        assert!(driver.state().is_terminated());

        assert!(matches!(driver.run(), Err(DriverError::AlreadyStarted)));
        assert!(driver.host().registrations.is_empty());
    }

    #[test]
    fn host_failure_after_handoff_is_reported() {
        struct BrokenLoop;

        impl HostLoop for BrokenLoop {
            fn register(&mut self, _: FramePacing) -> Result<(), HostError> {
                Ok(())
            }

            fn drive(&mut self, _: &mut dyn FnMut()) -> Result<(), HostError> {
                Err(HostError::Platform(anyhow::anyhow!("display lost")))
            }
        }

        let mut driver = Driver::new(Hooks::new(|| Ok(()), || {}), BrokenLoop);
        let err = driver.run().unwrap_err();

        assert!(matches!(err, DriverError::Host(_)));
        assert!(driver.state().is_running());
        assert_eq!(err.to_string(), "host loop failed: host platform error: display lost");
    }

    #[test]
    fn five_headless_iterations() {
        let initialized = Cell::new(false);
        let counter = Cell::new(0u32);

        let app = Hooks::new(
            || {
                initialized.set(true);
                Ok(())
            },
            || {
                assert!(initialized.get());
                counter.set(counter.get() + 1);
            },
        );

        let mut host = HeadlessHost::with_max_frames(5);
        let result = Driver::new(app, &mut host).run();

        assert!(result.is_ok());
        assert!(initialized.get());
        assert_eq!(counter.get(), 5);
        assert_eq!(host.pacing(), Some(FramePacing::UNTHROTTLED));
        assert_eq!(host.frames_dispatched(), 5);
    }

    #[test]
    fn reused_headless_host_refuses_second_driver() {
        let mut host = HeadlessHost::with_max_frames(1);
        Driver::new(Hooks::new(|| Ok(()), || {}), &mut host).run().unwrap();

        let frames = Cell::new(0u32);
        let mut second = Driver::new(
            Hooks::new(|| Ok(()), || frames.set(frames.get() + 1)),
            &mut host,
        );
        let err = second.run().unwrap_err();

        assert!(matches!(err, DriverError::Registration(HostError::AlreadyRegistered)));
        assert_eq!(frames.get(), 0);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            DriverError::Init(anyhow::anyhow!("bad seed")).to_string(),
            "application initialization failed: bad seed"
        );
        assert_eq!(
            DriverError::Registration(HostError::AlreadyRegistered).to_string(),
            "main loop registration failed: host already has a registered main loop"
        );
    }
}
