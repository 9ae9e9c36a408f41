use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::{FramePacing, HostError, HostLoop};

/// Headless host configuration.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Tear the loop down after this many frames. `None` runs indefinitely.
    pub max_frames: Option<u64>,
}

/// Requests teardown of a running [`HeadlessHost`] loop.
///
/// Held by whatever embeds the host (a signal handler, a supervising thread
/// or a test), never handed to the application by the driver.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// The loop stops after the frame currently executing, if any.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Host that iterates on the calling thread without any window or platform
/// event loop.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    config:     HeadlessConfig,
    pacing:     Option<FramePacing>,
    shutdown:   ShutdownHandle,
    dispatched: u64,
}

impl HeadlessHost {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Runs exactly `frames` iterations, then tears down.
    pub fn with_max_frames(frames: u64) -> Self {
        Self::new(HeadlessConfig {
            max_frames: Some(frames),
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Pacing accepted by `register`, if registered.
    pub fn pacing(&self) -> Option<FramePacing> {
        self.pacing
    }

    pub fn frames_dispatched(&self) -> u64 {
        self.dispatched
    }

    fn should_stop(&self) -> bool {
        if self.shutdown.is_shutdown() {
            return true;
        }
        match self.config.max_frames {
            Some(max) => self.dispatched >= max,
            None => false,
        }
    }
}

impl HostLoop for HeadlessHost {
    fn register(&mut self, pacing: FramePacing) -> Result<(), HostError> {
        if self.pacing.is_some() {
            return Err(HostError::AlreadyRegistered);
        }
        log::debug!("headless host: registered ({pacing})");
        self.pacing = Some(pacing);
        Ok(())
    }

    fn drive(&mut self, frame: &mut dyn FnMut()) -> Result<(), HostError> {
        let pacing = self.pacing.ok_or(HostError::NotRegistered)?;
        let period = pacing.frame_period();

        // Fixed-step deadlines so oversleeping does not accumulate drift.
        let mut deadline = Instant::now();

        while !self.should_stop() {
            if let Some(period) = period {
                if self.dispatched > 0 {
                    deadline += period;
                    let now = Instant::now();
                    if deadline > now {
                        std::thread::sleep(deadline - now);
                    } else {
                        // Fell behind; resynchronize instead of bursting.
                        deadline = now;
                    }
                }
            }

            frame();
            self.dispatched += 1;
        }

        log::debug!("headless host: loop torn down after {} frames", self.dispatched);
        Ok(())
    }
}
