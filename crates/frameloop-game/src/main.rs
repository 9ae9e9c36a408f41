mod game;

use frameloop_core::driver::Driver;
use frameloop_core::host::{HeadlessConfig, HeadlessHost, HostLoop, WindowConfig, WindowHost};
use frameloop_core::logging::{init_logging, LoggingConfig};

use game::Game;

const HOST_ENV: &str = "FRAMELOOP_HOST";
const MAX_FRAMES_ENV: &str = "FRAMELOOP_MAX_FRAMES";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum HostKind {
    Window,
    Headless,
}

/// Host selection read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct LaunchConfig {
    host:       HostKind,
    max_frames: Option<u64>,
}

impl LaunchConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unrecognized values are logged and replaced by defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = match lookup(HOST_ENV).as_deref().map(str::trim) {
            None | Some("") | Some("window") => HostKind::Window,
            Some("headless") => HostKind::Headless,
            Some(other) => {
                log::warn!("{HOST_ENV}={other:?} is not `window` or `headless`; using window");
                HostKind::Window
            }
        };

        let max_frames = lookup(MAX_FRAMES_ENV).and_then(|raw| match raw.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("{MAX_FRAMES_ENV}={raw:?} is not a frame count; running indefinitely");
                None
            }
        });

        Self { host, max_frames }
    }

    fn build_host(&self) -> Box<dyn HostLoop> {
        match self.host {
            HostKind::Window => {
                if self.max_frames.is_some() {
                    log::warn!("{MAX_FRAMES_ENV} only applies to the headless host");
                }
                Box::new(WindowHost::new(WindowConfig {
                    title: "frameloop".to_string(),
                    ..WindowConfig::default()
                }))
            }
            HostKind::Headless => Box::new(HeadlessHost::new(HeadlessConfig {
                max_frames: self.max_frames,
            })),
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let launch = LaunchConfig::from_env();
    log::info!("starting with {:?} host", launch.host);

    Driver::new(Game::new(), launch.build_host()).start()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_to_window_host() {
        let cfg = LaunchConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, LaunchConfig { host: HostKind::Window, max_frames: None });
    }

    #[test]
    fn headless_with_frame_limit() {
        let cfg = LaunchConfig::from_lookup(lookup(&[
            (HOST_ENV, "headless"),
            (MAX_FRAMES_ENV, "300"),
        ]));
        assert_eq!(cfg, LaunchConfig { host: HostKind::Headless, max_frames: Some(300) });
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = LaunchConfig::from_lookup(lookup(&[
            (HOST_ENV, "console"),
            (MAX_FRAMES_ENV, "lots"),
        ]));
        assert_eq!(cfg, LaunchConfig { host: HostKind::Window, max_frames: None });
    }
}
