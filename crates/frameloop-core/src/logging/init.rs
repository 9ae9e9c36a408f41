use std::sync::Once;

/// Environment variable consulted before `RUST_LOG`.
pub const FILTER_ENV: &str = "FRAMELOOP_LOG";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "frameloop_core=debug,winit=warn"). When unset, `FRAMELOOP_LOG` and then
/// `RUST_LOG` are consulted; `default_level` applies if neither is set.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter:    Option<String>,
    pub write_style:   env_logger::WriteStyle,
    pub default_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter:    None,
            write_style:   env_logger::WriteStyle::Auto,
            default_level: log::LevelFilter::Info,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter string that will be handed to `env_logger`.
    fn resolve_filter(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| lookup(FILTER_ENV))
            .or_else(|| lookup("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger.
///
/// Idempotent: only the first call in a process has an effect. Returns `true`
/// if this call installed the logger.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolve_filter(|key| std::env::var(key).ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed by an embedding binary.
        installed = builder.try_init().is_ok();

        log::debug!("logging initialized");
    });

    installed
}
