//! `tracing` initialization for the runner binary.

use std::io;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config file names one.
pub const DEFAULT_FILTER: &str = "robot_core=info,robot_runner=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber, writing to stderr so stdout stays free for
/// responses. `RUST_LOG` wins over `filter`.
///
/// Safe to call multiple times; only the first call has effect.
pub fn init(filter: Option<&str>) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

        // Another subscriber may already be installed (tests); keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}
