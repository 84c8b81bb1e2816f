/* src/cli/core/src/logging.rs */

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  // A subscriber may already be set (tests, embedding); keep the first one.
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
