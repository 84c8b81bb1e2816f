/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

pub use loader::{find_pagewright_config, load_pagewright_config};
pub use types::*;
