/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::PagewrightConfig;

pub const CONFIG_FILE: &str = "pagewright.toml";

/// Walk upward from `start` to find `pagewright.toml`, like Cargo.toml discovery
pub fn find_pagewright_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

/// Parse and validate; relative directories resolve against the file's parent.
pub fn load_pagewright_config(path: &Path) -> Result<PagewrightConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: PagewrightConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  let base = path.parent().unwrap_or_else(|| Path::new("."));
  config.validate(base).with_context(|| format!("invalid {}", path.display()))?;
  Ok(config)
}
