/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use pagewright_server::CacheTtls;
use serde::Deserialize;

/// Longest accepted preview debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 5000;

#[derive(Debug, Clone, Deserialize)]
pub struct PagewrightConfig {
  pub site: SiteSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub cache: CacheSection,
  #[serde(default)]
  pub preview: PreviewSection,
  #[serde(default)]
  pub log: LogSection,
}

impl PagewrightConfig {
  pub fn content_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.site.content_dir)
  }

  pub fn templates_path(&self, base_dir: &Path) -> Option<PathBuf> {
    self.site.templates_dir.as_ref().map(|dir| base_dir.join(dir))
  }

  /// `base_dir` is the directory holding pagewright.toml.
  pub fn validate(&self, base_dir: &Path) -> Result<()> {
    if self.site.name.trim().is_empty() {
      bail!("site.name must not be empty");
    }
    if self.cache.page_ttl_secs == 0 {
      bail!("cache.page_ttl_secs must be greater than 0");
    }
    if self.preview.debounce_ms > MAX_DEBOUNCE_MS {
      bail!("preview.debounce_ms must be at most {MAX_DEBOUNCE_MS} (got {})", self.preview.debounce_ms);
    }
    let content = self.content_path(base_dir);
    if !content.is_dir() {
      bail!("site.content_dir not found: {}", content.display());
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  pub name: String,
  #[serde(default = "default_content_dir")]
  pub content_dir: String,
  pub templates_dir: Option<String>,
}

fn default_content_dir() -> String {
  "content".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_port")]
  pub port: u16,
}

fn default_port() -> u16 {
  3000
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { port: default_port() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
  #[serde(default = "default_page_ttl")]
  pub page_ttl_secs: u64,
  #[serde(default = "default_navbar_ttl")]
  pub navbar_ttl_secs: u64,
  #[serde(default = "default_public_data_ttl")]
  pub public_data_ttl_secs: u64,
}

fn default_page_ttl() -> u64 {
  120
}

fn default_navbar_ttl() -> u64 {
  300
}

fn default_public_data_ttl() -> u64 {
  600
}

impl Default for CacheSection {
  fn default() -> Self {
    Self {
      page_ttl_secs: default_page_ttl(),
      navbar_ttl_secs: default_navbar_ttl(),
      public_data_ttl_secs: default_public_data_ttl(),
    }
  }
}

impl CacheSection {
  pub fn ttls(&self) -> CacheTtls {
    CacheTtls {
      page: Duration::from_secs(self.page_ttl_secs),
      navbar: Duration::from_secs(self.navbar_ttl_secs),
      public_data: Duration::from_secs(self.public_data_ttl_secs),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSection {
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
  80
}

impl Default for PreviewSection {
  fn default() -> Self {
    Self { debounce_ms: default_debounce_ms() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
  #[serde(default = "default_level")]
  pub level: String,
}

fn default_level() -> String {
  "info".to_string()
}

impl Default for LogSection {
  fn default() -> Self {
    Self { level: default_level() }
  }
}
