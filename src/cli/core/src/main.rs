/* src/cli/core/src/main.rs */

mod check;
mod config;
mod logging;
mod preview;
mod render;
mod serve;
mod ui;
mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagewright_server::{DirSource, PageService, Site};

use config::{PagewrightConfig, find_pagewright_config, load_pagewright_config};

#[derive(Parser)]
#[command(name = "pagewright", about = "Pagewright page composition CLI")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve rendered pages and the preview API, reloading on content changes
  Serve {
    /// Path to pagewright.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Render one page and print its HTML
  Render {
    /// Page slug (e.g. home)
    slug: String,
    /// Path to pagewright.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Normalize every page and report unknown component types
  Check {
    /// Path to pagewright.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Watch a draft component file and write live preview HTML
  Preview {
    /// JSON file holding the editor's component array
    draft: PathBuf,
    /// Output HTML file
    #[arg(short, long, default_value = "preview.html")]
    out: PathBuf,
    /// Path to pagewright.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, PagewrightConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_pagewright_config(&cwd)?
    }
  };
  let config = load_pagewright_config(&path)?;
  Ok((path, config))
}

fn base_dir(config_path: &Path) -> PathBuf {
  config_path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Wire config into a site backed by the content directory.
fn build_site(config: &PagewrightConfig, base: &Path) -> Site {
  let source = DirSource::new(config.content_path(base));
  let service = PageService::new(Arc::new(source), config.cache.ttls());
  Site::with_templates(&config.site.name, service, config.templates_path(base))
    .with_debounce(Duration::from_millis(config.preview.debounce_ms))
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { config, port } => {
      let (path, config) = resolve_config(config)?;
      logging::init(&config.log.level);
      let base = base_dir(&path);
      let site = Arc::new(build_site(&config, &base));
      serve::run(site, &config, &base, port.unwrap_or(config.server.port)).await?;
    }
    Command::Render { slug, config } => {
      let (path, config) = resolve_config(config)?;
      logging::init(&config.log.level);
      let site = build_site(&config, &base_dir(&path));
      render::run(&site, &slug).await?;
    }
    Command::Check { config } => {
      let (path, config) = resolve_config(config)?;
      logging::init(&config.log.level);
      let site = build_site(&config, &base_dir(&path));
      check::run(&site).await?;
    }
    Command::Preview { draft, out, config } => {
      let (path, config) = resolve_config(config)?;
      logging::init(&config.log.level);
      let site = build_site(&config, &base_dir(&path));
      preview::run(&site, &draft, &out).await?;
    }
  }

  Ok(())
}
