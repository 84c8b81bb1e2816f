/* src/cli/core/src/serve.rs */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use notify::RecursiveMode;
use pagewright_server::Site;
use pagewright_server_axum::IntoAxumRouter;

use crate::config::PagewrightConfig;
use crate::ui;
use crate::watch::{self, classify};

pub async fn run(site: Arc<Site>, config: &PagewrightConfig, base: &Path, port: u16) -> Result<()> {
  ui::banner("serve");
  let content = config
    .content_path(base)
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", config.content_path(base).display()))?;
  ui::arrow(&format!("content  {}", content.display()));
  if let Some(templates) = config.templates_path(base) {
    ui::arrow(&format!("templates {}", templates.display()));
  }

  let (_watcher, mut changes) = watch::watch_path(&content, RecursiveMode::Recursive)?;
  let service = site.service().clone();
  let root = content.clone();
  let reload = tokio::spawn(async move {
    while let Some(path) = changes.recv().await {
      if let Some(change) = classify(&root, &path) {
        tracing::debug!(path = %path.display(), ?change, "content changed");
        watch::apply(&service, &change);
      }
    }
  });

  let addr = format!("0.0.0.0:{port}");
  ui::ok(&format!("listening on http://localhost:{port}"));
  ui::blank();
  let result = tokio::select! {
    res = site.serve(&addr) => res.map_err(|e| anyhow!("server error: {e}")),
    _ = tokio::signal::ctrl_c() => {
      ui::blank();
      ui::arrow("shutting down");
      Ok(())
    }
  };
  reload.abort();
  result
}
