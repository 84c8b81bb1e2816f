/* src/cli/core/src/render.rs */

use std::io::Write;

use anyhow::{Context, Result, bail};
use pagewright_server::{PageView, Site};

/// Print the page's rendered sections to stdout.
pub async fn run(site: &Site, slug: &str) -> Result<()> {
  let view = site.render_page(slug).await;
  let html = view.to_html();
  let mut out = std::io::stdout().lock();
  writeln!(out, "{html}").context("failed to write to stdout")?;
  match view {
    PageView::Error { message, .. } => bail!("page '{slug}' failed to load: {message}"),
    PageView::NoData { .. } => bail!("no content for page '{slug}'"),
    _ => Ok(()),
  }
}
