/* src/cli/core/src/preview.rs */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use notify::RecursiveMode;
use pagewright_server::Site;
use pagewright_server::injector::escape_html;
use pagewright_server::preview::to_html;
use serde_json::Value;

use crate::ui;
use crate::watch;

/// Editor state as saved to disk: a bare component array or `{ "components": [...] }`.
pub fn parse_draft(text: &str) -> Result<Vec<Value>> {
  let value: Value = serde_json::from_str(text).context("draft is not valid JSON")?;
  match value {
    Value::Array(list) => Ok(list),
    Value::Object(mut map) => match map.remove("components") {
      Some(Value::Array(list)) => Ok(list),
      _ => bail!("draft object needs a `components` array"),
    },
    _ => bail!("draft must be a component array"),
  }
}

fn read_draft(path: &Path) -> Result<Vec<Value>> {
  let text =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_draft(&text)
}

fn document(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{} preview</title></head>\n<body>\n{body}\n</body>\n</html>\n",
    escape_html(title)
  )
}

/// Re-render `out` whenever `draft` changes, debounced by the site's window.
pub async fn run(site: &Site, draft: &Path, out: &Path) -> Result<()> {
  ui::banner("preview");
  let draft = draft.canonicalize().with_context(|| format!("failed to resolve {}", draft.display()))?;
  let dir = draft.parent().context("draft file has no parent directory")?;

  let session = site.preview_session();
  let mut rendered = session.subscribe();
  session.edit(read_draft(&draft)?);

  let (_watcher, mut changes) = watch::watch_path(dir, RecursiveMode::NonRecursive)?;
  ui::arrow(&format!("watching {}", draft.display()));

  loop {
    tokio::select! {
      Some(path) = changes.recv() => {
        if path != draft {
          continue;
        }
        match read_draft(&draft) {
          Ok(components) => session.edit(components),
          Err(e) => ui::fail(&format!("{e:#}")),
        }
      }
      res = rendered.changed() => {
        if res.is_err() {
          break;
        }
        let entries = Arc::clone(&rendered.borrow_and_update());
        let html = document(site.name(), &to_html(&entries));
        tokio::fs::write(out, html).await.with_context(|| format!("failed to write {}", out.display()))?;
        ui::ok(&format!("{} ({} components)", out.display(), entries.len()));
      }
      _ = tokio::signal::ctrl_c() => break,
    }
  }
  Ok(())
}
