/* src/cli/core/src/watch.rs */

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use pagewright_server::{PageService, keys};
use tokio::sync::mpsc;

/// Watch `path` and forward every created, modified or removed path.
/// The watcher must stay alive for events to flow.
pub fn watch_path(
  path: &Path,
  mode: RecursiveMode,
) -> Result<(RecommendedWatcher, mpsc::Receiver<PathBuf>)> {
  let (tx, rx) = mpsc::channel::<PathBuf>(64);
  let mut watcher = RecommendedWatcher::new(
    move |res: Result<notify::Event, notify::Error>| {
      let Ok(event) = res else { return };
      if event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove() {
        for path in event.paths {
          let _ = tx.blocking_send(path);
        }
      }
    },
    notify::Config::default(),
  )
  .context("failed to create file watcher")?;
  watcher.watch(path, mode).with_context(|| format!("failed to watch {}", path.display()))?;
  Ok((watcher, rx))
}

/// What a changed file under the content directory means for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentChange {
  Page(String),
  Categories,
  PublicData(String),
}

fn name(c: Component<'_>) -> Option<&str> {
  match c {
    Component::Normal(s) => s.to_str(),
    _ => None,
  }
}

/// Map a changed path to a content change; `None` for anything else.
pub fn classify(content_root: &Path, path: &Path) -> Option<ContentChange> {
  let rel = path.strip_prefix(content_root).ok()?;
  if rel.extension().is_none_or(|ext| ext != "json") {
    return None;
  }
  let parts: Vec<&str> = rel.components().map(name).collect::<Option<_>>()?;
  match parts.as_slice() {
    ["pages", file] => Some(ContentChange::Page(file.strip_suffix(".json")?.to_string())),
    ["categories.json"] => Some(ContentChange::Categories),
    ["public", "data", file] => Some(ContentChange::PublicData((*file).to_string())),
    _ => None,
  }
}

/// Drop the stale cache entry; page changes also notify subscribers.
pub fn apply(service: &PageService, change: &ContentChange) {
  match change {
    ContentChange::Page(slug) => {
      service.cache().invalidate(&keys::page(slug));
      service.updates().publish(slug);
    }
    ContentChange::Categories => service.cache().invalidate(keys::NAVBAR_CATEGORIES),
    ContentChange::PublicData(file) => service.cache().invalidate(&keys::public_data(file)),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use pagewright_server::{CacheTtls, MemorySource};
  use serde_json::json;

  use super::*;

  #[test]
  fn classify_content_paths() {
    let root = Path::new("/site/content");
    assert_eq!(classify(root, &root.join("pages/home.json")), Some(ContentChange::Page("home".into())));
    assert_eq!(classify(root, &root.join("categories.json")), Some(ContentChange::Categories));
    assert_eq!(
      classify(root, &root.join("public/data/stats.json")),
      Some(ContentChange::PublicData("stats.json".into()))
    );
  }

  #[test]
  fn classify_ignores_unrelated_paths() {
    let root = Path::new("/site/content");
    assert_eq!(classify(root, &root.join("pages/home.json.swp")), None);
    assert_eq!(classify(root, &root.join("pages/drafts/home.json")), None);
    assert_eq!(classify(root, &root.join("notes.json")), None);
    assert_eq!(classify(root, Path::new("/elsewhere/pages/home.json")), None);
  }

  #[tokio::test]
  async fn page_change_invalidates_and_publishes() {
    let source = MemorySource::new().with_page("home", json!({"components": []}));
    let service = PageService::new(Arc::new(source), CacheTtls::default());
    service.page("home").await.unwrap();
    assert!(service.cache().peek(&keys::page("home")).is_some());

    let mut rx = service.updates().subscribe();
    apply(&service, &ContentChange::Page("home".into()));
    assert!(service.cache().peek(&keys::page("home")).is_none());
    assert_eq!(rx.recv().await.unwrap().slug, "home");
  }

  #[tokio::test]
  async fn categories_change_keeps_pages_cached() {
    let source = MemorySource::new()
      .with_page("home", json!({"components": []}))
      .with_categories(json!([{"name": "ERP"}]));
    let service = PageService::new(Arc::new(source), CacheTtls::default());
    service.page("home").await.unwrap();
    service.categories().await.unwrap();

    apply(&service, &ContentChange::Categories);
    assert!(service.cache().peek(keys::NAVBAR_CATEGORIES).is_none());
    assert!(service.cache().peek(&keys::page("home")).is_some());
  }
}
