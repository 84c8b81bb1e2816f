/* src/server/core/rust/src/source.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::errors::PageError;

/// Where page documents, navbar categories and public JSON assets come from.
///
/// Futures are `'static` so they can be parked in the shared cache.
pub trait ContentSource: Send + Sync {
  fn fetch_page(&self, slug: &str) -> BoxFuture<'static, Result<Value, PageError>>;
  fn fetch_categories(&self) -> BoxFuture<'static, Result<Value, PageError>>;
  fn fetch_public_data(&self, file: &str) -> BoxFuture<'static, Result<Value, PageError>>;
  fn save_page(&self, slug: &str, doc: Value) -> BoxFuture<'static, Result<(), PageError>>;
  /// Slugs of every stored page, sorted.
  fn list_pages(&self) -> BoxFuture<'static, Result<Vec<String>, PageError>>;
}

/// Slugs are route keys: ASCII letters, digits, `-` and `_`.
pub fn validate_slug(slug: &str) -> Result<(), PageError> {
  if !slug.is_empty() && slug.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
    Ok(())
  } else {
    Err(PageError::validation(format!("invalid page slug '{slug}'")))
  }
}

fn validate_file(file: &str) -> Result<(), PageError> {
  let ok = !file.is_empty()
    && !file.starts_with('.')
    && !file.contains("..")
    && file.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
  if ok { Ok(()) } else { Err(PageError::validation(format!("invalid data file name '{file}'"))) }
}

fn ready<T: Send + 'static>(result: Result<T, PageError>) -> BoxFuture<'static, Result<T, PageError>> {
  async move { result }.boxed()
}

// -- Directory source --

/// Reads a content directory:
///
/// ```text
/// {root}/pages/{slug}.json
/// {root}/categories.json
/// {root}/public/data/{file}
/// ```
#[derive(Debug, Clone)]
pub struct DirSource {
  root: PathBuf,
}

impl DirSource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn page_path(&self, slug: &str) -> PathBuf {
    self.root.join("pages").join(format!("{slug}.json"))
  }
}

async fn read_json(path: PathBuf, what: String) -> Result<Value, PageError> {
  let text = match tokio::fs::read_to_string(&path).await {
    Ok(text) => text,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(PageError::not_found(format!("{what} not found")));
    }
    Err(e) => return Err(PageError::fetch(format!("failed to read {}: {e}", path.display()))),
  };
  serde_json::from_str(&text)
    .map_err(|e| PageError::fetch(format!("invalid JSON in {}: {e}", path.display())))
}

impl ContentSource for DirSource {
  fn fetch_page(&self, slug: &str) -> BoxFuture<'static, Result<Value, PageError>> {
    if let Err(e) = validate_slug(slug) {
      return ready(Err(e));
    }
    read_json(self.page_path(slug), format!("page '{slug}'")).boxed()
  }

  fn fetch_categories(&self) -> BoxFuture<'static, Result<Value, PageError>> {
    read_json(self.root.join("categories.json"), "categories".into()).boxed()
  }

  fn fetch_public_data(&self, file: &str) -> BoxFuture<'static, Result<Value, PageError>> {
    if let Err(e) = validate_file(file) {
      return ready(Err(e));
    }
    read_json(self.root.join("public").join("data").join(file), format!("data file '{file}'")).boxed()
  }

  fn save_page(&self, slug: &str, doc: Value) -> BoxFuture<'static, Result<(), PageError>> {
    if let Err(e) = validate_slug(slug) {
      return ready(Err(e));
    }
    let path = self.page_path(slug);
    async move {
      let body = serde_json::to_string_pretty(&doc)
        .map_err(|e| PageError::internal(format!("failed to serialize page: {e}")))?;
      if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
          .await
          .map_err(|e| PageError::internal(format!("failed to create {}: {e}", dir.display())))?;
      }
      tokio::fs::write(&path, body)
        .await
        .map_err(|e| PageError::internal(format!("failed to write {}: {e}", path.display())))
    }
    .boxed()
  }

  fn list_pages(&self) -> BoxFuture<'static, Result<Vec<String>, PageError>> {
    let dir = self.root.join("pages");
    async move {
      let mut entries = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| PageError::fetch(format!("failed to list {}: {e}", dir.display())))?;
      let mut slugs = Vec::new();
      while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PageError::fetch(format!("failed to list {}: {e}", dir.display())))?
      {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
          if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            slugs.push(stem.to_string());
          }
        }
      }
      slugs.sort();
      Ok(slugs)
    }
    .boxed()
  }
}

// -- Memory source --

#[derive(Default)]
struct MemoryState {
  pages: BTreeMap<String, Value>,
  categories: Option<Value>,
  data: BTreeMap<String, Value>,
}

/// Documents held in memory. Clones share the same store.
#[derive(Clone, Default)]
pub struct MemorySource {
  state: Arc<Mutex<MemoryState>>,
}

impl MemorySource {
  pub fn new() -> Self {
    Self::default()
  }

  fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
    f(&mut self.state.lock().unwrap_or_else(PoisonError::into_inner))
  }

  pub fn with_page(self, slug: &str, doc: Value) -> Self {
    self.with_state(|s| s.pages.insert(slug.to_string(), doc));
    self
  }

  pub fn with_categories(self, categories: Value) -> Self {
    self.with_state(|s| s.categories = Some(categories));
    self
  }

  pub fn with_data(self, file: &str, value: Value) -> Self {
    self.with_state(|s| s.data.insert(file.to_string(), value));
    self
  }

  pub fn remove_page(&self, slug: &str) {
    self.with_state(|s| s.pages.remove(slug));
  }
}

impl ContentSource for MemorySource {
  fn fetch_page(&self, slug: &str) -> BoxFuture<'static, Result<Value, PageError>> {
    let found = self.with_state(|s| s.pages.get(slug).cloned());
    ready(found.ok_or_else(|| PageError::not_found(format!("page '{slug}' not found"))))
  }

  fn fetch_categories(&self) -> BoxFuture<'static, Result<Value, PageError>> {
    let found = self.with_state(|s| s.categories.clone());
    ready(found.ok_or_else(|| PageError::not_found("categories not found")))
  }

  fn fetch_public_data(&self, file: &str) -> BoxFuture<'static, Result<Value, PageError>> {
    let found = self.with_state(|s| s.data.get(file).cloned());
    ready(found.ok_or_else(|| PageError::not_found(format!("data file '{file}' not found"))))
  }

  fn save_page(&self, slug: &str, doc: Value) -> BoxFuture<'static, Result<(), PageError>> {
    let result = validate_slug(slug).map(|()| {
      self.with_state(|s| s.pages.insert(slug.to_string(), doc));
    });
    ready(result)
  }

  fn list_pages(&self) -> BoxFuture<'static, Result<Vec<String>, PageError>> {
    ready(Ok(self.with_state(|s| s.pages.keys().cloned().collect())))
  }
}
