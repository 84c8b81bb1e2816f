/* src/server/core/rust/src/service.rs */

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{PAGE_TTL, TtlCache, keys};
use crate::errors::PageError;
use crate::page_data::PageData;
use crate::signal::PageUpdates;
use crate::source::{ContentSource, validate_slug};

/// Per-call-site cache lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
  pub page: Duration,
  pub navbar: Duration,
  pub public_data: Duration,
}

impl Default for CacheTtls {
  fn default() -> Self {
    Self { page: PAGE_TTL, navbar: Duration::from_secs(300), public_data: Duration::from_secs(600) }
  }
}

/// Cached access to content plus the admin save path. Cheap to clone; all
/// clones share one cache and one update channel.
#[derive(Clone)]
pub struct PageService {
  cache: Arc<TtlCache>,
  source: Arc<dyn ContentSource>,
  updates: PageUpdates,
  ttls: CacheTtls,
}

impl PageService {
  pub fn new(source: Arc<dyn ContentSource>, ttls: CacheTtls) -> Self {
    Self { cache: Arc::new(TtlCache::new()), source, updates: PageUpdates::new(), ttls }
  }

  pub fn cache(&self) -> &TtlCache {
    &self.cache
  }

  pub fn source(&self) -> &Arc<dyn ContentSource> {
    &self.source
  }

  pub fn updates(&self) -> &PageUpdates {
    &self.updates
  }

  pub fn ttls(&self) -> CacheTtls {
    self.ttls
  }

  /// Page document for `slug`, cached under `page:{slug}`.
  pub async fn page(&self, slug: &str) -> Result<Value, PageError> {
    let source = Arc::clone(&self.source);
    let owned = slug.to_string();
    self.cache.get_or_fetch(&keys::page(slug), self.ttls.page, move || source.fetch_page(&owned)).await
  }

  /// Drop the cached document and fetch it again.
  pub async fn refresh_page(&self, slug: &str) -> Result<Value, PageError> {
    self.cache.invalidate(&keys::page(slug));
    self.page(slug).await
  }

  pub async fn categories(&self) -> Result<Value, PageError> {
    let source = Arc::clone(&self.source);
    self
      .cache
      .get_or_fetch(keys::NAVBAR_CATEGORIES, self.ttls.navbar, move || source.fetch_categories())
      .await
  }

  pub async fn public_data(&self, file: &str) -> Result<Value, PageError> {
    let source = Arc::clone(&self.source);
    let owned = file.to_string();
    self
      .cache
      .get_or_fetch(&keys::public_data(file), self.ttls.public_data, move || {
        source.fetch_public_data(&owned)
      })
      .await
  }

  /// Persist a page document, drop its cache entry and tell every consumer
  /// of the slug to refetch.
  pub async fn save_page(&self, slug: &str, doc: Value) -> Result<(), PageError> {
    validate_slug(slug)?;
    validate_document(&doc)?;
    self.source.save_page(slug, doc).await?;
    self.cache.invalidate(&keys::page(slug));
    self.updates.publish(slug);
    Ok(())
  }

  /// A fresh page-state tracker bound to this service.
  pub fn page_data(&self) -> PageData {
    PageData::new(self.clone())
  }
}

/// A page document is an object with a `components` or `sections` array.
pub fn validate_document(doc: &Value) -> Result<(), PageError> {
  let has_list = ["components", "sections"].iter().any(|k| doc.get(*k).is_some_and(Value::is_array));
  if has_list {
    Ok(())
  } else {
    Err(PageError::validation("page document needs a `components` or `sections` array"))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::source::MemorySource;

  fn service(source: &MemorySource) -> PageService {
    PageService::new(Arc::new(source.clone()), CacheTtls::default())
  }

  #[tokio::test]
  async fn page_is_served_from_cache_until_refreshed() {
    let source = MemorySource::new().with_page("home", json!({"components": [1]}));
    let svc = service(&source);
    assert_eq!(svc.page("home").await, Ok(json!({"components": [1]})));

    source.save_page("home", json!({"components": [2]})).await.unwrap();
    assert_eq!(svc.page("home").await, Ok(json!({"components": [1]})));
    assert_eq!(svc.refresh_page("home").await, Ok(json!({"components": [2]})));
  }

  #[tokio::test]
  async fn save_invalidates_and_broadcasts() {
    let source = MemorySource::new().with_page("home", json!({"components": []}));
    let svc = service(&source);
    let mut rx = svc.updates().subscribe();
    svc.page("home").await.unwrap();

    let doc = json!({"components": [{"componentType": "HeroSection", "isVisible": true}]});
    svc.save_page("home", doc.clone()).await.unwrap();
    assert_eq!(rx.recv().await.map(|u| u.slug).ok(), Some("home".to_string()));
    assert!(svc.cache().peek(&keys::page("home")).is_none());
    assert_eq!(svc.page("home").await, Ok(doc));
  }

  #[tokio::test]
  async fn save_rejects_bad_documents() {
    let svc = service(&MemorySource::new());
    assert_eq!(svc.save_page("home", json!({"title": "x"})).await.map_err(|e| e.status()), Err(400));
    assert_eq!(svc.save_page("a/b", json!({"components": []})).await.map_err(|e| e.status()), Err(400));
  }

  #[tokio::test]
  async fn categories_and_public_data_use_their_own_keys() {
    let source = MemorySource::new()
      .with_categories(json!([{"name": "ERP"}]))
      .with_data("stats.json", json!({"clients": 120}));
    let svc = service(&source);
    assert_eq!(svc.categories().await, Ok(json!([{"name": "ERP"}])));
    assert_eq!(svc.public_data("stats.json").await, Ok(json!({"clients": 120})));
    assert!(svc.cache().peek(keys::NAVBAR_CATEGORIES).is_some());
    assert!(svc.cache().peek("public:data:stats.json").is_some());
  }
}
