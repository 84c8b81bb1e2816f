/* src/server/core/rust/src/cache.rs */

//! In-memory TTL cache with in-flight deduplication.
//!
//! One `TtlCache` is built per application instance and shared through
//! `Arc`. Each key holds either a ready value with its expiry or the shared
//! future of the fetch currently in flight; callers arriving while a fetch is
//! pending await that same future instead of starting another.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde_json::Value;
use tokio::time::Instant;

use crate::errors::PageError;

type SharedFetch = Shared<BoxFuture<'static, Result<Value, PageError>>>;

/// Cache key namespaces. Keys from different namespaces never collide.
pub mod keys {
  pub const NAVBAR_CATEGORIES: &str = "navbar:categories";

  pub fn page(slug: &str) -> String {
    format!("page:{slug}")
  }

  pub fn public_data(file: &str) -> String {
    format!("public:data:{file}")
  }
}

/// Default TTL for page documents.
pub const PAGE_TTL: Duration = Duration::from_secs(120);

enum Slot {
  Ready { value: Value, expires_at: Instant },
  Pending { fetch: SharedFetch, generation: u64 },
}

#[derive(Default)]
pub struct TtlCache {
  slots: Mutex<HashMap<String, Slot>>,
  generation: AtomicU64,
}

impl TtlCache {
  pub fn new() -> Self {
    Self::default()
  }

  fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
    self.slots.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Return the cached value for `key`, or run `fetcher` once and cache its
  /// success for `ttl`. Failures are handed to every waiter and not cached.
  pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> Result<Value, PageError>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, PageError>> + Send + 'static,
  {
    let (fetch, generation) = {
      let mut slots = self.slots();
      match slots.get(key) {
        Some(Slot::Ready { value, expires_at }) if Instant::now() < *expires_at => {
          tracing::debug!(key, "cache hit");
          return Ok(value.clone());
        }
        Some(Slot::Pending { fetch, generation }) => {
          tracing::debug!(key, "joining in-flight fetch");
          (fetch.clone(), *generation)
        }
        _ => {
          let generation = self.generation.fetch_add(1, Ordering::Relaxed);
          let fetch = fetcher().boxed().shared();
          slots.insert(key.to_string(), Slot::Pending { fetch: fetch.clone(), generation });
          (fetch, generation)
        }
      }
    };

    let result = fetch.await;

    // Any waiter may settle the slot; only the generation that is still
    // pending gets to, so an invalidation during the fetch wins.
    let mut slots = self.slots();
    if matches!(slots.get(key), Some(Slot::Pending { generation: g, .. }) if *g == generation) {
      match &result {
        Ok(value) => {
          slots.insert(key.to_string(), Slot::Ready { value: value.clone(), expires_at: Instant::now() + ttl });
        }
        Err(err) => {
          tracing::debug!(key, error = %err, "fetch failed, not caching");
          slots.remove(key);
        }
      }
    }
    result
  }

  /// Cached value if present and fresh.
  pub fn peek(&self, key: &str) -> Option<Value> {
    match self.slots().get(key) {
      Some(Slot::Ready { value, expires_at }) if Instant::now() < *expires_at => Some(value.clone()),
      _ => None,
    }
  }

  pub fn invalidate(&self, key: &str) {
    if self.slots().remove(key).is_some() {
      tracing::debug!(key, "cache entry invalidated");
    }
  }

  pub fn invalidate_prefix(&self, prefix: &str) {
    let mut slots = self.slots();
    let before = slots.len();
    slots.retain(|k, _| !k.starts_with(prefix));
    tracing::debug!(prefix, removed = before - slots.len(), "cache prefix invalidated");
  }

  pub fn clear(&self) {
    self.slots().clear();
  }

  pub fn len(&self) -> usize {
    self.slots().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
