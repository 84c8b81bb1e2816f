/* src/server/core/rust/src/page_data.rs */

//! Slug-driven page document state.
//!
//! `PageData` tracks one slug at a time. Setting a slug starts a cached
//! fetch and a listener for page-updated broadcasts on that slug. The
//! listener is torn down when the slug changes; fetches are not cancelled,
//! but each carries the generation it was started under and only commits
//! while that generation is still current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::service::PageService;

/// Observable fetch state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageState {
  pub page_data: Option<Value>,
  pub loading: bool,
  pub error: Option<String>,
}

struct Shared {
  service: PageService,
  state: watch::Sender<PageState>,
  generation: AtomicU64,
}

pub struct PageData {
  shared: Arc<Shared>,
  slug: Mutex<Option<String>>,
  listener: Mutex<Option<JoinHandle<()>>>,
  fetches: Mutex<Vec<JoinHandle<()>>>,
}

impl PageData {
  pub fn new(service: PageService) -> Self {
    let (state, _) = watch::channel(PageState::default());
    Self {
      shared: Arc::new(Shared { service, state, generation: AtomicU64::new(0) }),
      slug: Mutex::new(None),
      listener: Mutex::new(None),
      fetches: Mutex::new(Vec::new()),
    }
  }

  pub fn state(&self) -> PageState {
    self.shared.state.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<PageState> {
    self.shared.state.subscribe()
  }

  pub fn slug(&self) -> Option<String> {
    self.slug.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Wait until no fetch is pending and return the state.
  pub async fn settled(&self) -> PageState {
    let mut rx = self.subscribe();
    match rx.wait_for(|s| !s.loading).await {
      Ok(state) => state.clone(),
      Err(_) => self.state(),
    }
  }

  /// Switch to `slug`. The same slug again is a no-op; an empty slug clears
  /// the state without fetching.
  pub fn set_slug(&self, slug: &str) {
    {
      let mut current = self.slug.lock().unwrap_or_else(PoisonError::into_inner);
      if current.as_deref() == Some(slug) {
        return;
      }
      *current = Some(slug.to_string());
    }
    self.stop_listener();

    if slug.is_empty() {
      self.shared.state.send_modify(|s| {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        *s = PageState::default();
      });
      return;
    }

    let mut generation = 0;
    self.shared.state.send_modify(|s| {
      generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
      s.loading = true;
      s.error = None;
    });

    // Subscribe before the fetch starts so no update between the two is lost.
    let updates = self.shared.service.updates().subscribe();
    self.track(tokio::spawn(load(Arc::clone(&self.shared), slug.to_string(), generation, false)));
    let listener = tokio::spawn(listen(Arc::clone(&self.shared), slug.to_string(), generation, updates));
    *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(listener);
  }

  /// Fetch the current slug through the cache and wait for the result to
  /// commit. A fresh cache entry makes this a lookup; `loading` is left as is.
  pub async fn revalidate(&self) -> PageState {
    let Some(slug) = self.slug().filter(|s| !s.is_empty()) else { return self.state() };
    let generation = self.shared.generation.load(Ordering::SeqCst);
    load(Arc::clone(&self.shared), slug, generation, false).await;
    self.state()
  }

  /// Invalidate the current slug's cache entry and fetch it again.
  pub fn refresh(&self) {
    let Some(slug) = self.slug().filter(|s| !s.is_empty()) else { return };
    let generation = self.shared.generation.load(Ordering::SeqCst);
    self.track(tokio::spawn(load(Arc::clone(&self.shared), slug, generation, true)));
  }

  fn track(&self, fetch: JoinHandle<()>) {
    let mut fetches = self.fetches.lock().unwrap_or_else(PoisonError::into_inner);
    fetches.retain(|f| !f.is_finished());
    fetches.push(fetch);
  }

  fn stop_listener(&self) {
    if let Some(listener) = self.listener.lock().unwrap_or_else(PoisonError::into_inner).take() {
      listener.abort();
    }
  }
}

impl Drop for PageData {
  fn drop(&mut self) {
    self.stop_listener();
    for fetch in self.fetches.lock().unwrap_or_else(PoisonError::into_inner).drain(..) {
      fetch.abort();
    }
  }
}

async fn load(shared: Arc<Shared>, slug: String, generation: u64, force: bool) {
  let result =
    if force { shared.service.refresh_page(&slug).await } else { shared.service.page(&slug).await };
  shared.state.send_if_modified(|s| {
    if shared.generation.load(Ordering::SeqCst) != generation {
      tracing::debug!(slug, "discarding page fetch for a stale slug");
      return false;
    }
    s.loading = false;
    match result {
      Ok(doc) => {
        s.page_data = Some(doc);
        s.error = None;
      }
      // No document for this slug is an empty page, not a failure.
      Err(err) if err.status() == 404 => {
        s.page_data = None;
        s.error = None;
      }
      Err(err) => {
        tracing::warn!(slug, error = %err, "page fetch failed");
        s.error = Some(err.message().to_string());
      }
    }
    true
  });
}

async fn listen(
  shared: Arc<Shared>,
  slug: String,
  generation: u64,
  mut updates: broadcast::Receiver<crate::signal::PageUpdated>,
) {
  loop {
    match updates.recv().await {
      Ok(update) if update.slug == slug => {
        tracing::debug!(slug, "refetching after page update");
        load(Arc::clone(&shared), slug.clone(), generation, true).await;
      }
      Ok(_) => {}
      Err(broadcast::error::RecvError::Lagged(_)) => {
        load(Arc::clone(&shared), slug.clone(), generation, true).await;
      }
      Err(broadcast::error::RecvError::Closed) => break,
    }
  }
}
