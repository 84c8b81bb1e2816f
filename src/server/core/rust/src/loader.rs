/* src/server/core/rust/src/loader.rs */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use pagewright_engine::{SectionEntry, load_signature};
use tokio::sync::Mutex;

use crate::registry::{ComponentRegistry, RendererRef};

/// A visible section and the renderer resolved for it, if any.
#[derive(Clone)]
pub struct LoadedEntry {
  pub entry: SectionEntry,
  pub component: Option<RendererRef>,
}

/// Keyed by `section_id`.
pub type LoadedMap = HashMap<String, LoadedEntry>;

#[derive(Default)]
struct Memo {
  signature: Option<String>,
  map: Arc<LoadedMap>,
}

/// Resolves renderers for the visible sections of a page.
///
/// The last built map is memoized by load signature. The memo lock doubles
/// as the cycle guard: a trigger arriving mid-cycle waits for it, then
/// re-checks the signature before resolving anything.
pub struct ComponentLoader {
  registry: Arc<ComponentRegistry>,
  memo: Mutex<Memo>,
  passes: AtomicUsize,
}

impl ComponentLoader {
  pub fn new(registry: Arc<ComponentRegistry>) -> Self {
    Self { registry, memo: Mutex::new(Memo::default()), passes: AtomicUsize::new(0) }
  }

  pub fn registry(&self) -> &Arc<ComponentRegistry> {
    &self.registry
  }

  /// Resolution passes run so far.
  pub fn passes(&self) -> usize {
    self.passes.load(Ordering::SeqCst)
  }

  /// The last built map if it was built for `entries` and no cycle is
  /// running. A map for another signature would pair sections with the
  /// wrong renderers.
  pub fn current(&self, entries: &[SectionEntry]) -> Option<Arc<LoadedMap>> {
    let memo = self.memo.try_lock().ok()?;
    let signature = load_signature(entries);
    (memo.signature.as_deref() == Some(signature.as_str())).then(|| Arc::clone(&memo.map))
  }

  pub async fn load(&self, entries: &[SectionEntry]) -> Arc<LoadedMap> {
    if entries.is_empty() {
      return Arc::new(LoadedMap::new());
    }
    let signature = load_signature(entries);
    let mut memo = self.memo.lock().await;
    if memo.signature.as_deref() == Some(signature.as_str()) {
      return Arc::clone(&memo.map);
    }

    let visible: Vec<&SectionEntry> = entries.iter().filter(|e| e.visible).collect();
    let resolved = join_all(visible.iter().map(|e| self.registry.resolve(&e.component_type))).await;
    let map: LoadedMap = visible
      .into_iter()
      .zip(resolved)
      .map(|(entry, component)| {
        if component.is_none() {
          tracing::debug!(component = %entry.component_type, id = %entry.section_id, "no renderer");
        }
        (entry.section_id.clone(), LoadedEntry { entry: entry.clone(), component })
      })
      .collect();

    self.passes.fetch_add(1, Ordering::SeqCst);
    memo.signature = Some(signature);
    memo.map = Arc::new(map);
    Arc::clone(&memo.map)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use futures_util::FutureExt;
  use pagewright_engine::entries;
  use serde_json::{Value, json};

  use super::*;
  use crate::errors::PageError;
  use crate::registry::{SectionProps, SectionRenderer};

  struct Blank;

  impl SectionRenderer for Blank {
    fn render(&self, _props: &SectionProps<'_>) -> Result<String, PageError> {
      Ok(String::new())
    }
  }

  fn registry() -> Arc<ComponentRegistry> {
    let slow = Arc::new(|| {
      async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<RendererRef, PageError>(Arc::new(Blank))
      }
      .boxed()
    });
    Arc::new(
      ComponentRegistry::new("test")
        .with_renderer("HeroSection", Arc::new(Blank))
        .with_loader("FAQSection", slow)
        .with_loader("StatsSection", Arc::new(|| async { Err::<RendererRef, _>(PageError::internal("broken")) }.boxed())),
    )
  }

  fn page(sections: Value) -> Vec<SectionEntry> {
    entries(&json!({ "components": sections })).1
  }

  #[tokio::test]
  async fn empty_input_is_immediate() {
    let loader = ComponentLoader::new(registry());
    let map = loader.load(&[]).now_or_never().expect("no await point");
    assert!(map.is_empty());
    assert_eq!(loader.passes(), 0);
  }

  #[tokio::test]
  async fn only_visible_entries_are_resolved() {
    let loader = ComponentLoader::new(registry());
    let list = page(json!([
      {"componentType": "HeroSection", "isVisible": true},
      {"componentType": "FAQSection", "isVisible": false},
      {"componentType": "NopeSection", "isVisible": 1},
    ]));
    let map = loader.load(&list).await;
    assert_eq!(map.len(), 2);
    assert!(map["component-0"].component.is_some());
    assert!(!map.contains_key("component-1"));
    assert!(map["component-2"].component.is_none());
  }

  #[tokio::test]
  async fn failed_resolution_does_not_block_siblings() {
    let loader = ComponentLoader::new(registry());
    let list = page(json!([
      {"componentType": "StatsSection", "isVisible": true},
      {"componentType": "FAQSection", "isVisible": true},
    ]));
    let map = loader.load(&list).await;
    assert!(map["component-0"].component.is_none());
    assert!(map["component-1"].component.is_some());
  }

  #[tokio::test]
  async fn unchanged_signature_reuses_the_map() {
    let loader = ComponentLoader::new(registry());
    let list = page(json!([{"componentType": "HeroSection", "isVisible": true, "contentJson": {"title": "A"}}]));
    let first = loader.load(&list).await;

    // Content edits keep the signature.
    let edited = page(json!([{"componentType": "HeroSection", "isVisible": true, "contentJson": {"title": "B"}}]));
    let second = loader.load(&edited).await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.passes(), 1);

    let hidden = page(json!([{"componentType": "HeroSection", "isVisible": false}]));
    assert!(loader.load(&hidden).await.is_empty());
    assert_eq!(loader.passes(), 2);
  }

  #[tokio::test]
  async fn concurrent_triggers_share_one_cycle() {
    tokio::time::pause();
    let loader = ComponentLoader::new(registry());
    let list = page(json!([{"componentType": "FAQSection", "isVisible": true}]));
    let (a, b) = tokio::join!(loader.load(&list), loader.load(&list));
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.passes(), 1);
  }

  #[tokio::test]
  async fn latest_trigger_wins() {
    tokio::time::pause();
    let loader = ComponentLoader::new(registry());
    let first = page(json!([{"componentType": "FAQSection", "isVisible": true}]));
    let second = page(json!([{"componentType": "HeroSection", "isVisible": true}]));
    let (_, latest) = tokio::join!(loader.load(&first), loader.load(&second));
    assert_eq!(loader.passes(), 2);
    let current = loader.current(&second).unwrap();
    assert!(Arc::ptr_eq(&current, &latest));
    assert_eq!(current["component-0"].entry.component_type, "HeroSection");
    assert!(loader.current(&first).is_none());
  }
}
