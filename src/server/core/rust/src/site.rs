/* src/server/core/rust/src/site.rs */

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;

use crate::page_data::{PageData, PageState};
use crate::preview::{DEFAULT_DEBOUNCE, LivePreview, PreviewEntry, PreviewSession};
use crate::registry::ComponentRegistry;
use crate::renderer::{DynamicPageRenderer, PageView};
use crate::service::PageService;

/// Page state and renderer for one served slug.
struct SitePage {
  data: PageData,
  renderer: DynamicPageRenderer,
}

/// A rendered site: page service, both registries and per-slug pages.
/// Adapters turn this into routes.
///
/// A slug is tracked only while it has a document, so requests for missing
/// pages never accumulate state.
pub struct Site {
  name: String,
  service: PageService,
  public: Arc<ComponentRegistry>,
  preview: Arc<LivePreview>,
  debounce: Duration,
  pages: Mutex<HashMap<String, Arc<SitePage>>>,
}

impl Site {
  pub fn new(name: impl Into<String>, service: PageService) -> Self {
    Self::with_templates(name, service, None)
  }

  /// Registries read `{templates_dir}/{CanonicalName}.html` overrides when given.
  pub fn with_templates(name: impl Into<String>, service: PageService, templates_dir: Option<PathBuf>) -> Self {
    let public = Arc::new(ComponentRegistry::public(templates_dir.clone()));
    let preview = Arc::new(LivePreview::new(Arc::new(ComponentRegistry::preview(templates_dir))));
    Self {
      name: name.into(),
      service,
      public,
      preview,
      debounce: DEFAULT_DEBOUNCE,
      pages: Mutex::new(HashMap::new()),
    }
  }

  pub fn with_debounce(mut self, debounce: Duration) -> Self {
    self.debounce = debounce;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn service(&self) -> &PageService {
    &self.service
  }

  pub fn registry(&self) -> &Arc<ComponentRegistry> {
    &self.public
  }

  pub fn live_preview(&self) -> &Arc<LivePreview> {
    &self.preview
  }

  /// Slugs currently holding page state.
  pub fn tracked_pages(&self) -> usize {
    self.pages.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  fn page_for(&self, slug: &str) -> Arc<SitePage> {
    let existing = self.pages.lock().unwrap_or_else(PoisonError::into_inner).get(slug).cloned();
    existing.unwrap_or_else(|| {
      Arc::new(SitePage {
        data: self.service.page_data(),
        renderer: DynamicPageRenderer::new(Arc::clone(&self.public)),
      })
    })
  }

  /// Fetch (through the cache) and render one page.
  pub async fn render_page(&self, slug: &str) -> PageView {
    let page = self.page_for(slug);
    page.data.set_slug(slug);
    let state: PageState = page.data.revalidate().await;
    {
      let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
      if state.page_data.is_some() {
        pages.entry(slug.to_string()).or_insert_with(|| Arc::clone(&page));
      } else {
        pages.remove(slug);
      }
    }
    page.renderer.render(slug, &state).await
  }

  /// Render unsaved editor components.
  pub async fn preview(&self, components: &[Value]) -> Vec<PreviewEntry> {
    self.preview.render(components).await
  }

  /// A debounced preview driver using the site's debounce window.
  pub fn preview_session(&self) -> PreviewSession {
    PreviewSession::spawn(Arc::clone(&self.preview), self.debounce)
  }
}
