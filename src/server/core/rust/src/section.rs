/* src/server/core/rust/src/section.rs */

//! One page section: placeholder, not-found box, or the renderer's HTML
//! inside a themed `<section>` wrapper.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pagewright_engine::{PageFormat, SectionEntry, Theme, did_you_mean, section_fingerprint, section_props};
use pagewright_injector::escape_html;

use crate::errors::PageError;
use crate::loader::LoadedEntry;
use crate::registry::{SectionCallbacks, SectionProps};

/// Rendered for an entry whose renderer is still being resolved.
pub const PLACEHOLDER: &str = r#"<div class="pw-placeholder" aria-hidden="true"></div>"#;

pub fn not_found_box(component_type: &str, registered: &[&str]) -> String {
  let hint = did_you_mean(component_type, registered)
    .map(|name| format!(r#"<p class="pw-hint">Did you mean <code>{}</code>?</p>"#, escape_html(name)))
    .unwrap_or_default();
  format!(
    r#"<div class="pw-not-found" role="note"><p>Component not found: <code>{}</code></p>{hint}</div>"#,
    escape_html(component_type)
  )
}

pub fn error_box(component_type: &str, err: &PageError) -> String {
  format!(
    r#"<div class="pw-render-error" role="alert"><p>Failed to render <code>{}</code></p><pre>{}</pre></div>"#,
    escape_html(component_type),
    escape_html(err.message())
  )
}

fn wrap(entry: &SectionEntry, theme: Theme, inner: &str) -> String {
  format!(
    r#"<section data-theme="{}" data-section-id="{}" data-component="{}">{inner}</section>"#,
    theme.as_str(),
    escape_html(&entry.section_id),
    escape_html(&entry.component_type)
  )
}

/// Per-section render memo keyed by `section_id`.
///
/// A section whose renderer, theme and props fingerprint are unchanged reuses
/// its previous HTML without calling the renderer.
#[derive(Default)]
pub struct SectionCache {
  memo: Mutex<HashMap<String, (String, Arc<str>)>>,
  renders: AtomicUsize,
}

impl SectionCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Renderer invocations so far.
  pub fn renders(&self) -> usize {
    self.renders.load(Ordering::SeqCst)
  }

  /// Forget sections not in `keep`.
  pub fn retain(&self, keep: &[&str]) {
    self.memo.lock().unwrap_or_else(PoisonError::into_inner).retain(|id, _| keep.contains(&id.as_str()));
  }

  pub fn clear(&self) {
    self.memo.lock().unwrap_or_else(PoisonError::into_inner).clear();
  }

  /// HTML for one visible entry. `loaded` is `None` while resolution is
  /// still pending.
  pub fn render(
    &self,
    format: PageFormat,
    entry: &SectionEntry,
    loaded: Option<&LoadedEntry>,
    registered: &[&str],
  ) -> Arc<str> {
    let Some(loaded) = loaded else { return Arc::from(PLACEHOLDER) };
    let theme = Theme::of(&entry.section);
    let Some(component) = &loaded.component else {
      return Arc::from(wrap(entry, theme, &not_found_box(&entry.component_type, registered)));
    };

    let data = section_props(format, entry);
    let identity = format!("{}@{:p}", entry.component_type, Arc::as_ptr(component));
    let fingerprint = section_fingerprint(&identity, theme, &data);
    if let Some((prev, html)) = self.memo.lock().unwrap_or_else(PoisonError::into_inner).get(&entry.section_id) {
      if *prev == fingerprint {
        return Arc::clone(html);
      }
    }

    self.renders.fetch_add(1, Ordering::SeqCst);
    let callbacks = SectionCallbacks::NOOP;
    let props = SectionProps { data: &data, theme, callbacks: &callbacks };
    let inner = match component.render(&props) {
      Ok(html) => html,
      Err(err) => {
        tracing::warn!(component = %entry.component_type, id = %entry.section_id, error = %err, "section render failed");
        error_box(&entry.component_type, &err)
      }
    };
    let html: Arc<str> = Arc::from(wrap(entry, theme, &inner));
    self
      .memo
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(entry.section_id.clone(), (fingerprint, Arc::clone(&html)));
    html
  }
}
