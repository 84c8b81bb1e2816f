/* src/server/core/rust/src/renderer.rs */

use std::sync::Arc;

use pagewright_engine::{PageFormat, SectionEntry, SkeletonKind, entries, skeleton_kind};
use pagewright_injector::escape_html;
use serde::Serialize;

use crate::loader::{ComponentLoader, LoadedMap};
use crate::page_data::PageState;
use crate::registry::ComponentRegistry;
use crate::section::SectionCache;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
  pub section_id: String,
  pub component_type: String,
  pub html: Arc<str>,
}

/// What a page renders as, in precedence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum PageView {
  Loading { skeleton: SkeletonKind },
  Error { slug: String, message: String },
  NoData { slug: String },
  NoSections { slug: String },
  Sections { format: PageFormat, sections: Vec<RenderedSection> },
}

impl PageView {
  pub fn to_html(&self) -> String {
    match self {
      PageView::Loading { skeleton } => {
        let kind = match skeleton {
          SkeletonKind::Home => "home",
          SkeletonKind::Generic => "generic",
        };
        format!(r#"<div class="pw-skeleton pw-skeleton-{kind}" aria-busy="true"></div>"#)
      }
      PageView::Error { slug, message } => format!(
        r#"<div class="pw-page-error" role="alert"><h1>Page unavailable</h1><p>Could not load page '{}': {}</p></div>"#,
        escape_html(slug),
        escape_html(message)
      ),
      PageView::NoData { slug } => {
        format!(r#"<div class="pw-page-empty"><p>No content for page '{}'.</p></div>"#, escape_html(slug))
      }
      PageView::NoSections { .. } => {
        r#"<div class="pw-page-empty"><p>This page has no visible sections yet.</p></div>"#.to_string()
      }
      PageView::Sections { sections, .. } => {
        let mut out = String::from(r#"<main class="pw-page">"#);
        for section in sections {
          out.push_str(&section.html);
        }
        out.push_str("</main>");
        out
      }
    }
  }

  pub fn status(&self) -> u16 {
    match self {
      PageView::Error { .. } => 502,
      PageView::NoData { .. } => 404,
      _ => 200,
    }
  }
}

/// Page state -> view. Owns the loader and the section memo for one page
/// consumer; reuse the same renderer across state changes to benefit from both.
pub struct DynamicPageRenderer {
  loader: ComponentLoader,
  sections: SectionCache,
}

enum Prepared {
  Done(PageView),
  Sections(PageFormat, Vec<SectionEntry>, Vec<SectionEntry>),
}

fn prepare(slug: &str, state: &PageState) -> Prepared {
  if state.loading {
    return Prepared::Done(PageView::Loading { skeleton: skeleton_kind(slug) });
  }
  if let Some(message) = &state.error {
    return Prepared::Done(PageView::Error { slug: slug.to_string(), message: message.clone() });
  }
  let Some(page) = &state.page_data else {
    return Prepared::Done(PageView::NoData { slug: slug.to_string() });
  };
  let (format, all) = entries(page);
  let visible: Vec<SectionEntry> = all.iter().filter(|e| e.visible).cloned().collect();
  if visible.is_empty() {
    return Prepared::Done(PageView::NoSections { slug: slug.to_string() });
  }
  Prepared::Sections(format, all, visible)
}

impl DynamicPageRenderer {
  pub fn new(registry: Arc<ComponentRegistry>) -> Self {
    Self { loader: ComponentLoader::new(registry), sections: SectionCache::new() }
  }

  pub fn loader(&self) -> &ComponentLoader {
    &self.loader
  }

  pub fn sections(&self) -> &SectionCache {
    &self.sections
  }

  /// Resolve renderers for the page and render every visible section.
  pub async fn render(&self, slug: &str, state: &PageState) -> PageView {
    match prepare(slug, state) {
      Prepared::Done(view) => view,
      Prepared::Sections(format, all, visible) => {
        let loaded = self.loader.load(&all).await;
        self.compose(format, &visible, &loaded)
      }
    }
  }

  /// Render with the renderers already resolved for this exact section set;
  /// anything else becomes a placeholder.
  pub fn snapshot(&self, slug: &str, state: &PageState) -> PageView {
    match prepare(slug, state) {
      Prepared::Done(view) => view,
      Prepared::Sections(format, all, visible) => {
        let loaded = self.loader.current(&all).unwrap_or_default();
        self.compose(format, &visible, &loaded)
      }
    }
  }

  fn compose(&self, format: PageFormat, visible: &[SectionEntry], loaded: &LoadedMap) -> PageView {
    let registered = self.loader.registry().names();
    let ids: Vec<&str> = visible.iter().map(|e| e.section_id.as_str()).collect();
    self.sections.retain(&ids);
    let sections = visible
      .iter()
      .map(|entry| RenderedSection {
        section_id: entry.section_id.clone(),
        component_type: entry.component_type.clone(),
        html: self.sections.render(format, entry, loaded.get(&entry.section_id), &registered),
      })
      .collect();
    PageView::Sections { format, sections }
  }
}

#[cfg(test)]
mod tests;
