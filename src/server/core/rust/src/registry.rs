/* src/server/core/rust/src/registry.rs */

//! Component registry: type name -> lazily loaded section renderer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use pagewright_engine::kind::candidates;
use pagewright_engine::{ComponentKind, Theme};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use crate::errors::PageError;
use crate::templates;

/// Interaction hooks handed to every renderer. Public pages get the no-op set.
#[derive(Debug, Clone, Copy)]
pub struct SectionCallbacks {
  pub render_icon: fn(&str) -> String,
  pub open_program_modal: fn(&Value),
  pub open_feature_modal: fn(&Value),
  pub on_cta_click: fn(&Value),
}

fn no_icon(_name: &str) -> String {
  String::new()
}

fn ignore(_item: &Value) {}

impl SectionCallbacks {
  pub const NOOP: SectionCallbacks = SectionCallbacks {
    render_icon: no_icon,
    open_program_modal: ignore,
    open_feature_modal: ignore,
    on_cta_click: ignore,
  };
}

impl Default for SectionCallbacks {
  fn default() -> Self {
    Self::NOOP
  }
}

/// Everything a renderer receives for one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionProps<'a> {
  pub data: &'a Value,
  pub theme: Theme,
  pub callbacks: &'a SectionCallbacks,
}

pub trait SectionRenderer: Send + Sync {
  fn render(&self, props: &SectionProps<'_>) -> Result<String, PageError>;
}

pub type RendererRef = Arc<dyn SectionRenderer>;
pub type RendererLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<RendererRef, PageError>> + Send + Sync>;

// -- Template renderer --

const MEDIA_KEYS: &[&str] = &["image", "backgroundImage", "poster", "video", "logo", "avatar"];

/// Renders a section through a comment-slot template.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
  name: String,
  template: String,
}

impl TemplateRenderer {
  pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
    Self { name: name.into(), template: template.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

fn bust(url: &str, version: &str) -> String {
  let sep = if url.contains('?') { '&' } else { '?' };
  format!("{url}{sep}v={version}")
}

/// Add `iconHtml` next to `icon` names and version media URLs with `_updatedAt`.
fn enrich(value: &mut Value, version: Option<&str>, callbacks: &SectionCallbacks) {
  match value {
    Value::Object(map) => {
      enrich_object(map, version, callbacks);
      for child in map.values_mut() {
        enrich(child, version, callbacks);
      }
    }
    Value::Array(items) => {
      for item in items {
        enrich(item, version, callbacks);
      }
    }
    _ => {}
  }
}

fn enrich_object(map: &mut Map<String, Value>, version: Option<&str>, callbacks: &SectionCallbacks) {
  if let Some(Value::String(icon)) = map.get("icon") {
    let html = (callbacks.render_icon)(icon);
    if !html.is_empty() {
      map.insert("iconHtml".into(), Value::String(html));
    }
  }
  let Some(version) = version else { return };
  for key in MEDIA_KEYS {
    if let Some(Value::String(url)) = map.get_mut(*key) {
      if !url.is_empty() {
        *url = bust(url, version);
      }
    }
  }
}

impl SectionRenderer for TemplateRenderer {
  fn render(&self, props: &SectionProps<'_>) -> Result<String, PageError> {
    if !props.data.is_object() {
      return Err(PageError::render(format!("{} expects object props", self.name)));
    }
    let mut data = props.data.clone();
    let version = data.get("_updatedAt").and_then(Value::as_str).map(str::to_string);
    enrich(&mut data, version.as_deref(), props.callbacks);
    if let Value::Object(map) = &mut data {
      map.insert("_theme".into(), Value::String(props.theme.as_str().into()));
    }
    Ok(pagewright_injector::inject(&self.template, &data))
  }
}

// -- Registry --

struct Entry {
  loader: RendererLoader,
  loaded: OnceCell<RendererRef>,
}

/// Maps canonical component names to lazily loaded renderers.
///
/// Each entry loads at most once; a failed load is not memoized, so the next
/// resolution retries. Distinct entries load independently.
pub struct ComponentRegistry {
  label: &'static str,
  entries: HashMap<String, Entry>,
}

impl ComponentRegistry {
  pub fn new(label: &'static str) -> Self {
    Self { label, entries: HashMap::new() }
  }

  /// Public-site registry over the built-in templates.
  pub fn public(templates_dir: Option<PathBuf>) -> Self {
    Self::builtin("public", templates_dir)
  }

  /// Editor preview registry, built from the same renderer set as [`Self::public`].
  pub fn preview(templates_dir: Option<PathBuf>) -> Self {
    Self::builtin("preview", templates_dir)
  }

  fn builtin(label: &'static str, templates_dir: Option<PathBuf>) -> Self {
    let mut registry = Self::new(label);
    for kind in ComponentKind::KNOWN {
      let dir = templates_dir.clone();
      let kind = kind.clone();
      let name = kind.name().to_string();
      registry = registry.with_loader(name, Arc::new(move || load_template(dir.clone(), kind.clone()).boxed()));
    }
    registry
  }

  pub fn with_loader(mut self, name: impl Into<String>, loader: RendererLoader) -> Self {
    self.entries.insert(name.into(), Entry { loader, loaded: OnceCell::new() });
    self
  }

  pub fn with_renderer(self, name: impl Into<String>, renderer: RendererRef) -> Self {
    self.with_loader(name, Arc::new(move || {
      let renderer = Arc::clone(&renderer);
      async move { Ok::<_, PageError>(renderer) }.boxed()
    }))
  }

  pub fn label(&self) -> &'static str {
    self.label
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  /// Registry key `component_type` resolves to: exact name, then aliases.
  pub fn canonical(&self, component_type: &str) -> Option<&str> {
    candidates(component_type)
      .iter()
      .find_map(|c| self.entries.get_key_value(c.as_str()).map(|(k, _)| k.as_str()))
  }

  /// Load (once) and return the renderer for `component_type`.
  /// `None` when no alias matches or the loader failed.
  pub async fn resolve(&self, component_type: &str) -> Option<RendererRef> {
    let name = self.canonical(component_type)?;
    let entry = self.entries.get(name)?;
    match entry.loaded.get_or_try_init(|| (entry.loader)()).await {
      Ok(renderer) => Some(Arc::clone(renderer)),
      Err(err) => {
        tracing::warn!(registry = self.label, component = name, error = %err, "renderer failed to load");
        None
      }
    }
  }

  /// Resolved renderer without triggering a load.
  pub fn get_loaded(&self, component_type: &str) -> Option<RendererRef> {
    let name = self.canonical(component_type)?;
    self.entries.get(name)?.loaded.get().cloned()
  }
}

async fn load_template(dir: Option<PathBuf>, kind: ComponentKind) -> Result<RendererRef, PageError> {
  let name = kind.name().to_string();
  let mut html = None;
  if let Some(dir) = dir {
    let path = dir.join(format!("{name}.html"));
    match tokio::fs::read_to_string(&path).await {
      Ok(text) => {
        tracing::debug!(component = %name, path = %path.display(), "using template override");
        html = Some(text);
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => return Err(PageError::internal(format!("failed to read {}: {e}", path.display()))),
    }
  }
  let html = match html.or_else(|| templates::builtin(&kind)) {
    Some(html) => html,
    None => return Err(PageError::not_found(format!("no template for {name}"))),
  };
  for diag in pagewright_injector::check_template(&html) {
    tracing::warn!(component = %name, directive = %diag.directive, kind = ?diag.kind, "template diagnostic");
  }
  Ok(Arc::new(TemplateRenderer::new(name, html)))
}
