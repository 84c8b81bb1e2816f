/* src/server/core/rust/src/preview.rs */

//! Live preview of unsaved editor state.
//!
//! Each component re-renders only when its own serialized content changes.
//! [`PreviewSession`] debounces bursts of edits into one recompute.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::future::join_all;
use pagewright_engine::{Theme, component_type, content_key, entry_key, entry_snapshot, transform_for_preview};
use pagewright_injector::escape_html;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::registry::{ComponentRegistry, SectionCallbacks, SectionProps};
use crate::section::{error_box, not_found_box};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
  pub key: String,
  pub component_type: String,
  pub html: Arc<str>,
}

/// Serialized snapshot of every component's type, visibility, theme and
/// content. Equal keys mean nothing to recompute.
pub fn recompute_key(components: &[Value]) -> String {
  components
    .iter()
    .map(|c| {
      let content = c.get("contentJson").unwrap_or(&Value::Null);
      format!(
        "{}:{}:{}:{}",
        component_type(c),
        c.get("isVisible").unwrap_or(&Value::Null),
        Theme::of(c).as_str(),
        content_key(content)
      )
    })
    .collect::<Vec<_>>()
    .join("\u{1e}")
}

/// Hidden only when the editor set `isVisible` to a falsy value. New
/// components without the flag are previewed.
fn previewed(component: &Value) -> bool {
  match component.get("isVisible") {
    None | Some(Value::Null) => true,
    Some(_) => pagewright_engine::is_visible(component),
  }
}

/// Previewed entry HTML keyed by entry key. The exact snapshot is kept next
/// to the HTML and compared on reuse.
type PreviewMemo = HashMap<String, (String, Arc<str>)>;

pub struct LivePreview {
  registry: Arc<ComponentRegistry>,
  memo: Mutex<PreviewMemo>,
  renders: AtomicUsize,
}

impl LivePreview {
  pub fn new(registry: Arc<ComponentRegistry>) -> Self {
    Self { registry, memo: Mutex::new(HashMap::new()), renders: AtomicUsize::new(0) }
  }

  /// Entries rendered (not reused) so far.
  pub fn renders(&self) -> usize {
    self.renders.load(Ordering::SeqCst)
  }

  pub async fn render(&self, components: &[Value]) -> Vec<PreviewEntry> {
    let shown: Vec<(usize, &Value)> = components.iter().enumerate().filter(|(_, c)| previewed(c)).collect();
    let keyed: Vec<(String, String, &str, &Value)> = shown
      .iter()
      .map(|(index, c)| {
        let ty = component_type(c);
        let theme = Theme::of(c);
        let content = c.get("contentJson").unwrap_or(&Value::Null);
        (entry_key(ty, *index, theme, content), entry_snapshot(theme, content), ty, *c)
      })
      .collect();

    let resolved = join_all(keyed.iter().map(|(key, snapshot, ty, _)| async move {
      if self.cached(key, snapshot).is_some() { None } else { Some(self.registry.resolve(ty).await) }
    }))
    .await;

    let registered = self.registry.names();
    let mut out = Vec::with_capacity(keyed.len());
    for ((key, snapshot, ty, component), renderer) in keyed.into_iter().zip(resolved) {
      let html = match (self.cached(&key, &snapshot), renderer) {
        (Some(html), _) => html,
        (None, renderer) => {
          let inner = match renderer.flatten() {
            None => not_found_box(ty, &registered),
            Some(renderer) => {
              self.renders.fetch_add(1, Ordering::SeqCst);
              let content = component.get("contentJson").unwrap_or(&Value::Null);
              let data = transform_for_preview(ty, content);
              let callbacks = SectionCallbacks::NOOP;
              let props = SectionProps { data: &data, theme: Theme::of(component), callbacks: &callbacks };
              renderer.render(&props).unwrap_or_else(|err| {
                tracing::warn!(component = ty, error = %err, "preview render failed");
                error_box(ty, &err)
              })
            }
          };
          let html: Arc<str> = Arc::from(format!(
            r#"<div class="pw-preview-entry" data-key="{}" data-theme="{}">{inner}</div>"#,
            escape_html(&key),
            Theme::of(component).as_str()
          ));
          self
            .memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), (snapshot, Arc::clone(&html)));
          html
        }
      };
      out.push(PreviewEntry { key, component_type: ty.to_string(), html });
    }

    let live: Vec<&str> = out.iter().map(|e| e.key.as_str()).collect();
    self.memo.lock().unwrap_or_else(PoisonError::into_inner).retain(|k, _| live.contains(&k.as_str()));
    out
  }

  fn cached(&self, key: &str, snapshot: &str) -> Option<Arc<str>> {
    match self.memo.lock().unwrap_or_else(PoisonError::into_inner).get(key) {
      Some((seen, html)) if seen == snapshot => Some(Arc::clone(html)),
      _ => None,
    }
  }
}

pub fn to_html(entries: &[PreviewEntry]) -> String {
  let mut out = String::from(r#"<div class="pw-preview">"#);
  for entry in entries {
    out.push_str(&entry.html);
  }
  out.push_str("</div>");
  out
}

/// Debounced preview driver: editor snapshots go in, rendered entries come
/// out on a watch channel once edits have been quiet for the debounce window.
pub struct PreviewSession {
  edits: mpsc::UnboundedSender<Vec<Value>>,
  output: watch::Receiver<Arc<Vec<PreviewEntry>>>,
  recomputes: Arc<AtomicUsize>,
  task: JoinHandle<()>,
}

impl PreviewSession {
  pub fn spawn(preview: Arc<LivePreview>, debounce: Duration) -> Self {
    let (edits, rx) = mpsc::unbounded_channel();
    let (tx, output) = watch::channel(Arc::new(Vec::new()));
    let recomputes = Arc::new(AtomicUsize::new(0));
    let task = tokio::spawn(run(preview, debounce, rx, tx, Arc::clone(&recomputes)));
    Self { edits, output, recomputes, task }
  }

  /// Queue the editor's full component array.
  pub fn edit(&self, components: Vec<Value>) {
    let _ = self.edits.send(components);
  }

  pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<PreviewEntry>>> {
    self.output.clone()
  }

  pub fn current(&self) -> Arc<Vec<PreviewEntry>> {
    Arc::clone(&self.output.borrow())
  }

  pub fn recomputes(&self) -> usize {
    self.recomputes.load(Ordering::SeqCst)
  }
}

impl Drop for PreviewSession {
  fn drop(&mut self) {
    self.task.abort();
  }
}

async fn run(
  preview: Arc<LivePreview>,
  debounce: Duration,
  mut rx: mpsc::UnboundedReceiver<Vec<Value>>,
  tx: watch::Sender<Arc<Vec<PreviewEntry>>>,
  recomputes: Arc<AtomicUsize>,
) {
  let mut last_key: Option<String> = None;
  while let Some(mut latest) = rx.recv().await {
    loop {
      tokio::select! {
        next = rx.recv() => match next {
          Some(components) => latest = components,
          None => break,
        },
        () = tokio::time::sleep(debounce) => break,
      }
    }
    let key = recompute_key(&latest);
    if last_key.as_deref() == Some(key.as_str()) {
      continue;
    }
    recomputes.fetch_add(1, Ordering::SeqCst);
    let entries = preview.render(&latest).await;
    tx.send_replace(Arc::new(entries));
    last_key = Some(key);
  }
}

#[cfg(test)]
mod tests;
