/* src/server/engine/rust/src/page.rs */

//! Page documents: format detection, visibility, and stable section entries.

use serde::Serialize;
use serde_json::Value;

/// Which persisted shape a page document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
  /// `{"components": [...]}`, entries addressed by position.
  Components,
  /// `{"sections": [...]}`, entries addressed by `uid`.
  Legacy,
}

impl PageFormat {
  fn list_key(self) -> &'static str {
    match self {
      PageFormat::Components => "components",
      PageFormat::Legacy => "sections",
    }
  }
}

/// Presence of `components` selects the new format, even when it is empty.
pub fn detect_format(page: &Value) -> PageFormat {
  if page.get("components").is_some_and(|c| !c.is_null()) {
    PageFormat::Components
  } else {
    PageFormat::Legacy
  }
}

/// Only `true` and `1` count as visible.
pub fn is_visible(section: &Value) -> bool {
  match section.get("isVisible") {
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
    _ => false,
  }
}

pub fn component_type(section: &Value) -> &str {
  ["componentType", "type", "component"]
    .iter()
    .find_map(|k| section.get(*k).and_then(Value::as_str))
    .unwrap_or("")
}

/// The section's persisted timestamp, if any. Never synthesized.
pub fn updated_at(section: &Value) -> Option<String> {
  ["updatedAt", "updated_at"].iter().find_map(|k| match section.get(*k) {
    Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
    Some(Value::Number(n)) => Some(n.to_string()),
    _ => None,
  })
}

/// One section of a page with its stable identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionEntry {
  pub section: Value,
  /// Position in the persisted list, before filtering.
  pub index: usize,
  pub section_id: String,
  pub component_type: String,
  pub visible: bool,
}

fn section_id(format: PageFormat, section: &Value, index: usize) -> String {
  match format {
    PageFormat::Components => format!("component-{index}"),
    PageFormat::Legacy => match section.get("uid") {
      Some(Value::String(uid)) if !uid.is_empty() => uid.clone(),
      Some(Value::Number(uid)) => uid.to_string(),
      _ => format!("section-{index}"),
    },
  }
}

/// Every section in render order. `orderIndex` sorts stably when present;
/// ids always come from the persisted position so they survive reordering of
/// unrelated sections' visibility.
pub fn entries(page: &Value) -> (PageFormat, Vec<SectionEntry>) {
  let format = detect_format(page);
  let Some(list) = page.get(format.list_key()).and_then(Value::as_array) else {
    return (format, Vec::new());
  };
  let mut out: Vec<SectionEntry> = list
    .iter()
    .enumerate()
    .map(|(index, section)| SectionEntry {
      section: section.clone(),
      index,
      section_id: section_id(format, section, index),
      component_type: component_type(section).to_string(),
      visible: is_visible(section),
    })
    .collect();
  out.sort_by_key(|e| e.section.get("orderIndex").and_then(Value::as_i64).unwrap_or(e.index as i64));
  (format, out)
}

/// Visible sections only, in render order.
pub fn visible_sections(page: &Value) -> (PageFormat, Vec<SectionEntry>) {
  let (format, all) = entries(page);
  (format, all.into_iter().filter(|e| e.visible).collect())
}

/// `componentType-id-isVisible` joined over every entry. Two page states with
/// the same signature need the same set of renderers.
pub fn load_signature(entries: &[SectionEntry]) -> String {
  entries
    .iter()
    .map(|e| format!("{}-{}-{}", e.component_type, e.section_id, e.visible))
    .collect::<Vec<_>>()
    .join("|")
}

/// Loading skeleton shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonKind {
  Home,
  Generic,
}

pub fn skeleton_kind(slug: &str) -> SkeletonKind {
  if slug.is_empty() || slug == "home" { SkeletonKind::Home } else { SkeletonKind::Generic }
}
