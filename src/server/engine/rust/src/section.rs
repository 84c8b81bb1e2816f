/* src/server/engine/rust/src/section.rs */

use serde::Serialize;
use serde_json::{Value, json};

use crate::fields::{Props, parse_content};
use crate::normalize::normalize_props;
use crate::page::{PageFormat, SectionEntry, updated_at};

/// `data-theme` value for a section wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  Light,
  Dark,
}

impl Theme {
  /// `theme == 1` is light, anything else (including absent) is dark.
  pub fn of(section: &Value) -> Theme {
    match section.get("theme").and_then(Value::as_i64) {
      Some(1) => Theme::Light,
      _ => Theme::Dark,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }
}

/// Renderer props for one section.
///
/// New-format sections go through the normalizer and carry `_updatedAt`
/// only when the section itself has one. Legacy sections expose `props`
/// both under `data` and spread at the top level.
pub fn section_props(format: PageFormat, entry: &SectionEntry) -> Value {
  match format {
    PageFormat::Components => {
      let content = entry.section.get("contentJson").unwrap_or(&Value::Null);
      let mut props = normalize_props(&entry.component_type, content);
      if let (Value::Object(map), Some(ts)) = (&mut props, updated_at(&entry.section)) {
        map.insert("_updatedAt".into(), json!(ts));
      }
      props
    }
    PageFormat::Legacy => {
      let legacy = entry.section.get("props").and_then(parse_content).unwrap_or_default();
      let mut out: Props = legacy.clone();
      out.insert("data".into(), Value::Object(legacy));
      Value::Object(out)
    }
  }
}

/// Memo identity for a rendered section: renderer, theme and serialized
/// props. Compared verbatim, so distinct inputs never share an entry.
pub fn section_fingerprint(renderer: &str, theme: Theme, props: &Value) -> String {
  format!("{renderer}\u{1f}{}\u{1f}{props}", theme.as_str())
}
