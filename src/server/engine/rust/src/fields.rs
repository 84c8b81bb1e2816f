/* src/server/engine/rust/src/fields.rs */

//! Tolerant field extraction shared by the published and preview tables.
//! Persisted content has several historical spellings for the same logical
//! field; every helper here takes an ordered list of candidate paths and
//! returns the first usable value.

use serde_json::{Map, Value, json};

use crate::variant::validate_variant;

pub type Props = Map<String, Value>;

/// Decode a raw `contentJson` into an object map.
/// Strings are parsed as JSON; anything that is not an object yields `None`.
pub fn parse_content(raw: &Value) -> Option<Props> {
  match raw {
    Value::Object(map) => Some(map.clone()),
    Value::String(s) => match serde_json::from_str::<Value>(s) {
      Ok(Value::Object(map)) => Some(map),
      _ => None,
    },
    _ => None,
  }
}

pub fn is_numeric_key(key: &str) -> bool {
  !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Drop keys made only of digits. A string spread into an object produces
/// `{"0":"a","1":"b",...}`; those keys never carry real content.
pub fn strip_numeric_keys(map: &Props) -> Props {
  map.iter().filter(|(k, _)| !is_numeric_key(k)).map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Parse and clean in one step. `None` means the caller should fall back to `{}`.
pub fn clean_content(raw: &Value) -> Option<Props> {
  parse_content(raw).map(|map| strip_numeric_keys(&map))
}

/// Resolve a dotted path (`featuresSection.items`) against an object.
pub fn get_path<'a>(obj: &'a Props, path: &str) -> Option<&'a Value> {
  let mut parts = path.split('.');
  let mut current = obj.get(parts.next()?)?;
  for part in parts {
    current = current.get(part)?;
  }
  Some(current)
}

/// First candidate path that resolves to a non-null value.
pub fn first<'a>(obj: &'a Props, paths: &[&str]) -> Option<&'a Value> {
  paths.iter().filter_map(|p| get_path(obj, p)).find(|v| !v.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() { None } else { Some(s.clone()) }
    }
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// First candidate path holding a non-empty string (numbers are stringified).
pub fn text(obj: &Props, paths: &[&str]) -> Option<String> {
  paths.iter().filter_map(|p| get_path(obj, p)).find_map(scalar_text)
}

pub fn text_or(obj: &Props, paths: &[&str], default: &str) -> String {
  text(obj, paths).unwrap_or_else(|| default.to_string())
}

/// `text` as a JSON value, `null` when absent.
pub fn text_value(obj: &Props, paths: &[&str]) -> Value {
  text(obj, paths).map_or(Value::Null, Value::String)
}

/// Split a comma-separated string into trimmed, non-empty parts.
pub fn split_list(s: &str) -> Vec<String> {
  s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// First candidate path holding a list. Arrays are returned as-is; a
/// comma-separated string becomes a list of strings.
pub fn list(obj: &Props, paths: &[&str]) -> Vec<Value> {
  for path in paths {
    match get_path(obj, path) {
      Some(Value::Array(items)) => return items.clone(),
      Some(Value::String(s)) if !s.trim().is_empty() => {
        return split_list(s).into_iter().map(Value::String).collect();
      }
      _ => {}
    }
  }
  Vec::new()
}

/// A list of plain strings. Object entries contribute their `text`, `title`,
/// `name`, or `label` field.
pub fn string_list(obj: &Props, paths: &[&str]) -> Vec<String> {
  list(obj, paths)
    .iter()
    .filter_map(|item| match item {
      Value::Object(map) => text(map, &["text", "title", "name", "label", "value"]),
      other => scalar_text(other).map(|s| s.trim().to_string()),
    })
    .collect()
}

/// Map every entry of a list through `f`. Non-object entries are wrapped as
/// `{"title": entry}` first so item mappers only deal with objects.
pub fn map_items(items: &[Value], f: impl Fn(&Props) -> Value) -> Vec<Value> {
  items
    .iter()
    .filter_map(|item| match item {
      Value::Object(map) => Some(f(map)),
      other => scalar_text(other).map(|s| {
        let mut wrapped = Props::new();
        wrapped.insert("title".into(), Value::String(s));
        f(&wrapped)
      }),
    })
    .collect()
}

/// Normalize a CTA button to `{ text, link, variant }`.
///
/// Looks for a nested button object under `object_paths` (a bare string there
/// is taken as the label), then falls back to flat `ctaText`/`ctaLink` style
/// fields. `link` stays `null` when absent, which renderers treat as "open the
/// contact modal".
pub fn cta_button(obj: &Props, object_paths: &[&str], default_text: &str) -> Value {
  let nested = object_paths.iter().filter_map(|p| get_path(obj, p)).find(|v| !v.is_null());

  let (text_val, link_val, variant_val) = match nested {
    Some(Value::Object(btn)) => (
      text(btn, &["text", "label", "title", "buttonText"]),
      text(btn, &["link", "url", "href", "path"]),
      first(btn, &["variant", "style", "type"]).cloned(),
    ),
    Some(other) => (scalar_text(other), None, None),
    None => (None, None, None),
  };

  let label = text_val
    .or_else(|| text(obj, &["ctaText", "buttonText", "ctaLabel"]))
    .unwrap_or_else(|| default_text.to_string());
  let link = link_val.or_else(|| text(obj, &["ctaLink", "buttonLink", "ctaUrl"]));
  let variant = variant_val.or_else(|| first(obj, &["ctaVariant", "buttonVariant"]).cloned());

  json!({
    "text": label,
    "link": link,
    "variant": validate_variant(variant.as_ref()).as_str(),
  })
}

/// Bare-object copy of a value, `{}` when it is not an object.
pub fn object(obj: &Props, paths: &[&str]) -> Props {
  match first(obj, paths) {
    Some(Value::Object(map)) => map.clone(),
    _ => Props::new(),
  }
}
