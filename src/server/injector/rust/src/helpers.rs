/* src/server/injector/rust/src/helpers.rs */

use serde_json::Value;

/// Dotted path lookup. Array segments accept numeric indices (`items.0.title`).
pub(crate) fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
  path.split('.').try_fold(data, |current, key| match current {
    Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
    other => other.get(key),
  })
}

pub(crate) fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(_) => true,
  }
}

pub(crate) fn stringify(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

const BOOLEAN_ATTRS: &[&str] = &[
  "allowfullscreen",
  "autoplay",
  "checked",
  "controls",
  "disabled",
  "hidden",
  "loop",
  "muted",
  "open",
  "playsinline",
  "readonly",
  "required",
  "selected",
];

pub(crate) fn is_boolean_attr(name: &str) -> bool {
  BOOLEAN_ATTRS.contains(&name)
}

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn resolve_nested_and_indexed() {
    let data = json!({"a": {"b": [{"c": 1}]}});
    assert_eq!(resolve("a.b.0.c", &data), Some(&json!(1)));
    assert_eq!(resolve("a.x", &data), None);
    assert_eq!(resolve("a.b.9", &data), None);
  }

  #[test]
  fn resolve_item_scope() {
    let data = json!({"$": "plain"});
    assert_eq!(resolve("$", &data), Some(&json!("plain")));
  }

  #[test]
  fn truthiness() {
    for v in [json!(true), json!(1), json!(0.5), json!("x"), json!([0]), json!({})] {
      assert!(is_truthy(&v), "{v}");
    }
    for v in [json!(false), json!(0), json!(""), json!([]), json!(null)] {
      assert!(!is_truthy(&v), "{v}");
    }
  }

  #[test]
  fn stringify_scalars() {
    assert_eq!(stringify(&json!(null)), "");
    assert_eq!(stringify(&json!(4.5)), "4.5");
    assert_eq!(stringify(&json!("s")), "s");
    assert_eq!(stringify(&json!(false)), "false");
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
  }
}
