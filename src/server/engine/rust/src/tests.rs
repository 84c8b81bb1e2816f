/* src/server/engine/rust/src/tests.rs */

// Published and preview tables must cover the same kinds and agree on the
// fields both expose once content is filled in.

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::fields::Props;
use crate::kind::ComponentKind;
use crate::normalize::normalize_kind;
use crate::preview::transform_kind;

const SHARED: &[&str] = &["title", "description", "ctaButton"];

/// Primary list of each list-shaped kind, plus the generic `items`.
const LISTS: &[&str] = &["items", "features", "services", "painPoints", "benefits", "industries", "values", "steps"];

fn populated() -> Props {
  let Value::Object(map) = json!({
    "title": "Shared title",
    "description": "Shared description",
    "items": [
      {"title": "One", "description": "First"},
      {"title": "Two", "description": "Second"},
    ],
    "ctaButton": {"text": "Go", "link": "/go", "variant": "secondary"},
  }) else {
    unreachable!()
  };
  map
}

fn all_kinds() -> Vec<ComponentKind> {
  let mut kinds = ComponentKind::KNOWN.to_vec();
  kinds.push(ComponentKind::Unknown("CustomBanner".into()));
  kinds
}

#[test]
fn both_tables_cover_every_kind() {
  let obj = populated();
  for kind in all_kinds() {
    assert!(normalize_kind(&kind, &obj).is_object(), "normalizer: {kind}");
    assert!(transform_kind(&kind, &obj).is_object(), "preview: {kind}");
  }
}

#[test]
fn shared_fields_agree_for_populated_content() {
  let obj = populated();
  let mut compared = HashSet::new();
  for kind in all_kinds() {
    let published = normalize_kind(&kind, &obj);
    let preview = transform_kind(&kind, &obj);
    for field in SHARED {
      if let (Some(a), Some(b)) = (published.get(*field), preview.get(*field)) {
        assert_eq!(a, b, "{kind}.{field}");
      }
    }
    for key in LISTS {
      if let (Some(Value::Array(a)), Some(Value::Array(b))) = (published.get(*key), preview.get(*key)) {
        compared.insert(*key);
        assert_eq!(a.len(), b.len(), "{kind}.{key} length");
        for (x, y) in a.iter().zip(b) {
          if let (Some(tx), Some(ty)) = (x.get("title"), y.get("title")) {
            assert_eq!(tx, ty, "{kind}.{key}[].title");
          }
        }
      }
    }
  }
  for key in LISTS {
    assert!(compared.contains(key), "no kind exposes {key} in both tables");
  }
}

#[test]
fn faq_payloads_agree() {
  let Value::Object(obj) = json!({"items": [{"q": "Q1", "a": "A1"}], "title": "Help"}) else { unreachable!() };
  for kind in [ComponentKind::Faq, ComponentKind::PayrollFaq] {
    assert_eq!(
      normalize_kind(&kind, &obj)["faqData"]["items"],
      transform_kind(&kind, &obj)["faqData"]["items"],
      "{kind}"
    );
  }
}
