/* src/server/engine/rust/src/variant.rs */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Button variants understood by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
  #[default]
  Primary,
  Secondary,
  Outline,
  Success,
  Warning,
  Danger,
  Info,
}

impl Variant {
  pub const ALL: [Variant; 7] = [
    Variant::Primary,
    Variant::Secondary,
    Variant::Outline,
    Variant::Success,
    Variant::Warning,
    Variant::Danger,
    Variant::Info,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Variant::Primary => "primary",
      Variant::Secondary => "secondary",
      Variant::Outline => "outline",
      Variant::Success => "success",
      Variant::Warning => "warning",
      Variant::Danger => "danger",
      Variant::Info => "info",
    }
  }

  /// Trimmed, case-insensitive lookup.
  pub fn parse(input: &str) -> Option<Variant> {
    let needle = input.trim();
    Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(needle))
  }
}

/// Coerce any persisted value to a known variant.
/// Content written before variants existed carries arbitrary values here, so
/// anything unrecognized becomes `Primary` with a debug diagnostic.
pub fn validate_variant(input: Option<&Value>) -> Variant {
  match input {
    Some(Value::String(s)) => Variant::parse(s).unwrap_or_else(|| {
      tracing::debug!(variant = %s, "unknown button variant, using primary");
      Variant::Primary
    }),
    None | Some(Value::Null) => Variant::Primary,
    Some(other) => {
      tracing::debug!(variant = %other, "non-string button variant, using primary");
      Variant::Primary
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn case_insensitive_match_returns_canonical() {
    assert_eq!(validate_variant(Some(&json!("SECONDARY"))), Variant::Secondary);
    assert_eq!(validate_variant(Some(&json!("  Danger "))), Variant::Danger);
    assert_eq!(validate_variant(Some(&json!("info"))).as_str(), "info");
  }

  #[test]
  fn every_variant_round_trips_through_parse() {
    for v in Variant::ALL {
      assert_eq!(Variant::parse(&v.as_str().to_uppercase()), Some(v));
    }
  }

  #[test]
  fn garbage_becomes_primary() {
    assert_eq!(validate_variant(Some(&json!("ghost"))), Variant::Primary);
    assert_eq!(validate_variant(Some(&json!(""))), Variant::Primary);
    assert_eq!(validate_variant(Some(&json!("   "))), Variant::Primary);
    assert_eq!(validate_variant(Some(&json!(3))), Variant::Primary);
    assert_eq!(validate_variant(Some(&json!({"v": "outline"}))), Variant::Primary);
    assert_eq!(validate_variant(Some(&Value::Null)), Variant::Primary);
    assert_eq!(validate_variant(None), Variant::Primary);
  }

  #[test]
  fn serializes_lowercase() {
    assert_eq!(serde_json::to_value(Variant::Warning).ok(), Some(json!("warning")));
  }
}
