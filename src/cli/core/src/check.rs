/* src/cli/core/src/check.rs */

use anyhow::{Result, anyhow, bail};
use pagewright_server::engine::fields::{is_numeric_key, parse_content};
use pagewright_server::engine::{ComponentKind, did_you_mean, entries};
use pagewright_server::{Site, validate_document};
use serde_json::Value;

use crate::ui;

/// Problems found in one page document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageReport {
  pub sections: usize,
  pub hidden: usize,
  pub issues: Vec<String>,
}

/// Content the renderer would discard: unparseable payloads fall back to `{}`
/// and numeric keys from a spread string are dropped.
fn content_issue(raw: Option<&Value>) -> Option<&'static str> {
  let raw = match raw {
    None | Some(Value::Null) => return None,
    Some(Value::String(s)) if s.trim().is_empty() => return None,
    Some(raw) => raw,
  };
  match parse_content(raw) {
    None => Some("contentJson is not a JSON object"),
    Some(map) if map.keys().any(|k| is_numeric_key(k)) => Some("contentJson has numeric keys (corrupted)"),
    Some(_) => None,
  }
}

pub fn check_document(doc: &Value) -> PageReport {
  let mut report = PageReport::default();
  if let Err(err) = validate_document(doc) {
    report.issues.push(err.message().to_string());
    return report;
  }
  let known: Vec<&str> = ComponentKind::known_names().collect();
  let (_, list) = entries(doc);
  report.sections = list.len();
  for entry in &list {
    if !entry.visible {
      report.hidden += 1;
    }
    if entry.component_type.is_empty() {
      report.issues.push(format!("{}: missing component type", entry.section_id));
    } else if !ComponentKind::resolve(&entry.component_type).is_known() {
      let hint = did_you_mean(&entry.component_type, &known)
        .map(|name| format!(" (did you mean {name}?)"))
        .unwrap_or_default();
      report.issues.push(format!("{}: unknown component type {}{hint}", entry.section_id, entry.component_type));
    }
    if let Some(issue) = content_issue(entry.section.get("contentJson")) {
      report.issues.push(format!("{}: {issue}", entry.section_id));
    }
  }
  report
}

/// Check every page; fails when any page has issues.
pub async fn run(site: &Site) -> Result<()> {
  ui::banner("check");
  let service = site.service();
  let slugs = service.source().list_pages().await.map_err(|e| anyhow!("{}", e.message()))?;
  let mut failed = 0usize;
  for slug in &slugs {
    let doc = match service.page(slug).await {
      Ok(doc) => doc,
      Err(err) => {
        failed += 1;
        ui::fail(&format!("{slug}: {}", err.message()));
        continue;
      }
    };
    let report = check_document(&doc);
    if report.issues.is_empty() {
      ui::ok(&format!("{slug} ({} sections, {} hidden)", report.sections, report.hidden));
    } else {
      failed += 1;
      ui::warn(&format!("{slug}: {} issue(s)", report.issues.len()));
      for issue in &report.issues {
        ui::detail(issue);
      }
    }
  }
  ui::blank();
  if failed > 0 {
    bail!("{failed} of {} page(s) have problems", slugs.len());
  }
  ui::ok(&format!("{} page(s) checked", slugs.len()));
  Ok(())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn clean_page_has_no_issues() {
    let doc = json!({"components": [
      {"componentType": "HeroSection", "isVisible": true},
      {"componentType": "CtaSection", "isVisible": false},
    ]});
    assert_eq!(check_document(&doc), PageReport { sections: 2, hidden: 1, issues: vec![] });
  }

  #[test]
  fn unknown_types_are_reported_with_hint() {
    let doc = json!({"components": [{"componentType": "HeroSectoin", "isVisible": true}]});
    let report = check_document(&doc);
    assert_eq!(report.issues, vec!["component-0: unknown component type HeroSectoin (did you mean HeroSection?)"]);
  }

  #[test]
  fn unparseable_content_is_reported() {
    let doc = json!({"components": [
      {"componentType": "HeroSection", "isVisible": true, "contentJson": "{broken"},
      {"componentType": "FAQSection", "isVisible": true, "contentJson": ""},
    ]});
    assert_eq!(check_document(&doc).issues, vec!["component-0: contentJson is not a JSON object"]);
  }

  #[test]
  fn spread_string_content_is_reported() {
    let doc = json!({"components": [
      {"componentType": "HeroSection", "isVisible": true, "contentJson": {"0": "a", "title": "Hi"}},
      {"componentType": "CtaSection", "isVisible": true, "contentJson": "{\"title\":\"ok\"}"},
    ]});
    assert_eq!(check_document(&doc).issues, vec!["component-0: contentJson has numeric keys (corrupted)"]);
  }

  #[test]
  fn legacy_sections_use_uids() {
    let doc = json!({"sections": [{"uid": "abc", "type": "Mystery", "isVisible": 1}]});
    let report = check_document(&doc);
    assert_eq!(report.issues, vec!["abc: unknown component type Mystery"]);
  }
}
