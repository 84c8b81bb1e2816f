/* src/server/engine/rust/src/normalize/tests.rs */

use serde_json::json;

use super::*;

#[test]
fn non_object_content_yields_empty_props() {
  assert_eq!(normalize_props("HeroSection", &json!(null)), json!({}));
  assert_eq!(normalize_props("HeroSection", &json!("{broken")), json!({}));
  assert_eq!(normalize_props("HeroSection", &json!([1, 2])), json!({}));
  assert_eq!(normalize_props("HeroSection", &json!(7)), json!({}));
}

#[test]
fn json_string_content_is_parsed() {
  let props = normalize_props("HeroSection", &json!(r#"{"title":"Hi"}"#));
  assert_eq!(props["title"], "Hi");
}

#[test]
fn same_input_same_output_and_input_untouched() {
  let content = json!({
    "title": "Modules",
    "features": "Inventory, Finance , ,HR",
    "ctaButton": {"text": "Go", "variant": "WARNING"},
  });
  let snapshot = content.clone();
  let a = normalize_props("FeaturesSection", &content);
  let b = normalize_props("FeaturesSection", &content);
  assert_eq!(a, b);
  assert_eq!(content, snapshot);
}

#[test]
fn corrupted_spread_content_uses_defaults() {
  let props = normalize_props("ManufacturingCaseStudies", &json!({"0": "M", "1": "a", "2": "n"}));
  assert_eq!(props["title"], "Manufacturing Success Stories");
  assert_eq!(
    props["description"],
    "See how manufacturers transformed their operations with our ERP solutions."
  );
  assert_eq!(props["items"], json!([]));
}

#[test]
fn numeric_keys_stripped_but_real_fields_kept() {
  let props = normalize_props("HeroSection", &json!({"0": "x", "title": "Real"}));
  assert_eq!(props["title"], "Real");
  assert!(props.get("0").is_none());
}

#[test]
fn payroll_faq_old_and_new_shapes_agree() {
  let old = normalize_props(
    "PayrollFAQSection",
    &json!({"faqItems": [{"question": "Q1", "answer": "A1"}]}),
  );
  let new = normalize_props("PayrollFAQSection", &json!({"items": [{"q": "Q1", "a": "A1"}]}));
  assert_eq!(old, new);
  assert_eq!(old["faqData"]["items"], json!([{"question": "Q1", "answer": "A1"}]));
  assert_eq!(old["faqData"]["title"], "Payroll FAQs");
}

#[test]
fn faq_drops_entries_without_question() {
  let props = normalize_props("FAQSection", &json!({"faqs": [{"answer": "orphan"}, {"q": "Real?", "a": "Yes"}]}));
  assert_eq!(props["faqData"]["items"], json!([{"question": "Real?", "answer": "Yes"}]));
}

#[test]
fn features_accept_every_synonym() {
  let expected = json!([
    {"title": "Inventory", "description": "", "icon": null, "image": null},
    {"title": "Finance", "description": "", "icon": null, "image": null},
  ]);
  for content in [
    json!({"features": ["Inventory", "Finance"]}),
    json!({"items": [{"title": "Inventory"}, {"name": "Finance"}]}),
    json!({"featuresSection": {"items": [{"heading": "Inventory"}, {"title": "Finance"}]}}),
    json!({"features": "Inventory, Finance"}),
  ] {
    let props = normalize_props("FeaturesSection", &content);
    assert_eq!(props["features"], expected, "content: {content}");
    assert_eq!(props["items"], expected);
  }
}

#[test]
fn hero_reads_legacy_field_names() {
  let props = normalize_props(
    "HeroSection",
    &json!({
      "headline": "Run your business on one ERP",
      "tagline": "Consulting since 2004",
      "bgImage": "/img/hero.jpg",
      "buttonText": "Book a call",
      "buttonLink": "/contact",
    }),
  );
  assert_eq!(props["title"], "Run your business on one ERP");
  assert_eq!(props["subtitle"], "Consulting since 2004");
  assert_eq!(props["backgroundImage"], "/img/hero.jpg");
  assert_eq!(props["ctaButton"], json!({"text": "Book a call", "link": "/contact", "variant": "primary"}));
  assert_eq!(props["secondaryButton"], json!(null));
}

#[test]
fn cta_button_link_defaults_to_null() {
  let props = normalize_props("CTASection", &json!({"title": "Talk", "ctaButton": {"text": "Contact"}}));
  assert_eq!(props["ctaButton"], json!({"text": "Contact", "link": null, "variant": "primary"}));
}

#[test]
fn cta_alias_uses_cta_table() {
  let a = normalize_props("CtaSection", &json!({"title": "Talk"}));
  let b = normalize_props("CTASection", &json!({"title": "Talk"}));
  assert_eq!(a, b);
}

#[test]
fn process_steps_are_numbered() {
  let props = normalize_props(
    "ProcessSection",
    &json!({"steps": [{"title": "Discover"}, {"title": "Design", "step": "02"}, "Deploy"]}),
  );
  let steps = props["steps"].as_array().cloned().unwrap_or_default();
  assert_eq!(steps.len(), 3);
  assert_eq!(steps[0]["step"], "1");
  assert_eq!(steps[1]["step"], "02");
  assert_eq!(steps[2]["title"], "Deploy");
  assert_eq!(steps[2]["step"], "3");
}

#[test]
fn training_programs_nested_and_flat_agree() {
  let nested = normalize_props(
    "TrainingProgramsSection",
    &json!({
      "programsSection": {"title": "Academy", "description": "Learn"},
      "trainingPrograms": {"programs": [{"title": "SAP Basics", "topics": "FI, CO"}]},
    }),
  );
  let flat = normalize_props(
    "TrainingProgramsSection",
    &json!({
      "title": "Academy",
      "description": "Learn",
      "programs": [{"name": "SAP Basics", "modules": ["FI", "CO"]}],
    }),
  );
  assert_eq!(nested, flat);
  assert_eq!(nested["trainingPrograms"]["programs"][0]["topics"], json!(["FI", "CO"]));
}

#[test]
fn support_plan_flags_accept_int_and_string() {
  let props = normalize_props(
    "SupportPlansSection",
    &json!({"plans": [{"name": "Gold", "popular": 1}, {"name": "Silver", "featured": "true"}, {"name": "Bronze"}]}),
  );
  let flags: Vec<bool> = props["plans"]
    .as_array()
    .map(|plans| plans.iter().map(|p| p["highlighted"].as_bool().unwrap_or(false)).collect())
    .unwrap_or_default();
  assert_eq!(flags, vec![true, true, false]);
}

#[test]
fn generic_mapping_copies_known_fields_and_first_list() {
  let props = normalize_props(
    "NotRegisteredThing",
    &json!({
      "title": "T",
      "image": "/a.png",
      "sectionHeader": {"title": "H"},
      "steps": [1, 2],
      "stats": [3],
      "ignored": true,
    }),
  );
  assert_eq!(
    props,
    json!({
      "title": "T",
      "image": "/a.png",
      "sectionHeader": {"title": "H"},
      "steps": [1, 2],
      "items": [1, 2],
    })
  );
}

#[test]
fn generic_mapping_keeps_existing_items() {
  let props = normalize_props("Whatever", &json!({"items": ["a"], "faqs": ["b"]}));
  assert_eq!(props, json!({"items": ["a"]}));
}

#[test]
fn every_known_kind_handles_empty_content() {
  for kind in ComponentKind::KNOWN {
    let props = normalize_props(kind.name(), &json!({}));
    assert!(props.is_object(), "{kind} produced {props}");
  }
}
