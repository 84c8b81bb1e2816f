/* src/server/engine/rust/src/preview.rs */

//! Live-preview transform table.
//!
//! Runs on the builder's in-progress component array. It produces the same
//! prop shapes as [`crate::normalize`] so the same renderers mount in both
//! places, but fills empty drafts with visible placeholders and tolerates
//! half-typed `contentJson` strings.

use serde_json::{Value, json};

use crate::fields::{
  Props, cta_button, first, list, map_items, object, parse_content, string_list,
  strip_numeric_keys, text, text_or, text_value,
};
use crate::hash::content_hash;
use crate::kind::ComponentKind;
use crate::normalize::{
  DESCRIPTION, ICON, IMAGE, TITLE, case_study_item, faq_item, flag, header, numbered_steps,
  plan_item, program_item,
};
use crate::section::Theme;

const DRAFT_TITLE: &str = "Untitled section";
const DRAFT_DESCRIPTION: &str = "Add a description in the editor.";

/// Serialized snapshot of a component's content; the recompute key.
/// Strings are used verbatim so a half-typed draft still gets a stable key.
pub fn content_key(content: &Value) -> String {
  match content {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Everything an entry's preview HTML depends on besides type and position.
pub fn entry_snapshot(theme: Theme, content: &Value) -> String {
  format!("{}\u{1f}{}", theme.as_str(), content_key(content))
}

/// Render key for a preview entry: `{type}-{index}-{hash}`, where the hash
/// covers the theme and the serialized content.
pub fn entry_key(component_type: &str, index: usize, theme: Theme, content: &Value) -> String {
  format!("{component_type}-{index}-{}", content_hash(&entry_snapshot(theme, content)))
}

/// Transform draft content for `component_type`.
pub fn transform_for_preview(component_type: &str, content: &Value) -> Value {
  let (obj, parse_error) = match content {
    Value::Null => (Props::new(), false),
    Value::String(s) if s.trim().is_empty() => (Props::new(), false),
    other => match parse_content(other) {
      Some(map) => (strip_numeric_keys(&map), false),
      None => (Props::new(), true),
    },
  };
  let mut props = transform_kind(&ComponentKind::resolve(component_type), &obj);
  if parse_error {
    tracing::debug!(component = component_type, "draft content is not a JSON object");
    if let Value::Object(map) = &mut props {
      map.insert("_draftError".into(), json!("Content is not valid JSON yet"));
    }
  }
  props
}

pub fn transform_kind(kind: &ComponentKind, obj: &Props) -> Value {
  match kind {
    ComponentKind::Hero => hero(obj, "Your headline here", "Get Started"),
    ComponentKind::PayrollHero => hero(obj, "Payroll Made Simple", "Talk to a Payroll Expert"),
    ComponentKind::ManufacturingHero => {
      hero(obj, "ERP for Modern Manufacturing", "Schedule a Consultation")
    }
    ComponentKind::Cta => cta(obj),
    ComponentKind::About => about(obj),
    ComponentKind::Features => titled_list(obj, "featuresSection", "Key Features", &FEATURES),
    ComponentKind::Faq => faq(obj, "Frequently Asked Questions"),
    ComponentKind::PayrollFaq => faq(obj, "Payroll FAQs"),
    ComponentKind::Testimonials => testimonials(obj),
    ComponentKind::Stats => stats(obj),
    ComponentKind::Contact => contact(obj),
    ComponentKind::Services => titled_list(obj, "servicesSection", "Our Services", &SERVICES),
    ComponentKind::Process => steps(obj, "processSection", "Our Process"),
    ComponentKind::PayrollWorkflow => steps(obj, "workflowSection", "How Payroll Runs"),
    ComponentKind::Benefits => titled_list(obj, "benefitsSection", "Benefits", &BENEFITS),
    ComponentKind::PainPoints => {
      titled_list(obj, "painPointsSection", "Common Challenges", &PAIN_POINTS)
    }
    ComponentKind::PayrollPainPoints => {
      titled_list(obj, "painPointsSection", "Payroll Pain Points", &PAIN_POINTS)
    }
    ComponentKind::ManufacturingPainPoints => {
      titled_list(obj, "painPointsSection", "Manufacturing Challenges", &PAIN_POINTS)
    }
    ComponentKind::UseCases => titled_list(obj, "useCasesSection", "Use Cases", &USE_CASES),
    ComponentKind::Industries => {
      titled_list(obj, "industriesSection", "Industries We Serve", &INDUSTRIES)
    }
    ComponentKind::CaseStudies => case_studies(obj, "Success Stories", DRAFT_DESCRIPTION),
    ComponentKind::ManufacturingCaseStudies => case_studies(
      obj,
      "Manufacturing Success Stories",
      "See how manufacturers transformed their operations with our ERP solutions.",
    ),
    ComponentKind::Team => team(obj),
    ComponentKind::Milestones => milestones(obj),
    ComponentKind::Values => titled_list(obj, "valuesSection", "Our Values", &VALUES),
    ComponentKind::Video => video(obj),
    ComponentKind::Slider => slider(obj),
    ComponentKind::TrainingPrograms => training_programs(obj),
    ComponentKind::TrainingModules => training_modules(obj),
    ComponentKind::SupportPlans => support_plans(obj),
    ComponentKind::Unknown(_) => unknown(obj),
  }
}

/// A list-bearing section: where its items live and what they carry.
struct ListShape {
  key: &'static str,
  sources: &'static [&'static str],
  extra: &'static [(&'static str, &'static [&'static str])],
  string_lists: &'static [(&'static str, &'static [&'static str])],
  mirror_items: bool,
  section_image: bool,
  placeholder: &'static str,
}

const FEATURES: ListShape = ListShape {
  key: "features",
  sources: &["features", "featuresSection.items", "items", "list"],
  extra: &[("image", IMAGE)],
  string_lists: &[],
  mirror_items: true,
  section_image: false,
  placeholder: "Feature",
};

const SERVICES: ListShape = ListShape {
  key: "services",
  sources: &["services", "servicesSection.items", "items"],
  extra: &[("link", &["link", "url", "href"])],
  string_lists: &[("features", &["features", "points", "bullets"])],
  mirror_items: false,
  section_image: false,
  placeholder: "Service",
};

const BENEFITS: ListShape = ListShape {
  key: "benefits",
  sources: &["benefits", "benefitsSection.items", "items", "list"],
  extra: &[],
  string_lists: &[],
  mirror_items: false,
  section_image: true,
  placeholder: "Benefit",
};

const PAIN_POINTS: ListShape = ListShape {
  key: "painPoints",
  sources: &["painPoints", "painPointsSection.items", "items", "challenges", "problems"],
  extra: &[("solution", &["solution", "answer", "fix"])],
  string_lists: &[],
  mirror_items: false,
  section_image: false,
  placeholder: "Challenge",
};

const USE_CASES: ListShape = ListShape {
  key: "useCases",
  sources: &["useCases", "items", "cases"],
  extra: &[("industry", &["industry", "sector"])],
  string_lists: &[],
  mirror_items: false,
  section_image: false,
  placeholder: "Use case",
};

const INDUSTRIES: ListShape = ListShape {
  key: "industries",
  sources: &["industries", "industriesSection.items", "items", "sectors"],
  extra: &[("link", &["link", "url", "href"]), ("image", IMAGE)],
  string_lists: &[],
  mirror_items: false,
  section_image: false,
  placeholder: "Industry",
};

const VALUES: ListShape = ListShape {
  key: "values",
  sources: &["values", "coreValues", "items"],
  extra: &[],
  string_lists: &[],
  mirror_items: false,
  section_image: false,
  placeholder: "Value",
};

fn placeholder_item(label: &str) -> Value {
  json!({
    "title": format!("{label} title"),
    "description": DRAFT_DESCRIPTION,
    "icon": null,
    "_placeholder": true,
  })
}

fn titled_list(obj: &Props, nested: &str, draft_title: &str, shape: &ListShape) -> Value {
  let mut out = header(obj, nested, draft_title);
  let mut items = map_items(&list(obj, shape.sources), |raw| {
    let mut item = json!({
      "title": text_or(raw, TITLE, ""),
      "description": text_or(raw, DESCRIPTION, ""),
      "icon": text_value(raw, ICON),
    });
    for (key, paths) in shape.extra {
      item[*key] = text_value(raw, paths);
    }
    for (key, paths) in shape.string_lists {
      item[*key] = json!(string_list(raw, paths));
    }
    item
  });
  if items.is_empty() {
    items.push(placeholder_item(shape.placeholder));
  }
  out.insert(shape.key.into(), json!(items));
  if shape.mirror_items {
    out.insert("items".into(), json!(items));
  }
  if shape.section_image {
    out.insert("image".into(), text_value(obj, IMAGE));
  }
  Value::Object(out)
}

fn optional_button(obj: &Props) -> Value {
  match first(obj, &["secondaryButton", "secondaryCta"]) {
    Some(_) => cta_button(obj, &["secondaryButton", "secondaryCta"], "Learn More"),
    None => Value::Null,
  }
}

fn hero(obj: &Props, draft_title: &str, default_cta: &str) -> Value {
  let mut out = header(obj, "heroSection", draft_title);
  if text(obj, &["title", "heading"]).is_none() {
    if let Some(headline) = text(obj, &["headline", "heroTitle"]) {
      out.insert("title".into(), json!(headline));
    }
  }
  if out.get("description").and_then(Value::as_str).is_some_and(str::is_empty) {
    out.insert(
      "description".into(),
      json!(text_or(obj, &["text", "content", "body"], DRAFT_DESCRIPTION)),
    );
  }
  out.insert(
    "backgroundImage".into(),
    text_value(obj, &["backgroundImage", "bgImage", "heroImage", "image", "imageUrl"]),
  );
  out.insert("backgroundVideo".into(), text_value(obj, &["backgroundVideo", "video", "videoUrl"]));
  out.insert(
    "ctaButton".into(),
    cta_button(obj, &["ctaButton", "button", "cta", "primaryButton"], default_cta),
  );
  out.insert("secondaryButton".into(), optional_button(obj));
  Value::Object(out)
}

fn cta(obj: &Props) -> Value {
  let mut out = header(obj, "ctaSection", "Ready to transform your business?");
  out.insert("ctaButton".into(), cta_button(obj, &["ctaButton", "button", "cta"], "Contact Us"));
  out.insert("secondaryButton".into(), optional_button(obj));
  out.insert("backgroundImage".into(), text_value(obj, &["backgroundImage", "bgImage", "image"]));
  Value::Object(out)
}

fn about(obj: &Props) -> Value {
  let mut out = header(obj, "aboutSection", "About Us");
  if out.get("description").and_then(Value::as_str).is_some_and(str::is_empty) {
    out.insert("description".into(), json!(DRAFT_DESCRIPTION));
  }
  out.insert("image".into(), text_value(obj, IMAGE));
  out.insert("mission".into(), text_value(obj, &["mission", "missionStatement", "aboutSection.mission"]));
  out.insert("vision".into(), text_value(obj, &["vision", "visionStatement", "aboutSection.vision"]));
  out.insert(
    "highlights".into(),
    json!(string_list(obj, &["highlights", "points", "bulletPoints", "aboutSection.highlights"])),
  );
  Value::Object(out)
}

fn faq(obj: &Props, draft_title: &str) -> Value {
  let data = object(obj, &["faqData"]);
  let mut items: Vec<Value> =
    map_items(&list(obj, &["faqItems", "faqs", "items", "faqData.items", "questions"]), faq_item)
      .into_iter()
      .filter(|i| i["question"].as_str().is_some_and(|q| !q.is_empty()))
      .collect();
  if items.is_empty() {
    items.push(json!({"question": "Your first question?", "answer": DRAFT_DESCRIPTION}));
  }
  json!({
    "faqData": {
      "title": text(obj, &["title", "heading"]).or_else(|| text(&data, &["title"]))
        .unwrap_or_else(|| draft_title.to_string()),
      "description": text(obj, &["description", "subtitle"])
        .or_else(|| text(&data, &["description", "subtitle"])).unwrap_or_default(),
      "items": items,
    }
  })
}

fn testimonials(obj: &Props) -> Value {
  let mut out = header(obj, "testimonialsSection", "What Our Clients Say");
  let mut items = map_items(&list(obj, &["testimonials", "items", "reviews"]), |t| {
    json!({
      "quote": text_or(t, &["quote", "text", "content", "testimonial", "title"], ""),
      "author": text_or(t, &["author", "name", "client"], ""),
      "role": text_value(t, &["role", "position", "jobTitle"]),
      "company": text_value(t, &["company", "organization"]),
      "avatar": text_value(t, &["avatar", "image", "photo"]),
      "rating": first(t, &["rating", "stars"]).and_then(Value::as_f64),
    })
  });
  if items.is_empty() {
    items.push(json!({
      "quote": "A short client quote appears here.",
      "author": "Client name",
      "role": null, "company": null, "avatar": null, "rating": null,
      "_placeholder": true,
    }));
  }
  out.insert("testimonials".into(), json!(items));
  Value::Object(out)
}

fn stats(obj: &Props) -> Value {
  let mut out = header(obj, "statsSection", "");
  let mut items = map_items(&list(obj, &["stats", "items", "metrics", "numbers"]), |s| {
    json!({
      "value": text_or(s, &["value", "number", "stat", "count", "title"], ""),
      "label": text_or(s, &["label", "name", "description"], ""),
      "prefix": text_value(s, &["prefix"]),
      "suffix": text_value(s, &["suffix", "unit"]),
    })
  });
  if items.is_empty() {
    items.push(json!({"value": "100", "label": "Metric label", "prefix": null, "suffix": "+", "_placeholder": true}));
  }
  out.insert("stats".into(), json!(items));
  Value::Object(out)
}

fn contact(obj: &Props) -> Value {
  let mut out = header(obj, "contactSection", "Get in Touch");
  out.insert("email".into(), text_value(obj, &["email", "contactInfo.email", "contact.email"]));
  out.insert("phone".into(), text_value(obj, &["phone", "contactInfo.phone", "contact.phone"]));
  out.insert(
    "address".into(),
    text_value(obj, &["address", "contactInfo.address", "contact.address", "location"]),
  );
  out.insert("hours".into(), text_value(obj, &["hours", "businessHours", "contactInfo.hours"]));
  out.insert("ctaButton".into(), cta_button(obj, &["ctaButton", "button"], "Send Message"));
  Value::Object(out)
}

fn steps(obj: &Props, nested: &str, draft_title: &str) -> Value {
  let mut out = header(obj, nested, draft_title);
  let nested_items = format!("{nested}.steps");
  let raw = list(obj, &["steps", nested_items.as_str(), "items", "process", "phases", "workflow"]);
  let mut steps = numbered_steps(&raw);
  if steps.is_empty() {
    let mut first_step = placeholder_item("Step");
    first_step["step"] = json!("1");
    steps.push(first_step);
  }
  out.insert("steps".into(), json!(steps));
  Value::Object(out)
}

fn case_studies(obj: &Props, draft_title: &str, draft_description: &str) -> Value {
  let mut out = header(obj, "caseStudiesSection", draft_title);
  if out.get("description").and_then(Value::as_str).is_some_and(str::is_empty) {
    out.insert("description".into(), json!(draft_description));
  }
  let items = map_items(
    &list(obj, &["caseStudies", "caseStudiesSection.items", "items", "studies"]),
    case_study_item,
  );
  out.insert("items".into(), json!(items));
  Value::Object(out)
}

fn team(obj: &Props) -> Value {
  let mut out = header(obj, "teamSection", "Our Team");
  let items = map_items(&list(obj, &["members", "team", "items", "people"]), |m| {
    json!({
      "name": text_or(m, &["name", "title", "fullName"], "Team member"),
      "role": text_value(m, &["role", "position", "jobTitle"]),
      "bio": text_value(m, &["bio", "description"]),
      "image": text_value(m, &["image", "photo", "avatar", "imageUrl"]),
      "linkedin": text_value(m, &["linkedin", "linkedIn", "social.linkedin"]),
    })
  });
  out.insert("members".into(), json!(items));
  Value::Object(out)
}

fn milestones(obj: &Props) -> Value {
  let mut out = header(obj, "milestonesSection", "Our Journey");
  let items = map_items(&list(obj, &["milestones", "timeline", "items"]), |m| {
    json!({
      "year": text_or(m, &["year", "date", "period"], "YYYY"),
      "title": text_or(m, TITLE, ""),
      "description": text_or(m, DESCRIPTION, ""),
    })
  });
  out.insert("milestones".into(), json!(items));
  Value::Object(out)
}

fn video(obj: &Props) -> Value {
  let mut out = header(obj, "videoSection", "");
  out.insert("video".into(), text_value(obj, &["video", "videoUrl", "src", "backgroundVideo", "url"]));
  out.insert("poster".into(), text_value(obj, &["poster", "thumbnail", "image", "imageUrl"]));
  // Autoplay stays off while editing regardless of the saved flag.
  out.insert("autoplay".into(), json!(false));
  out.insert("_savedAutoplay".into(), json!(flag(obj, &["autoplay", "autoPlay"], false)));
  Value::Object(out)
}

fn slider(obj: &Props) -> Value {
  let mut slides = map_items(&list(obj, &["slides", "items", "banners"]), |s| {
    json!({
      "title": text_or(s, TITLE, ""),
      "subtitle": text_value(s, &["subtitle", "tagline"]),
      "description": text_or(s, DESCRIPTION, ""),
      "image": text_value(s, &["image", "imageUrl", "backgroundImage", "bgImage"]),
      "ctaButton": cta_button(s, &["ctaButton", "button", "cta"], "Learn More"),
    })
  });
  if slides.is_empty() {
    slides.push(json!({
      "title": "Slide title",
      "subtitle": null,
      "description": DRAFT_DESCRIPTION,
      "image": null,
      "ctaButton": {"text": "Learn More", "link": null, "variant": "primary"},
      "_placeholder": true,
    }));
  }
  json!({
    "slides": slides,
    "autoplay": false,
    "interval": first(obj, &["interval", "autoplaySpeed", "delay"]).and_then(Value::as_u64).unwrap_or(5000),
  })
}

fn training_programs(obj: &Props) -> Value {
  let section = object(obj, &["programsSection"]);
  let programs = map_items(
    &list(obj, &["trainingPrograms.programs", "trainingPrograms.items", "programs", "trainingPrograms", "items"]),
    program_item,
  );
  json!({
    "programsSection": {
      "title": text(&section, &["title"]).or_else(|| text(obj, &["title", "heading"]))
        .unwrap_or_else(|| "Training Programs".to_string()),
      "description": text(&section, &["description", "subtitle"])
        .or_else(|| text(obj, &["description"])).unwrap_or_else(|| DRAFT_DESCRIPTION.to_string()),
      "image": text(&section, IMAGE).or_else(|| text(obj, IMAGE)),
    },
    "trainingPrograms": {
      "title": text_value(obj, &["trainingPrograms.title", "programsTitle"]),
      "programs": programs,
    },
  })
}

fn training_modules(obj: &Props) -> Value {
  let mut out = header(obj, "modulesSection", "Training Modules");
  let mut items = map_items(&list(obj, &["modules", "modulesSection.items", "items", "courses"]), |m| {
    json!({
      "title": text_or(m, TITLE, ""),
      "description": text_or(m, DESCRIPTION, ""),
      "duration": text_value(m, &["duration", "length"]),
      "topics": string_list(m, &["topics", "lessons", "items"]),
    })
  });
  if items.is_empty() {
    items.push(json!({"title": "Module title", "description": DRAFT_DESCRIPTION, "duration": null, "topics": [], "_placeholder": true}));
  }
  out.insert("modules".into(), json!(items));
  Value::Object(out)
}

fn support_plans(obj: &Props) -> Value {
  let mut out = header(obj, "plansSection", "Support Plans");
  let items = map_items(&list(obj, &["plans", "supportPlans", "tiers", "items"]), plan_item);
  out.insert("plans".into(), json!(items));
  Value::Object(out)
}

/// Unknown types still get the generic mapping, plus a draft title so the
/// admin can see the block in the preview pane.
fn unknown(obj: &Props) -> Value {
  let mut props = crate::normalize::generic(obj);
  if let Value::Object(map) = &mut props {
    map.entry("title").or_insert_with(|| json!(DRAFT_TITLE));
  }
  props
}
