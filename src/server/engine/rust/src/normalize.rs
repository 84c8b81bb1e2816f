/* src/server/engine/rust/src/normalize.rs */

//! Published-page normalizer: persisted `contentJson` -> renderer props.
//!
//! One mapping per `ComponentKind`, plus a generic mapping for unknown types.
//! Every mapping is pure, total, and accepts the historical synonyms of each
//! logical field so old and new documents render the same.

use serde_json::{Value, json};

use crate::fields::{
  Props, clean_content, cta_button, first, list, map_items, object, string_list, text, text_or,
  text_value,
};
use crate::kind::ComponentKind;

pub(crate) const TITLE: &[&str] = &["title", "name", "heading", "label"];
pub(crate) const DESCRIPTION: &[&str] = &["description", "desc", "text", "content", "body"];
pub(crate) const ICON: &[&str] = &["icon", "iconName", "emoji"];
pub(crate) const IMAGE: &[&str] = &["image", "imageUrl", "img", "src"];

const GENERIC_MEDIA: &[&str] = &["image", "imageUrl", "backgroundImage", "backgroundVideo", "video"];
const GENERIC_OBJECTS: &[&str] =
  &["ctaButton", "sectionHeader", "programsSection", "trainingPrograms", "features", "data"];
const GENERIC_LISTS: &[&str] = &[
  "items",
  "list",
  "steps",
  "benefits",
  "features",
  "modules",
  "programs",
  "faqs",
  "painPoints",
  "slides",
  "stats",
  "testimonials",
  "industries",
  "services",
  "values",
  "members",
  "milestones",
  "useCases",
];

/// Normalize raw content for `component_type`.
/// Content that is not a JSON object (or a string encoding one) yields `{}`.
pub fn normalize_props(component_type: &str, content: &Value) -> Value {
  let Some(obj) = clean_content(content) else {
    tracing::warn!(component = component_type, "content is not a JSON object, using empty props");
    return Value::Object(Props::new());
  };
  normalize_kind(&ComponentKind::resolve(component_type), &obj)
}

/// Dispatch over an already-cleaned content object.
pub fn normalize_kind(kind: &ComponentKind, obj: &Props) -> Value {
  match kind {
    ComponentKind::Hero => hero(obj, "", "Get Started"),
    ComponentKind::PayrollHero => hero(obj, "Payroll Made Simple", "Talk to a Payroll Expert"),
    ComponentKind::ManufacturingHero => {
      hero(obj, "ERP for Modern Manufacturing", "Schedule a Consultation")
    }
    ComponentKind::Cta => cta(obj),
    ComponentKind::About => about(obj),
    ComponentKind::Features => features(obj),
    ComponentKind::Faq => faq(obj, "Frequently Asked Questions"),
    ComponentKind::PayrollFaq => faq(obj, "Payroll FAQs"),
    ComponentKind::Testimonials => testimonials(obj),
    ComponentKind::Stats => stats(obj),
    ComponentKind::Contact => contact(obj),
    ComponentKind::Services => services(obj),
    ComponentKind::Process => steps(obj, "Our Process", "processSection"),
    ComponentKind::PayrollWorkflow => steps(obj, "How Payroll Runs", "workflowSection"),
    ComponentKind::Benefits => benefits(obj),
    ComponentKind::PainPoints => pain_points(obj, "Common Challenges"),
    ComponentKind::PayrollPainPoints => pain_points(obj, "Payroll Pain Points"),
    ComponentKind::ManufacturingPainPoints => pain_points(obj, "Manufacturing Challenges"),
    ComponentKind::UseCases => use_cases(obj),
    ComponentKind::Industries => industries(obj),
    ComponentKind::CaseStudies => case_studies(obj, "Success Stories", ""),
    ComponentKind::ManufacturingCaseStudies => case_studies(
      obj,
      "Manufacturing Success Stories",
      "See how manufacturers transformed their operations with our ERP solutions.",
    ),
    ComponentKind::Team => team(obj),
    ComponentKind::Milestones => milestones(obj),
    ComponentKind::Values => values(obj),
    ComponentKind::Video => video(obj),
    ComponentKind::Slider => slider(obj),
    ComponentKind::TrainingPrograms => training_programs(obj),
    ComponentKind::TrainingModules => training_modules(obj),
    ComponentKind::SupportPlans => support_plans(obj),
    ComponentKind::Unknown(_) => generic(obj),
  }
}

/// Title, subtitle and description, with `{nested}.title` style fallbacks.
pub(crate) fn header(obj: &Props, nested: &str, default_title: &str) -> Props {
  let nested_title = format!("{nested}.title");
  let nested_subtitle = format!("{nested}.subtitle");
  let nested_description = format!("{nested}.description");

  let mut out = Props::new();
  out.insert(
    "title".into(),
    json!(text_or(
      obj,
      &["title", "heading", "sectionTitle", nested_title.as_str(), "sectionHeader.title"],
      default_title
    )),
  );
  out.insert(
    "subtitle".into(),
    text_value(obj, &["subtitle", "tagline", nested_subtitle.as_str(), "sectionHeader.subtitle"]),
  );
  out.insert(
    "description".into(),
    json!(text_or(
      obj,
      &[
        "description",
        "intro",
        "sectionDescription",
        nested_description.as_str(),
        "sectionHeader.description"
      ],
      ""
    )),
  );
  out
}

fn titled(item: &Props) -> Value {
  json!({
    "title": text_or(item, TITLE, ""),
    "description": text_or(item, DESCRIPTION, ""),
    "icon": text_value(item, ICON),
  })
}

fn hero(obj: &Props, default_title: &str, default_cta: &str) -> Value {
  let mut out = header(obj, "heroSection", default_title);
  if let Some(headline) = text(obj, &["headline", "heroTitle"]) {
    if text(obj, &["title", "heading"]).is_none() {
      out.insert("title".into(), json!(headline));
    }
  }
  if out.get("description").and_then(Value::as_str).is_some_and(str::is_empty) {
    out.insert("description".into(), json!(text_or(obj, &["text", "content", "body"], "")));
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
  out.insert(
    "secondaryButton".into(),
    match first(obj, &["secondaryButton", "secondaryCta"]) {
      Some(_) => cta_button(obj, &["secondaryButton", "secondaryCta"], "Learn More"),
      None => Value::Null,
    },
  );
  Value::Object(out)
}

fn cta(obj: &Props) -> Value {
  let mut out = header(obj, "ctaSection", "Ready to transform your business?");
  out.insert("ctaButton".into(), cta_button(obj, &["ctaButton", "button", "cta"], "Contact Us"));
  out.insert(
    "secondaryButton".into(),
    match first(obj, &["secondaryButton", "secondaryCta"]) {
      Some(_) => cta_button(obj, &["secondaryButton", "secondaryCta"], "Learn More"),
      None => Value::Null,
    },
  );
  out.insert("backgroundImage".into(), text_value(obj, &["backgroundImage", "bgImage", "image"]));
  Value::Object(out)
}

fn about(obj: &Props) -> Value {
  let mut out = header(obj, "aboutSection", "About Us");
  out.insert("image".into(), text_value(obj, IMAGE));
  out.insert("mission".into(), text_value(obj, &["mission", "missionStatement", "aboutSection.mission"]));
  out.insert("vision".into(), text_value(obj, &["vision", "visionStatement", "aboutSection.vision"]));
  out.insert(
    "highlights".into(),
    json!(string_list(obj, &["highlights", "points", "bulletPoints", "aboutSection.highlights"])),
  );
  Value::Object(out)
}

fn features(obj: &Props) -> Value {
  let mut out = header(obj, "featuresSection", "Key Features");
  let items = map_items(&list(obj, &["features", "featuresSection.items", "items", "list"]), |f| {
    let mut item = titled(f);
    item["image"] = text_value(f, IMAGE);
    item
  });
  out.insert("features".into(), json!(items));
  out.insert("items".into(), json!(items));
  Value::Object(out)
}

pub(crate) fn faq_item(item: &Props) -> Value {
  json!({
    "question": text_or(item, &["question", "q", "title"], ""),
    "answer": text_or(item, &["answer", "a", "content", "description"], ""),
  })
}

fn faq(obj: &Props, default_title: &str) -> Value {
  let data = object(obj, &["faqData"]);
  let title = text(obj, &["title", "heading"])
    .or_else(|| text(&data, &["title"]))
    .unwrap_or_else(|| default_title.to_string());
  let description = text(obj, &["description", "subtitle"])
    .or_else(|| text(&data, &["description", "subtitle"]))
    .unwrap_or_default();
  let items = map_items(
    &list(obj, &["faqItems", "faqs", "items", "faqData.items", "questions"]),
    faq_item,
  );
  let items: Vec<Value> =
    items.into_iter().filter(|i| i["question"].as_str().is_some_and(|q| !q.is_empty())).collect();
  json!({
    "faqData": {
      "title": title,
      "description": description,
      "items": items,
    }
  })
}

fn testimonials(obj: &Props) -> Value {
  let mut out = header(obj, "testimonialsSection", "What Our Clients Say");
  let items = map_items(&list(obj, &["testimonials", "items", "reviews"]), |t| {
    json!({
      "quote": text_or(t, &["quote", "text", "content", "testimonial", "title"], ""),
      "author": text_or(t, &["author", "name", "client"], ""),
      "role": text_value(t, &["role", "position", "jobTitle"]),
      "company": text_value(t, &["company", "organization"]),
      "avatar": text_value(t, &["avatar", "image", "photo"]),
      "rating": first(t, &["rating", "stars"]).and_then(Value::as_f64),
    })
  });
  out.insert("testimonials".into(), json!(items));
  Value::Object(out)
}

fn stats(obj: &Props) -> Value {
  let mut out = header(obj, "statsSection", "");
  let items = map_items(&list(obj, &["stats", "items", "metrics", "numbers"]), |s| {
    json!({
      "value": text_or(s, &["value", "number", "stat", "count", "title"], ""),
      "label": text_or(s, &["label", "name", "description"], ""),
      "prefix": text_value(s, &["prefix"]),
      "suffix": text_value(s, &["suffix", "unit"]),
    })
  });
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

fn services(obj: &Props) -> Value {
  let mut out = header(obj, "servicesSection", "Our Services");
  let items = map_items(&list(obj, &["services", "servicesSection.items", "items"]), |s| {
    let mut item = titled(s);
    item["link"] = text_value(s, &["link", "url", "href"]);
    item["features"] = json!(string_list(s, &["features", "points", "bullets"]));
    item
  });
  out.insert("services".into(), json!(items));
  Value::Object(out)
}

pub(crate) fn numbered_steps(items: &[Value]) -> Vec<Value> {
  map_items(items, |s| {
    let mut step = titled(s);
    step["step"] = text_value(s, &["step", "number", "order"]);
    step
  })
  .into_iter()
  .enumerate()
  .map(|(idx, mut step)| {
    if step["step"].is_null() {
      step["step"] = json!((idx + 1).to_string());
    }
    step
  })
  .collect()
}

fn steps(obj: &Props, default_title: &str, nested: &str) -> Value {
  let mut out = header(obj, nested, default_title);
  let nested_items = format!("{nested}.steps");
  let raw = list(obj, &["steps", nested_items.as_str(), "items", "process", "phases", "workflow"]);
  out.insert("steps".into(), json!(numbered_steps(&raw)));
  Value::Object(out)
}

fn benefits(obj: &Props) -> Value {
  let mut out = header(obj, "benefitsSection", "Benefits");
  let items = map_items(&list(obj, &["benefits", "benefitsSection.items", "items", "list"]), titled);
  out.insert("benefits".into(), json!(items));
  out.insert("image".into(), text_value(obj, IMAGE));
  Value::Object(out)
}

fn pain_points(obj: &Props, default_title: &str) -> Value {
  let mut out = header(obj, "painPointsSection", default_title);
  let items = map_items(
    &list(obj, &["painPoints", "painPointsSection.items", "items", "challenges", "problems"]),
    |p| {
      let mut item = titled(p);
      item["solution"] = text_value(p, &["solution", "answer", "fix"]);
      item
    },
  );
  out.insert("painPoints".into(), json!(items));
  Value::Object(out)
}

fn use_cases(obj: &Props) -> Value {
  let mut out = header(obj, "useCasesSection", "Use Cases");
  let items = map_items(&list(obj, &["useCases", "items", "cases"]), |u| {
    let mut item = titled(u);
    item["industry"] = text_value(u, &["industry", "sector"]);
    item
  });
  out.insert("useCases".into(), json!(items));
  Value::Object(out)
}

fn industries(obj: &Props) -> Value {
  let mut out = header(obj, "industriesSection", "Industries We Serve");
  let items = map_items(&list(obj, &["industries", "industriesSection.items", "items", "sectors"]), |i| {
    let mut item = titled(i);
    item["link"] = text_value(i, &["link", "url", "href"]);
    item["image"] = text_value(i, IMAGE);
    item
  });
  out.insert("industries".into(), json!(items));
  Value::Object(out)
}

pub(crate) fn case_study_item(c: &Props) -> Value {
  json!({
    "title": text_or(c, TITLE, ""),
    "client": text_value(c, &["client", "company", "customer"]),
    "industry": text_value(c, &["industry", "sector"]),
    "challenge": text_or(c, &["challenge", "problem"], ""),
    "solution": text_or(c, &["solution", "approach"], ""),
    "results": string_list(c, &["results", "outcomes", "result"]),
    "image": text_value(c, IMAGE),
  })
}

fn case_studies(obj: &Props, default_title: &str, default_description: &str) -> Value {
  let mut out = header(obj, "caseStudiesSection", default_title);
  if out.get("description").and_then(Value::as_str).is_some_and(str::is_empty) {
    out.insert("description".into(), json!(default_description));
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
      "name": text_or(m, &["name", "title", "fullName"], ""),
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
      "year": text_or(m, &["year", "date", "period"], ""),
      "title": text_or(m, TITLE, ""),
      "description": text_or(m, DESCRIPTION, ""),
    })
  });
  out.insert("milestones".into(), json!(items));
  Value::Object(out)
}

fn values(obj: &Props) -> Value {
  let mut out = header(obj, "valuesSection", "Our Values");
  let items = map_items(&list(obj, &["values", "coreValues", "items"]), titled);
  out.insert("values".into(), json!(items));
  Value::Object(out)
}

pub(crate) fn flag(obj: &Props, paths: &[&str], default: bool) -> bool {
  match first(obj, paths) {
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
    Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    _ => default,
  }
}

fn video(obj: &Props) -> Value {
  let mut out = header(obj, "videoSection", "");
  out.insert("video".into(), text_value(obj, &["video", "videoUrl", "src", "backgroundVideo", "url"]));
  out.insert("poster".into(), text_value(obj, &["poster", "thumbnail", "image", "imageUrl"]));
  out.insert("autoplay".into(), json!(flag(obj, &["autoplay", "autoPlay"], false)));
  Value::Object(out)
}

fn slider(obj: &Props) -> Value {
  let slides = map_items(&list(obj, &["slides", "items", "banners"]), |s| {
    json!({
      "title": text_or(s, TITLE, ""),
      "subtitle": text_value(s, &["subtitle", "tagline"]),
      "description": text_or(s, DESCRIPTION, ""),
      "image": text_value(s, &["image", "imageUrl", "backgroundImage", "bgImage"]),
      "ctaButton": cta_button(s, &["ctaButton", "button", "cta"], "Learn More"),
    })
  });
  let interval = first(obj, &["interval", "autoplaySpeed", "delay"]).and_then(Value::as_u64).unwrap_or(5000);
  json!({
    "slides": slides,
    "autoplay": flag(obj, &["autoplay", "autoPlay"], true),
    "interval": interval,
  })
}

pub(crate) fn program_item(p: &Props) -> Value {
  json!({
    "title": text_or(p, TITLE, ""),
    "description": text_or(p, DESCRIPTION, ""),
    "duration": text_value(p, &["duration", "length", "hours"]),
    "level": text_value(p, &["level", "difficulty"]),
    "topics": string_list(p, &["topics", "modules", "curriculum"]),
    "image": text_value(p, IMAGE),
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
        .or_else(|| text(obj, &["description"])).unwrap_or_default(),
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
  let items = map_items(&list(obj, &["modules", "modulesSection.items", "items", "courses"]), |m| {
    json!({
      "title": text_or(m, TITLE, ""),
      "description": text_or(m, DESCRIPTION, ""),
      "duration": text_value(m, &["duration", "length"]),
      "topics": string_list(m, &["topics", "lessons", "items"]),
    })
  });
  out.insert("modules".into(), json!(items));
  Value::Object(out)
}

pub(crate) fn plan_item(p: &Props) -> Value {
  json!({
    "name": text_or(p, &["name", "title", "tier"], ""),
    "price": text_value(p, &["price", "cost", "amount"]),
    "period": text_value(p, &["period", "billing", "interval"]),
    "features": string_list(p, &["features", "includes", "items"]),
    "highlighted": flag(p, &["highlighted", "featured", "popular", "recommended"], false),
    "ctaButton": cta_button(p, &["ctaButton", "button", "cta"], "Choose Plan"),
  })
}

fn support_plans(obj: &Props) -> Value {
  let mut out = header(obj, "plansSection", "Support Plans");
  let items = map_items(&list(obj, &["plans", "supportPlans", "tiers", "items"]), plan_item);
  out.insert("plans".into(), json!(items));
  Value::Object(out)
}

/// Best-effort mapping for types with no dedicated table entry.
pub fn generic(obj: &Props) -> Value {
  let mut out = Props::new();
  for key in ["title", "subtitle", "description"].iter().chain(GENERIC_MEDIA).chain(GENERIC_OBJECTS) {
    if let Some(value) = obj.get(*key) {
      out.insert((*key).to_string(), value.clone());
    }
  }
  if let Some((key, items)) =
    GENERIC_LISTS.iter().find_map(|k| obj.get(*k).filter(|v| v.is_array()).map(|v| (*k, v)))
  {
    out.insert(key.to_string(), items.clone());
    out.entry("items").or_insert_with(|| items.clone());
  }
  Value::Object(out)
}

#[cfg(test)]
mod tests;
