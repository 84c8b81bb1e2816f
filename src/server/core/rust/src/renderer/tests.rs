/* src/server/core/rust/src/renderer/tests.rs */

use serde_json::{Value, json};

use super::*;
use crate::section::PLACEHOLDER;
use crate::service::{CacheTtls, PageService};
use crate::source::MemorySource;

fn renderer() -> DynamicPageRenderer {
  DynamicPageRenderer::new(Arc::new(ComponentRegistry::public(None)))
}

fn loaded(page: Value) -> PageState {
  PageState { page_data: Some(page), loading: false, error: None }
}

fn sections(view: &PageView) -> &[RenderedSection] {
  match view {
    PageView::Sections { sections, .. } => sections,
    other => panic!("expected sections, got {other:?}"),
  }
}

#[tokio::test]
async fn hero_renders_in_one_dark_section() {
  let state = loaded(json!({"components": [
    {"componentType": "HeroSection", "contentJson": "{\"title\":\"Hi\"}", "isVisible": true, "theme": 2}
  ]}));
  let html = renderer().render("home", &state).await.to_html();
  assert_eq!(html.matches("<section ").count(), 1);
  assert!(html.contains(r#"<section data-theme="dark""#));
  assert!(html.contains("<h1>Hi</h1>"));
}

#[tokio::test]
async fn visibility_accepts_true_and_one_only() {
  let state = loaded(json!({"components": [
    {"componentType": "HeroSection", "isVisible": true},
    {"componentType": "CTASection", "isVisible": 1},
    {"componentType": "FAQSection", "isVisible": 0},
    {"componentType": "StatsSection", "isVisible": false},
    {"componentType": "TeamSection", "isVisible": null},
    {"componentType": "ValuesSection"},
  ]}));
  let r = renderer();
  let view = r.render("home", &state).await;
  let ids: Vec<&str> = sections(&view).iter().map(|s| s.section_id.as_str()).collect();
  assert_eq!(ids, ["component-0", "component-1"]);

  let page = state.page_data.as_ref().unwrap();
  let map = r.loader().current(&pagewright_engine::entries(page).1).unwrap();
  assert_eq!(map.len(), 2);
  assert!(map.values().all(|l| l.entry.visible && l.component.is_some()));
}

#[tokio::test]
async fn unknown_type_renders_not_found_box() {
  let state = loaded(json!({"components": [
    {"componentType": "NotRegisteredThing", "isVisible": true},
    {"componentType": "CTASection", "isVisible": true, "contentJson": {"title": "Call us"}},
  ]}));
  let view = renderer().render("about", &state).await;
  let list = sections(&view);
  assert!(list[0].html.contains("Component not found: <code>NotRegisteredThing</code>"));
  assert!(list[1].html.contains("Call us"));
}

#[tokio::test]
async fn sections_follow_order_index() {
  let state = loaded(json!({"components": [
    {"componentType": "CTASection", "isVisible": true, "orderIndex": 2},
    {"componentType": "HeroSection", "isVisible": true, "orderIndex": 1},
  ]}));
  let view = renderer().render("home", &state).await;
  let types: Vec<&str> = sections(&view).iter().map(|s| s.component_type.as_str()).collect();
  assert_eq!(types, ["HeroSection", "CTASection"]);
  assert_eq!(sections(&view)[0].section_id, "component-1");
}

#[tokio::test]
async fn view_precedence() {
  let r = renderer();
  let page = json!({"components": [{"componentType": "HeroSection", "isVisible": true}]});

  let loading = PageState { page_data: Some(page.clone()), loading: true, error: Some("x".into()) };
  assert_eq!(r.render("", &loading).await, PageView::Loading { skeleton: SkeletonKind::Home });
  let loading = PageState { loading: true, ..PageState::default() };
  assert_eq!(r.render("services", &loading).await, PageView::Loading { skeleton: SkeletonKind::Generic });

  let failed = PageState { page_data: Some(page), loading: false, error: Some("boom".into()) };
  assert!(matches!(r.render("home", &failed).await, PageView::Error { .. }));

  assert_eq!(r.render("home", &PageState::default()).await, PageView::NoData { slug: "home".into() });

  let hidden = loaded(json!({"components": [{"componentType": "HeroSection", "isVisible": false}]}));
  assert_eq!(r.render("home", &hidden).await, PageView::NoSections { slug: "home".into() });
}

#[tokio::test]
async fn failed_fetch_shows_error_view() {
  let service = PageService::new(Arc::new(MemorySource::new()), CacheTtls::default());
  let data = service.page_data();
  data.set_slug("services");
  let state = data.settled().await;
  assert_eq!(state.page_data, None);

  let view = renderer().render("services", &state).await;
  assert_eq!(view.status(), 502);
  let html = view.to_html();
  assert!(html.contains("Could not load page 'services'"));
  assert!(html.contains("not found"));
}

#[tokio::test]
async fn snapshot_uses_placeholders_until_resolved() {
  let r = renderer();
  let state = loaded(json!({"components": [{"componentType": "HeroSection", "isVisible": true}]}));
  let before = r.snapshot("home", &state);
  assert_eq!(&*sections(&before)[0].html, PLACEHOLDER);

  r.render("home", &state).await;
  let after = r.snapshot("home", &state);
  assert!(sections(&after)[0].html.starts_with("<section "));
}

#[tokio::test]
async fn snapshot_never_reuses_renderers_from_another_section_set() {
  let r = renderer();
  let hero = loaded(json!({"components": [{"componentType": "HeroSection", "isVisible": true}]}));
  r.render("home", &hero).await;

  let faq = loaded(json!({"components": [
    {"componentType": "FAQSection", "isVisible": true, "contentJson": {"items": [{"question": "Q", "answer": "A"}]}}
  ]}));
  let view = r.snapshot("home", &faq);
  assert_eq!(&*sections(&view)[0].html, PLACEHOLDER);

  let view = r.render("home", &faq).await;
  let html = &sections(&view)[0].html;
  assert!(html.contains(r#"data-component="FAQSection""#));
  assert!(!html.contains("pw-hero"));
}

#[tokio::test]
async fn unchanged_sections_skip_the_renderer() {
  let r = renderer();
  let first = loaded(json!({"components": [
    {"componentType": "HeroSection", "isVisible": true, "contentJson": {"title": "A"}},
    {"componentType": "CTASection", "isVisible": true, "contentJson": {"title": "B"}},
  ]}));
  r.render("home", &first).await;
  assert_eq!(r.sections().renders(), 2);

  let second = loaded(json!({"components": [
    {"componentType": "HeroSection", "isVisible": true, "contentJson": {"title": "A"}},
    {"componentType": "CTASection", "isVisible": true, "contentJson": {"title": "B2"}},
  ]}));
  let view = r.render("home", &second).await;
  assert_eq!(r.sections().renders(), 3);
  assert_eq!(r.loader().passes(), 1);
  assert!(sections(&view)[1].html.contains("B2"));
}
