/* src/server/core/rust/src/preview/tests.rs */

use serde_json::json;

use super::*;
use crate::errors::PageError;
use crate::registry::{RendererRef, SectionRenderer};

fn preview() -> Arc<LivePreview> {
  Arc::new(LivePreview::new(Arc::new(ComponentRegistry::preview(None))))
}

fn cta(description: &str) -> Value {
  json!({
    "componentType": "CTASection",
    "isVisible": true,
    "contentJson": json!({"title": "Ready?", "description": description}).to_string(),
  })
}

#[tokio::test]
async fn only_changed_entries_rerender() {
  let p = preview();
  let hero = json!({"componentType": "HeroSection", "contentJson": {"title": "Hi"}});
  let first = p.render(&[hero.clone(), cta("one")]).await;
  assert_eq!(p.renders(), 2);

  let second = p.render(&[hero, cta("two")]).await;
  assert_eq!(p.renders(), 3);
  assert!(Arc::ptr_eq(&first[0].html, &second[0].html));
  assert!(second[1].html.contains("two"));
}

#[tokio::test]
async fn theme_toggle_rerenders_the_entry() {
  let p = preview();
  let hero = |theme: u8| json!({"componentType": "HeroSection", "theme": theme, "contentJson": {"title": "Hi"}});
  let light = p.render(&[hero(1)]).await;
  assert!(light[0].html.contains(r#"data-theme="light""#));

  let dark = p.render(&[hero(2)]).await;
  assert!(dark[0].html.contains(r#"data-theme="dark""#));
  assert!(!dark[0].html.contains(r#"data-theme="light""#));
  assert_ne!(light[0].key, dark[0].key);
  assert_eq!(p.renders(), 2);
}

#[tokio::test]
async fn draft_placeholders_show_for_empty_content() {
  let entries = preview().render(&[json!({"componentType": "HeroSection", "contentJson": ""})]).await;
  assert!(entries[0].html.contains("Your headline here"));
}

#[tokio::test]
async fn hidden_components_are_skipped() {
  let entries = preview()
    .render(&[
      json!({"componentType": "HeroSection", "isVisible": false}),
      json!({"componentType": "CTASection", "isVisible": 1}),
    ])
    .await;
  assert_eq!(entries.len(), 1);
  assert!(entries[0].key.starts_with("CTASection-1-"));
}

#[tokio::test]
async fn unknown_type_is_named() {
  let entries = preview().render(&[json!({"componentType": "NotRegisteredThing"})]).await;
  assert!(entries[0].html.contains("Component not found: <code>NotRegisteredThing</code>"));
}

#[tokio::test]
async fn aliases_resolve_like_canonical_names() {
  let p = preview();
  let entries = p
    .render(&[
      json!({"componentType": "CtaSection", "contentJson": {"title": "A"}}),
      json!({"componentType": "CTAsSection", "contentJson": {"title": "A"}}),
      json!({"componentType": "CTASection", "contentJson": {"title": "A"}}),
    ])
    .await;
  assert!(entries.iter().all(|e| e.html.contains("pw-cta")));
}

#[tokio::test]
async fn renderer_error_stays_in_its_entry() {
  struct Broken;
  impl SectionRenderer for Broken {
    fn render(&self, _props: &SectionProps<'_>) -> Result<String, PageError> {
      Err(PageError::render("slides must be a list"))
    }
  }
  let registry = ComponentRegistry::new("preview")
    .with_renderer("SliderSection", Arc::new(Broken) as RendererRef)
    .with_renderer("HeroSection", Arc::new(crate::registry::TemplateRenderer::new("HeroSection", "<h1><!--pw:title--></h1>")));
  let p = LivePreview::new(Arc::new(registry));
  let entries = p
    .render(&[
      json!({"componentType": "SliderSection"}),
      json!({"componentType": "HeroSection", "contentJson": {"title": "Still here"}}),
    ])
    .await;
  assert!(entries[0].html.contains("Failed to render <code>SliderSection</code>"));
  assert!(entries[1].html.contains("<h1>Still here</h1>"));
}

#[tokio::test]
async fn edits_within_the_window_recompute_once() {
  tokio::time::pause();
  let session = PreviewSession::spawn(preview(), DEFAULT_DEBOUNCE);
  let mut rx = session.subscribe();

  session.edit(vec![cta("first draft")]);
  tokio::time::sleep(Duration::from_millis(40)).await;
  session.edit(vec![cta("final copy")]);

  rx.changed().await.unwrap();
  let html = to_html(&rx.borrow_and_update());
  assert!(html.contains("final copy"));
  assert!(!html.contains("first draft"));

  tokio::time::sleep(Duration::from_millis(500)).await;
  assert_eq!(session.recomputes(), 1);
}

#[tokio::test]
async fn identical_snapshot_is_not_recomputed() {
  tokio::time::pause();
  let session = PreviewSession::spawn(preview(), DEFAULT_DEBOUNCE);
  session.edit(vec![cta("same")]);
  tokio::time::sleep(Duration::from_millis(200)).await;
  session.edit(vec![cta("same")]);
  tokio::time::sleep(Duration::from_millis(200)).await;
  assert_eq!(session.recomputes(), 1);
  assert_eq!(session.current().len(), 1);
}

#[tokio::test]
async fn theme_edit_is_recomputed() {
  tokio::time::pause();
  let session = PreviewSession::spawn(preview(), DEFAULT_DEBOUNCE);
  let mut themed = cta("same");
  themed["theme"] = json!(1);
  session.edit(vec![themed.clone()]);
  tokio::time::sleep(Duration::from_millis(200)).await;
  themed["theme"] = json!(2);
  session.edit(vec![themed]);
  tokio::time::sleep(Duration::from_millis(200)).await;
  assert_eq!(session.recomputes(), 2);
  assert!(session.current()[0].html.contains(r#"data-theme="dark""#));
}

#[test]
fn recompute_key_tracks_content_and_theme() {
  assert_eq!(recompute_key(&[cta("a")]), recompute_key(&[cta("a")]));
  assert_ne!(recompute_key(&[cta("a")]), recompute_key(&[cta("b")]));
  let mut light = cta("a");
  light["theme"] = json!(1);
  assert_ne!(recompute_key(&[light]), recompute_key(&[cta("a")]));
}
