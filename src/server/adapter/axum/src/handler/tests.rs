/* src/server/adapter/axum/src/handler/tests.rs */

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pagewright_server::{CacheTtls, MemorySource, PageService};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;

fn router(source: MemorySource) -> Router {
  let service = PageService::new(Arc::new(source), CacheTtls::default());
  build_router(Arc::new(Site::new("Acme ERP", service)))
}

fn home_source() -> MemorySource {
  MemorySource::new()
    .with_page(
      "home",
      json!({"components": [
        {"componentType": "HeroSection", "isVisible": true, "theme": 1, "contentJson": "{\"title\":\"Run your plant\"}"},
        {"componentType": "NotRegisteredThing", "isVisible": true},
      ]}),
    )
    .with_categories(json!([{"name": "ERP", "slug": "erp"}]))
    .with_data("stats.json", json!({"clients": 120}))
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, String) {
  let res = router.oneshot(req).await.unwrap();
  let status = res.status();
  let bytes = res.into_body().collect().await.unwrap().to_bytes();
  (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
  send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn json_body(text: &str) -> Value {
  serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn home_renders_sections_in_shell() {
  let (status, html) = get(router(home_source()), "/").await;
  assert_eq!(status, StatusCode::OK);
  assert!(html.starts_with("<!DOCTYPE html>"));
  assert!(html.contains("<title>Acme ERP</title>"));
  assert!(html.contains(r#"<section data-theme="light""#));
  assert!(html.contains("<h1>Run your plant</h1>"));
  assert!(html.contains("Component not found: <code>NotRegisteredThing</code>"));
}

#[tokio::test]
async fn unknown_slug_is_404_page() {
  let (status, html) = get(router(home_source()), "/pricing").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(html.contains("No content for page 'pricing'"));
}

#[tokio::test]
async fn page_json_and_errors() {
  let (status, body) = get(router(home_source()), "/_pagewright/page/home").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json_body(&body)["data"]["components"][0]["componentType"], "HeroSection");

  let (status, body) = get(router(home_source()), "/_pagewright/page/missing").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json_body(&body), json!({"ok": false, "error": {"code": "NOT_FOUND", "message": "page 'missing' not found"}}));
}

#[tokio::test]
async fn save_then_render() {
  let router = router(home_source());
  let doc = json!({"components": [{"componentType": "CTASection", "isVisible": 1, "contentJson": {"title": "Talk to sales"}}]});
  let req = Request::put("/_pagewright/page/contact")
    .header("content-type", "application/json")
    .body(Body::from(doc.to_string()))
    .unwrap();
  let (status, body) = send(router.clone(), req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json_body(&body)["data"]["slug"], "contact");

  let (status, html) = get(router, "/contact").await;
  assert_eq!(status, StatusCode::OK);
  assert!(html.contains("Talk to sales"));
}

#[tokio::test]
async fn save_rejects_invalid_json() {
  let req = Request::put("/_pagewright/page/home").body(Body::from("{nope")).unwrap();
  let (status, body) = send(router(home_source()), req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json_body(&body)["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn preview_renders_unsaved_components() {
  let payload = json!({"components": [
    {"componentType": "HeroSection", "contentJson": ""},
    {"componentType": "FAQSection", "contentJson": "{\"items\": ["},
  ]});
  let req = Request::post("/_pagewright/preview").body(Body::from(payload.to_string())).unwrap();
  let (status, body) = send(router(MemorySource::new()), req).await;
  assert_eq!(status, StatusCode::OK);
  let body = json_body(&body);
  assert_eq!(body["data"]["entries"].as_array().map(Vec::len), Some(2));
  assert!(body["data"]["html"].as_str().unwrap().contains("Your headline here"));
}

#[tokio::test]
async fn categories_and_public_data() {
  let (status, body) = get(router(home_source()), "/_pagewright/categories").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json_body(&body)["data"][0]["name"], "ERP");

  let (_, body) = get(router(home_source()), "/_pagewright/data/stats.json").await;
  assert_eq!(json_body(&body)["data"]["clients"], 120);
}
