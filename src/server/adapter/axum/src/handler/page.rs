/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pagewright_injector::escape_html;
use pagewright_server::{Site, validate_slug};

use crate::error::AxumError;

pub(super) async fn handle_home(State(site): State<Arc<Site>>) -> Response {
  render(&site, "home").await
}

pub(super) async fn handle_page(
  State(site): State<Arc<Site>>,
  Path(slug): Path<String>,
) -> Result<Response, AxumError> {
  validate_slug(&slug)?;
  Ok(render(&site, &slug).await)
}

async fn render(site: &Site, slug: &str) -> Response {
  let view = site.render_page(slug).await;
  let status = StatusCode::from_u16(view.status()).unwrap_or(StatusCode::OK);
  (status, Html(shell(site.name(), slug, &view.to_html()))).into_response()
}

/// Minimal document around the rendered body.
fn shell(site_name: &str, slug: &str, body: &str) -> String {
  format!(
    concat!(
      "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
      "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
      "<title>{title}</title></head><body data-page=\"{slug}\">{body}</body></html>",
    ),
    title = escape_html(site_name),
    slug = escape_html(slug),
    body = body,
  )
}
