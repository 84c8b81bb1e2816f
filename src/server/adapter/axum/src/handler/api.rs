/* src/server/adapter/axum/src/handler/api.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use pagewright_server::engine::page::component_type;
use pagewright_server::{PageError, Site, preview};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AxumError;

fn ok(data: Value) -> Json<Value> {
  Json(json!({ "ok": true, "data": data }))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, PageError> {
  serde_json::from_slice(body).map_err(|e| PageError::validation(e.to_string()))
}

pub(super) async fn handle_get_page(
  State(site): State<Arc<Site>>,
  Path(slug): Path<String>,
) -> Result<Json<Value>, AxumError> {
  Ok(ok(site.service().page(&slug).await?))
}

pub(super) async fn handle_save_page(
  State(site): State<Arc<Site>>,
  Path(slug): Path<String>,
  body: axum::body::Bytes,
) -> Result<Json<Value>, AxumError> {
  let doc: Value = parse_body(&body)?;
  site.service().save_page(&slug, doc).await?;
  Ok(ok(json!({ "slug": slug })))
}

/// Either `{"components": [...]}` or the bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PreviewRequest {
  Wrapped { components: Vec<Value> },
  Bare(Vec<Value>),
}

pub(super) async fn handle_preview(
  State(site): State<Arc<Site>>,
  body: axum::body::Bytes,
) -> Result<Json<Value>, AxumError> {
  let components = match parse_body(&body)? {
    PreviewRequest::Wrapped { components } | PreviewRequest::Bare(components) => components,
  };
  let entries = site.preview(&components).await;
  tracing::debug!(
    count = entries.len(),
    types = ?components.iter().map(component_type).collect::<Vec<_>>(),
    "preview rendered"
  );
  Ok(ok(json!({
    "html": preview::to_html(&entries),
    "entries": entries,
  })))
}

pub(super) async fn handle_categories(State(site): State<Arc<Site>>) -> Result<Json<Value>, AxumError> {
  Ok(ok(site.service().categories().await?))
}

pub(super) async fn handle_data(
  State(site): State<Arc<Site>>,
  Path(file): Path<String>,
) -> Result<Json<Value>, AxumError> {
  Ok(ok(site.service().public_data(&file).await?))
}
