/* src/server/adapter/axum/src/handler/mod.rs */

mod api;
mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use pagewright_server::Site;

pub(crate) fn build_router(site: Arc<Site>) -> Router {
  Router::new()
    .route("/", get(page::handle_home))
    .route("/{slug}", get(page::handle_page))
    .route("/_pagewright/page/{slug}", get(api::handle_get_page).put(api::handle_save_page))
    .route("/_pagewright/preview", post(api::handle_preview))
    .route("/_pagewright/categories", get(api::handle_categories))
    .route("/_pagewright/data/{file}", get(api::handle_data))
    .with_state(site)
}

#[cfg(test)]
mod tests;
