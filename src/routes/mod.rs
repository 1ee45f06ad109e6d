//! Router assembly.

mod api;
mod common;
pub use api::api_routes;
pub use common::common_routes;

use crate::config::Config;
use crate::doc::ApiDoc;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Full application: resource routes, common routes and the OpenAPI document.
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
