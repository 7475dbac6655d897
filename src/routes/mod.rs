//! Route tables and the assembled application.

mod common;

pub use common::common_routes;

use crate::handlers::{collections, evaluations, goods, users};
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Resource routes under /api. Each delete endpoint is also mounted without an
/// id so a missing id gets the 400 envelope instead of the router's 404.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/goods", get(goods::list))
        .route("/api/users/query", get(users::list))
        .route("/api/users/add", post(users::add))
        .route("/api/users/delete", delete(users::remove))
        .route("/api/users/delete/", delete(users::remove))
        .route("/api/users/delete/:id", delete(users::remove))
        .route("/api/evaluations/query", get(evaluations::list))
        .route("/api/evaluations/add", post(evaluations::add))
        .route("/api/evaluations/delete", delete(evaluations::remove))
        .route("/api/evaluations/delete/", delete(evaluations::remove))
        .route("/api/evaluations/delete/:id", delete(evaluations::remove))
        .route("/api/collections/query", get(collections::list))
        .route("/api/collections/add", post(collections::add))
        .route("/api/collections/delete", delete(collections::remove))
        .route("/api/collections/delete/", delete(collections::remove))
        .route("/api/collections/delete/:id", delete(collections::remove))
        .with_state(state)
}

/// Full application: resource and common routes with tracing and a body size limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
