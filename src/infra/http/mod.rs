mod forms;
mod middleware;
mod posts;

pub use middleware::method_override;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tower::util::MapRequest;

use crate::{
    application::{error::HttpError, posts::PostService},
    infra::assets::serve_static_asset,
    presentation::views::render_not_found_response,
};

use middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
}

/// The router wrapped in the method override, ready for `axum::serve`.
pub type HttpService = MapRequest<Router, fn(Request<Body>) -> Request<Body>>;

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(posts::root))
        .route("/posts", get(posts::index).post(posts::create))
        .route("/posts/new", get(posts::new_form))
        .route(
            "/posts/{id}",
            get(posts::show).put(posts::update).delete(posts::delete),
        )
        .route("/posts/{id}/edit", get(posts::edit_form))
        .route("/static/{*path}", get(serve_static_asset))
        .route("/_health/db", get(db_health))
        .fallback(not_found)
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

/// Method override has to run before routing, so it wraps the router instead of
/// being one of its layers.
pub fn build_service(state: HttpState) -> HttpService {
    MapRequest::new(
        build_router(state),
        method_override as fn(Request<Body>) -> Request<Body>,
    )
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.posts.health().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => HttpError::from_error(
            "infra::http::db_health",
            StatusCode::SERVICE_UNAVAILABLE,
            "Database unavailable",
            &err,
        )
        .into_response(),
    }
}

async fn not_found() -> Response {
    render_not_found_response()
}
