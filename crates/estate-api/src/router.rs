//! Route definitions for the Estate Hub HTTP API.
//!
//! JSON routes live under `/api`, except registration which keeps its
//! historical `/register` path. Uploaded photos are served as static files
//! under the configured public path.

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::map_response_with_state,
    response::Response,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Room left in the body limit for the text fields sent alongside a photo.
const FORM_FIELDS_ALLOWANCE: usize = 64 * 1024;

/// Build the Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let storage = &state.config.storage;
    let max_body = usize::try_from(storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_FIELDS_ALLOWANCE);
    let public_path = storage.public_path.trim_end_matches('/').to_string();

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(property_routes())
        .merge(health_routes());

    let cache_control = HeaderValue::from_str(&format!(
        "public, max-age={}, immutable",
        storage.cache_max_age_seconds
    ))
    .ok();
    let uploads = Router::new()
        .fallback_service(ServeDir::new(&storage.upload_dir))
        .layer(map_response_with_state(cache_control, set_cache_control));

    Router::new()
        .nest("/api", api_routes)
        .route("/register", post(handlers::auth::register))
        .nest_service(&public_path, uploads)
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

/// Served photos never change under the same name.
async fn set_cache_control(
    State(cache_control): State<Option<HeaderValue>>,
    mut response: Response,
) -> Response {
    if response.status().is_success() {
        if let Some(value) = cache_control {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
    }
    response
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

/// Property listing endpoints
fn property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/properties",
            get(handlers::property::list_properties).post(handlers::property::create_property),
        )
        .route(
            "/properties/{id}",
            put(handlers::property::update_property).delete(handlers::property::delete_property),
        )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
