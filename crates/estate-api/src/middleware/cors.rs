//! CORS layer configuration and the origin allow-list guard.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use estate_core::config::CorsConfig;

use crate::error::ApiErrorResponse;

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    // Origins. A wildcard mirrors the caller so credentials stay usable.
    if config.allows_any_origin() {
        layer = layer.allow_origin(AllowOrigin::mirror_request());
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    layer
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

/// Refuses requests whose `Origin` is not allow-listed.
///
/// Requests without an `Origin` header (same-origin, curl, server-to-server)
/// pass through.
pub async fn origin_guard(
    State(config): State<Arc<CorsConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| config.is_origin_allowed(o))
            .unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, path = %request.uri().path(), "Origin rejected");
            return (
                StatusCode::FORBIDDEN,
                Json(ApiErrorResponse {
                    message: "Not allowed by CORS".to_string(),
                }),
            )
                .into_response();
        }
    }

    next.run(request).await
}
