//! Cross-origin access control.
//!
//! Browsers attach an `Origin` header to cross-origin requests (and to
//! same-origin non-GET requests). Requests without one are let through, since
//! non-browser clients never send it. A declared origin must be on the
//! configured allow-list or the request is refused before routing.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::error::ApiError;
use crate::config::CorsConfig;

/// Reject requests whose `Origin` is not on the allow-list
pub async fn origin_guard(
    State(cors): State<Arc<CorsConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|origin| cors.is_allowed(origin))
            .unwrap_or(false);
        if !allowed {
            log::warn!(
                "Rejected {} {} from origin {:?}",
                request.method(),
                request.uri().path(),
                origin
            );
            return ApiError::OriginRejected.into_response();
        }
    }

    next.run(request).await
}

/// CORS response headers for allowed origins, including preflight answers
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
