//! Cross-origin policy for the API: any origin, fixed method and header lists.
//!
//! [`CorsLayer`] answers every `OPTIONS` request itself with an empty `200`;
//! [`preflight_no_content`] wraps it so preflights come back as `204 No Content`.

use axum::{
    extract::Request,
    http::{header, HeaderName, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");
const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

fn cors_headers() -> [HeaderName; 9] {
    [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::ACCEPT_ENCODING,
        X_CSRF_TOKEN,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ORIGIN,
        header::CACHE_CONTROL,
        X_REQUESTED_WITH,
    ]
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers(cors_headers())
        .expose_headers(cors_headers())
}

/// Rewrites the status of preflight responses to `204`.
/// Must sit outside [`cors_layer`].
pub async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_preflight = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;

    if is_preflight {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
