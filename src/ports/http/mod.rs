// src/ports/http/mod.rs
pub mod error;
pub mod folders;
pub mod notes;

use axum::body::Bytes;
use axum::http::{header, HeaderName, HeaderValue, Uri};
use axum::Router;
use serde::de::DeserializeOwned;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::domain::DomainError;
pub use error::ApiError;

const SECURITY_HEADERS: [(HeaderName, &str); 6] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::X_XSS_PROTECTION, "0"),
    (
        header::STRICT_TRANSPORT_SECURITY,
        "max-age=15552000; includeSubDomains",
    ),
];

/// Add the hardening headers to every response that does not set them itself
pub fn with_security_headers(mut router: Router) -> Router {
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
}

/// Run a storage call off the async workers and fold both failure kinds into `ApiError`
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(ApiError::unexpected)?
        .map_err(ApiError::from)
}

/// An empty body reads as a body with no fields
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| DomainError::MalformedBody(e.to_string()))
}

/// Ids that are not integers cannot name a stored row
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// URL of a created item, relative to the path the request arrived on
pub(crate) fn item_location(collection: &Uri, id: i64) -> String {
    format!("{}/{}", collection.path().trim_end_matches('/'), id)
}
