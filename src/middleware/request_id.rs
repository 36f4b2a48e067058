use std::convert::Infallible;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, Extensions},
};

/// Correlation id of the current request, as set by `SetRequestIdLayer`
///
/// Handlers take it as an extractor to tag their log lines. Requests that did
/// not pass through the request-id layers report `"unknown"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_extensions(extensions: &Extensions) -> Self {
        extensions
            .get::<tower_http::request_id::RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .map(|id| Self(id.to_string()))
            .unwrap_or_else(|| Self("unknown".to_string()))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

/// Span for `TraceLayer` carrying the request id
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = RequestId::from_extensions(request.extensions());

    tracing::info_span!(
        "recommendation_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
