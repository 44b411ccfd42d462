//! Request-ID propagation middleware.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Honor an incoming `X-Request-ID` or mint one, echo it on the
/// response, and attach it to the request's tracing span.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let value = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(mint_request_id);

    let request_id = value.to_str().unwrap_or("unknown").to_string();
    request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());

    let span = info_span!("request", %request_id);
    let mut response = next.run(request).instrument(span).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
    response
}

fn mint_request_id() -> HeaderValue {
    let id = Uuid::new_v4().to_string();
    // A UUID string is always a valid header value.
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}
