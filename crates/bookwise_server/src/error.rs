//! Mapping from engine errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bookwise_error::{BookwiseError, BookwiseErrorKind, CatalogErrorKind};
use serde_json::json;
use tracing::error;

/// Error surfaced by a route handler.
#[derive(Debug)]
pub enum ApiError {
    /// An engine collaborator failed
    Engine(BookwiseError),
    /// The section path segment is not a known section
    UnknownSection(String),
}

impl<T> From<T> for ApiError
where
    T: Into<BookwiseError>,
{
    fn from(err: T) -> Self {
        ApiError::Engine(err.into())
    }
}

fn engine_status(err: &BookwiseError) -> StatusCode {
    match err.kind() {
        BookwiseErrorKind::Catalog(catalog) => match &catalog.kind {
            CatalogErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogErrorKind::InvalidWorkId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogErrorKind::Upstream(_) | CatalogErrorKind::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        },
        BookwiseErrorKind::Producer(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Engine(err) => {
                let status = engine_status(err);
                if status.is_server_error() {
                    error!(error = %err, "Request failed");
                }
                (status, err.to_string())
            }
            ApiError::UnknownSection(section) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("unknown section '{section}'"),
            ),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookwise_error::{CatalogError, ProducerError, ProducerErrorKind};

    #[test]
    fn missing_book_maps_to_not_found() {
        let err: BookwiseError =
            CatalogError::new(CatalogErrorKind::NotFound("OL1W".to_string())).into();
        assert_eq!(engine_status(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn malformed_work_id_maps_to_unprocessable() {
        let err: BookwiseError =
            CatalogError::new(CatalogErrorKind::InvalidWorkId("nope".to_string())).into();
        assert_eq!(engine_status(&err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn producer_failure_maps_to_bad_gateway() {
        let err: BookwiseError = ProducerError::new(ProducerErrorKind::Timeout).into();
        assert_eq!(engine_status(&err), StatusCode::BAD_GATEWAY);
    }
}
