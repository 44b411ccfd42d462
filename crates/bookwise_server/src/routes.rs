//! Route handlers and router assembly.

use crate::error::ApiError;
use crate::request_id::propagate_request_id;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{middleware, Router};
use bookwise_core::{FailureCode, SectionKind};
use bookwise_error::{CatalogError, CatalogErrorKind};
use bookwise_generation::{GenerationResponse, StatusReport};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tower_http::cors::{Any, CorsLayer};

/// Assemble the application router.
///
/// When a frontend origin is configured, CORS is restricted to it;
/// otherwise any origin may call the API.
pub fn router(state: AppState, frontend_origin: Option<&str>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/books/:work_id", get(get_book))
        .route("/api/books/:work_id/generate/:section", post(generate_section))
        .route(
            "/api/books/:work_id/generate/:section/status",
            get(section_status),
        )
        .with_state(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(cors_layer(frontend_origin))
}

fn cors_layer(frontend_origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    match frontend_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => base.allow_origin(origin),
        None => base.allow_origin(Any),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn parse_section(raw: &str) -> Result<SectionKind, ApiError> {
    SectionKind::from_str(raw).map_err(|_| ApiError::UnknownSection(raw.to_string()))
}

#[derive(Debug, Deserialize)]
struct GenerateQuery {
    #[serde(default)]
    force: bool,
}

async fn generate_section(
    State(state): State<AppState>,
    Path((work_id, section)): Path<(String, String)>,
    Query(query): Query<GenerateQuery>,
) -> Result<Response, ApiError> {
    let section = parse_section(&section)?;
    let response = state
        .coordinator
        .request_generation(&work_id, section, query.force)
        .await?;
    Ok(generation_response(response))
}

/// Map an engine response onto the HTTP surface.
///
/// Complete is 200; pending is 202 with a `Retry-After` hint; recorded
/// failures are 422 for contract violations and 502 otherwise, because
/// the fault lies upstream rather than with the caller.
fn generation_response(response: GenerationResponse) -> Response {
    match &response {
        GenerationResponse::Complete { .. } => {
            (StatusCode::OK, Json(response)).into_response()
        }
        GenerationResponse::Pending { .. } => {
            let mut http = (StatusCode::ACCEPTED, Json(response)).into_response();
            http.headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
            http
        }
        GenerationResponse::Failed { error_code, .. } => {
            let status = match error_code {
                Some(FailureCode::SchemaValidation) => StatusCode::UNPROCESSABLE_ENTITY,
                Some(FailureCode::ProviderError) | Some(FailureCode::Timeout) => {
                    StatusCode::BAD_GATEWAY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(response)).into_response()
        }
    }
}

async fn section_status(
    State(state): State<AppState>,
    Path((work_id, section)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let section = parse_section(&section)?;
    let key = state.coordinator.cache_key(&work_id, section);
    let report = state.status.get_status(&key)?;
    let status = match report {
        StatusReport::Missing => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    Ok((status, Json(report)).into_response())
}

async fn get_book(
    State(state): State<AppState>,
    Path(work_id): Path<String>,
) -> Result<Response, ApiError> {
    if !bookwise_catalog::is_valid_work_id(&work_id) {
        return Err(CatalogError::new(CatalogErrorKind::InvalidWorkId(work_id)).into());
    }
    let record = state.resolver.refresh_book(&work_id).await?;
    Ok(Json(record).into_response())
}
