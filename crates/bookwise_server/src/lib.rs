//! HTTP API for the BookWise generation engine.
//!
//! Routes:
//!
//! - `POST /api/books/{work_id}/generate/{section}?force=` run or serve a
//!   generation
//! - `GET /api/books/{work_id}/generate/{section}/status` poll generation
//!   state without claiming
//! - `GET /api/books/{work_id}` resolve and return book metadata
//! - `GET /health` liveness probe

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod observability;
mod request_id;
mod routes;
mod state;

pub use config::{AppConfig, LlmSettings, ServerSettings};
pub use error::ApiError;
pub use observability::init_observability;
pub use request_id::{propagate_request_id, REQUEST_ID_HEADER};
pub use routes::router;
pub use state::AppState;
