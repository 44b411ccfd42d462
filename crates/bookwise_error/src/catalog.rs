//! Book catalog (Open Library) error types.

/// Catalog error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CatalogErrorKind {
    /// The requested work does not exist in the catalog
    #[display("Work '{}' not found in catalog", _0)]
    NotFound(String),
    /// The catalog service failed or was unreachable
    #[display("Catalog upstream error: {}", _0)]
    Upstream(String),
    /// The catalog returned a payload that could not be decoded
    #[display("Catalog decode error: {}", _0)]
    Decode(String),
    /// The supplied work identifier is not a valid Open Library work ID
    #[display("Invalid work ID '{}'", _0)]
    InvalidWorkId(String),
}

/// Catalog error with source location tracking.
///
/// # Examples
///
/// ```
/// use bookwise_error::{CatalogError, CatalogErrorKind};
///
/// let err = CatalogError::new(CatalogErrorKind::NotFound("OL1W".into()));
/// assert!(format!("{}", err).contains("OL1W"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Catalog Error: {} at line {} in {}", kind, line, file)]
pub struct CatalogError {
    /// The kind of error that occurred
    pub kind: CatalogErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CatalogError {
    /// Create a new CatalogError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error means the work simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, CatalogErrorKind::NotFound(_))
    }
}
