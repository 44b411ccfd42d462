//! Top-level error wrapper types.

use crate::{CatalogError, ProducerError, ServerError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// This is the foundation error enum for the BookWise workspace. Each
/// member crate contributes its own variant.
///
/// # Examples
///
/// ```
/// use bookwise_error::{BookwiseError, CatalogError, CatalogErrorKind};
///
/// let catalog_err = CatalogError::new(CatalogErrorKind::Upstream("connection refused".into()));
/// let err: BookwiseError = catalog_err.into();
/// assert!(format!("{}", err).contains("Catalog Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BookwiseErrorKind {
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Book catalog error
    #[from(CatalogError)]
    Catalog(CatalogError),
    /// Content producer error
    #[from(ProducerError)]
    Producer(ProducerError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// BookWise error with kind discrimination.
///
/// # Examples
///
/// ```
/// use bookwise_error::{BookwiseResult, ServerError, ServerErrorKind};
///
/// fn might_fail() -> BookwiseResult<()> {
///     Err(ServerError::new(ServerErrorKind::Configuration("missing field".into())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("BookWise Error: {}", _0)]
pub struct BookwiseError(Box<BookwiseErrorKind>);

impl BookwiseError {
    /// Create a new error from a kind.
    pub fn new(kind: BookwiseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BookwiseErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BookwiseErrorKind
impl<T> From<T> for BookwiseError
where
    T: Into<BookwiseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for BookWise operations.
pub type BookwiseResult<T> = std::result::Result<T, BookwiseError>;
