//! Unified error handling.
//!
//! Provides a single error type for the data access layer. Repository
//! operations surface these to their caller; only the driver decides what
//! is fatal.

use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Storage errors
    #[cfg(feature = "database")]
    #[error("Database connection failed: {0}")]
    Connection(#[source] sea_orm::DbErr),

    #[cfg(feature = "database")]
    #[error("Query failed: {0}")]
    Query(#[from] sea_orm::DbErr),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code
    pub fn code(&self) -> &'static str {
        match self {
            #[cfg(feature = "database")]
            AppError::Connection(_) => "CONNECTION_ERROR",
            #[cfg(feature = "database")]
            AppError::Query(_) => "QUERY_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is a missing row
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    #[cfg(feature = "database")]
    pub fn connection(err: sea_orm::DbErr) -> Self {
        AppError::Connection(err)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
