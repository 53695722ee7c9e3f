//! Error types for poster-watchlist.
//!
//! One enum covers the selection contract violation and the startup I/O
//! that loads config and catalog files.

use std::io;
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A row index outside `[0, len)` was passed to the selection list.
    #[error("Row index {index} out of range (rows: {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
    /// Catalog file content is invalid
    #[error("Catalog error: {0}")]
    Catalog(String),
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let err = AppError::IndexOutOfRange { index: 10, len: 10 };
        assert_eq!(err.to_string(), "Row index 10 out of range (rows: 10)");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let app_err: AppError = toml_err.into();
        assert!(app_err.to_string().starts_with("Config error:"));
    }
}
