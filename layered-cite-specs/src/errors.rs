//! Error types for the fixture harness.
//!
//! This module defines error types for parsing, fixture loading,
//! and assertion failures.

use thiserror::Error;

/// Errors that can occur while loading and checking fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error loading a fixture or expected-failures file.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture whose expectations do not match the resolution output.
    #[error("assertion failed: {message}")]
    Assertion { message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
