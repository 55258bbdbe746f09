//! Error types for the viewcast prediction service.
//!
//! This module provides a unified error type [`ViewcastError`] for all viewcast
//! operations, along with a convenient [`Result`] type alias.
//!
//! # Error Categories
//!
//! Errors are organized into the following categories:
//!
//! - **Configuration**: missing or malformed startup resources (model artifact,
//!   column list). These are fatal; the service stays in a degraded state.
//! - **Validation**: missing or non-numeric request fields. Contained within
//!   the failing request.
//! - **Inference**: shape mismatches or non-finite model output.
//!
//! A missing channel indicator column is a logged warning, not an error; the
//! prediction proceeds without the channel feature set.
//!
//! # Example
//!
//! ```rust
//! use viewcast::error::{Result, ViewcastError};
//!
//! fn parse_count(raw: &str) -> Result<f64> {
//!     raw.parse().map_err(|_| {
//!         ViewcastError::Validation(format!("invalid value for subscribers: '{}'", raw))
//!     })
//! }
//!
//! assert!(parse_count("abc").is_err());
//! assert!(!parse_count("abc").unwrap_err().is_configuration());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for viewcast operations.
#[derive(Error, Debug)]
pub enum ViewcastError {
    // Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // Per-request errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    // External errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ViewcastError {
    /// Check if the error is fatal at startup. Configuration errors leave the
    /// service permanently degraded; everything else is contained within the
    /// request that raised it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ViewcastError::Config(_) | ViewcastError::InvalidConfig { .. }
        )
    }
}

impl From<serde_json::Error> for ViewcastError {
    fn from(e: serde_json::Error) -> Self {
        ViewcastError::Serialization(e.to_string())
    }
}

/// Result type alias for viewcast operations.
pub type Result<T> = std::result::Result<T, ViewcastError>;
