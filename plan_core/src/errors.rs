//! # Error Types
//!
//! Structured error types for plan_core. Only input validation and I/O are
//! errors here: numeric degenerate cases (parallel segments, zero plot area,
//! a vertex sitting on the centroid) have defined fallback values, and a room
//! that fails its structural check is a normal report outcome.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::errors::{PlanError, PlanResult};
//!
//! fn validate_width(field: &str, width: f64) -> PlanResult<()> {
//!     if width <= 0.0 {
//!         return Err(PlanError::invalid_input(field, width.to_string(), "Width must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width("rooms[0].width", -1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for plan_core operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Structured error type for plan operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PlanError {
    /// An input value is invalid (out of range, wrong type, duplicate, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Building type not present in the load table
    #[error("Unknown building type: '{name}' (expected habitation, bureaux or commerce)")]
    UnknownBuildingType { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// A collaborator capability that has no implementation
    #[error("Not implemented: {capability}")]
    NotImplemented { capability: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlanError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PlanError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownBuildingType error
    pub fn unknown_building_type(name: impl Into<String>) -> Self {
        PlanError::UnknownBuildingType { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError from anything printable
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        PlanError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Create a NotImplemented error
    pub fn not_implemented(capability: impl Into<String>) -> Self {
        PlanError::NotImplemented {
            capability: capability.into(),
        }
    }

    /// True for errors caused by the input payload rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidInput { .. }
                | PlanError::MissingField { .. }
                | PlanError::UnknownBuildingType { .. }
                | PlanError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::MissingField { .. } => "MISSING_FIELD",
            PlanError::UnknownBuildingType { .. } => "UNKNOWN_BUILDING_TYPE",
            PlanError::FileError { .. } => "FILE_ERROR",
            PlanError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PlanError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            PlanError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
