//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - a string identifier for clients (e.g., "INVALID_IDENTIFIER")
//! - an integer code for logs and dashboards (e.g., 1002)
//! - a default message, which is the only message server-side errors expose
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidIdentifier;
//! assert_eq!(code.as_str(), "INVALID_IDENTIFIER");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Malformed resource identifier in the path
    InvalidIdentifier,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request took longer than the server allows
    RequestTimeout,

    // Database errors (2000-2999)
    /// Database unreachable or query failed
    DatabaseError,

    /// Stored document could not be mapped to the domain model
    DecodingError,

    /// Domain value could not be mapped to its stored form
    EncodingError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DecodingError => "DECODING_ERROR",
            Self::EncodingError => "ENCODING_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidIdentifier => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::RequestTimeout => 1006,

            Self::DatabaseError => 2003,
            Self::DecodingError => 2010,
            Self::EncodingError => 2011,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidIdentifier => "Invalid resource identifier",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::RequestTimeout => "Request timed out",
            Self::DatabaseError => "Database error occurred",
            Self::DecodingError => "Failed to decode stored data",
            Self::EncodingError => "Failed to encode data for storage",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
