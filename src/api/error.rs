//! API error types

use std::fmt;

/// Errors that can occur when talking to the MIS API
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 401 Unauthorized - token missing, invalid, or expired
    Unauthorized,
    /// Other non-2xx API response
    Http { status: u16, message: String },
    /// Network or timeout error
    Network { message: String },
    /// Client-side validation failure (no request was made)
    Validation { message: String },
}

impl ApiError {
    /// Check if this error means the session has expired and the user must
    /// re-authenticate
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Check if this is a client-side validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    /// Create an unauthorized error
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized
    }

    /// Create an HTTP error from a non-2xx response
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => {
                write!(f, "Unauthorized (401) - authentication required")
            }
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} - {}", status, message)
            }
            ApiError::Network { message } => {
                write!(f, "Network error - {}", message)
            }
            ApiError::Validation { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for ApiError {}
