// ABOUTME: Unified error handling with error codes, HTTP status mapping and the JSON envelope
// ABOUTME: Every failure at the request boundary becomes an AppError rendered as {error, details?}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes used across the relay
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Client-supplied data is structurally invalid
    InvalidInput,
    /// Request body is not valid JSON or has the wrong shape
    InvalidFormat,
    /// The generation backend failed or returned no usable text
    ExternalServiceError,
    /// The generation backend did not answer in time
    ExternalServiceTimeout,
    /// Process configuration is missing or invalid
    ConfigError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error class
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::InvalidFormat => 400,
            Self::ExternalServiceError
            | Self::ExternalServiceTimeout
            | Self::ConfigError
            | Self::InternalError => 500,
        }
    }

    /// Whether the error was caused by the client request
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.http_status() < 500
    }

    /// Short human-readable description of the error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::InvalidFormat => "Invalid request format",
            Self::ExternalServiceError => "Generation service error",
            Self::ExternalServiceTimeout => "Generation service timeout",
            Self::ConfigError => "Configuration error",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Application error carrying a code, a client-facing message and optional detail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    /// Error class
    pub code: ErrorCode,
    /// Machine-readable reason, surfaced as the envelope `error` field
    pub message: String,
    /// Best-effort diagnostic detail, surfaced as the envelope `details` field
    pub details: Option<String>,
}

impl AppError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach diagnostic detail
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Client-supplied conversation or context is invalid
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Request body could not be decoded
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Transport or protocol failure talking to an external service
    #[must_use]
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service} request failed"),
        )
        .with_details(message)
    }

    /// External service did not answer within the configured timeout
    #[must_use]
    pub fn external_timeout(service: &str, timeout_secs: u64) -> Self {
        Self::new(
            ErrorCode::ExternalServiceTimeout,
            format!("{service} request timed out"),
        )
        .with_details(format!("no response within {timeout_secs}s"))
    }

    /// Missing or invalid configuration
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Unexpected internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Render as the JSON error envelope
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

/// Result alias used across the relay
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every non-2xx response: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Machine-readable reason
    pub error: String,
    /// Optional diagnostic detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::AppError;
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(self.to_envelope())).into_response()
        }
    }
}
