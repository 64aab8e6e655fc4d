//! Error type definitions.
//!
//! This module defines the error enums returned by the data normalizer, the
//! image relay and initialization, plus the `ErrorType` categories used to tag
//! failures in log output.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::{
    MSG_BLOCKED_HOST, MSG_EMPTY_IMAGE, MSG_FETCH_FAILED, MSG_INVALID_PROTOCOL, MSG_MISSING_URL,
    MSG_TIMED_OUT, MSG_TIMED_OUT_DETAILS,
};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The countries API base URL does not parse.
    #[error("Invalid countries API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Failures of the country data operations.
///
/// Per-record schema failures never appear here: batch operations drop the
/// offending record instead (see [`RecordError`]).
#[derive(Error, Debug)]
pub enum CountriesError {
    /// The upstream payload was not a JSON array.
    #[error("Invalid API response format - expected array, got {0}")]
    InvalidResponseFormat(String),

    /// A name lookup matched no country.
    #[error("No country found with name: {0}")]
    NotFound(String),

    /// The upstream answered with a non-success status.
    #[error("REST Countries returned HTTP {status} for {url}")]
    UpstreamStatus {
        /// Status code returned by the upstream
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Connection, timeout or body transfer failure.
    #[error("REST Countries request failed: {0}")]
    Transport(#[from] ReqwestError),
}

impl CountriesError {
    /// Category used when logging this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CountriesError::InvalidResponseFormat(_) => ErrorType::CountriesInvalidResponse,
            CountriesError::NotFound(_) => ErrorType::CountriesNotFound,
            CountriesError::UpstreamStatus { .. } => ErrorType::CountriesUpstreamStatus,
            CountriesError::Transport(e) => super::categorize_reqwest_error(e),
        }
    }
}

/// Why a single raw country record was rejected.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The record's structure or field types do not match the schema.
    #[error("record does not match schema: {0}")]
    Shape(#[from] serde_json::Error),

    /// A field is well-typed but violates a value constraint.
    #[error("field '{field}' {problem}")]
    Constraint {
        /// Dotted path of the offending field
        field: &'static str,
        /// Description of the violation
        problem: String,
    },
}

/// Failures of a single image relay request.
///
/// Each variant maps to one HTTP status and JSON body through
/// [`IntoResponse`].
#[derive(Error, Debug)]
pub enum RelayError {
    /// No `url` query parameter was supplied.
    #[error("Missing URL parameter")]
    MissingParameter,

    /// The URL does not use the http or https scheme (or does not parse).
    #[error("Invalid URL protocol: {0}")]
    InvalidProtocol(String),

    /// The URL points at a host the relay refuses to contact.
    #[error("Blocked URL host: {0}")]
    BlockedHost(String),

    /// The upstream answered with a non-2xx status.
    #[error("Error fetching image: {status}")]
    Upstream {
        /// Status code returned by the upstream
        status: u16,
    },

    /// The upstream answered 2xx with a zero-byte body.
    #[error("Empty image data received")]
    EmptyPayload,

    /// The bounded wait expired before the image was received.
    #[error("Request timed out")]
    Timeout,

    /// DNS, connection or transfer failure.
    #[error("Error fetching image: {0}")]
    Network(String),
}

/// JSON body returned for relay failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short, stable error message
    pub error: String,
    /// Extra context, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl RelayError {
    /// HTTP status the relay answers with for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingParameter
            | RelayError::InvalidProtocol(_)
            | RelayError::BlockedHost(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            RelayError::EmptyPayload | RelayError::Network(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body the relay answers with for this failure.
    pub fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            RelayError::MissingParameter => (MSG_MISSING_URL.to_string(), None),
            RelayError::InvalidProtocol(_) => (MSG_INVALID_PROTOCOL.to_string(), None),
            RelayError::BlockedHost(reason) => {
                (MSG_BLOCKED_HOST.to_string(), Some(reason.clone()))
            }
            RelayError::Upstream { status } => (format!("{}: {}", MSG_FETCH_FAILED, status), None),
            RelayError::EmptyPayload => (MSG_EMPTY_IMAGE.to_string(), None),
            RelayError::Timeout => (
                MSG_TIMED_OUT.to_string(),
                Some(MSG_TIMED_OUT_DETAILS.to_string()),
            ),
            RelayError::Network(message) => {
                (MSG_FETCH_FAILED.to_string(), Some(message.clone()))
            }
        };
        ErrorBody { error, details }
    }

    /// Category used when logging this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            RelayError::MissingParameter => ErrorType::RelayMissingParameter,
            RelayError::InvalidProtocol(_) => ErrorType::RelayInvalidProtocol,
            RelayError::BlockedHost(_) => ErrorType::RelayBlockedHost,
            RelayError::Upstream { .. } => ErrorType::RelayUpstreamStatus,
            RelayError::EmptyPayload => ErrorType::RelayEmptyPayload,
            RelayError::Timeout => ErrorType::RelayTimeout,
            RelayError::Network(_) => ErrorType::RelayNetwork,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Failure categories, used to tag log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Outbound HTTP (shared by both components)
    /// Request exceeded its timeout
    HttpRequestTimeoutError,
    /// Connection could not be established
    HttpRequestConnectError,
    /// Body could not be read
    HttpRequestBodyError,
    /// Body could not be decoded
    HttpRequestDecodeError,
    /// Request could not be built
    HttpRequestBuilderError,
    /// Redirect policy violated
    HttpRequestRedirectError,
    /// Any other transport failure
    HttpRequestOtherError,
    // Data normalizer
    /// Payload was not a JSON array
    CountriesInvalidResponse,
    /// Name lookup matched nothing
    CountriesNotFound,
    /// Non-success upstream status
    CountriesUpstreamStatus,
    /// A record failed the schema and was dropped
    RecordSchemaError,
    // Image relay
    /// `url` parameter missing
    RelayMissingParameter,
    /// `url` is not http(s)
    RelayInvalidProtocol,
    /// `url` host refused
    RelayBlockedHost,
    /// Non-2xx upstream status
    RelayUpstreamStatus,
    /// Zero-byte upstream body
    RelayEmptyPayload,
    /// Bounded wait expired
    RelayTimeout,
    /// DNS, connection or transfer failure
    RelayNetwork,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::CountriesInvalidResponse => "Invalid countries response",
            ErrorType::CountriesNotFound => "Country not found",
            ErrorType::CountriesUpstreamStatus => "Countries upstream status error",
            ErrorType::RecordSchemaError => "Country record schema error",
            ErrorType::RelayMissingParameter => "Relay missing parameter",
            ErrorType::RelayInvalidProtocol => "Relay invalid protocol",
            ErrorType::RelayBlockedHost => "Relay blocked host",
            ErrorType::RelayUpstreamStatus => "Relay upstream status error",
            ErrorType::RelayEmptyPayload => "Relay empty payload",
            ErrorType::RelayTimeout => "Relay timeout",
            ErrorType::RelayNetwork => "Relay network error",
        }
    }
}
