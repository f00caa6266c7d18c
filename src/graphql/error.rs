//! GraphQL error types
//!
//! Defines every error condition of the client: document parsing,
//! transport, HTTP status, decoding and server-reported errors.

use thiserror::Error;

use super::request::ServerError;

/// Errors that can occur while parsing documents or executing operations
#[derive(Error, Debug)]
pub enum GraphQLError {
    /// Document is not valid GraphQL
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be delivered (connection refused, DNS, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Endpoint answered with a non-success status and no GraphQL body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body or `data` could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Server returned errors and no data
    #[error("Server error: {}", format_server_errors(.0))]
    Server(Vec<ServerError>),

    /// Server returned neither data nor errors
    #[error("Response contained no data")]
    MissingData,

    /// Cache-only query found nothing in the cache
    #[error("No cached result for operation {0}")]
    CacheMiss(String),

    /// Query document passed to `mutate` or mutation passed to `query`
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

fn format_server_errors(errors: &[ServerError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for GraphQLError {
    fn from(err: serde_json::Error) -> Self {
        GraphQLError::Decode(err.to_string())
    }
}

/// Result type alias for GraphQL operations
pub type GraphQLResult<T> = Result<T, GraphQLError>;
