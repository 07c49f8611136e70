//! Error types for the GraphQL client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GraphQL error location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// A GraphQL error as returned in the `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<GraphqlErrorLocation>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    /// The `extensions.code` value, if the server set one.
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP status {status} with body: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(String),

    /// Errors reported by the server in the response payload.
    #[error("GraphQL errors: {}", first_message(.errors))]
    Graphql { errors: Vec<GraphqlError> },

    /// Response carried neither data nor errors.
    #[error("GraphQL protocol error: {message}")]
    Protocol { message: String },
}

fn first_message(errors: &[GraphqlError]) -> &str {
    errors
        .first()
        .map(|err| err.message.as_str())
        .unwrap_or("unknown error")
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err.to_string())
    }
}

impl ClientError {
    /// True if the server reported a `NOT_FOUND` error.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Graphql { errors } => {
                errors.iter().any(|err| err.code() == Some("NOT_FOUND"))
            }
            _ => false,
        }
    }
}
