//! Error types for the subscription store and service.

use crate::types::SubscriptionId;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(SubscriptionId),

    #[error("Duplicate subscription id: {0}")]
    DuplicateId(SubscriptionId),
}

/// Arguments rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid arguments for {operation}: {message}")]
    InvalidArguments { operation: String, message: String },
}

/// Error returned by the query/mutation service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Machine-readable code surfaced in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "BAD_USER_INPUT",
            ServiceError::Store(StoreError::SubscriptionNotFound(_)) => "NOT_FOUND",
            ServiceError::Store(StoreError::DuplicateId(_)) => "CONFLICT",
        }
    }
}

/// Errors from binding or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
