use thiserror::Error;

use bonfire_api::ApiError;
use bonfire_core::ValidationError;
use bonfire_lib::{CheckoutError, StorageError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Backend request failed
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Form input rejected before anything was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Session cache could not be read or written
    #[error("Cache error: {0}")]
    Storage(#[from] StorageError),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid combination of arguments
    #[error("{0}")]
    Usage(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
