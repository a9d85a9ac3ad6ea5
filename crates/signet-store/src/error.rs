//! Error types for the store module.

use thiserror::Error;

use crate::record::DeliveryStatus;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Rejected backward status transition.
    #[error("backward status transition: {from} -> {to}")]
    BackwardTransition {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    /// Record serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
