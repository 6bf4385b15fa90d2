//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IMAP operation failed.
    #[error("IMAP error: {0}")]
    Imap(#[from] invoicebox_imap::Error),

    /// Message parsing failed.
    #[error("MIME error: {0}")]
    Mime(#[from] invoicebox_mime::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An attachment collaborator reported a failure.
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
