//! Unified application error type.
//! All modules (db, core, cli, remote) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Errors returned by the remote reconciliation API boundary.
///
/// The distinction matters to the sync orchestrator: transient failures are
/// retried on every future drain, validation failures stay pending but are
/// surfaced so a human can edit and resubmit.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("transient remote failure: {0}")]
    Transient(String),

    #[error("remote validation failure: {0}")]
    Validation(String),
}

impl RemoteError {
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Transient(_))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Queue payloads
    // ---------------------------
    #[error("Payload serialization error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid break specification: {0}")]
    InvalidBreak(String),

    // ---------------------------
    // Remote / sync
    // ---------------------------
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
