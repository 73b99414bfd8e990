//! Error types for Quay.

use std::io;

/// Errors produced across the Quay workspace.
///
/// The store variants (`NotFound`, `NotADirectory`, `NotAFile`,
/// `StorageUnavailable`) carry the offending path or reason. An
/// unrecognized terminal command is NOT an error: the interpreter renders
/// it as ordinary output, so no variant exists for it.
#[derive(Debug, thiserror::Error)]
pub enum QuayError {
    #[error("no such path: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QuayError>;
