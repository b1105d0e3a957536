// Error type shared by the library modules. The binary wraps these in
// `anyhow` for context, the library itself stays typed.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The object store answered with a status that is neither success nor
    /// "not found".
    #[error("object store returned {status} for key '{key}'")]
    Store { key: String, status: StatusCode },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("listing entry is unusable: {0}")]
    InvalidEntry(String),

    #[error("failed to launch '{program}': {source}")]
    Spawn { program: String, source: io::Error },
}

pub type Result<T> = std::result::Result<T, FetchError>;
