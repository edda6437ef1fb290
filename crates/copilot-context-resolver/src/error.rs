//! Resolution errors.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`ResolutionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    FileReadFailure,
    NetworkFailure,
    HttpStatus,
}

/// Failure to turn a context reference into text.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status}: Failed to fetch {url}")]
    HttpStatus { status: u16, url: String },
}

impl ResolutionError {
    /// Which kind of failure this is.
    #[must_use]
    pub const fn kind(&self) -> ResolutionErrorKind {
        match self {
            Self::FileRead { .. } => ResolutionErrorKind::FileReadFailure,
            Self::Network { .. } => ResolutionErrorKind::NetworkFailure,
            Self::HttpStatus { .. } => ResolutionErrorKind::HttpStatus,
        }
    }
}
