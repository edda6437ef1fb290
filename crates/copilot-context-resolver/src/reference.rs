//! Context reference classification.

use std::{fmt, path::PathBuf};

use crate::HomeEnv;

const REMOTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Where the custom instructions live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextReference {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An absolute `http://` or `https://` URL.
    Remote(String),
}

impl ContextReference {
    /// Classify an already expanded reference.
    #[must_use]
    pub fn classify(expanded: &str) -> Self {
        if REMOTE_PREFIXES.iter().any(|p| expanded.starts_with(p)) {
            Self::Remote(expanded.to_string())
        } else {
            Self::Local(PathBuf::from(expanded))
        }
    }

    /// Expand home shorthand, then classify.
    #[must_use]
    pub fn parse(raw: &str, env: &HomeEnv) -> Self {
        Self::classify(&env.expand(raw))
    }

    /// Whether this reference points at a URL.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for ContextReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}
