//! Dispatch errors.

use copilot_context_core::ModelError;
use copilot_context_resolver::ResolutionError;

/// Anything that stops a chat request before the reply is complete.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
