//! Chat request dispatch with prepended context.
//!
//! Provides:
//! - `ContextChatHandler` - Resolve context, pick a model, stream the reply
//! - `ComposedRequest` - The fixed two-message exchange sent to the model
//! - `ChatParticipant` - What a host registers for this participant
//! - `HandleOutcome` / `RequestPhase` - How a request ended, and where

pub mod compose;
pub mod error;
pub mod handler;
pub mod outcome;
pub mod participant;

pub use compose::ComposedRequest;
pub use error::DispatchError;
pub use handler::{ChatRequest, ContextChatHandler, DEFAULT_MODEL_FAMILY, DEFAULT_MODEL_VENDOR};
pub use outcome::{HandleOutcome, RequestPhase};
pub use participant::{ChatParticipant, PARTICIPANT_ICON, PARTICIPANT_ID, activate};
