//! Core abstractions for the context-prepending chat participant.
//!
//! This crate provides the fundamental building blocks:
//! - `ChatModel` / `ModelCatalog` - The language model boundary
//! - `ResponseSink` - Where reply fragments are written
//! - `CancellationSignal` - Host-owned cancellation, passed through untouched
//! - `Configuration` / `PrependerSettings` - Host settings lookup
//! - `ModelRegistry` - In-memory model catalog
//! - `Transcript` - Broadcast + history sink for late-attaching UIs

pub mod fragment;
pub mod message;
pub mod registry;
pub mod settings;
pub mod traits;
pub mod transcript;

pub use fragment::Fragment;
pub use message::{ChatMessage, ChatRole};
pub use registry::ModelRegistry;
pub use settings::{Configuration, JsonConfiguration, PrependerSettings};
pub use traits::{
    CancellationSignal, ChatModel, ModelCatalog, ModelError, ModelSelector, NeverCancelled,
    RequestOptions, ResponseSink, TextStream,
};
pub use transcript::Transcript;
