//! Core traits for the model, output and cancellation collaborators.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::ChatMessage;

/// Lazily produced reply text, one fragment per item.
pub type TextStream = BoxStream<'static, Result<String, ModelError>>;

/// A (vendor, family) pair identifying the wanted model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSelector {
    pub vendor: String,
    pub family: String,
}

impl ModelSelector {
    /// Create a new selector.
    #[must_use]
    pub fn new(vendor: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            family: family.into(),
        }
    }

    /// Whether the given model satisfies this selector.
    #[must_use]
    pub fn matches(&self, model: &dyn ChatModel) -> bool {
        model.vendor() == self.vendor && model.family() == self.family
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.family)
    }
}

/// Options sent alongside a chat request. Currently always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {}

/// Model error.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Stream failed: {0}")]
    Stream(String),
    #[error("Request cancelled")]
    Cancelled,
}

/// Host-owned cancellation that can be polled.
///
/// The participant never cancels anything itself; it only forwards the
/// signal to the model.
pub trait CancellationSignal: Send + Sync {
    /// Whether cancellation has been requested.
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for CancellationToken {
    fn is_cancelled(&self) -> bool {
        Self::is_cancelled(self)
    }
}

/// Signal that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A chat-capable language model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Vendor identifier, e.g. `copilot`.
    fn vendor(&self) -> &str;

    /// Model family, e.g. `gpt-4o`.
    fn family(&self) -> &str;

    /// Send an ordered message list and get the reply as a text stream.
    async fn send_request(
        &self,
        messages: Vec<ChatMessage>,
        options: RequestOptions,
        cancel: Arc<dyn CancellationSignal>,
    ) -> Result<TextStream, ModelError>;
}

/// Host service that hands out models.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// All models matching the selector, best match first.
    async fn select_chat_models(
        &self,
        selector: &ModelSelector,
    ) -> Result<Vec<Arc<dyn ChatModel>>, ModelError>;
}

/// Output stream shown to the user.
///
/// Fragments are markdown and are appended in call order.
pub trait ResponseSink: Send + Sync {
    /// Append a markdown fragment.
    fn markdown(&self, fragment: String);
}

impl<T: ResponseSink + ?Sized> ResponseSink for Arc<T> {
    fn markdown(&self, fragment: String) {
        (**self).markdown(fragment);
    }
}
