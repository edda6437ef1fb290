//! Composition of the context-priming exchange.

use copilot_context_core::ChatMessage;
use copilot_context_resolver::ResolvedContext;

/// Text placed before the resolved context.
pub const CONTEXT_PREAMBLE: &str = "You have the following custom instructions:\n\n";

/// Text placed after the resolved context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\nUser request:";

/// The two messages sent to the model, context first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRequest {
    context: ChatMessage,
    prompt: ChatMessage,
}

impl ComposedRequest {
    /// Compose from resolved context and the user's prompt.
    #[must_use]
    pub fn new(context: &ResolvedContext, prompt: &str) -> Self {
        Self::from_text(context.text(), prompt)
    }

    /// Compose from raw context text.
    #[must_use]
    pub fn from_text(context: &str, prompt: &str) -> Self {
        Self {
            context: ChatMessage::user(format!("{CONTEXT_PREAMBLE}{context}{CONTEXT_SEPARATOR}")),
            prompt: ChatMessage::user(prompt),
        }
    }

    /// The context-priming message.
    #[must_use]
    pub const fn context_message(&self) -> &ChatMessage {
        &self.context
    }

    /// The user's prompt, verbatim.
    #[must_use]
    pub const fn prompt_message(&self) -> &ChatMessage {
        &self.prompt
    }

    /// Messages in send order.
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![self.context, self.prompt]
    }
}
