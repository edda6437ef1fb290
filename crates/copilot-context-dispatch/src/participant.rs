//! Chat participant registration.

use std::sync::Arc;

use copilot_context_core::{CancellationSignal, Configuration, ModelCatalog, ResponseSink};
use copilot_context_resolver::{ContextLoader, HomeEnv, HttpFileLoader};

use crate::{ChatRequest, ContextChatHandler, HandleOutcome};

/// Identifier the host registers the participant under.
pub const PARTICIPANT_ID: &str = "copilot-context.contextual";

/// Theme icon shown next to the participant's replies.
pub const PARTICIPANT_ICON: &str = "sparkles";

/// A registered chat participant: identity plus request handler.
pub struct ChatParticipant<L = HttpFileLoader> {
    id: &'static str,
    icon: &'static str,
    handler: ContextChatHandler<L>,
}

impl<L: ContextLoader> ChatParticipant<L> {
    /// Wrap a handler under the default identity.
    #[must_use]
    pub const fn new(handler: ContextChatHandler<L>) -> Self {
        Self {
            id: PARTICIPANT_ID,
            icon: PARTICIPANT_ICON,
            handler,
        }
    }

    /// Participant identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Theme icon name.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        self.icon
    }

    /// The underlying request handler.
    #[must_use]
    pub const fn handler(&self) -> &ContextChatHandler<L> {
        &self.handler
    }

    /// Handle one chat request.
    pub async fn handle(
        &self,
        request: &ChatRequest,
        sink: &dyn ResponseSink,
        cancel: Arc<dyn CancellationSignal>,
    ) -> HandleOutcome {
        self.handler.handle(request, sink, cancel).await
    }
}

/// Build the participant a host should register.
///
/// `env` is the host's snapshot of the home-directory variables.
#[must_use]
pub fn activate(
    config: Arc<dyn Configuration>,
    catalog: Arc<dyn ModelCatalog>,
    env: HomeEnv,
) -> ChatParticipant {
    tracing::info!(id = PARTICIPANT_ID, "Activating chat participant");
    ChatParticipant::new(ContextChatHandler::new(config, catalog, env))
}
