//! Chat request handler.

use std::sync::Arc;

use copilot_context_core::{
    CancellationSignal, Configuration, ModelCatalog, ModelSelector, PrependerSettings,
    RequestOptions, ResponseSink,
};
use copilot_context_resolver::{ContextLoader, ContextResolver, HomeEnv, HttpFileLoader};
use futures::StreamExt;
use tracing::Instrument;
use uuid::Uuid;

use crate::{ComposedRequest, DispatchError, HandleOutcome, RequestPhase};

/// Vendor requested from the model catalog.
pub const DEFAULT_MODEL_VENDOR: &str = "copilot";

/// Model family requested from the model catalog.
pub const DEFAULT_MODEL_FAMILY: &str = "gpt-4o";

/// Fragment written when no model matches.
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "⚠️ Copilot model not available.";

/// A chat request delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// What the user typed.
    pub prompt: String,
}

impl ChatRequest {
    /// Create a request.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Handles chat requests by prepending resolved context.
///
/// Holds no per-request state; one handler serves every request.
pub struct ContextChatHandler<L = HttpFileLoader> {
    config: Arc<dyn Configuration>,
    resolver: ContextResolver<L>,
    catalog: Arc<dyn ModelCatalog>,
    selector: ModelSelector,
}

impl ContextChatHandler<HttpFileLoader> {
    /// Create a handler that loads context from files and URLs.
    #[must_use]
    pub fn new(
        config: Arc<dyn Configuration>,
        catalog: Arc<dyn ModelCatalog>,
        env: HomeEnv,
    ) -> Self {
        Self::with_resolver(config, ContextResolver::new(env), catalog)
    }
}

impl<L: ContextLoader> ContextChatHandler<L> {
    /// Create a handler with a custom resolver.
    #[must_use]
    pub fn with_resolver(
        config: Arc<dyn Configuration>,
        resolver: ContextResolver<L>,
        catalog: Arc<dyn ModelCatalog>,
    ) -> Self {
        Self {
            config,
            resolver,
            catalog,
            selector: ModelSelector::new(DEFAULT_MODEL_VENDOR, DEFAULT_MODEL_FAMILY),
        }
    }

    /// Request a different model.
    #[must_use]
    pub fn with_selector(mut self, selector: ModelSelector) -> Self {
        self.selector = selector;
        self
    }

    /// The model this handler asks for.
    #[must_use]
    pub const fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// Handle one chat request, writing the reply to `sink`.
    ///
    /// Never fails: any error is reported to the sink as a single fragment
    /// and reflected in the returned outcome. `cancel` is handed to the model
    /// as is.
    pub async fn handle(
        &self,
        request: &ChatRequest,
        sink: &dyn ResponseSink,
        cancel: Arc<dyn CancellationSignal>,
    ) -> HandleOutcome {
        let span = tracing::info_span!("chat_request", request_id = %Uuid::new_v4());

        async move {
            let mut phase = RequestPhase::Idle;
            match self.run(request, sink, cancel, &mut phase).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(%phase, "Chat request failed: {message}");
                    sink.markdown(format!("❌ Error: {message}"));
                    HandleOutcome::Failed { phase, message }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request: &ChatRequest,
        sink: &dyn ResponseSink,
        cancel: Arc<dyn CancellationSignal>,
        phase: &mut RequestPhase,
    ) -> Result<HandleOutcome, DispatchError> {
        let settings = PrependerSettings::load(self.config.as_ref());

        advance(phase, RequestPhase::ResolvingContext);
        let context = self.resolver.resolve(&settings.context_source).await?;

        advance(phase, RequestPhase::SelectingModel);
        let models = self.catalog.select_chat_models(&self.selector).await?;
        let Some(model) = models.into_iter().next() else {
            tracing::warn!(selector = %self.selector, "No matching model");
            sink.markdown(MODEL_UNAVAILABLE_MESSAGE.to_string());
            return Ok(HandleOutcome::ModelUnavailable);
        };

        advance(phase, RequestPhase::Composing);
        let composed = ComposedRequest::new(&context, &request.prompt);

        advance(phase, RequestPhase::Dispatching);
        let mut reply = model
            .send_request(composed.into_messages(), RequestOptions::default(), cancel)
            .await?;

        advance(phase, RequestPhase::Streaming);
        let mut fragments = 0;
        while let Some(chunk) = reply.next().await {
            sink.markdown(chunk?);
            fragments += 1;
        }

        advance(phase, RequestPhase::Done);
        tracing::debug!(fragments, "Reply relayed");
        Ok(HandleOutcome::Completed { fragments })
    }
}

fn advance(phase: &mut RequestPhase, next: RequestPhase) {
    tracing::debug!(from = %phase, to = %next, "Phase change");
    *phase = next;
}
