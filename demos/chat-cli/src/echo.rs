//! Local model that streams the composed request back.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use copilot_context_core::{
    CancellationSignal, ChatMessage, ChatModel, ModelError, RequestOptions, TextStream,
};
use copilot_context_dispatch::{DEFAULT_MODEL_FAMILY, DEFAULT_MODEL_VENDOR};
use futures::{StreamExt, future};

/// Echoes every message it receives, word by word.
///
/// Registered under the vendor/family the participant asks for, so the
/// whole request path can be exercised without a hosted model.
pub struct EchoModel {
    delay: Duration,
}

impl EchoModel {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    fn vendor(&self) -> &str {
        DEFAULT_MODEL_VENDOR
    }

    fn family(&self) -> &str {
        DEFAULT_MODEL_FAMILY
    }

    async fn send_request(
        &self,
        messages: Vec<ChatMessage>,
        _options: RequestOptions,
        cancel: Arc<dyn CancellationSignal>,
    ) -> Result<TextStream, ModelError> {
        if cancel.is_cancelled() {
            return Err(ModelError::Cancelled);
        }

        let words: Vec<String> = messages
            .iter()
            .enumerate()
            .flat_map(|(i, m)| {
                let header = format!("\n> message {}\n", i + 1);
                std::iter::once(header).chain(
                    m.content
                        .split_inclusive(char::is_whitespace)
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let delay = self.delay;
        let stream = futures::stream::iter(words)
            .then(move |word| async move {
                tokio::time::sleep(delay).await;
                word
            })
            .take_while(move |_| future::ready(!cancel.is_cancelled()))
            .map(Ok);

        Ok(stream.boxed())
    }
}
