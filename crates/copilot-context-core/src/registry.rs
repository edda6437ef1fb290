//! In-memory model catalog.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{ChatModel, ModelCatalog, ModelError, ModelSelector};

/// Registry of chat models, searched in registration order.
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: Vec<Arc<dyn ChatModel>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. Returns `self` for chaining.
    #[must_use]
    pub fn register<M: ChatModel + 'static>(mut self, model: M) -> Self {
        self.models.push(Arc::new(model));
        self
    }

    /// Register an already shared model.
    #[must_use]
    pub fn register_shared(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.models.push(model);
        self
    }

    /// List `vendor/family` of every registered model.
    #[must_use]
    pub fn list_models(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| format!("{}/{}", m.vendor(), m.family()))
            .collect()
    }
}

#[async_trait]
impl ModelCatalog for ModelRegistry {
    async fn select_chat_models(
        &self,
        selector: &ModelSelector,
    ) -> Result<Vec<Arc<dyn ChatModel>>, ModelError> {
        Ok(self
            .models
            .iter()
            .filter(|m| selector.matches(m.as_ref()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::{CancellationSignal, ChatMessage, RequestOptions, TextStream};

    struct NamedModel {
        vendor: &'static str,
        family: &'static str,
    }

    #[async_trait]
    impl ChatModel for NamedModel {
        fn vendor(&self) -> &str {
            self.vendor
        }

        fn family(&self) -> &str {
            self.family
        }

        async fn send_request(
            &self,
            _messages: Vec<ChatMessage>,
            _options: RequestOptions,
            _cancel: Arc<dyn CancellationSignal>,
        ) -> Result<TextStream, ModelError> {
            Ok(Box::pin(stream::iter(vec![Ok(self.family.to_string())])))
        }
    }

    #[tokio::test]
    async fn test_select_filters_by_vendor_and_family() {
        let registry = ModelRegistry::new()
            .register(NamedModel { vendor: "copilot", family: "gpt-4o-mini" })
            .register(NamedModel { vendor: "other", family: "gpt-4o" })
            .register(NamedModel { vendor: "copilot", family: "gpt-4o" });

        let found = registry
            .select_chat_models(&ModelSelector::new("copilot", "gpt-4o"))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].vendor(), "copilot");
        assert_eq!(found[0].family(), "gpt-4o");
    }

    #[test]
    fn test_empty_registry_selects_nothing() {
        let registry = ModelRegistry::new();
        let found = tokio_test::block_on(
            registry.select_chat_models(&ModelSelector::new("copilot", "gpt-4o")),
        )
        .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_list_models_in_registration_order() {
        let registry = ModelRegistry::new()
            .register(NamedModel { vendor: "a", family: "x" })
            .register(NamedModel { vendor: "b", family: "y" });
        assert_eq!(registry.list_models(), vec!["a/x", "b/y"]);
    }
}
