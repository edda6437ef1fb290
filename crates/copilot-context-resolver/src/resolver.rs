//! Context reference resolver.

use crate::{ContextLoader, ContextReference, HomeEnv, HttpFileLoader, ResolutionError};

/// Instruction text loaded from a context reference.
///
/// Produced once per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    reference: ContextReference,
    text: String,
}

impl ResolvedContext {
    /// Pair loaded text with the reference it came from.
    #[must_use]
    pub const fn new(reference: ContextReference, text: String) -> Self {
        Self { reference, text }
    }

    /// Where the text was loaded from.
    #[must_use]
    pub const fn reference(&self) -> &ContextReference {
        &self.reference
    }

    /// The loaded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take ownership of the loaded text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Resolves context references to text.
///
/// Stateless between calls: every call expands, classifies and loads afresh.
#[derive(Debug, Clone)]
pub struct ContextResolver<L = HttpFileLoader> {
    loader: L,
    env: HomeEnv,
}

impl ContextResolver<HttpFileLoader> {
    /// Create a resolver using the default file/HTTP loader.
    #[must_use]
    pub fn new(env: HomeEnv) -> Self {
        Self::with_loader(HttpFileLoader::new(), env)
    }
}

impl<L: ContextLoader> ContextResolver<L> {
    /// Create a resolver with a custom loader.
    #[must_use]
    pub const fn with_loader(loader: L, env: HomeEnv) -> Self {
        Self { loader, env }
    }

    /// The loader doing the actual I/O.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Resolve a raw reference string to text.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, the request fails, or the
    /// server answers with anything but 200.
    pub async fn resolve(&self, raw: &str) -> Result<ResolvedContext, ResolutionError> {
        let reference = ContextReference::parse(raw, &self.env);
        tracing::debug!(raw, %reference, remote = reference.is_remote(), "Resolving context");

        let text = match &reference {
            ContextReference::Remote(url) => self.loader.fetch(url).await?,
            ContextReference::Local(path) => self.loader.read(path).await?,
        };

        Ok(ResolvedContext::new(reference, text))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::ResolutionErrorKind;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Fetch(String),
        Read(PathBuf),
    }

    #[derive(Default)]
    struct RecordingLoader {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingLoader {
        fn calls(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    #[async_trait]
    impl ContextLoader for RecordingLoader {
        async fn fetch(&self, url: &str) -> Result<String, ResolutionError> {
            self.calls.lock().unwrap().push(Call::Fetch(url.to_string()));
            Ok(format!("remote:{url}"))
        }

        async fn read(&self, path: &Path) -> Result<String, ResolutionError> {
            self.calls.lock().unwrap().push(Call::Read(path.to_path_buf()));
            Ok(format!("local:{}", path.display()))
        }
    }

    #[tokio::test]
    async fn test_remote_references_never_touch_filesystem() {
        let resolver =
            ContextResolver::with_loader(RecordingLoader::default(), HomeEnv::with_home("/home/u"));

        for url in ["http://example.com/a.md", "https://example.com/b.md"] {
            let resolved = resolver.resolve(url).await.unwrap();
            assert_eq!(resolved.text(), format!("remote:{url}"));
            assert_eq!(resolver.loader.calls(), vec![Call::Fetch(url.to_string())]);
        }
    }

    #[tokio::test]
    async fn test_local_references_never_touch_network() {
        let resolver =
            ContextResolver::with_loader(RecordingLoader::default(), HomeEnv::with_home("/home/u"));

        for (raw, expected) in [
            ("~/.copilot.md", "/home/u/.copilot.md"),
            ("/etc/ctx.md", "/etc/ctx.md"),
            ("ftp://example.com/a.md", "ftp://example.com/a.md"),
        ] {
            let resolved = resolver.resolve(raw).await.unwrap();
            assert_eq!(resolved.reference(), &ContextReference::Local(expected.into()));
            assert_eq!(resolver.loader.calls(), vec![Call::Read(expected.into())]);
        }
    }

    #[tokio::test]
    async fn test_resolves_real_file_through_home_shorthand() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".copilot.md"), "T").unwrap();

        let env = HomeEnv::with_home(home.path().display().to_string());
        let resolved = ContextResolver::new(env).resolve("~/.copilot.md").await.unwrap();

        assert_eq!(resolved.into_text(), "T");
    }

    #[tokio::test]
    async fn test_missing_local_file_is_file_read_failure() {
        let home = tempfile::tempdir().unwrap();
        let env = HomeEnv::with_home(home.path().display().to_string());

        let err = ContextResolver::new(env)
            .resolve("~/.copilot.md")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolutionErrorKind::FileReadFailure);
        assert!(err.to_string().contains(".copilot.md"));
    }
}
