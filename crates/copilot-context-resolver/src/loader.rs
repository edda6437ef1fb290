//! File and HTTP loading of context text.

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::OnceCell;

use crate::ResolutionError;

/// Fixed timeout for fetching a remote context.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// I/O seam used by the resolver.
///
/// Exactly one of the two methods is called per resolution.
#[async_trait]
pub trait ContextLoader: Send + Sync {
    /// GET a URL and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String, ResolutionError>;

    /// Read a whole file as UTF-8 text.
    async fn read(&self, path: &Path) -> Result<String, ResolutionError>;
}

/// Loader backed by `reqwest` and `tokio::fs`.
///
/// Redirects are not followed: a 3xx answer fails like any other non-200.
#[derive(Debug, Clone, Default)]
pub struct HttpFileLoader {
    client: OnceCell<reqwest::Client>,
}

impl HttpFileLoader {
    /// Create a loader; its HTTP client is built on first fetch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self) -> Result<&reqwest::Client, reqwest::Error> {
        self.client
            .get_or_try_init(|| async {
                reqwest::Client::builder()
                    .redirect(reqwest::redirect::Policy::none())
                    .build()
            })
            .await
    }
}

#[async_trait]
impl ContextLoader for HttpFileLoader {
    async fn fetch(&self, url: &str) -> Result<String, ResolutionError> {
        let network = |source: reqwest::Error| ResolutionError::Network {
            url: url.to_string(),
            source,
        };

        let mut response = self
            .client()
            .await
            .map_err(network)?
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ResolutionError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(network)? {
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url, bytes = body.len(), "Fetched remote context");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn read(&self, path: &Path) -> Result<String, ResolutionError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ResolutionError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Read local context");
        Ok(text)
    }
}
