//! Portfolio document loading.
//!
//! A source identifier is either an `http://`/`https://` URL or a local file
//! path. Both are parsed into the same top-level JSON object; nothing is
//! cached, so every call re-reads the source.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PortfolioError;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Where a portfolio document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioSource {
    Http(String),
    File(PathBuf),
}

impl PortfolioSource {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Http(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::File(_) => "file",
        }
    }
}

/// Fetches and parses portfolio documents from HTTP or the local filesystem.
#[derive(Debug, Clone)]
pub struct PortfolioLoader {
    client: Client,
    timeout: Duration,
}

impl PortfolioLoader {
    /// Creates a loader whose HTTP requests are bounded by `timeout`.
    ///
    /// Redirects are not followed, so a 3xx answer surfaces as `Http`.
    ///
    /// # Errors
    /// Returns `PortfolioError::ClientBuild` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, PortfolioError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(PortfolioError::ClientBuild)?;
        Ok(Self { client, timeout })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loads the document named by `source` and returns its top-level object.
    ///
    /// # Errors
    /// Returns `Http` for non-2xx responses, `Transport` when no response
    /// arrives, `FileNotFound`/`Io` for local read failures, and
    /// `Parse`/`NotAnObject` when the content is not a JSON object.
    pub async fn load(&self, source: &str) -> Result<Map<String, Value>, PortfolioError> {
        let source = PortfolioSource::parse(source);
        debug!(kind = source.kind(), "loading portfolio document");
        match source {
            PortfolioSource::Http(url) => self.fetch(&url).await,
            PortfolioSource::File(path) => read_file(path).await,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, PortfolioError> {
        let transport = |source| PortfolioError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        parse_document(&body, url)
    }
}

async fn read_file(path: PathBuf) -> Result<Map<String, Value>, PortfolioError> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PortfolioError::FileNotFound { path });
        }
        Err(source) => return Err(PortfolioError::Io { path, source }),
    };
    parse_document(&bytes, &path.display().to_string())
}

fn parse_document(bytes: &[u8], origin: &str) -> Result<Map<String, Value>, PortfolioError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| PortfolioError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PortfolioError::NotAnObject {
            origin: origin.to_string(),
        }),
    }
}
