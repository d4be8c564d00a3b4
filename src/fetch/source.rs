//! Providers of the raw dataset text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::{ApiKey, BasicClient, HttpClient, fetch_text};

/// Yields the complete raw text of the dataset in one hand-off.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn load(&self) -> Result<String>;

    /// Where the text comes from, for logging.
    fn describe(&self) -> String;
}

/// Reads the dataset from a local file.
pub struct FileSource {
    pub path: String,
}

#[async_trait]
impl TextSource for FileSource {
    async fn load(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading dataset file '{}'", self.path))?;
        debug!(path = %self.path, bytes = text.len(), "Dataset file read");
        Ok(text)
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

/// Downloads the dataset over HTTP.
pub struct HttpSource<C> {
    pub client: C,
    pub url: String,
}

#[async_trait]
impl<C: HttpClient> TextSource for HttpSource<C> {
    async fn load(&self) -> Result<String> {
        fetch_text(&self.client, &self.url)
            .await
            .with_context(|| format!("downloading dataset from '{}'", self.url))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks a source for `location`: `http(s)://` URLs are downloaded, with
/// `app_token` sent as a header when given; anything else is a file path.
pub fn source_for(location: &str, app_token: Option<&str>) -> Result<Box<dyn TextSource>> {
    if !(location.starts_with("http://") || location.starts_with("https://")) {
        return Ok(Box::new(FileSource {
            path: location.to_string(),
        }));
    }

    let url = location.to_string();
    let source: Box<dyn TextSource> = match app_token {
        Some(token) => Box::new(HttpSource {
            client: ApiKey::app_token(BasicClient::new(), token)?,
            url,
        }),
        None => Box::new(HttpSource {
            client: BasicClient::new(),
            url,
        }),
    };
    Ok(source)
}
