mod auth;
mod basic;
mod client;
pub mod source;

pub use auth::{APP_TOKEN_HEADER, ApiKey};
pub use basic::{BasicClient, USER_AGENT};
pub use client::HttpClient;
pub use source::{FileSource, HttpSource, TextSource, source_for};

use anyhow::Result;

/// GETs `url` and returns the body as text, failing on non-success status.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let resp = client.get(url).await?;
    Ok(resp.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_text_rejects_invalid_url() {
        let client = ApiKey::app_token(BasicClient::new(), "token").unwrap();
        assert!(fetch_text(&client, "://missing-scheme").await.is_err());
    }
}
