use async_trait::async_trait;
use tracing::warn;

use super::client::HttpClient;

/// Sent with every dataset download.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The plain `reqwest` client every download goes through.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// A gzip-capable client identifying itself with [`USER_AGENT`].
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "HTTP client setup failed, using defaults");
                reqwest::Client::new()
            });
        Self(client)
    }

    /// Wraps an already configured client, e.g. one with proxies or timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self(client)
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
