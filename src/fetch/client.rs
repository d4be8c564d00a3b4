use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, Request, Response};

/// Executes a prepared HTTP request. Wrappers such as [`super::ApiKey`]
/// add headers and delegate to an inner client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    /// GETs `url` and fails on a malformed URL or a non-success status.
    async fn get(&self, url: &str) -> Result<Response> {
        let url = url
            .parse()
            .with_context(|| format!("invalid dataset URL '{url}'"))?;
        let resp = self.execute(Request::new(Method::GET, url)).await?;
        Ok(resp.error_for_status()?)
    }
}
