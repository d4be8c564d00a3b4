use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use crate::fetch::client::HttpClient;

/// Header used by open-data portals to identify an application and lift
/// anonymous rate limits.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";

/// An [`HttpClient`] wrapper that sends a token in a request header.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Validates the header name and value up front so requests never fail
    /// on a malformed token.
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name '{header_name}'"))?;
        let mut value = HeaderValue::from_str(key).context("invalid header value for API key")?;
        value.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            value,
        })
    }

    /// Sends `token` as [`APP_TOKEN_HEADER`].
    pub fn app_token(inner: C, token: &str) -> Result<Self> {
        Self::new(inner, APP_TOKEN_HEADER, token)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}
