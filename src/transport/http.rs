//! HTTP Transport
//!
//! The default transport: POSTs the parameter mapping as a form-encoded body
//! using a reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use url::Url;

use crate::errors::Error;
use crate::params::RequestParameters;
use crate::transport::Transport;

/// Options for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportOptions {
    /// Request timeout; `None` leaves timing out to the caller
    pub timeout: Option<Duration>,
}

impl Default for HttpTransportOptions {
    fn default() -> Self {
        Self { timeout: Some(Duration::from_secs(30)) }
    }
}

/// reqwest-backed POST transport
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Create a transport with default options
    pub fn new() -> Result<Self, Error> {
        Self::with_options(HttpTransportOptions::default())
    }

    /// Create a transport with explicit options
    pub fn with_options(options: HttpTransportOptions) -> Result<Self, Error> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        tracing::debug!("HTTP transport configured with timeout: {:?}", options.timeout);
        Ok(Self { client: builder.build()? })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &Url, params: &RequestParameters) -> Result<String, Error> {
        tracing::debug!("POST {} ({} fields)", endpoint, params.pairs().len());
        let response = self.client
            .post(endpoint.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(params.to_query_string())
            .send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("response status {} ({} bytes)", status, body.len());
        Ok(body)
    }
}
