//! Transport module for UserService communication
//!
//! This module defines the Transport trait and the two interchangeable
//! implementations: a full reqwest-backed HTTP POST transport and a minimal
//! TCP stream GET fallback.

pub mod http;
pub mod stream;

use async_trait::async_trait;
use url::Url;

use crate::errors::Error;
use crate::params::RequestParameters;

/// Transport trait for delivering one request to the plugin endpoint
///
/// Implementations perform a single outbound call per invocation and return the
/// raw response body as text. No retries and no connection-reuse contract;
/// timeouts are the implementation's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the parameters to the endpoint and return the raw body
    async fn send(&self, endpoint: &Url, params: &RequestParameters) -> Result<String, Error>;
}

/// Boxed transport for dynamic dispatch
pub type BoxedTransport = Box<dyn Transport>;
