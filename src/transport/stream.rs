//! Stream Transport
//!
//! Minimal TCP fallback mirroring the plugin's historical fopen-based access
//! path: the parameters ride in the query string of a plain GET over a raw
//! socket. Only `http` endpoints are supported.
//!
//! The historical implementation read at most 1024 bytes of the reply. That cap
//! is kept as an opt-in legacy-compat option; by default the full body is read.

use async_trait::async_trait;
use tokio::io::{ AsyncReadExt, AsyncWriteExt };
use tokio::net::TcpStream;
use url::Url;

use crate::errors::Error;
use crate::params::RequestParameters;
use crate::transport::Transport;

/// Historical read cap in bytes
pub const LEGACY_READ_CAP: usize = 1024;

/// Options for the stream transport
#[derive(Debug, Clone, Default)]
pub struct StreamTransportOptions {
    /// Truncate the body to [`LEGACY_READ_CAP`] bytes, as the historical
    /// fread-based client did
    pub legacy_read_cap: bool,
}

/// Raw TCP GET transport
#[derive(Debug, Default)]
pub struct StreamTransport {
    options: StreamTransportOptions,
}

impl StreamTransport {
    /// Create a transport that reads full bodies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with explicit options
    pub fn with_options(options: StreamTransportOptions) -> Self {
        Self { options }
    }
}

fn truncate_at_boundary(body: &str, cap: usize) -> &str {
    if body.len() <= cap {
        return body;
    }
    let mut end = cap;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl Transport for StreamTransport {
    async fn send(&self, endpoint: &Url, params: &RequestParameters) -> Result<String, Error> {
        if endpoint.scheme() != "http" {
            return Err(
                Error::Transport(
                    format!("stream transport only supports http endpoints, got {}", endpoint.scheme())
                )
            );
        }
        let host = endpoint
            .host_str()
            .ok_or_else(|| Error::Transport("endpoint URL has no host".to_string()))?;
        let port = endpoint.port_or_known_default().unwrap_or(80);

        tracing::debug!("connecting to {}:{}", host, port);
        let mut socket = TcpStream::connect((host, port)).await?;

        // HTTP/1.0 keeps the reply un-chunked and closes the connection after
        // one exchange.
        let request = format!(
            "GET {}?{} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
            endpoint.path(),
            params.to_query_string(),
            host
        );
        socket.write_all(request.as_bytes()).await?;

        let mut raw = Vec::new();
        socket.read_to_end(&mut raw).await?;
        let text = String::from_utf8(raw).map_err(|e|
            Error::Decode(format!("response is not valid UTF-8: {}", e))
        )?;

        let body = match text.split_once("\r\n\r\n") {
            Some((_, body)) => body,
            None => {
                return Err(Error::Transport("malformed HTTP response: no header break".to_string()));
            }
        };
        let body = if self.options.legacy_read_cap {
            truncate_at_boundary(body, LEGACY_READ_CAP)
        } else {
            body
        };
        tracing::debug!("read {} body bytes", body.len());
        Ok(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{ AsyncReadExt, AsyncWriteExt };
    use tokio::net::TcpListener;

    use crate::params::{ Operation, RequestParameters };

    async fn one_shot_server(response: String) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        port
    }

    fn http_reply(body: &str) -> String {
        format!(
            "HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn sends_get_and_returns_body() {
        let port = one_shot_server(http_reply("<result>ok</result>")).await;
        let mut endpoint = Url::parse("http://127.0.0.1/plugins/userService/userservice").unwrap();
        endpoint.set_port(Some(port)).unwrap();

        let transport = StreamTransport::new();
        let params = RequestParameters::new(Operation::Enable, "s");
        let body = transport.send(&endpoint, &params).await.unwrap();
        assert_eq!(body, "<result>ok</result>");
    }

    #[tokio::test]
    async fn legacy_cap_truncates_long_bodies() {
        let long_body = "x".repeat(LEGACY_READ_CAP + 100);
        let port = one_shot_server(http_reply(&long_body)).await;
        let mut endpoint = Url::parse("http://127.0.0.1/plugins/userService/userservice").unwrap();
        endpoint.set_port(Some(port)).unwrap();

        let transport = StreamTransport::with_options(StreamTransportOptions {
            legacy_read_cap: true,
        });
        let params = RequestParameters::new(Operation::Enable, "s");
        let body = transport.send(&endpoint, &params).await.unwrap();
        assert_eq!(body.len(), LEGACY_READ_CAP);
    }

    #[tokio::test]
    async fn https_endpoints_are_rejected() {
        let endpoint = Url::parse("https://localhost:9091/plugins/userService/userservice").unwrap();
        let transport = StreamTransport::new();
        let params = RequestParameters::new(Operation::Enable, "s");
        let err = transport.send(&endpoint, &params).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = format!("{}é", "a".repeat(LEGACY_READ_CAP - 1));
        let truncated = truncate_at_boundary(&body, LEGACY_READ_CAP);
        assert_eq!(truncated.len(), LEGACY_READ_CAP - 1);
    }
}
