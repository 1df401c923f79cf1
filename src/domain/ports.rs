use async_trait::async_trait;

/// Failure modes of the HTTP collaborator.
#[derive(Debug)]
pub enum TransportFailure {
    /// The server never produced a response.
    Network(reqwest::Error),
    /// The requested path did not resolve against the base URL.
    Url(url::ParseError),
    /// The server answered with an error status; `body` is the raw text.
    Status { status: u16, body: String },
}

/// The injected HTTP client: one POST operation, body in, body out.
///
/// Retries and timeouts are the implementation's business, not the
/// adapter's.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &str, body: String) -> Result<String, TransportFailure>;
}
