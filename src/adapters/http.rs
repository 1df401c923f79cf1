use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::config::ConnectorConfig;
use crate::domain::ports::{Transport, TransportFailure};
use crate::utils::error::{NavError, Result};

/// Reqwest-backed [`Transport`] posting XML bodies against a base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Build a transport with the timeout and default headers from config.
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(headers) = &config.headers {
            let mut map = HeaderMap::new();
            for (name, value) in headers {
                let name =
                    HeaderName::from_bytes(name.as_bytes()).map_err(|e| NavError::ConfigError {
                        message: format!("invalid header name '{}': {}", name, e),
                    })?;
                let value = HeaderValue::from_str(value).map_err(|e| NavError::ConfigError {
                    message: format!("invalid header value for '{}': {}", name, e),
                })?;
                map.insert(name, value);
            }
            builder = builder.default_headers(map);
        }

        let client = builder.build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: String) -> std::result::Result<String, TransportFailure> {
        let url = self.base_url.join(path).map_err(TransportFailure::Url)?;
        tracing::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await
            .map_err(TransportFailure::Network)?;

        let status = response.status();
        tracing::debug!("Service response status: {}", status);
        let text = response.text().await.map_err(TransportFailure::Network)?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(TransportFailure::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
