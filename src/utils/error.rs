use thiserror::Error;

use crate::domain::model::NormalizedError;
use crate::xml::XmlError;

#[derive(Error, Debug)]
pub enum NavError {
    /// Pure network failure: the server never responded. Propagated verbatim.
    #[error("Network error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// The server responded with an error status; the payload has been
    /// normalized to the fixed NAV error shape.
    #[error("NAV service error (status {status}): {normalized}")]
    ServiceError {
        status: u16,
        normalized: NormalizedError,
    },

    #[error("Invalid service URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("XML error: {0}")]
    XmlError(#[from] XmlError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, NavError>;
