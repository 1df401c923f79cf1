pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod xml;

pub use adapters::http::HttpTransport;
pub use config::ConnectorConfig;
pub use core::adapter::RequestAdapter;
pub use domain::model::{NormalizedError, ServiceRequest, ServiceResponse};
pub use domain::ports::{Transport, TransportFailure};
pub use utils::error::{NavError, Result};
