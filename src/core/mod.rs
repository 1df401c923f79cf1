pub mod adapter;

pub use crate::domain::model::{NormalizedError, ServiceRequest, ServiceResponse};
pub use crate::domain::ports::{Transport, TransportFailure};
