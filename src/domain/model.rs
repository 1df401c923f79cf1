use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application-level request for a NAV service resource.
///
/// The field tree is opaque to the adapter; it is handed to the XML builder
/// as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Root element name, e.g. `TokenExchangeRequest`.
    pub root: String,
    /// Request content serialized into child elements.
    pub fields: Value,
}

impl ServiceRequest {
    pub fn new(root: impl Into<String>, fields: Value) -> Self {
        Self {
            root: root.into(),
            fields,
        }
    }
}

/// Decoded NAV response plus the outgoing XML that produced it.
///
/// Serializes to the decoded fields merged with the request XML under the
/// `requestXml` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "requestXml")]
    pub request_xml: String,
}

/// Fixed-shape payload attached to NAV service errors.
///
/// `technical_validation_messages` is always a sequence, even when the
/// upstream XML produced a single scalar message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    pub result: Value,
    #[serde(
        rename = "schemaValidationMessages",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_validation_messages: Option<Value>,
    #[serde(rename = "technicalValidationMessages")]
    pub technical_validation_messages: Vec<Value>,
}

impl NormalizedError {
    /// The shape substituted when an error response carries no body at all.
    pub fn empty() -> Self {
        Self {
            result: Value::Object(Map::new()),
            schema_validation_messages: None,
            technical_validation_messages: Vec::new(),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("<unprintable normalized error>"),
        }
    }
}
