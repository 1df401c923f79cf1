use serde_json::{Map, Value};

use crate::domain::model::{NormalizedError, ServiceRequest, ServiceResponse};
use crate::domain::ports::{Transport, TransportFailure};
use crate::utils::error::{NavError, Result};
use crate::xml::{create_request_xml, parse_xml, strip_namespace_prefixes};

/// Request/response adapter for the NAV service.
///
/// Serializes a request to XML, POSTs it through the injected transport and
/// normalizes the answer: success bodies are decoded into a plain mapping
/// merged with the outgoing XML, error bodies are reduced to the fixed
/// `NormalizedError` shape before the failure is re-signaled.
pub struct RequestAdapter<T: Transport> {
    transport: T,
}

impl<T: Transport> RequestAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Convert `request` to XML and send it to the given NAV service path.
    pub async fn send(&self, request: &ServiceRequest, path: &str) -> Result<ServiceResponse> {
        let request_xml = create_request_xml(request)?;
        tracing::debug!("Sending {} to: {}", request.root, path);

        match self.transport.post(path, request_xml.clone()).await {
            Ok(body) => {
                let decoded = parse_xml(&strip_namespace_prefixes(&body))?;
                Ok(ServiceResponse {
                    fields: into_fields(decoded),
                    request_xml,
                })
            }
            Err(TransportFailure::Status { status, body }) => {
                tracing::debug!("Service answered with error status: {}", status);
                let normalized = normalize_error_body(&body)?;
                Err(NavError::ServiceError { status, normalized })
            }
            Err(TransportFailure::Network(source)) => Err(NavError::TransportError(source)),
            Err(TransportFailure::Url(source)) => Err(NavError::UrlError(source)),
        }
    }
}

fn into_fields(decoded: Value) -> Map<String, Value> {
    match decoded {
        Value::Object(fields) => fields,
        other => {
            let mut fields = Map::new();
            fields.insert("response".to_string(), other);
            fields
        }
    }
}

/// Reduce a textual error body to the fixed NAV error shape.
///
/// The response kind is located with a raw substring probe before any
/// parsing: the service is not consistent about namespace prefixes, so the
/// tag name is searched in the unparsed text.
fn normalize_error_body(body: &str) -> Result<NormalizedError> {
    if body.is_empty() {
        return Ok(NormalizedError::empty());
    }

    if body.contains("GeneralExceptionResponse") {
        let decoded = parse_xml(&strip_namespace_prefixes(body))?;
        let exception = decoded
            .get("GeneralExceptionResponse")
            .cloned()
            .unwrap_or(Value::Null);

        Ok(NormalizedError {
            result: Value::Object(pick(&exception, &["funcCode", "errorCode", "message"])),
            schema_validation_messages: None,
            technical_validation_messages: Vec::new(),
        })
    } else if body.contains("GeneralErrorResponse") {
        let decoded = parse_xml(&strip_namespace_prefixes(body))?;
        let error = decoded
            .get("GeneralErrorResponse")
            .cloned()
            .unwrap_or(Value::Null);

        Ok(NormalizedError {
            result: error
                .get("result")
                .cloned()
                .unwrap_or(Value::Object(Map::new())),
            schema_validation_messages: error.get("schemaValidationMessages").cloned(),
            technical_validation_messages: coerce_sequence(
                error.get("technicalValidationMessages"),
            ),
        })
    } else {
        let mut result = Map::new();
        result.insert("message".to_string(), Value::String(body.to_string()));
        Ok(NormalizedError {
            result: Value::Object(result),
            schema_validation_messages: None,
            technical_validation_messages: Vec::new(),
        })
    }
}

/// Normalize `technicalValidationMessages` to a sequence: absent becomes
/// empty, a bare scalar becomes a single-element sequence.
///
/// An empty element decodes to an empty string and counts as absent.
fn coerce_sequence(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Copy only the named keys out of a decoded mapping, dropping the rest.
fn pick(value: &Value, keys: &[&str]) -> Map<String, Value> {
    let mut picked = Map::new();
    for key in keys {
        if let Some(v) = value.get(*key) {
            picked.insert((*key).to_string(), v.clone());
        }
    }
    picked
}
