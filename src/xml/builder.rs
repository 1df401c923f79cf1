//! Building request XML documents for the NAV service.

use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use crate::domain::model::ServiceRequest;
use crate::xml::XmlError;

/// The NAV 3.0 API namespace declared on every request root element.
pub const NAV_API_NAMESPACE: &str = "http://schemas.nav.gov.hu/OSA/3.0/api";

/// Serialize a request into a complete XML document.
///
/// Objects become nested elements, arrays become repeated sibling elements
/// and scalars become text content.
///
/// # Errors
///
/// Returns `XmlError` if writing fails or the result is not valid UTF-8.
pub fn create_request_xml(request: &ServiceRequest) -> Result<String, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(request.root.as_str())
        .with_attribute(("xmlns", NAV_API_NAMESPACE))
        .write_inner_content(|w| write_value(w, &request.fields))?;

    String::from_utf8(buf).map_err(|err| XmlError::ParseError(err.to_string()))
}

/// Write a value as the inner content of the current element.
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
fn write_value<W: Write>(writer: &mut Writer<W>, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(map) => {
            for (tag, child) in map {
                write_field(writer, tag, child)?;
            }
        }
        Value::Null => {}
        other => {
            writer.write_event(Event::Text(BytesText::new(&scalar_text(other))))?;
        }
    }
    Ok(())
}

/// Write one `<tag>...</tag>` field; arrays repeat the tag per item.
fn write_field<W: Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_field(writer, tag, item)?;
            }
        }
        Value::Object(_) => {
            writer
                .create_element(tag)
                .write_inner_content(|w| write_value(w, value))?;
        }
        Value::Null => {
            writer.create_element(tag).write_empty()?;
        }
        other => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(&scalar_text(other)))?;
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
