//! Decoding NAV service XML into plain JSON mappings.
//!
//! The decoder mirrors the loose shape the NAV responses are consumed in:
//! every element becomes either a string (text-only content) or an object of
//! its children. Repeated sibling elements fold into an array only when they
//! are actually repeated, attributes land under `"$"` and character data that
//! coexists with attributes or children lands under `"_"`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::xml::XmlError;

/// Remove every literal `ns2:`/`ns3:` occurrence from the raw response text.
///
/// The NAV service emits responses with or without these namespace prefixes
/// interchangeably and the decoder is not namespace-aware, so they are
/// stripped before any parsing happens.
pub fn strip_namespace_prefixes(xml: &str) -> String {
    xml.replace("ns2:", "").replace("ns3:", "")
}

/// Parse an XML document into a plain JSON mapping.
///
/// The root element becomes the single key of the returned object.
///
/// # Errors
///
/// Returns `XmlError` if the document is malformed or has no root element.
pub fn parse_xml(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Skip the declaration, comments and whitespace before the root element.
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                let value = parse_element(&mut reader, attrs)?;
                let mut root = Map::new();
                root.insert(name, value);
                return Ok(Value::Object(root));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                let mut root = Map::new();
                root.insert(name, assemble(attrs, Map::new(), String::new()));
                return Ok(Value::Object(root));
            }
            Event::Eof => return Err(XmlError::MissingRoot),
            _ => {}
        }
    }
}

/// Parse the content of an element whose start tag was just consumed.
///
/// Reads children and text until the matching end tag.
fn parse_element(
    reader: &mut Reader<&[u8]>,
    attrs: Map<String, Value>,
) -> Result<Value, XmlError> {
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                let child = parse_element(reader, child_attrs)?;
                insert_child(&mut children, name, child);
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                insert_child(&mut children, name, assemble(child_attrs, Map::new(), String::new()));
            }
            Event::Text(t) => {
                let unescaped = t
                    .unescape()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedEof(
                    "document ended inside an open element".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(assemble(attrs, children, text))
}

/// Combine attributes, child elements and character data into one value.
///
/// A text-only element collapses to a bare string; anything richer becomes an
/// object with attributes under `"$"` and leftover text under `"_"`.
fn assemble(attrs: Map<String, Value>, children: Map<String, Value>, text: String) -> Value {
    if attrs.is_empty() && children.is_empty() {
        return Value::String(text);
    }

    let mut object = Map::new();
    if !attrs.is_empty() {
        object.insert("$".to_string(), Value::Object(attrs));
    }
    for (key, value) in children {
        object.insert(key, value);
    }
    if !text.is_empty() {
        object.insert("_".to_string(), Value::String(text));
    }
    Value::Object(object)
}

/// Add a child under its tag name, folding repeated siblings into an array.
fn insert_child(children: &mut Map<String, Value>, name: String, child: Value) {
    match children.get_mut(&name) {
        None => {
            children.insert(name, child);
        }
        Some(Value::Array(items)) => {
            items.push(child);
        }
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, child]);
        }
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_string()
}

fn read_attributes(start: &BytesStart) -> Result<Map<String, Value>, XmlError> {
    let mut attrs = Map::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value).to_string();
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| XmlError::ParseError(err.to_string()))?
            .to_string();
        attrs.insert(key, Value::String(value));
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_only_elements_become_strings() {
        let xml = "<TokenExchangeResponse><funcCode>OK</funcCode><token>abc123</token></TokenExchangeResponse>";
        let value = parse_xml(xml).unwrap();

        assert_eq!(
            value,
            json!({
                "TokenExchangeResponse": {
                    "funcCode": "OK",
                    "token": "abc123"
                }
            })
        );
    }

    #[test]
    fn test_single_sibling_is_not_forced_into_array() {
        let xml = "<root><message>only one</message></root>";
        let value = parse_xml(xml).unwrap();

        assert_eq!(value["root"]["message"], json!("only one"));
    }

    #[test]
    fn test_repeated_siblings_fold_into_array() {
        let xml = "<root><message>first</message><message>second</message><message>third</message></root>";
        let value = parse_xml(xml).unwrap();

        assert_eq!(
            value["root"]["message"],
            json!(["first", "second", "third"])
        );
    }

    #[test]
    fn test_attributes_land_under_dollar_key() {
        let xml = r#"<root><item code="42">payload</item></root>"#;
        let value = parse_xml(xml).unwrap();

        assert_eq!(
            value["root"]["item"],
            json!({"$": {"code": "42"}, "_": "payload"})
        );
    }

    #[test]
    fn test_empty_element_becomes_empty_string() {
        let xml = "<root><empty/></root>";
        let value = parse_xml(xml).unwrap();

        assert_eq!(value["root"]["empty"], json!(""));
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let xml = "<root><message>a &lt; b &amp; c</message></root>";
        let value = parse_xml(xml).unwrap();

        assert_eq!(value["root"]["message"], json!("a < b & c"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = parse_xml("   ").unwrap_err();
        assert!(matches!(err, XmlError::MissingRoot));
    }

    #[test]
    fn test_strip_namespace_prefixes_removes_both() {
        let xml = "<ns2:GeneralErrorResponse><ns3:result>ERROR</ns3:result></ns2:GeneralErrorResponse>";
        assert_eq!(
            strip_namespace_prefixes(xml),
            "<GeneralErrorResponse><result>ERROR</result></GeneralErrorResponse>"
        );
    }

    #[test]
    fn test_strip_namespace_prefixes_leaves_plain_xml_alone() {
        let xml = "<GeneralErrorResponse><result>ERROR</result></GeneralErrorResponse>";
        assert_eq!(strip_namespace_prefixes(xml), xml);
    }

    #[test]
    fn test_parse_stripped_namespaced_response() {
        let raw = "<ns2:QueryInvoiceDataResponse><ns2:result><ns2:funcCode>OK</ns2:funcCode></ns2:result></ns2:QueryInvoiceDataResponse>";
        let value = parse_xml(&strip_namespace_prefixes(raw)).unwrap();

        assert_eq!(
            value["QueryInvoiceDataResponse"]["result"]["funcCode"],
            json!("OK")
        );
    }
}
