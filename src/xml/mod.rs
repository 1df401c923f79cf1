pub mod builder;
pub mod parser;

use std::io;

/// Errors from XML building or parsing.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document contained no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The document ended inside an open element.
    #[error("unexpected end of document: {0}")]
    UnexpectedEof(String),

    /// An error decoding or unescaping XML text content.
    #[error("failed to decode text content: {0}")]
    ParseError(String),
}

pub use builder::create_request_xml;
pub use parser::{parse_xml, strip_namespace_prefixes};
