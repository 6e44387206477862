//! Call flow parsing.
//!
//! A flow is an XML document whose `<step>` elements, in document order,
//! describe the conversation. Image flows are not read (no OCR); they get
//! the same placeholder as any unknown format.

use std::path::Path;

use crate::error::{FlowError, FlowResult};
use crate::parser::text::decode_text;

/// Placeholder step for files that cannot be read as a flow.
pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format";

/// Extract the flow steps from an uploaded file.
pub fn parse_flow(file_name: &str, bytes: &[u8]) -> FlowResult<Vec<String>> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("xml") => parse_flow_xml(&decode_text(bytes)),
        _ => Ok(vec![UNSUPPORTED_FORMAT.to_string()]),
    }
}

/// Text of every `<step>` element, trimmed, blank steps skipped.
pub fn parse_flow_xml(xml: &str) -> FlowResult<Vec<String>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)
        .map_err(|e| FlowError::InvalidXml(e.to_string()))?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("step"))
        .filter_map(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect())
}
