//! Parsers for the uploaded job files.
//!
//! - [`flow`] - call flow steps from XML
//! - [`text`] - encoding-aware text decoding for scripts

pub mod flow;
pub mod text;

pub use flow::{parse_flow, UNSUPPORTED_FORMAT};
pub use text::{decode_content, decode_text, detect_encoding, extract_script};
