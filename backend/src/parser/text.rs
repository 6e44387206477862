//! Text decoding with encoding auto-detection.
//!
//! Example scripts come from whatever editor the recruiter used, so the
//! bytes may be UTF-8, Latin-1 or windows-1252.

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding, falling back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Decode bytes to text. Valid UTF-8 (with or without BOM) is taken as is.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => decode_content(bytes, &detect_encoding(bytes)),
    }
}

/// The example script as trimmed text.
pub fn extract_script(bytes: &[u8]) -> String {
    decode_text(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_script_trimmed() {
        let script = extract_script("  Hi, this is Ava from Acme Logistics.\n\n".as_bytes());
        assert_eq!(script, "Hi, this is Ava from Acme Logistics.");
    }

    #[test]
    fn test_bom_stripped() {
        let script = extract_script(b"\xEF\xBB\xBFHello");
        assert_eq!(script, "Hello");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_non_utf8_never_fails() {
        let bytes: &[u8] = &[0x43, 0x61, 0x66, 0xE9, 0x20, 0x6F, 0x75, 0x76, 0x65, 0x72, 0x74];
        let decoded = decode_text(bytes);
        assert!(decoded.starts_with("Caf"));
        assert!(decoded.ends_with("ouvert"));
    }
}
