//! Text escaping for the generated file formats and the base64 encoding used
//! by the contents API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Escape a value for a single-line markup text slot (Android resources).
/// Newlines and tabs become the two-character sequences `\n` and `\t`.
pub fn escape_markup_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for a double-quoted native string literal (`.strings`).
pub fn escape_native_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON string-literal escaping with the same contract as
/// [`escape_native_string_literal`]. ARB files go through `serde_json`
/// instead; this is for hand-assembled JSON fragments.
pub fn escape_json_text(s: &str) -> String {
    escape_native_string_literal(s)
}

/// Base64 of the UTF-8 bytes of `s`, standard alphabet with `=` padding.
///
/// Characters outside the BMP are encoded as a single 4-byte sequence.
pub fn encode_base64_utf8(s: &str) -> String {
    STANDARD.encode(s.as_bytes())
}
