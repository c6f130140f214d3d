//! HTML escaping for untrusted text.
//!
//! Everything the backend sends passes through [`sanitize`] or
//! [`escape_html`] before it is placed into an [`Element`](crate::Element)
//! as raw markup.

use serde_json::Value;

/// Escapes `& < > " '` for use in HTML text or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Plain text for any JSON value: `null` is empty, strings are taken
/// verbatim and every other value is spelled as JSON. Every payload field
/// the renderers show is read through this.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// HTML-safe text for any JSON value.
pub fn sanitize(value: &Value) -> String {
    escape_html(&value_text(value))
}

pub fn sanitize_opt(value: Option<&Value>) -> String {
    value.map(sanitize).unwrap_or_default()
}

/// Turns newlines of already escaped text into `<br>` tags.
pub fn line_breaks(escaped: &str) -> String {
    escaped.replace("\r\n", "\n").replace('\n', "<br>")
}

/// Escapes first, then converts newlines, so message content can never
/// smuggle tags in through the line-break conversion.
pub fn escape_multiline(text: &str) -> String {
    line_breaks(&escape_html(text))
}
