//! Markup escaping shared by the built-in engines.

/// Escape text content.
pub(crate) fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Escape an attribute value for double-quoted output.
pub(crate) fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if in_attribute => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Append ` key="value"` pairs.
pub(crate) fn push_attributes<'a>(
    out: &mut String,
    attributes: impl IntoIterator<Item = (&'a String, &'a String)>,
) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}
