//! Minimal CSV writing for exports.

use std::borrow::Cow;

/// Quote a field when it contains a comma, quote, CR or LF. Inner quotes are doubled.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Join escaped fields into one CRLF-terminated record.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push_str("\r\n");
}
