//! Platform normalization of tool output.
//!
//! Diagnostics from the same tool differ across platforms in two ways: Windows builds emit
//! CRLF line endings and backslash path separators. Both actual and expected text go
//! through [`normalize`] before comparison.

/// Canonicalize line endings to `\n` and path separators to `/`.
///
/// `\r\n` and a lone `\r` both become `\n`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\\' => out.push('/'),
            other => out.push(other),
        }
    }

    out
}
