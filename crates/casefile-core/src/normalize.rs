//! Free-text answer normalization.

/// Convert a raw answer into its comparable form.
///
/// Trims surrounding whitespace, lower-cases, and inserts a single space
/// after any comma not already followed by whitespace, so `"a,b"` and
/// `"a, b"` compare equal. Every other character, periods included, is kept
/// as-is.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len() + 4);
    let mut chars = lowered.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c == ',' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            out.push(' ');
        }
    }

    out
}
