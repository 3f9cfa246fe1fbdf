//! Escaping for server-provided text interpolated into card markup.
//!
//! Exactly three characters are transformed, so values seeded into edit
//! surfaces read back byte-for-byte: `unescape(escape(x)) == x` for every x.

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Inverse of [`escape`]. `&amp;` is decoded last so an escaped literal
/// `&lt;` (`&amp;lt;`) does not collapse twice.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
