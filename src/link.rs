//! Link target sanitization.
//!
//! Mirrors the defence used by HTML sanitizers: percent-decode the target,
//! strip everything that could not be part of a scheme, and refuse
//! `javascript:` no matter how it is cased or obfuscated.  Rejection is
//! silent; the caller renders nothing for an unsafe link.

use percent_encoding::percent_decode_str;

/// Returns true if `href` is safe to render.
///
/// Malformed percent-encoding (anything that does not decode to UTF-8) is
/// treated as unsafe rather than an error.
pub fn is_safe(href: &str) -> bool {
    let decoded = match percent_decode_str(href).decode_utf8() {
        Ok(s) => s,
        Err(_) => {
            md_trace!("link rejected, undecodable percent-encoding: {}", href);
            return false;
        }
    };
    // Keep only characters a scheme could legitimately contain, so tricks
    // like "java\tscript:" still collapse to the forbidden prefix.
    let cleaned: String = decoded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ':')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.starts_with("javascript:") {
        md_trace!("link rejected, javascript scheme: {}", href);
        return false;
    }
    true
}
