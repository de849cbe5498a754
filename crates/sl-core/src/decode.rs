//! Value Decoder
//!
//! Turns a raw capture into display text: `+` becomes a space, then
//! `%XX` escapes are decoded.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Decode a captured value.
///
/// A malformed escape (a `%` not followed by two hex digits) or escapes that
/// decode to invalid UTF-8 leave the value with only `+` replaced.
pub fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    if !spaced.contains('%') {
        return spaced;
    }
    if !has_valid_escapes(&spaced) {
        log::trace!("malformed percent escape in capture {spaced:?}");
        return spaced;
    }
    let decoded = percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned);
    decoded.unwrap_or(spaced)
}

/// True when every `%` starts a two-hex-digit escape.
fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
