//! URL helpers for the match path
//!
//! These functions avoid allocations and work directly on string slices.

// =============================================================================
// Scheme Extraction
// =============================================================================

/// Schemes a rule can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Length of `scheme://`.
    #[inline]
    pub const fn prefix_len(self) -> usize {
        match self {
            Self::Http => 7,
            Self::Https => 8,
        }
    }
}

/// Scheme extraction without URL parsing.
///
/// Only lowercase `http://` and `https://` are recognised, the same
/// spelling the anchored rule pattern accepts.
#[inline]
pub fn extract_scheme(url: &str) -> Option<Scheme> {
    let bytes = url.as_bytes();
    if bytes.starts_with(b"https://") {
        Some(Scheme::Https)
    } else if bytes.starts_with(b"http://") {
        Some(Scheme::Http)
    } else {
        None
    }
}

/// Everything after `scheme://`, or `None` for unsupported schemes.
#[inline]
pub fn strip_scheme(url: &str) -> Option<&str> {
    extract_scheme(url).map(|scheme| &url[scheme.prefix_len()..])
}

// =============================================================================
// Candidate Checks
// =============================================================================

/// True when `text` is a single bare token: non-empty and free of whitespace.
///
/// The byte order mark counts as whitespace here, as it does for a
/// browser's `\s`.
#[inline]
pub fn is_single_token(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(is_gap)
}

#[inline]
fn is_gap(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
