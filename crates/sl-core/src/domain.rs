//! Domain Matcher
//!
//! A domain pattern is literal text where `*` stands for any run of
//! characters, including none. It is matched as a prefix of the URL with its
//! `http://` or `https://` scheme removed, so a pattern may also carry a
//! literal path prefix such as `example.com/jira`.

use regex::Regex;

use crate::url::strip_scheme;

/// Regex fragment a `*` expands to.
const WILDCARD: &str = ".*";

/// Expand a wildcard domain pattern into an unanchored regex fragment.
///
/// Literal runs are escaped first and only then joined with the wildcard
/// fragment, so the expansion itself is never escaped.
pub fn expand_wildcards(pattern: &str) -> String {
    pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(WILDCARD)
}

/// Compiled prefix test for one domain pattern.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    regex: Regex,
}

impl DomainMatcher {
    /// Compile `pattern`. Returns `None` for an empty pattern, which never
    /// matches anything.
    pub fn new(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        // Escaped input always compiles; the size limit is the only way out.
        Regex::new(&format!("^{}", expand_wildcards(pattern)))
            .ok()
            .map(|regex| Self { regex })
    }

    /// Whether `url` has an http(s) scheme followed by this pattern.
    #[inline]
    pub fn matches(&self, url: &str) -> bool {
        strip_scheme(url).is_some_and(|rest| self.regex.is_match(rest))
    }
}

/// One-shot form of [`DomainMatcher`].
pub fn domain_matches(pattern: &str, url: &str) -> bool {
    DomainMatcher::new(pattern).is_some_and(|m| m.matches(url))
}
