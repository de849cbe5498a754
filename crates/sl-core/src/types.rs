//! Core type definitions for Shortlink
//!
//! A [`Rule`] is owned by the host application; the engine only ever reads it.

// =============================================================================
// Rule
// =============================================================================

/// One user-configured shortening rule.
///
/// Field names serialize in camelCase so settings written by the host
/// application load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rule {
    /// Opaque identifier, stable across edits
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Display label
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Disabled rules are skipped
    #[cfg_attr(feature = "serde", serde(default = "default_enabled"))]
    pub enabled: bool,
    /// Wildcard domain expression, e.g. `*.atlassian.net` or `example.com/jira`
    #[cfg_attr(feature = "serde", serde(default))]
    pub domain_pattern: String,
    /// Regex matched against the tail following the domain
    #[cfg_attr(feature = "serde", serde(default))]
    pub path_pattern: String,
    /// Output with `${url}`, `${domain}` and `${1}`..`${9}` placeholders
    #[cfg_attr(feature = "serde", serde(default))]
    pub output_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_preset: bool,
}

#[cfg(feature = "serde")]
fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Create an enabled, non-preset rule.
    pub fn new(
        id: impl Into<String>,
        domain_pattern: impl Into<String>,
        path_pattern: impl Into<String>,
        output_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            enabled: true,
            domain_pattern: domain_pattern.into(),
            path_pattern: path_pattern.into(),
            output_template: output_template.into(),
            description: String::new(),
            is_preset: false,
        }
    }

    /// Builder-style display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder-style description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// =============================================================================
// Rule Match
// =============================================================================

/// Successful match of one rule against a URL.
///
/// Captures are raw (still encoded); use [`RuleMatch::decoded_captures`]
/// or [`RuleMatch::render`] for display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// The full candidate URL
    pub url: String,
    /// Host plus literal path prefix, scheme stripped
    pub domain: String,
    /// The path pattern's own groups, index 0 is `${1}`
    pub captures: Vec<String>,
}

impl RuleMatch {
    /// 1-based capture lookup. Groups that did not participate are empty.
    #[inline]
    pub fn capture(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.captures.get(i))
            .map(String::as_str)
    }

    /// Captures with `+` and percent escapes decoded.
    pub fn decoded_captures(&self) -> Vec<String> {
        self.captures.iter().map(|c| crate::decode::decode_value(c)).collect()
    }

    /// Decode the captures and substitute them into `template`.
    pub fn render(&self, template: &str) -> String {
        let captures = self.decoded_captures();
        crate::template::render(template, &self.url, &self.domain, &captures)
    }
}
