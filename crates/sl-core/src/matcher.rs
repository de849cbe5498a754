//! Rule Matcher and Rule Evaluator
//!
//! This is the paste path: every pasted string goes through [`evaluate`].
//! Rules are tried in list order and the first match wins. A rule that
//! cannot be compiled is skipped; nothing here returns an error to the caller.

use regex::Regex;

use crate::domain::{expand_wildcards, DomainMatcher};
use crate::types::{Rule, RuleMatch};
use crate::url::{is_single_token, strip_scheme};

// =============================================================================
// Errors
// =============================================================================

/// Why a rule cannot take part in matching.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule is disabled")]
    Disabled,
    #[error("Rule has no domain pattern")]
    MissingDomainPattern,
    #[error("Rule has no path pattern")]
    MissingPathPattern,
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// =============================================================================
// Compiled Rule
// =============================================================================

/// Groups the anchored pattern adds around the user's path pattern:
/// the whole match, the scheme+domain wrapper and the trailing query.
const WRAPPER_GROUPS: usize = 3;

/// A rule with its patterns compiled, ready to match many URLs.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    id: String,
    template: String,
    domain: DomainMatcher,
    full: Regex,
    group_count: usize,
}

impl CompiledRule {
    /// Compile the domain and anchored full pattern of `rule`.
    ///
    /// The full pattern is `^(https?://<domain>)(?:<path>)(\?.*)?$`, with the
    /// domain wildcard-expanded and the path pattern used as written.
    pub fn compile(rule: &Rule) -> Result<Self, RuleError> {
        if !rule.enabled {
            return Err(RuleError::Disabled);
        }
        if rule.path_pattern.is_empty() {
            return Err(RuleError::MissingPathPattern);
        }
        let domain =
            DomainMatcher::new(&rule.domain_pattern).ok_or(RuleError::MissingDomainPattern)?;

        let source = format!(
            r"^(https?://{})(?:{})(\?.*)?$",
            expand_wildcards(&rule.domain_pattern),
            rule.path_pattern
        );
        let full = Regex::new(&source).map_err(|source| RuleError::InvalidPattern {
            pattern: rule.path_pattern.clone(),
            source,
        })?;
        let group_count = full.captures_len().saturating_sub(WRAPPER_GROUPS);

        Ok(Self {
            id: rule.id.clone(),
            template: rule.output_template.clone(),
            domain,
            full,
            group_count,
        })
    }

    /// Id of the source rule.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of capture groups the path pattern defines.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Match a full URL. The whole string must be consumed.
    pub fn matches(&self, url: &str) -> Option<RuleMatch> {
        if !self.domain.matches(url) {
            return None;
        }
        let caps = self.full.captures(url)?;
        let domain = caps
            .get(1)
            .and_then(|m| strip_scheme(m.as_str()))
            .unwrap_or_default()
            .to_string();
        let captures = (0..self.group_count)
            .map(|i| {
                caps.get(i + 2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect();

        Some(RuleMatch {
            url: url.to_string(),
            domain,
            captures,
        })
    }

    /// Decode `m`'s captures and render this rule's template.
    pub fn render(&self, m: &RuleMatch) -> String {
        m.render(&self.template)
    }

    /// Match, decode and render with this rule's template.
    pub fn shorten(&self, url: &str) -> Option<String> {
        self.matches(url).map(|m| self.render(&m))
    }
}

// =============================================================================
// Single Rule
// =============================================================================

/// Match one rule against a URL, treating any construction error as no match.
pub fn match_rule(url: &str, rule: &Rule) -> Option<RuleMatch> {
    compile_or_skip(rule)?.matches(url)
}

/// Match one rule and render its template. Used for live preview while a
/// rule is being edited; no whitespace check is applied to `url`.
pub fn shorten_with_rule(url: &str, rule: &Rule) -> Option<String> {
    compile_or_skip(rule)?.shorten(url)
}

fn compile_or_skip(rule: &Rule) -> Option<CompiledRule> {
    match CompiledRule::compile(rule) {
        Ok(compiled) => Some(compiled),
        Err(RuleError::Disabled) => None,
        Err(e) => {
            log::debug!("skipping rule '{}': {}", rule.id, e);
            None
        }
    }
}

// =============================================================================
// Rule Evaluator
// =============================================================================

/// Shorten `text` with the first matching rule.
///
/// Blank text or text containing any whitespace is never a candidate.
/// Rules are compiled lazily, so rules after the first match cost nothing.
pub fn evaluate(text: &str, rules: &[Rule]) -> Option<String> {
    if !is_single_token(text) {
        return None;
    }
    rules.iter().find_map(|rule| {
        log::trace!("trying rule '{}'", rule.id);
        shorten_with_rule(text, rule)
    })
}

/// An ordered rule list compiled once for repeated evaluation.
///
/// Rules that fail to compile keep their position and never match.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Option<CompiledRule>>,
}

impl RuleSet {
    /// Compile every rule in order.
    pub fn compile(rules: &[Rule]) -> Self {
        Self {
            rules: rules.iter().map(compile_or_skip).collect(),
        }
    }

    /// Number of rule slots, including skipped ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules that can match.
    pub fn active_count(&self) -> usize {
        self.rules.iter().flatten().count()
    }

    /// Same result as [`evaluate`] over the source list.
    pub fn evaluate(&self, text: &str) -> Option<String> {
        if !is_single_token(text) {
            return None;
        }
        self.rules.iter().flatten().find_map(|rule| rule.shorten(text))
    }

    /// First matching rule and its raw match.
    pub fn find_match(&self, text: &str) -> Option<(&CompiledRule, RuleMatch)> {
        if !is_single_token(text) {
            return None;
        }
        self.rules
            .iter()
            .flatten()
            .find_map(|rule| rule.matches(text).map(|m| (rule, m)))
    }
}
