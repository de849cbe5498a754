//! Rule list audit
//!
//! Runs the authoring validators over a whole list so problems in a
//! hand-edited settings file show up before a paste silently falls through.

use std::collections::HashSet;
use std::fmt;

use sl_core::{placeholders, validate_pattern, validate_template, CompiledRule, Rule, RuleError};

/// One problem found in one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleIssue {
    MissingId,
    DuplicateId,
    EmptyDomainPattern,
    Pattern(String),
    Template(String),
    /// Template references `${n}` but the path pattern defines fewer groups
    UnusedPlaceholder { index: usize, groups: usize },
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "rule has no id"),
            Self::DuplicateId => write!(f, "id is used by an earlier rule"),
            Self::EmptyDomainPattern => write!(f, "domain pattern cannot be empty"),
            Self::Pattern(msg) => write!(f, "path pattern: {msg}"),
            Self::Template(msg) => write!(f, "template: {msg}"),
            Self::UnusedPlaceholder { index, groups } => write!(
                f,
                "template uses ${{{index}}} but the path pattern has {groups} group(s); it will render empty"
            ),
        }
    }
}

/// Issues for the rule at `index` in the audited list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFindings {
    pub index: usize,
    pub id: String,
    pub issues: Vec<RuleIssue>,
}

/// Outcome of [`audit_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub findings: Vec<RuleFindings>,
}

impl AuditReport {
    /// True when no rule has an issue.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.findings.iter().map(|f| f.issues.len()).sum()
    }
}

/// Check every rule in `rules`. Never fails; disabled rules are checked too.
pub fn audit_rules(rules: &[Rule]) -> AuditReport {
    let mut report = AuditReport {
        total: rules.len(),
        ..AuditReport::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, rule) in rules.iter().enumerate() {
        if rule.enabled {
            report.enabled += 1;
        } else {
            report.disabled += 1;
        }

        let issues = rule_issues(rule, &mut seen);
        if !issues.is_empty() {
            report.findings.push(RuleFindings {
                index,
                id: rule.id.clone(),
                issues,
            });
        }
    }

    report
}

fn rule_issues<'a>(rule: &'a Rule, seen: &mut HashSet<&'a str>) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    if rule.id.is_empty() {
        issues.push(RuleIssue::MissingId);
    } else if !seen.insert(rule.id.as_str()) {
        issues.push(RuleIssue::DuplicateId);
    }

    if rule.domain_pattern.trim().is_empty() {
        issues.push(RuleIssue::EmptyDomainPattern);
    }

    let pattern_ok = match validate_pattern(&rule.path_pattern) {
        Ok(()) => true,
        Err(e) => {
            issues.push(RuleIssue::Pattern(e.to_string()));
            false
        }
    };

    if let Err(e) = validate_template(&rule.output_template) {
        issues.push(RuleIssue::Template(e.to_string()));
    }

    if pattern_ok {
        // Compile as enabled so disabled rules get the same group check.
        let probe = Rule {
            enabled: true,
            ..rule.clone()
        };
        match CompiledRule::compile(&probe) {
            Ok(compiled) => {
                let index = placeholders(&rule.output_template).max_capture();
                if index > compiled.group_count() {
                    issues.push(RuleIssue::UnusedPlaceholder {
                        index,
                        groups: compiled.group_count(),
                    });
                }
            }
            Err(e @ RuleError::InvalidPattern { .. }) => {
                issues.push(RuleIssue::Pattern(e.to_string()));
            }
            Err(_) => {}
        }
    }

    issues
}
