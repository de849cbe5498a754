//! Built-in rules shipped with a fresh install.

use sl_core::Rule;

/// Id of the rule generated from a legacy single-domain settings file.
pub const LEGACY_RULE_ID: &str = "legacy-jira";

const ISSUE_KEY_PATH: &str = r"\/.*\/([A-Z][A-Z0-9]*-\d+)";
const ISSUE_KEY_TEMPLATE: &str = "[${1}](${url})";

fn preset(
    id: &str,
    name: &str,
    description: &str,
    domain_pattern: &str,
    path_pattern: &str,
    output_template: &str,
) -> Rule {
    let mut rule = Rule::new(id, domain_pattern, path_pattern, output_template)
        .with_name(name)
        .with_description(description);
    rule.is_preset = true;
    rule
}

/// Default rules in priority order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        preset(
            "preset-jira",
            "Jira issue",
            "Issue key from an Atlassian Cloud Jira link",
            "*.atlassian.net",
            ISSUE_KEY_PATH,
            ISSUE_KEY_TEMPLATE,
        ),
        preset(
            "preset-confluence",
            "Confluence page",
            "Page title from an Atlassian Cloud Confluence link",
            "*.atlassian.net/wiki",
            r"\/spaces\/[^\/]+\/pages\/\d+\/([^?]+)",
            "[${1}](${url})",
        ),
        preset(
            "preset-gitlab-issue",
            "GitLab issue",
            "project#number from a GitLab issue link",
            "gitlab.com",
            r"\/(.+)\/-\/issues\/(\d+)",
            "[${1}#${2}](${url})",
        ),
        preset(
            "preset-gitlab-mr",
            "GitLab merge request",
            "project!number from a GitLab merge request link",
            "gitlab.com",
            r"\/(.+)\/-\/merge_requests\/(\d+)",
            "[${1}!${2}](${url})",
        ),
        preset(
            "preset-github-issue",
            "GitHub issue",
            "owner/repo#number from a GitHub issue link",
            "github.com",
            r"\/([^\/]+\/[^\/]+)\/issues\/(\d+)",
            "[${1}#${2}](${url})",
        ),
        preset(
            "preset-github-pr",
            "GitHub pull request",
            "owner/repo#number from a GitHub pull request link",
            "github.com",
            r"\/([^\/]+\/[^\/]+)\/pull\/(\d+)",
            "[${1}#${2}](${url})",
        ),
    ]
}

/// Jira-shaped rule for the one domain a legacy settings file stored.
pub fn legacy_rule(domain: &str) -> Rule {
    Rule::new(LEGACY_RULE_ID, domain, ISSUE_KEY_PATH, ISSUE_KEY_TEMPLATE)
        .with_name("Jira issue")
        .with_description(format!("Migrated from the single-domain setting for {domain}"))
}
