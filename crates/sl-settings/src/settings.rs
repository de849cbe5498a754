//! Persisted settings document
//!
//! The host stores one JSON object. The current schema is
//! `{ "version": 2, "rules": [...] }`. Version 1 stored a single plain
//! domain string and is migrated into one generated rule on load.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sl_core::Rule;

use crate::presets::{default_rules, legacy_rule};

/// Schema version written by [`save_settings`].
pub const SETTINGS_VERSION: u32 = 2;

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid settings document: {0}")]
    InvalidDocument(String),
}

/// Settings document: an ordered rule list, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn current_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            rules: default_rules(),
        }
    }
}

/// Version 1 layout: one domain, no patterns.
#[derive(Debug, Deserialize)]
struct LegacySettings {
    #[serde(alias = "jiraDomain")]
    domain: String,
}

/// Load settings from stored JSON, applying defaults and migration.
pub fn load_settings(json: &str) -> Result<Settings, SettingsError> {
    if json.trim().is_empty() {
        return Ok(Settings::default());
    }

    let value: Value = serde_json::from_str(json)?;
    let object = match &value {
        Value::Null => return Ok(Settings::default()),
        Value::Object(object) => object,
        other => {
            return Err(SettingsError::InvalidDocument(format!(
                "expected an object, found {}",
                json_kind(other)
            )))
        }
    };

    if object.contains_key("rules") {
        let settings: Settings = serde_json::from_value(value)?;
        if settings.version > SETTINGS_VERSION {
            return Err(SettingsError::UnsupportedVersion(settings.version));
        }
        return Ok(Settings {
            version: SETTINGS_VERSION,
            rules: settings.rules,
        });
    }

    if object.contains_key("domain") || object.contains_key("jiraDomain") {
        let legacy: LegacySettings = serde_json::from_value(value)?;
        return Ok(migrate_legacy(&legacy.domain));
    }

    if object.is_empty() {
        return Ok(Settings::default());
    }

    Err(SettingsError::InvalidDocument(
        "missing 'rules' and no legacy 'domain' field".to_string(),
    ))
}

/// Serialize settings in the current schema.
pub fn save_settings(settings: &Settings) -> Result<String, SettingsError> {
    let current = Settings {
        version: SETTINGS_VERSION,
        rules: settings.rules.clone(),
    };
    Ok(serde_json::to_string_pretty(&current)?)
}

fn migrate_legacy(domain: &str) -> Settings {
    let domain = normalize_legacy_domain(domain);
    if domain.is_empty() {
        log::debug!("legacy settings carried an empty domain, using defaults");
        return Settings::default();
    }
    log::debug!("migrating legacy settings for domain '{domain}'");
    Settings {
        version: SETTINGS_VERSION,
        rules: vec![legacy_rule(domain)],
    }
}

/// Users pasted anything from a bare host to a full URL into the old field.
fn normalize_legacy_domain(domain: &str) -> &str {
    let domain = domain.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    domain.trim_end_matches('/')
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Rule List Editing
// =============================================================================

impl Settings {
    /// Rule with the given id.
    pub fn find(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }

    /// Append a rule at the lowest priority.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Remove the rule with `id`, returning it.
    pub fn remove_rule(&mut self, id: &str) -> Option<Rule> {
        let index = self.position(id)?;
        Some(self.rules.remove(index))
    }

    /// Swap the rule at `index` with the one above it.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rules.len() {
            return false;
        }
        self.rules.swap(index - 1, index);
        true
    }

    /// Swap the rule at `index` with the one below it.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.rules.len() {
            return false;
        }
        self.rules.swap(index, index + 1);
        true
    }

    /// Enable or disable the rule with `id`.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Put back any preset that was deleted, keeping user order.
    pub fn restore_presets(&mut self) -> usize {
        let missing: Vec<Rule> = default_rules()
            .into_iter()
            .filter(|preset| self.find(&preset.id).is_none())
            .collect();
        let count = missing.len();
        self.rules.extend(missing);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::LEGACY_RULE_ID;

    fn ids(settings: &Settings) -> Vec<&str> {
        settings.rules.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(load_settings("").unwrap(), Settings::default());
        assert_eq!(load_settings("  \n").unwrap(), Settings::default());
        assert_eq!(load_settings("null").unwrap(), Settings::default());
        assert_eq!(load_settings("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_current_schema() {
        let json = r##"{
            "version": 2,
            "rules": [{
                "id": "r1",
                "name": "Tickets",
                "enabled": false,
                "domainPattern": "tickets.example.com",
                "pathPattern": "\\/t\\/(\\d+)",
                "outputTemplate": "#${1}",
                "description": "",
                "isPreset": false
            }]
        }"##;
        let settings = load_settings(json).unwrap();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.rules.len(), 1);
        let rule = &settings.rules[0];
        assert_eq!(rule.id, "r1");
        assert!(!rule.enabled);
        assert_eq!(rule.domain_pattern, "tickets.example.com");
        assert_eq!(rule.path_pattern, r"\/t\/(\d+)");
        assert_eq!(rule.output_template, "#${1}");
    }

    #[test]
    fn test_missing_rule_fields_default() {
        let settings = load_settings(r#"{"rules": [{"id": "x"}]}"#).unwrap();
        let rule = &settings.rules[0];
        assert!(rule.enabled);
        assert!(rule.domain_pattern.is_empty());
        assert!(!rule.is_preset);
        assert_eq!(settings.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_empty_rule_list_is_kept() {
        let settings = load_settings(r#"{"version": 2, "rules": []}"#).unwrap();
        assert!(settings.rules.is_empty());
    }

    #[test]
    fn test_future_version_rejected() {
        let err = load_settings(r#"{"version": 3, "rules": []}"#).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedVersion(3)));
    }

    #[test]
    fn test_legacy_domain_migrates() {
        let settings = load_settings(r#"{"domain": "https://jira.example.com/"}"#).unwrap();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(ids(&settings), vec![LEGACY_RULE_ID]);
        assert_eq!(settings.rules[0].domain_pattern, "jira.example.com");

        let alias = load_settings(r#"{"jiraDomain": "acme.atlassian.net"}"#).unwrap();
        assert_eq!(alias.rules[0].domain_pattern, "acme.atlassian.net");
    }

    #[test]
    fn test_legacy_empty_domain_gives_defaults() {
        assert_eq!(load_settings(r#"{"domain": "  "}"#).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(load_settings("{not json"), Err(SettingsError::Json(_))));
        assert!(matches!(load_settings("[]"), Err(SettingsError::InvalidDocument(_))));
        assert!(matches!(load_settings(r#"{"other": 1}"#), Err(SettingsError::InvalidDocument(_))));
        assert!(matches!(load_settings(r#"{"rules": 5}"#), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_save_then_load() {
        let mut settings = Settings::default();
        settings.version = 1;
        settings.set_enabled("preset-github-pr", false);
        let json = save_settings(&settings).unwrap();
        assert!(json.contains("\"domainPattern\""));
        assert!(json.contains("\"version\": 2"));

        let loaded = load_settings(&json).unwrap();
        assert_eq!(loaded.rules, settings.rules);
        assert!(!loaded.find("preset-github-pr").unwrap().enabled);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut settings = Settings::default();
        let before = ids(&settings).iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(settings.move_up(1));
        assert_eq!(settings.rules[0].id, before[1]);
        assert_eq!(settings.rules[1].id, before[0]);

        assert!(settings.move_down(0));
        assert_eq!(ids(&settings), before.iter().map(String::as_str).collect::<Vec<_>>());

        let last = settings.rules.len() - 1;
        assert!(!settings.move_up(0));
        assert!(!settings.move_down(last));
        assert!(!settings.move_up(last + 1));
        assert!(!settings.move_down(last + 1));
    }

    #[test]
    fn test_add_remove_toggle() {
        let mut settings = Settings {
            version: SETTINGS_VERSION,
            rules: Vec::new(),
        };
        settings.add_rule(Rule::new("a", "a.com", r"\/(\d+)", "${1}"));
        settings.add_rule(Rule::new("b", "b.com", r"\/(\d+)", "${1}"));
        assert_eq!(ids(&settings), vec!["a", "b"]);

        assert!(settings.set_enabled("b", false));
        assert!(!settings.find("b").unwrap().enabled);
        assert!(!settings.set_enabled("missing", false));

        assert_eq!(settings.remove_rule("a").map(|r| r.id), Some("a".to_string()));
        assert!(settings.remove_rule("a").is_none());
        assert_eq!(ids(&settings), vec!["b"]);
    }

    #[test]
    fn test_restore_presets() {
        let mut settings = Settings::default();
        let total = settings.rules.len();
        settings.remove_rule("preset-jira");
        settings.remove_rule("preset-github-pr");
        settings.add_rule(Rule::new("mine", "x.com", r"\/(.+)", "${1}"));

        assert_eq!(settings.restore_presets(), 2);
        assert_eq!(settings.rules.len(), total + 1);
        assert_eq!(settings.restore_presets(), 0);
    }
}
