//! Shortlink Settings
//!
//! This crate owns the persisted side of Shortlink: the settings document,
//! built-in presets, migration of the old single-domain format, rule list
//! editing and a whole-list audit.

pub mod audit;
pub mod presets;
pub mod settings;

pub use audit::{audit_rules, AuditReport, RuleFindings, RuleIssue};
pub use presets::default_rules;
pub use settings::{load_settings, save_settings, Settings, SettingsError, SETTINGS_VERSION};
