//! Shortlink Core Library
//!
//! This crate turns a pasted URL into a short markdown link by matching it
//! against an ordered list of user rules. Each rule pairs a wildcard domain
//! pattern and a path regex with an output template.
//!
//! # Architecture
//!
//! The engine is pure: it receives a rule snapshot and a candidate string
//! and returns the rendered text or `None`. It holds no state between calls
//! and performs no I/O. Loading and saving rules is the host's job (see the
//! `sl-settings` crate).
//!
//! # Modules
//!
//! - `url`: scheme and candidate checks on string slices
//! - `domain`: wildcard domain patterns
//! - `matcher`: rule matching and first-match-wins evaluation
//! - `decode`: capture decoding
//! - `template`: placeholder substitution
//! - `validate`: checks run while a rule is being edited
//! - `types`: shared type definitions

pub mod decode;
pub mod domain;
pub mod matcher;
pub mod template;
pub mod types;
pub mod url;
pub mod validate;

// Re-export commonly used types
pub use decode::decode_value;
pub use domain::{domain_matches, DomainMatcher};
pub use matcher::{evaluate, match_rule, shorten_with_rule, CompiledRule, RuleError, RuleSet};
pub use template::{placeholders, render, Placeholders};
pub use types::{Rule, RuleMatch};
pub use validate::{validate_pattern, validate_template, ValidationError};
