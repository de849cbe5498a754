//! WebAssembly bindings for Shortlink
//!
//! The JavaScript host passes rules as the JSON it already keeps in its
//! settings store. Malformed JSON is the only error raised back to
//! JavaScript; a paste that matches no rule returns `undefined`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use sl_core::{match_rule, validate_pattern as check_pattern, validate_template as check_template, Rule};
use sl_settings::{load_settings as load, save_settings, Settings};
use wasm_bindgen::prelude::*;

// =============================================================================
// Logging
// =============================================================================

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[shortlink] {}", record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route engine log records to the browser console.
///
/// `level` is one of `error`, `warn`, `info`, `debug`, `trace` or `off`.
/// Calling again only changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);
    // Fails only when a logger is already installed.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}

// =============================================================================
// Evaluation
// =============================================================================

fn parse_rules(rules_json: &str) -> Result<Vec<Rule>, JsValue> {
    serde_json::from_str(rules_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rules JSON: {}", e)))
}

fn parse_rule(rule_json: &str) -> Result<Rule, JsValue> {
    serde_json::from_str(rule_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rule JSON: {}", e)))
}

/// Shorten pasted `text` with the first matching rule in `rules_json`
/// (a JSON array of rules).
#[wasm_bindgen]
pub fn shorten(text: &str, rules_json: &str) -> Result<Option<String>, JsValue> {
    let rules = parse_rules(rules_json)?;
    Ok(sl_core::evaluate(text, &rules))
}

/// Live preview of one rule against a test URL.
///
/// Returns `{ matched: false }` or
/// `{ matched: true, result, domain, captures }` with decoded captures.
#[wasm_bindgen]
pub fn preview(url: &str, rule_json: &str) -> Result<JsValue, JsValue> {
    let rule = parse_rule(rule_json)?;
    let js_result = js_sys::Object::new();

    let Some(m) = match_rule(url, &rule) else {
        let _ = js_sys::Reflect::set(&js_result, &"matched".into(), &JsValue::from(false));
        return Ok(js_result.into());
    };

    let captures = js_sys::Array::new();
    for value in m.decoded_captures() {
        captures.push(&JsValue::from_str(&value));
    }

    let _ = js_sys::Reflect::set(&js_result, &"matched".into(), &JsValue::from(true));
    let _ = js_sys::Reflect::set(
        &js_result,
        &"result".into(),
        &JsValue::from_str(&m.render(&rule.output_template)),
    );
    let _ = js_sys::Reflect::set(&js_result, &"domain".into(), &JsValue::from_str(&m.domain));
    let _ = js_sys::Reflect::set(&js_result, &"captures".into(), &captures);

    Ok(js_result.into())
}

// =============================================================================
// Validators
// =============================================================================

/// Error message for an invalid path pattern, `undefined` when valid.
#[wasm_bindgen]
pub fn validate_pattern(pattern: &str) -> Option<String> {
    check_pattern(pattern).err().map(|e| e.to_string())
}

/// Error message for an invalid output template, `undefined` when valid.
#[wasm_bindgen]
pub fn validate_template(template: &str) -> Option<String> {
    check_template(template).err().map(|e| e.to_string())
}

// =============================================================================
// Settings
// =============================================================================

/// Normalise stored settings JSON into the current schema, applying
/// defaults and legacy migration.
#[wasm_bindgen]
pub fn load_settings(json: &str) -> Result<String, JsValue> {
    let settings = load(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    save_settings(&settings).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Settings a fresh install starts with.
#[wasm_bindgen]
pub fn default_settings() -> Result<String, JsValue> {
    save_settings(&Settings::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
