//! Template Renderer
//!
//! Recognised placeholders are `${url}`, `${domain}` and `${1}`..`${9}`.
//! Only single-digit capture indices exist: `${10}` is left as literal text.
//! A template that contains a placeholder spelling as plain text cannot
//! escape it; it is substituted like any other.

use std::sync::OnceLock;

use regex::{Captures, Regex};

bitflags::bitflags! {
    /// Set of placeholders referenced by a template.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Placeholders: u16 {
        const URL = 1 << 0;
        const DOMAIN = 1 << 1;
        const CAPTURE_1 = 1 << 2;
        const CAPTURE_2 = 1 << 3;
        const CAPTURE_3 = 1 << 4;
        const CAPTURE_4 = 1 << 5;
        const CAPTURE_5 = 1 << 6;
        const CAPTURE_6 = 1 << 7;
        const CAPTURE_7 = 1 << 8;
        const CAPTURE_8 = 1 << 9;
        const CAPTURE_9 = 1 << 10;

        /// Any capture reference
        const CAPTURES = 0b111_1111_1100;
        /// Values that differ from one URL to the next
        const DYNAMIC = Self::URL.bits() | Self::CAPTURES.bits();
    }
}

impl Placeholders {
    /// Flag for capture `index` (1..=9).
    #[inline]
    pub fn capture(index: usize) -> Option<Self> {
        if (1..=9).contains(&index) {
            Self::from_bits(Self::CAPTURE_1.bits() << (index - 1))
        } else {
            None
        }
    }

    /// Highest capture index referenced, 0 when none.
    pub fn max_capture(self) -> usize {
        (1..=9)
            .rev()
            .find(|&i| Self::capture(i).is_some_and(|flag| self.contains(flag)))
            .unwrap_or(0)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{(url|domain|[1-9])\}").expect("placeholder regex is valid")
    })
}

/// Scan `template` for the placeholders it references.
pub fn placeholders(template: &str) -> Placeholders {
    placeholder_regex()
        .captures_iter(template)
        .fold(Placeholders::empty(), |set, caps| match &caps[1] {
            "url" => set | Placeholders::URL,
            "domain" => set | Placeholders::DOMAIN,
            digit => set | digit_flag(digit),
        })
}

fn digit_flag(digit: &str) -> Placeholders {
    digit
        .parse::<usize>()
        .ok()
        .and_then(Placeholders::capture)
        .unwrap_or_default()
}

/// Substitute placeholders in a single left-to-right pass.
///
/// `captures[0]` fills `${1}`. Indices past the end render as empty text.
/// Substituted values are not rescanned.
pub fn render(template: &str, url: &str, domain: &str, captures: &[String]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "url" => url.to_string(),
            "domain" => domain.to_string(),
            digit => digit
                .parse::<usize>()
                .ok()
                .and_then(|n| captures.get(n - 1))
                .cloned()
                .unwrap_or_default(),
        })
        .into_owned()
}
