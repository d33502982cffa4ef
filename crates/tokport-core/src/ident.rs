//! Code-level identifiers derived from variable and style display names.

use regex::Regex;
use std::sync::OnceLock;

/// Leading segments dropped from color names (`Colors/Primary` -> `Primary`).
pub const COLOR_PREFIXES: &[&str] = &["color", "colors"];
/// Leading segments dropped from text style names.
pub const TYPOGRAPHY_PREFIXES: &[&str] = &["font", "fonts", "typography"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// `primary_dark_hover`
    Snake,
    /// `PrimaryDarkHover`
    Pascal,
    /// `primaryDarkHover`
    Camel,
}

impl Casing {
    fn fallback(self) -> &'static str {
        match self {
            Casing::Pascal => "Unnamed",
            Casing::Snake | Casing::Camel => "unnamed",
        }
    }

    /// Letter put in front of identifiers that would start with a digit.
    fn digit_guard(self) -> char {
        match self {
            Casing::Pascal => 'N',
            Casing::Snake | Casing::Camel => 'n',
        }
    }
}

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").unwrap())
}

/// Split on non-alphanumeric runs, then on lower/digit -> upper boundaries so
/// that an already-cased identifier yields the same words again.
fn words(name: &str) -> Vec<String> {
    let mut out = Vec::new();
    for part in separators().split(name).filter(|p| !p.is_empty()) {
        let mut cur = String::new();
        let mut prev: Option<char> = None;
        for ch in part.chars() {
            if ch.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
            {
                out.push(std::mem::take(&mut cur));
            }
            cur.push(ch);
            prev = Some(ch);
        }
        if !cur.is_empty() {
            out.push(cur);
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive an identifier from a display name.
///
/// Any leading word listed in `strip_prefixes` (case-insensitive) is dropped as
/// long as at least one word remains. Names without any ASCII alphanumeric
/// character map to `Unnamed`/`unnamed`. A result starting with a digit gets
/// an `n`/`N` in front (`2xl` -> `n2xl`), since none of the target languages
/// accept such identifiers.
pub fn safe_identifier(name: &str, casing: Casing, strip_prefixes: &[&str]) -> String {
    let mut parts = words(name);
    while parts.len() > 1
        && strip_prefixes
            .iter()
            .any(|p| parts[0].eq_ignore_ascii_case(p))
    {
        parts.remove(0);
    }
    if parts.is_empty() {
        return casing.fallback().to_string();
    }
    let mut out = match casing {
        Casing::Snake => parts
            .iter()
            .map(|p| p.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        Casing::Pascal => parts.iter().map(|p| capitalize(p)).collect(),
        Casing::Camel => {
            let mut out = parts[0].to_ascii_lowercase();
            for p in &parts[1..] {
                out.push_str(&capitalize(p));
            }
            out
        }
    };
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, casing.digit_guard());
    }
    out
}
