/*!
 * Regular expressions for citation markers.
 *
 * Two marker forms are recognised:
 * - numbered: `[cite:` followed by digits, commas, whitespace or hyphens, then `]`
 * - start: the literal `[cite_start]`
 *
 * Wrapper-only patterns match a `<p>`, `<div>` or `<span>` whose trimmed
 * content is exactly one marker. The regex crate has no backreferences, so
 * each tag gets its own alternative to keep open and close tags paired.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Numbered citation marker, e.g. `[cite: 12, 13]` or `[cite: 105-107]`
pub const NUMBERED_PATTERN: &str = r"\[cite:[\d,\s-]+\]";

/// Start marker `[cite_start]`
pub const START_PATTERN: &str = r"\[cite_start\]";

/// Elements that are dropped whole when they only hold a marker
pub const WRAPPER_TAGS: [&str; 3] = ["p", "div", "span"];

/// Build the wrapper-only alternation for `marker`, spelling angle brackets as `lt`/`gt`
fn wrapper_only_pattern(marker: &str, lt: &str, gt: &str) -> String {
    WRAPPER_TAGS
        .iter()
        .map(|tag| format!(r"{lt}{tag}{gt}\s*{marker}\s*{lt}/{tag}{gt}"))
        .collect::<Vec<_>>()
        .join("|")
}

pub static NUMBERED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(NUMBERED_PATTERN).expect("Invalid numbered citation regex")
});

pub static START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(START_PATTERN).expect("Invalid start marker regex")
});

/// Either marker form. The two have disjoint literal prefixes so matches never overlap.
pub static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{NUMBERED_PATTERN}|{START_PATTERN}")).expect("Invalid marker regex")
});

pub static START_WRAPPER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&wrapper_only_pattern(START_PATTERN, "<", ">"))
        .expect("Invalid start wrapper regex")
});

pub static NUMBERED_WRAPPER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&wrapper_only_pattern(NUMBERED_PATTERN, "<", ">"))
        .expect("Invalid numbered wrapper regex")
});

/// Everything the escaped-text highlighter wraps, matched against HTML-escaped source.
/// Wrapper-only alternatives come first so a whole element wins over its inner marker.
pub static ESCAPED_HIGHLIGHT_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        wrapper_only_pattern(START_PATTERN, "&lt;", "&gt;"),
        wrapper_only_pattern(NUMBERED_PATTERN, "&lt;", "&gt;"),
        NUMBERED_PATTERN.to_string(),
        START_PATTERN.to_string(),
    ]
    .join("|");
    Regex::new(&pattern).expect("Invalid escaped highlight regex")
});
