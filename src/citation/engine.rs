/*!
 * Counting and removal of citation markers.
 *
 * Cleaning runs four passes in a fixed order:
 * 1. `<p>/<div>/<span>` elements holding only a start marker
 * 2. `<p>/<div>/<span>` elements holding only a numbered citation
 * 3. any remaining numbered citation
 * 4. any remaining start marker
 *
 * Wrapper elements have to go before the bare markers, otherwise pass 3/4
 * would leave empty `<p></p>` shells behind.
 */

use std::ops::AddAssign;

use log::debug;
use serde::Serialize;

use super::patterns::{NUMBERED_REGEX, NUMBERED_WRAPPER_REGEX, START_REGEX, START_WRAPPER_REGEX};

/// Marker counts for one document, taken before any removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CitationStats {
    /// Numbered citations (`[cite: ...]`)
    pub numbered: usize,
    /// Start markers (`[cite_start]`)
    pub start: usize,
    /// Always `numbered + start`
    pub total: usize,
}

impl CitationStats {
    pub fn new(numbered: usize, start: usize) -> Self {
        Self {
            numbered,
            start,
            total: numbered + start,
        }
    }

    /// `(numbered, start, total)`
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.numbered, self.start, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl AddAssign for CitationStats {
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.numbered + other.numbered, self.start + other.start);
    }
}

impl std::fmt::Display for CitationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} citation(s): {} numbered, {} start marker(s)",
            self.total, self.numbered, self.start
        )
    }
}

/// Outcome of cleaning a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningResult {
    /// Document text with all markers removed
    pub cleaned: String,
    /// Counts measured on the original text
    pub stats: CitationStats,
    /// Byte length of the original text
    pub original_len: usize,
}

impl CleaningResult {
    /// Bytes removed by cleaning
    pub fn removed_bytes(&self) -> usize {
        self.original_len.saturating_sub(self.cleaned.len())
    }

    pub fn is_changed(&self) -> bool {
        self.removed_bytes() > 0
    }
}

/// Count numbered citations and start markers in `text`
pub fn count(text: &str) -> CitationStats {
    let numbered = NUMBERED_REGEX.find_iter(text).count();
    let start = START_REGEX.find_iter(text).count();
    CitationStats::new(numbered, start)
}

/// Remove every citation marker from `text`.
///
/// Removing a span can join its neighbours into a fresh match
/// (`[cite[cite: 1]: 2]` becomes `[cite: 2]`), so the passes repeat until
/// nothing more is removed. Each round only shrinks the text, which bounds
/// the loop and makes the result idempotent.
pub fn clean(text: &str) -> String {
    let mut current = apply_passes(text);
    let mut rounds = 1;
    loop {
        let next = apply_passes(&current);
        if next.len() == current.len() {
            break;
        }
        current = next;
        rounds += 1;
    }
    if rounds > 1 {
        debug!("Citation cleaning settled after {} rounds", rounds);
    }
    current
}

/// Count on the original text, then clean it
pub fn clean_document(text: &str) -> CleaningResult {
    CleaningResult {
        stats: count(text),
        cleaned: clean(text),
        original_len: text.len(),
    }
}

fn apply_passes(text: &str) -> String {
    let without_start_wrappers = START_WRAPPER_REGEX.replace_all(text, "");
    let without_numbered_wrappers = NUMBERED_WRAPPER_REGEX.replace_all(&without_start_wrappers, "");
    let without_numbered = NUMBERED_REGEX.replace_all(&without_numbered_wrappers, "");
    START_REGEX.replace_all(&without_numbered, "").into_owned()
}
