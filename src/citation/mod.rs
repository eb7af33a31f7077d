/*!
 * Citation marker engine.
 *
 * This module detects, counts, removes and highlights the citation markers
 * that chat assistants leave behind in exported HTML:
 * - Numbered citations such as `[cite: 124]`, `[cite: 1, 2-4]`
 * - Start markers `[cite_start]`
 *
 * # Architecture
 *
 * - `patterns`: Compiled marker and wrapper-only regexes
 * - `engine`: Counting and the ordered cleaning passes
 * - `annotate`: Highlighting of markers in escaped source text
 * - `content_tree`: Highlighting of markers in a rendered content tree
 */

pub mod patterns;
pub mod engine;
pub mod annotate;
pub mod content_tree;

// Re-export main types
pub use engine::{CitationStats, CleaningResult, clean, clean_document, count};
pub use annotate::{HighlightStyle, annotate_escaped};
pub use content_tree::{ContentNode, ElementNode, highlight_fragment, highlight_tree};
