/*!
 * # citeclean - HTML citation marker cleaner
 *
 * A Rust library for stripping the citation markers that AI chat exports
 * leave in HTML documents (`[cite: 124]`, `[cite: 1, 2-4]`, `[cite_start]`).
 *
 * ## Features
 *
 * - Count numbered citations and start markers
 * - Remove markers, dropping `<p>`/`<div>`/`<span>` elements that only held one
 * - Highlight markers for before/after previews:
 *   - in HTML-escaped source text
 *   - in a rendered content tree
 * - Clean single files, whole folders or pasted text
 * - Upload service compatible with the original web front end
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `citation`: The marker engine:
 *   - `citation::patterns`: Marker regexes
 *   - `citation::engine`: Counting and cleaning
 *   - `citation::annotate`: Escaped-source highlighting
 *   - `citation::content_tree`: Content tree highlighting
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `html_formatter`: Display re-indenter for previews
 * - `clipboard`: System clipboard capability
 * - `server`: HTTP upload service
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod citation;
pub mod clipboard;
pub mod errors;
pub mod file_utils;
pub mod html_formatter;
pub mod server;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use citation::{CitationStats, CleaningResult, HighlightStyle, annotate_escaped, clean, clean_document, count};
pub use errors::{AppError, ClipboardError};
