/*!
 * Highlighting of citation markers in HTML source shown as text.
 *
 * The input is escaped first so the browser displays it as literal source,
 * then markers are located in the escaped string. Wrapper-only elements are
 * therefore matched by their escaped spelling (`&lt;p&gt;...&lt;/p&gt;`).
 */

use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Captures;

use super::patterns::ESCAPED_HIGHLIGHT_REGEX;

/// Markup used to flag a marker for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    /// CSS class put on every highlight span
    pub class_name: String,
    /// Tooltip text placed before the marker itself
    pub tooltip_prefix: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            class_name: "cite-highlight".to_string(),
            tooltip_prefix: "Citation marker".to_string(),
        }
    }
}

impl HighlightStyle {
    /// Opening tag of a highlight span, attribute-escaped
    pub fn open_tag(&self) -> String {
        format!(r#"<span class="{}">"#, encode_double_quoted_attribute(&self.class_name))
    }

    /// Tooltip for a given marker
    pub fn tooltip(&self, marker: &str) -> String {
        format!("{}: {}", self.tooltip_prefix, marker.trim())
    }
}

/// Escape `text` as HTML and wrap every marker (or wrapper-only element) in a highlight span
pub fn annotate_escaped(text: &str, style: &HighlightStyle) -> String {
    let escaped = encode_text(text);
    let open_tag = style.open_tag();

    ESCAPED_HIGHLIGHT_REGEX
        .replace_all(&escaped, |caps: &Captures| format!("{}{}</span>", open_tag, &caps[0]))
        .into_owned()
}
