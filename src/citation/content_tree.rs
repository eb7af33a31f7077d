/*!
 * Highlighting of citation markers in a rendered content tree.
 *
 * The tree is a minimal owned stand-in for a DOM: elements with attributes
 * and children, and text leaves. Highlighting walks it depth-first and only
 * rewrites text leaves, splitting each one into text runs and highlight spans.
 * Markers split across two text nodes are not found.
 */

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::annotate::HighlightStyle;
use super::patterns::MARKER_REGEX;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A node of a rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Element(ElementNode),
    Text(String),
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    pub fn element<S: Into<String>>(tag: S, children: Vec<ContentNode>) -> Self {
        Self::Element(ElementNode::new(tag, children))
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize back to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&encode_text(text)),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl ElementNode {
    pub fn new<S: Into<String>>(tag: S, children: Vec<ContentNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children,
        }
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether this element carries `class_name` among its classes
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.to_ascii_lowercase().as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl From<ElementNode> for ContentNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

/// Highlight every marker found in the text leaves under `root`.
///
/// Returns the number of markers highlighted.
pub fn highlight_tree(root: &mut ElementNode, style: &HighlightStyle) -> usize {
    if root.has_class(&style.class_name) {
        return 0;
    }
    highlight_fragment(&mut root.children, style)
}

/// Highlight markers in a list of sibling nodes, splicing highlight spans in place
pub fn highlight_fragment(nodes: &mut Vec<ContentNode>, style: &HighlightStyle) -> usize {
    let mut highlighted = 0;
    let mut rebuilt = Vec::with_capacity(nodes.len());

    for node in nodes.drain(..) {
        match node {
            ContentNode::Text(text) => match split_text(&text, style) {
                Some((pieces, found)) => {
                    highlighted += found;
                    rebuilt.extend(pieces);
                }
                None => rebuilt.push(ContentNode::Text(text)),
            },
            ContentNode::Element(mut element) => {
                highlighted += highlight_tree(&mut element, style);
                rebuilt.push(ContentNode::Element(element));
            }
        }
    }

    *nodes = rebuilt;
    highlighted
}

/// Split a text leaf around its markers, or `None` when it has none
fn split_text(text: &str, style: &HighlightStyle) -> Option<(Vec<ContentNode>, usize)> {
    let mut pieces = Vec::new();
    let mut found = 0;
    let mut last = 0;

    for marker in MARKER_REGEX.find_iter(text) {
        if marker.start() > last {
            pieces.push(ContentNode::text(&text[last..marker.start()]));
        }
        pieces.push(highlight_span(marker.as_str(), style));
        found += 1;
        last = marker.end();
    }

    if found == 0 {
        return None;
    }
    if last < text.len() {
        pieces.push(ContentNode::text(&text[last..]));
    }
    Some((pieces, found))
}

fn highlight_span(marker: &str, style: &HighlightStyle) -> ContentNode {
    ElementNode::new("span", vec![ContentNode::text(marker)])
        .with_attribute("class", style.class_name.as_str())
        .with_attribute("title", style.tooltip(marker))
        .into()
}
