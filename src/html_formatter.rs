/*!
 * Best-effort HTML re-indenter for before/after previews.
 *
 * Puts every tag and text run on its own line and indents by nesting depth.
 * It does not parse HTML: unbalanced markup only skews the indentation.
 * Bodies of `<pre>`, `<script>`, `<style>` and `<textarea>` are kept verbatim.
 * Display only; cleaned output is never passed through here.
 */

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content must not be re-flowed
const RAW_TEXT_ELEMENTS: [&str; 4] = ["pre", "script", "style", "textarea"];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Tag(&'a str),
    Text(&'a str),
    Raw(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
enum TagKind {
    Opening,
    Closing,
    Standalone,
}

/// Re-indent `html` with `indent_width` spaces per nesting level
pub fn reindent(html: &str, indent_width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;
    // set while inside a raw-text element: its body and closing tag stay on the opening line
    let mut glue = false;

    for token in tokenize(html) {
        match token {
            Token::Raw(body) => append_or_push(&mut lines, body, glue),
            Token::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    lines.push(indented(text, depth, indent_width));
                }
            }
            Token::Tag(tag) => match tag_kind(tag) {
                TagKind::Closing => {
                    depth = depth.saturating_sub(1);
                    if glue {
                        append_or_push(&mut lines, tag, true);
                        glue = false;
                    } else {
                        lines.push(indented(tag, depth, indent_width));
                    }
                }
                TagKind::Standalone => lines.push(indented(tag, depth, indent_width)),
                TagKind::Opening => {
                    lines.push(indented(tag, depth, indent_width));
                    depth += 1;
                    glue = RAW_TEXT_ELEMENTS.contains(&tag_name(tag).as_str());
                }
            },
        }
    }

    lines.join("\n")
}

fn indented(text: &str, depth: usize, indent_width: usize) -> String {
    format!("{}{}", " ".repeat(depth * indent_width), text)
}

fn append_or_push(lines: &mut Vec<String>, text: &str, glue: bool) {
    match lines.last_mut() {
        Some(last) if glue => last.push_str(text),
        _ => lines.push(text.to_string()),
    }
}

/// Lowercased element name of a tag such as `<DIV class="x">` or `</p>`
fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn tag_kind(tag: &str) -> TagKind {
    if tag.starts_with("</") {
        TagKind::Closing
    } else if tag.starts_with("<!") || tag.starts_with("<?") || tag.ends_with("/>") {
        TagKind::Standalone
    } else if VOID_ELEMENTS.contains(&tag_name(tag).as_str()) {
        TagKind::Standalone
    } else {
        TagKind::Opening
    }
}

/// `<` only opens a tag when followed by a name, `/`, `!` or `?`
fn opens_tag(next: Option<&u8>) -> bool {
    next.is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let bytes = html.as_bytes();
    let lowered = html.to_ascii_lowercase();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' || !opens_tag(bytes.get(pos + 1)) {
            pos += 1;
            continue;
        }

        let rest = &html[pos..];
        let end = if rest.starts_with("<!--") {
            rest.find("-->").map(|i| pos + i + 3)
        } else {
            rest.find('>').map(|i| pos + i + 1)
        };
        let Some(end) = end else {
            // unterminated tag: everything left is text
            break;
        };

        if text_start < pos {
            tokens.push(Token::Text(&html[text_start..pos]));
        }
        let tag = &html[pos..end];
        tokens.push(Token::Tag(tag));
        pos = end;

        if tag_kind(tag) == TagKind::Opening {
            let name = tag_name(tag);
            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let closing = format!("</{}", name);
                let body_end = lowered[pos..]
                    .find(&closing)
                    .map(|i| pos + i)
                    .unwrap_or(html.len());
                if body_end > pos {
                    tokens.push(Token::Raw(&html[pos..body_end]));
                }
                pos = body_end;
            }
        }
        text_start = pos;
    }

    if text_start < html.len() {
        tokens.push(Token::Text(&html[text_start..]));
    }

    tokens
}
