//! Documentation block extraction.
//!
//! Finds the documentation comment region adjacent to a declaration and
//! scans it for top-level XML elements. Scanning is tolerant: malformed
//! markup yields whatever elements can still be recovered, never an error.

use regex::Regex;
use tracing::debug;

use crate::syntax::{Declaration, Trivia, TriviaKind};

lazy_static::lazy_static! {
    /// Start, end, and self-closing tags.
    static ref TAG: Regex =
        Regex::new(r"<(/?)([A-Za-z_][\w:.\-]*)((?:\s+[^<>]*?)?)\s*(/?)>").unwrap();

    /// The `name` attribute of a tag.
    static ref NAME_ATTR: Regex =
        Regex::new(r#"\bname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();

    static ref XML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
}

/// A top-level element of a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocElement {
    /// Tag name, e.g. "summary" or "param".
    pub tag: String,
    /// Value of the `name` attribute, if present.
    pub name: Option<String>,
    /// Raw inner text, trimmed. Empty for self-closing elements.
    pub body: String,
    /// Written as `<tag/>` rather than a start and end tag.
    pub self_closing: bool,
}

/// Parsed documentation attached to one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationBlock {
    /// Top-level elements in document order.
    pub elements: Vec<DocElement>,
    /// Line where the block starts (1-indexed).
    pub line: usize,
}

impl DocumentationBlock {
    /// Parse documentation text with comment markers already removed.
    pub fn parse(text: &str, line: usize) -> Self {
        let cleaned = XML_COMMENT.replace_all(text, "");
        let mut elements = Vec::new();
        scan_elements(&cleaned, &mut elements);
        Self { elements, line }
    }

    /// Whether at least one full (not self-closing) element carries `tag`.
    pub fn has(&self, tag: &str) -> bool {
        self.elements.iter().any(|e| e.tag == tag && !e.self_closing)
    }

    pub fn elements_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DocElement> {
        self.elements.iter().filter(move |e| e.tag == tag)
    }

    /// Whether a full `<param>` element names `parameter`.
    pub fn documents_param(&self, parameter: &str) -> bool {
        self.elements_tagged("param")
            .any(|e| !e.self_closing && e.name.as_deref() == Some(parameter))
    }
}

/// Documentation block immediately preceding `decl`, if any.
pub fn documentation_for(decl: &Declaration<'_>) -> Option<DocumentationBlock> {
    let region = adjacent_region(decl.leading_trivia())?;
    let line = region.first().map(|t| t.line)?;

    let text = region
        .iter()
        .map(|t| strip_markers(&t.text))
        .collect::<Vec<_>>()
        .join("\n");
    let block = DocumentationBlock::parse(&text, line);

    debug!(
        file = decl.file(),
        declaration = decl.name(),
        elements = block.elements.len(),
        "documentation block:\n{}",
        text
    );
    Some(block)
}

/// The contiguous run of documentation comments nearest the declaration.
///
/// Ordinary comments between the run and the declaration are skipped. A blank
/// line ends the search; so does anything that is not a documentation comment
/// once the run has started.
fn adjacent_region(trivia: &[Trivia]) -> Option<&[Trivia]> {
    let mut region: Option<(usize, usize)> = None;

    for (index, item) in trivia.iter().enumerate().rev() {
        match item.kind {
            TriviaKind::DocComment => {
                region = Some(match region {
                    Some((_, end)) => (index, end),
                    None => (index, index + 1),
                });
            }
            TriviaKind::Comment if region.is_none() => continue,
            TriviaKind::Comment | TriviaKind::BlankLine => break,
        }
    }

    region.map(|(start, end)| &trivia[start..end])
}

/// Remove `///` or `/** */` comment markers.
fn strip_markers(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("///") {
        return rest.strip_prefix(' ').unwrap_or(rest).to_string();
    }

    if let Some(inner) = trimmed.strip_prefix("/**") {
        let inner = inner.strip_suffix("*/").unwrap_or(inner);
        return inner
            .lines()
            .map(|line| {
                let line = line.trim_start();
                let line = line.strip_prefix('*').unwrap_or(line);
                line.strip_prefix(' ').unwrap_or(line)
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    trimmed.to_string()
}

fn name_attribute(attributes: &str) -> Option<String> {
    let caps = NAME_ATTR.captures(attributes)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

struct OpenTag<'t> {
    tag: &'t str,
    name: Option<String>,
    body_start: usize,
}

/// Append the top-level elements of `text` to `elements`.
///
/// Nested elements stay in their parent's body. End tags close the nearest
/// matching open tag (dropping unclosed tags in between); stray end tags are
/// ignored. An unclosed top-level element runs to the end of the text, and
/// its content is scanned again so well-formed siblings after it survive.
fn scan_elements(text: &str, elements: &mut Vec<DocElement>) {
    let mut stack: Vec<OpenTag<'_>> = Vec::new();

    for caps in TAG.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let closing = caps.get(1).map_or(false, |m| !m.as_str().is_empty());
        let tag = caps.get(2).map_or("", |m| m.as_str());
        let attributes = caps.get(3).map_or("", |m| m.as_str());
        let self_closing = caps.get(4).map_or(false, |m| !m.as_str().is_empty());

        if closing {
            if let Some(pos) = stack.iter().rposition(|open| open.tag == tag) {
                if pos == 0 {
                    let open = &stack[0];
                    elements.push(DocElement {
                        tag: open.tag.to_string(),
                        name: open.name.clone(),
                        body: text[open.body_start..whole.start()].trim().to_string(),
                        self_closing: false,
                    });
                }
                stack.truncate(pos);
            }
            continue;
        }

        if self_closing {
            if stack.is_empty() {
                elements.push(DocElement {
                    tag: tag.to_string(),
                    name: name_attribute(attributes),
                    body: String::new(),
                    self_closing: true,
                });
            }
            continue;
        }

        stack.push(OpenTag {
            tag,
            name: name_attribute(attributes),
            body_start: whole.end(),
        });
    }

    if let Some(open) = stack.first() {
        let rest = &text[open.body_start..];
        elements.push(DocElement {
            tag: open.tag.to_string(),
            name: open.name.clone(),
            body: rest.trim().to_string(),
            self_closing: false,
        });
        scan_elements(rest, elements);
    }
}
