//! Static approximation of `HTMLElement.innerText`
//!
//! Used by the HTTP renderer, which has no layout engine. Block elements become
//! line breaks (paragraphs get a blank line around them), whitespace inside text
//! is collapsed, `<br>` forces a newline, `<pre>` keeps its text verbatim, and
//! non-rendered elements are skipped.

use scraper::{ElementRef, Node};

/// Elements whose content is never rendered
const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "template", "title", "meta", "link", "iframe",
];

/// Elements laid out as blocks
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "html", "li", "main", "nav", "ol", "pre",
    "section", "summary", "table", "tbody", "tfoot", "thead", "tr", "ul",
];

enum Piece {
    /// Collapsible text
    Text(String),
    /// Preformatted text, emitted as-is
    Pre(String),
    /// Required line break count; adjacent requirements merge to the largest
    Break(usize),
    /// Forced newline from `<br>`
    LineBreak,
}

/// Computes the rendered text of an element
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    collect(element, false, &mut pieces);
    assemble(pieces)
}

fn collect(element: ElementRef<'_>, preformatted: bool, pieces: &mut Vec<Piece>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if preformatted {
                    pieces.push(Piece::Pre(text.to_string()));
                } else {
                    pieces.push(Piece::Text(collapse_whitespace(text)));
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED.contains(&name) || el.attr("hidden").is_some() {
                    continue;
                }
                if name == "br" {
                    pieces.push(Piece::LineBreak);
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };

                let breaks = match name {
                    "p" => 2,
                    _ if BLOCKS.contains(&name) => 1,
                    _ => 0,
                };

                if breaks > 0 {
                    pieces.push(Piece::Break(breaks));
                }
                collect(child_ref, preformatted || name == "pre", pieces);
                if breaks > 0 {
                    pieces.push(Piece::Break(breaks));
                } else if name == "td" || name == "th" {
                    pieces.push(Piece::Text(" ".to_string()));
                }
            }
            _ => {}
        }
    }
}

fn assemble(pieces: Vec<Piece>) -> String {
    let mut out = String::new();
    let mut pending = 0usize;

    for piece in pieces {
        match piece {
            Piece::Break(count) => pending = pending.max(count),
            Piece::LineBreak => {
                flush_breaks(&mut out, &mut pending);
                trim_trailing_spaces(&mut out);
                out.push('\n');
            }
            Piece::Pre(text) => {
                if text.is_empty() {
                    continue;
                }
                flush_breaks(&mut out, &mut pending);
                out.push_str(&text);
            }
            Piece::Text(text) => {
                let line_start = out.is_empty() || out.ends_with('\n') || pending > 0;
                let mut text = text.as_str();
                if line_start || out.ends_with(' ') {
                    text = text.trim_start_matches(' ');
                }
                if text.is_empty() {
                    continue;
                }
                flush_breaks(&mut out, &mut pending);
                out.push_str(text);
            }
        }
    }

    trim_trailing_spaces(&mut out);
    out
}

/// Emits pending required breaks; breaks before any content are dropped
fn flush_breaks(out: &mut String, pending: &mut usize) {
    if *pending > 0 && !out.is_empty() {
        trim_trailing_spaces(out);
        let existing = out.len() - out.trim_end_matches('\n').len();
        for _ in existing..*pending {
            out.push('\n');
        }
    }
    *pending = 0;
}

fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }
    collapsed
}
