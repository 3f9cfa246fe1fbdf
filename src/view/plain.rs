//! Terminal projection of card markup.
//!
//! Cards use a small fixed grammar (the tags emitted by [`crate::view::card`])
//! so this is a renderer for our own output, not a general HTML parser.
//! Entity decoding goes through [`markup::unescape`], which keeps the
//! projection byte-faithful to the server text.

use crate::ui::style;
use crate::view::markup::unescape;

pub fn render(markup: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut rest = markup;
    while let Some(lt) = rest.find('<') {
        push_text(&mut lines, &rest[..lt]);
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            rest = "";
            break;
        };
        let tag = after[..gt].trim();
        rest = &after[gt + 1..];
        if tag.starts_with('/') {
            continue;
        }
        let name = tag
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_end_matches('/');
        match name {
            "h3" | "h4" => {
                let (inner, next) = take_until(rest, &format!("</{name}>"));
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(style::header(unescape(inner.trim())));
                rest = next;
            }
            "p" => {
                let (inner, next) = take_until(rest, "</p>");
                lines.push(paragraph(inner));
                rest = next;
            }
            "li" => {
                let (inner, next) = take_until(rest, "</li>");
                lines.push(format!("  {} {}", style::accent("•"), unescape(inner.trim())));
                rest = next;
            }
            "label" => {
                let (inner, next) = take_until(rest, "</label>");
                lines.push(style::dim(unescape(inner.trim())));
                rest = next;
            }
            "input" => {
                if let Some(value) = attr_value(tag, "value") {
                    lines.push(format!("  {}", unescape(value)));
                }
            }
            "textarea" | "pre" => {
                let (inner, next) = take_until(rest, &format!("</{name}>"));
                for line in unescape(inner).lines() {
                    lines.push(format!("  {line}"));
                }
                rest = next;
            }
            // div, ul and friends are structural
            _ => {}
        }
    }
    push_text(&mut lines, rest);
    lines.join("\n")
}

/// `<p><strong>Label:</strong> text</p>` renders as a bold label; plain
/// paragraphs pass straight through.
fn paragraph(inner: &str) -> String {
    let inner = inner.trim();
    if let Some(after_open) = inner.strip_prefix("<strong>") {
        if let Some((label, remainder)) = after_open.split_once("</strong>") {
            return format!(
                "{} {}",
                style::header(unescape(label)),
                unescape(remainder.trim())
            );
        }
    }
    unescape(inner)
}

fn take_until<'a>(rest: &'a str, close: &str) -> (&'a str, &'a str) {
    match rest.find(close) {
        Some(idx) => (&rest[..idx], &rest[idx + close.len()..]),
        None => (rest, ""),
    }
}

fn attr_value<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let needle = format!("{attr}=\"");
    let start = tag.find(&needle)? + needle.len();
    let value = &tag[start..];
    let end = value.find('"')?;
    Some(&value[..end])
}

fn push_text(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(unescape(text));
    }
}
