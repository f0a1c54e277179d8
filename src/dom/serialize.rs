//! Markup serialization for arena nodes.
//!
//! Produces HTML5 syntax: void elements have no end tag, raw-text elements
//! (`script`, `style`) are emitted unescaped, attribute values are always
//! double quoted.

use std::fmt::Write;

use super::arena::{Dom, NodeData, NodeId};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text children are not escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

const NEWLINE_STRIPPING_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Serialize a node and its subtree.
pub fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

/// Serialize the children of a node, without the node's own tags.
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let raw = dom
        .element_name(id)
        .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name.as_ref()));
    let mut out = String::new();
    for child in dom.children(id) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, raw_text: bool, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
        NodeData::Doctype { name } => {
            write!(out, "<!DOCTYPE {name}>").unwrap();
        }
        NodeData::Comment(text) => {
            write!(out, "<!--{text}-->").unwrap();
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                write!(
                    out,
                    " {}=\"{}\"",
                    attr.qualified_name(),
                    escape_attr(&attr.value)
                )
                .unwrap();
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            // The parser drops one newline right after these start tags.
            if NEWLINE_STRIPPING_ELEMENTS.contains(&tag)
                && dom
                    .children(id)
                    .next()
                    .and_then(|first| dom.text(first))
                    .is_some_and(|text| text.starts_with('\n'))
            {
                out.push('\n');
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, raw, out);
            }
            write!(out, "</{tag}>").unwrap();
        }
    }
}

/// Escape text content for HTML.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}
