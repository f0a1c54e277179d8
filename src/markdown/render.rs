//! Arena DOM → Markdown rendering.
//!
//! Rendering is pure: it reads a [`Dom`] and returns a string. Block
//! children are rendered to a list of blocks which the caller joins with
//! blank lines; inline runs between blocks become paragraphs.
//!
//! Content with no faithful Markdown form (tables, MathML, SVG, embedded
//! media) makes the render fail with [`ConvertError::Unsupported`] so that
//! callers can keep the original markup instead.

use thiserror::Error;

use crate::dom::{Dom, NodeData, NodeId};

use super::escape::{calculate_fence_length, calculate_inline_code_ticks, escape_markdown};

/// Why a fragment could not be rendered as Markdown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("<{tag}> has no markdown equivalent")]
    Unsupported { tag: String },

    #[error("fragment has no body")]
    MissingBody,
}

type Result<T> = std::result::Result<T, ConvertError>;

/// Elements that cannot be expressed in Markdown.
const UNSUPPORTED: &[&str] = &[
    "table", "math", "svg", "iframe", "video", "audio", "object", "embed", "canvas", "form",
];

/// Elements whose content is never rendered.
const SKIPPED: &[&str] = &["script", "style", "template", "head", "noscript"];

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "section"
            | "article"
            | "aside"
            | "header"
            | "footer"
            | "nav"
            | "main"
            | "address"
            | "details"
            | "summary"
            | "hgroup"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "pre"
            | "blockquote"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "hr"
            | "figure"
            | "figcaption"
            | "body"
    )
}

/// Render the children of `parent` as Markdown blocks joined by blank lines.
pub fn render_children(dom: &Dom, parent: NodeId) -> Result<String> {
    Ok(Renderer { dom }.blocks(parent)?.join("\n\n"))
}

struct Renderer<'a> {
    dom: &'a Dom,
}

impl Renderer<'_> {
    /// Render the children of a block container.
    fn blocks(&self, parent: NodeId) -> Result<Vec<String>> {
        let mut blocks = Vec::new();
        let mut run = String::new();

        for child in self.dom.children(parent) {
            match self.dom.element_name(child) {
                Some(name) if is_block(name.as_ref()) => {
                    flush_run(&mut run, &mut blocks);
                    blocks.extend(self.block(child)?);
                }
                _ => run.push_str(&self.inline(child)?),
            }
        }
        flush_run(&mut run, &mut blocks);

        Ok(blocks)
    }

    /// Render one block-level element.
    fn block(&self, id: NodeId) -> Result<Vec<String>> {
        let Some(name) = self.dom.element_name(id) else {
            return Ok(Vec::new());
        };

        match name.as_ref() {
            tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                let text = self.inline_children(id)?;
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                Ok(vec![format!("{} {}", "#".repeat(level), text)])
            }
            "pre" => Ok(vec![self.code_block(id)]),
            "hr" => Ok(vec!["---".to_string()]),
            "blockquote" => {
                let inner = self.blocks(id)?.join("\n\n");
                if inner.is_empty() {
                    return Ok(Vec::new());
                }
                let quoted = inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(vec![quoted])
            }
            "ul" | "ol" => self.list(id).map(|list| {
                if list.is_empty() {
                    Vec::new()
                } else {
                    vec![list]
                }
            }),
            _ => self.blocks(id),
        }
    }

    /// Fenced code block; the language comes from `data-code-language` or a
    /// `language-*` class on the `pre` or its `code` child.
    fn code_block(&self, id: NodeId) -> String {
        let mut code = self.dom.text_content(id);
        if code.ends_with('\n') {
            code.pop();
        }
        let fence = "`".repeat(calculate_fence_length(&code, '`'));
        let language = self.code_language(id).unwrap_or_default();
        format!("{fence}{language}\n{code}\n{fence}")
    }

    fn code_language(&self, id: NodeId) -> Option<String> {
        let candidates = std::iter::once(id).chain(
            self.dom
                .children(id)
                .filter(|&c| self.dom.has_tag(c, "code")),
        );
        for node in candidates {
            if let Some(lang) = self.dom.get_attr(node, "data-code-language") {
                return Some(lang.to_string());
            }
            if let Some(class) = self.dom.get_attr(node, "class")
                && let Some(lang) = class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-"))
            {
                return Some(lang.to_string());
            }
        }
        None
    }

    fn list(&self, id: NodeId) -> Result<String> {
        let ordered = self.dom.has_tag(id, "ol");
        let mut number: usize = self
            .dom
            .get_attr(id, "start")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);

        let mut items = Vec::new();
        let mut loose = false;
        for item in self.dom.children(id) {
            if !self.dom.has_tag(item, "li") {
                continue;
            }
            let blocks = self.blocks(item)?;
            loose |= blocks.len() > 1;

            let marker = if ordered {
                let marker = format!("{number}. ");
                number += 1;
                marker
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());

            let body = blocks.join("\n\n");
            let mut rendered = marker;
            for (i, line) in body.lines().enumerate() {
                if i > 0 {
                    rendered.push('\n');
                    if !line.is_empty() {
                        rendered.push_str(&indent);
                    }
                }
                rendered.push_str(line);
            }
            items.push(rendered.trim_end().to_string());
        }

        let separator = if loose { "\n\n" } else { "\n" };
        Ok(items.join(separator))
    }

    fn inline_children(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        for child in self.dom.children(id) {
            out.push_str(&self.inline(child)?);
        }
        Ok(out)
    }

    /// Render a node in inline context. Whitespace is collapsed but not
    /// trimmed; paragraph edges are trimmed when the run is flushed.
    fn inline(&self, id: NodeId) -> Result<String> {
        let Some(node) = self.dom.get(id) else {
            return Ok(String::new());
        };

        let name = match &node.data {
            NodeData::Text(text) => return Ok(escape_markdown(&collapse_whitespace(text))),
            NodeData::Element { name, .. } => name.local.as_ref(),
            _ => return Ok(String::new()),
        };

        match name {
            "br" => Ok("\\\n".to_string()),
            "em" | "i" | "cite" | "var" | "dfn" => Ok(wrap(&self.inline_children(id)?, "*")),
            "strong" | "b" => Ok(wrap(&self.inline_children(id)?, "**")),
            "del" | "s" | "strike" => Ok(wrap(&self.inline_children(id)?, "~~")),
            "code" | "kbd" | "samp" | "tt" => Ok(code_span(&collapse_whitespace(
                &self.dom.text_content(id),
            ))),
            "a" => {
                let text = self.inline_children(id)?;
                match self.dom.get_attr(id, "href") {
                    Some(href) if !href.is_empty() => {
                        Ok(format!("[{}]({})", text.trim(), link_destination(href)))
                    }
                    _ => Ok(text),
                }
            }
            "img" => {
                let alt = self.dom.get_attr(id, "alt").unwrap_or_default();
                match self.dom.get_attr(id, "src") {
                    Some(src) => Ok(format!(
                        "![{}]({})",
                        escape_markdown(alt),
                        link_destination(src)
                    )),
                    None => Ok(String::new()),
                }
            }
            tag if UNSUPPORTED.contains(&tag) => Err(ConvertError::Unsupported {
                tag: tag.to_string(),
            }),
            tag if SKIPPED.contains(&tag) => Ok(String::new()),
            _ => self.inline_children(id),
        }
    }
}

fn flush_run(run: &mut String, blocks: &mut Vec<String>) {
    let text = run.trim();
    if !text.is_empty() {
        blocks.push(
            text.lines()
                .map(|line| collapse_whitespace(line.trim()))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    run.clear();
}

/// Collapse ASCII whitespace runs to a single space. Non-breaking spaces
/// are content and survive.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Wrap inline content in emphasis delimiters, keeping surrounding spaces
/// outside the delimiters.
fn wrap(content: &str, delimiter: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return content.to_string();
    }
    let leading = if content.starts_with(' ') { " " } else { "" };
    let trailing = if content.ends_with(' ') { " " } else { "" };
    format!("{leading}{delimiter}{trimmed}{delimiter}{trailing}")
}

fn code_span(code: &str) -> String {
    if code.trim().is_empty() {
        return code.to_string();
    }
    let ticks = "`".repeat(calculate_inline_code_ticks(code));
    let pad = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{ticks}{pad}{code}{pad}{ticks}")
}

fn link_destination(url: &str) -> String {
    if url.contains(' ') || url.contains('(') || url.contains(')') {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}
