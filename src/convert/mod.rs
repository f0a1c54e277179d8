//! Chapter HTML → notebook conversion.
//!
//! The pipeline for one chapter:
//!
//! 1. [`rewrite_figure_images`] prefixes figure image paths (the only pass
//!    that mutates the DOM)
//! 2. [`find_title`] picks the notebook name
//! 3. [`walk`] flattens the first `<section>` into [`Record`]s, using
//!    [`classify`] to decide what each child contributes
//! 4. [`synthesize`] turns each record into a [`Cell`]
//!
//! # Example
//!
//! ```
//! use chapnb::{Cell, ConvertConfig, convert_html};
//!
//! let html = r#"<section><h1>Chapter One</h1>
//!     <section><p>Hello <b>world</b></p>
//!     <pre data-code-language="go">fmt.Println(1)</pre></section></section>"#;
//!
//! let notebook = convert_html(html, &ConvertConfig::default()).unwrap();
//! assert_eq!(notebook.title(), "Chapter One");
//!
//! let cells: Vec<_> = notebook.cells().cloned().collect();
//! assert_eq!(cells, vec![
//!     Cell::heading(1, "Chapter One"),
//!     Cell::markdown("Hello **world**"),
//!     Cell::code("fmt.Println(1)", "go"),
//! ]);
//! ```

mod images;
mod role_map;
mod synth;
mod walker;

pub use images::{prefixed_path, rewrite_figure_images};
pub use role_map::{ContentKind, TagRole, classify};
pub use synth::{CODE_LANGUAGE_ATTR, synthesize};
pub use walker::{Record, walk};

use tracing::debug;

use crate::config::{ConvertConfig, TitleSource};
use crate::dom::{Dom, NodeId, parse_html};
use crate::error::{Error, Result};
use crate::markdown::{MarkdownConverter, MarkupConverter};
use crate::notebook::{Cell, Notebook};
use crate::util::normalize_whitespace;

/// Convert chapter HTML with the built-in Markdown converter.
pub fn convert_html(html: &str, config: &ConvertConfig) -> Result<Notebook> {
    convert_dom(parse_html(html), config, &MarkdownConverter)
}

/// Convert a parsed chapter.
///
/// Fails with [`Error::Parse`] when the document has no `<section>`.
pub fn convert_dom<C>(mut dom: Dom, config: &ConvertConfig, converter: &C) -> Result<Notebook>
where
    C: MarkupConverter + ?Sized,
{
    let rewritten = rewrite_figure_images(&mut dom, &config.image_prefix);

    let section = first_section(&dom)
        .ok_or_else(|| Error::Parse("no <section> element".to_string()))?;
    let title = find_title(&dom, config.title_source).unwrap_or_default();

    let records = walk(&dom, section, 1);
    let cells: Vec<Cell> = records
        .iter()
        .map(|record| synthesize(record, converter, config))
        .collect();

    debug!(
        title = %title,
        cells = cells.len(),
        images = rewritten,
        "converted chapter"
    );

    Ok(Notebook::new(title, cells))
}

/// The first `<section>` in document order, which is never nested in
/// another section.
pub fn first_section(dom: &Dom) -> Option<NodeId> {
    dom.find_by_tag("section")
}

/// Text of the chapter's first `<h1>`, whitespace collapsed.
///
/// Returns `None` when there is no such heading; a missing title is not an
/// error.
pub fn find_title(dom: &Dom, source: TitleSource) -> Option<String> {
    let h1 = match source {
        TitleSource::FirstSection => dom.find_descendant(first_section(dom)?, "h1")?,
        TitleSource::Document => dom.find_by_tag("h1")?,
    };
    Some(normalize_whitespace(&dom.text_content(h1)))
}
