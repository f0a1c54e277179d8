//! HTML → Markdown conversion for notebook cells.
//!
//! - `escape`: escaping and code fence sizing
//! - `render`: arena DOM → Markdown
//!
//! Notebook synthesis talks to conversion through the [`MarkupConverter`]
//! trait so another converter can be substituted. The built-in
//! [`MarkdownConverter`] re-parses the fragment with html5ever and renders
//! the resulting body.
//!
//! ```
//! use chapnb::markdown::{MarkdownConverter, MarkupConverter};
//!
//! let md = MarkdownConverter.convert("<p>Hello <b>world</b></p>").unwrap();
//! assert_eq!(md, "Hello **world**");
//! ```

mod escape;
mod render;

pub use escape::{calculate_fence_length, calculate_inline_code_ticks, escape_markdown};
pub use render::{ConvertError, render_children};

use crate::dom::parse_html;

/// Converts an HTML fragment to Markdown text.
pub trait MarkupConverter {
    fn convert(&self, markup: &str) -> Result<String, ConvertError>;
}

/// Default converter backed by [`render_children`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkupConverter for MarkdownConverter {
    fn convert(&self, markup: &str) -> Result<String, ConvertError> {
        let dom = parse_html(markup);
        let body = dom.find_by_tag("body").ok_or(ConvertError::MissingBody)?;
        render_children(&dom, body)
    }
}

impl<F> MarkupConverter for F
where
    F: Fn(&str) -> Result<String, ConvertError>,
{
    fn convert(&self, markup: &str) -> Result<String, ConvertError> {
        self(markup)
    }
}
