//! HTML parsing into an arena DOM.
//!
//! Chapters are parsed with html5ever into a [`Dom`], a flat arena of nodes
//! linked by index. The converter reads it; the image pre-pass is the only
//! code that mutates it.
//!
//! # Example
//!
//! ```
//! use chapnb::dom::{outer_html, parse_html};
//!
//! let dom = parse_html("<section><h1>One</h1></section>");
//! let h1 = dom.find_by_tag("h1").unwrap();
//! assert_eq!(dom.text_content(h1), "One");
//! assert_eq!(outer_html(&dom, h1), "<h1>One</h1>");
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Descendants, Dom, Node, NodeData, NodeId};
pub use serialize::{escape_attr, escape_text, inner_html, outer_html};
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use crate::util::{decode_text, extract_encoding_hint};

/// Parse an HTML document.
///
/// Parsing never fails: malformed markup is repaired the way a browser
/// would repair it.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse raw HTML bytes, detecting the encoding from the BOM, a
/// `<meta charset>` or XML declaration, falling back to Windows-1252.
pub fn parse_html_bytes(bytes: &[u8]) -> Dom {
    let hint = extract_encoding_hint(bytes);
    let html = decode_text(bytes, hint);
    parse_html(&html)
}
