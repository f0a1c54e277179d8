//! Maps chapter element names to cell roles.

/// Kind of content a tag contributes to the notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Heading,
    Code,
    /// Converted from markup to Markdown text.
    Markdown,
    /// Embedded verbatim as HTML inside a Markdown cell.
    Passthrough,
}

/// Role of an element during the section walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRole {
    Content(ContentKind),
    /// Recursed into one level deeper; emits nothing itself.
    Container,
    Ignore,
}

/// Classify an element by its local name.
pub fn classify(tag: &str) -> TagRole {
    match tag {
        "section" => TagRole::Container,

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => TagRole::Content(ContentKind::Heading),

        "pre" | "code" => TagRole::Content(ContentKind::Code),

        "p" => TagRole::Content(ContentKind::Markdown),

        // Markdown renderers mangle these (tables, MathML, media) or
        // flatten them (lists, quotes); raw HTML renders as-is.
        "iframe" | "video" | "div" | "math" | "table" | "figure" | "ul" | "ol" | "blockquote" => {
            TagRole::Content(ContentKind::Passthrough)
        }

        _ => TagRole::Ignore,
    }
}
