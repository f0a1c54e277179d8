//! Turns walk records into notebook cells.

use tracing::debug;

use crate::config::{ConvertConfig, HeadingStyle};
use crate::markdown::MarkupConverter;
use crate::notebook::Cell;
use crate::util::normalize_whitespace;

use super::role_map::ContentKind;
use super::walker::Record;

/// Attribute carrying a code block's language.
pub const CODE_LANGUAGE_ATTR: &str = "data-code-language";

/// Build the cell for one record.
///
/// Markdown conversion failures fall back to the record's raw markup, which
/// notebook viewers render as HTML.
pub fn synthesize<C>(record: &Record, converter: &C, config: &ConvertConfig) -> Cell
where
    C: MarkupConverter + ?Sized,
{
    match record.kind {
        ContentKind::Heading => {
            let source = match config.heading_style {
                HeadingStyle::Markdown => convert_or_raw(converter, &record.inner_markup),
                HeadingStyle::PlainText => normalize_whitespace(&record.text),
            };
            Cell::heading(record.level, source)
        }
        ContentKind::Code => {
            let language = record
                .attr(CODE_LANGUAGE_ATTR)
                .unwrap_or(config.default_language.as_str());
            Cell::code(record.text.as_str(), language)
        }
        ContentKind::Markdown => Cell::markdown(convert_or_raw(converter, &record.markup)),
        ContentKind::Passthrough => Cell::markdown(record.markup.as_str()),
    }
}

fn convert_or_raw<C>(converter: &C, markup: &str) -> String
where
    C: MarkupConverter + ?Sized,
{
    match converter.convert(markup) {
        Ok(markdown) => markdown,
        Err(e) => {
            debug!("keeping raw markup: {e}");
            markup.to_string()
        }
    }
}
