//! End-to-end conversion of chapter fixtures into notebooks.

use std::fs;
use std::path::Path;

use chapnb::notebook::{NBFORMAT, NBFORMAT_MINOR};
use chapnb::{
    Cell, ConvertConfig, Error, HeadingStyle, Notebook, TitleSource, convert_file, convert_html,
};
use serde_json::Value;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("{}/{}", FIXTURES_DIR, name)).expect("Failed to read fixture")
}

fn cells(nb: &Notebook) -> Vec<Cell> {
    nb.cells().cloned().collect()
}

// ============================================================================
// Chapter structure
// ============================================================================

#[test]
fn test_chapter_cells_in_document_order() {
    let nb = convert_html(&fixture("book/ch01.html"), &ConvertConfig::default()).unwrap();

    assert_eq!(nb.title(), "Getting Started");
    assert_eq!(
        cells(&nb),
        vec![
            Cell::heading(1, "Getting Started"),
            Cell::markdown("Python is an *interpreted* language. See [the site](https://python.org)."),
            Cell::heading(2, "Hello, World"),
            Cell::markdown("Print something:"),
            Cell::code("print(\"hello <world>\")", "python"),
            Cell::markdown(
                r#"<figure><img src="files/images/repl.png" alt="The REPL"><figcaption>The REPL</figcaption></figure>"#
            ),
            Cell::heading(3, "Shell sessions"),
            Cell::code("$ python3 hello.py", "console"),
            Cell::markdown("<ul><li>one</li><li>two</li></ul>"),
        ]
    );
}

#[test]
fn test_heading_levels_follow_nesting_not_tag() {
    let html = "<section><h3>Top</h3><section><h1>Middle</h1><section><h1>Deep</h1></section></section></section>";
    let nb = convert_html(html, &ConvertConfig::default()).unwrap();

    let levels: Vec<u32> = nb
        .cells()
        .filter_map(|c| match c {
            Cell::Heading { level, .. } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3]);
}

#[test]
fn test_untitled_chapter() {
    let nb = convert_html(&fixture("book/ch02.html"), &ConvertConfig::default()).unwrap();
    assert_eq!(nb.title(), "");
    assert_eq!(
        cells(&nb),
        vec![Cell::heading(1, "Untitled notes"), Cell::code("x = 1", "python")]
    );
}

#[test]
fn test_chapter_without_section_fails() {
    let err = convert_html(&fixture("book/ch03.html"), &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_custom_language_and_prefix() {
    let config = ConvertConfig::default()
        .with_default_language("ruby")
        .with_image_prefix("static");
    let html = r#"<section><pre>puts 1</pre><figure><img src="a.png"></figure></section>"#;
    let nb = convert_html(html, &config).unwrap();

    assert_eq!(
        cells(&nb),
        vec![
            Cell::code("puts 1", "ruby"),
            Cell::markdown(r#"<figure><img src="static/a.png"></figure>"#),
        ]
    );
}

#[test]
fn test_absolute_image_sources_untouched() {
    let html = r#"<section><figure><img src="https://example.com/a.png"><img src="/abs.png"></figure></section>"#;
    let nb = convert_html(html, &ConvertConfig::default()).unwrap();
    assert_eq!(
        cells(&nb),
        vec![Cell::markdown(
            r#"<figure><img src="https://example.com/a.png"><img src="/abs.png"></figure>"#
        )]
    );
}

#[test]
fn test_plain_text_headings() {
    let config = ConvertConfig::default().with_heading_style(HeadingStyle::PlainText);
    let nb = convert_html("<section><h1>The <em>real</em>  thing</h1></section>", &config).unwrap();
    assert_eq!(cells(&nb), vec![Cell::heading(1, "The real thing")]);

    let nb = convert_html(
        "<section><h1>The <em>real</em> thing</h1></section>",
        &ConvertConfig::default(),
    )
    .unwrap();
    assert_eq!(cells(&nb), vec![Cell::heading(1, "The *real* thing")]);
}

#[test]
fn test_title_from_document() {
    let html = "<header><h1>Book Title</h1></header><section><h1>Chapter</h1></section>";

    let nb = convert_html(html, &ConvertConfig::default()).unwrap();
    assert_eq!(nb.title(), "Chapter");

    let config = ConvertConfig::default().with_title_source(TitleSource::Document);
    let nb = convert_html(html, &config).unwrap();
    assert_eq!(nb.title(), "Book Title");
}

// ============================================================================
// Serialized form
// ============================================================================

#[test]
fn test_notebook_json_shape() {
    let nb = convert_html(&fixture("book/ch01.html"), &ConvertConfig::default()).unwrap();
    let json: Value = serde_json::from_str(&nb.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["nbformat"], NBFORMAT);
    assert_eq!(json["nbformat_minor"], NBFORMAT_MINOR);
    assert_eq!(json["metadata"]["name"], "Getting Started");

    let worksheets = json["worksheets"].as_array().unwrap();
    assert_eq!(worksheets.len(), 1);
    assert!(worksheets[0]["metadata"].as_object().unwrap().is_empty());

    let cells = worksheets[0]["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 9);

    assert_eq!(cells[0]["cell_type"], "heading");
    assert_eq!(cells[0]["level"], 1);
    assert_eq!(cells[0]["source"], "Getting Started");

    let code = &cells[4];
    assert_eq!(code["cell_type"], "code");
    assert_eq!(code["collapsed"], false);
    assert_eq!(code["language"], "python");
    assert_eq!(code["input"], "print(\"hello <world>\")");
    assert!(code["outputs"].as_array().unwrap().is_empty());

    assert_eq!(cells[1]["cell_type"], "markdown");
    assert!(cells[1].get("level").is_none());
}

#[test]
fn test_convert_file_output_path() {
    let input = format!("{}/book/ch01.html", FIXTURES_DIR);
    let (nb, output) = convert_file(Path::new(&input), &ConvertConfig::default()).unwrap();

    assert_eq!(nb.title(), "Getting Started");
    assert_eq!(
        output,
        Path::new(FIXTURES_DIR).join("book/ch01_getting_started.ipynb")
    );
}

#[test]
fn test_convert_file_missing() {
    let err = convert_file(Path::new("does/not/exist.html"), &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, Error::File { .. }));
}
