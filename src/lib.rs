//! # chapnb
//!
//! Converts book chapters written as nested `<section>` HTML into IPython
//! notebooks (nbformat 3).
//!
//! Each chapter's first `<section>` is flattened into a linear list of cells:
//!
//! - headings become heading cells whose level is the section nesting depth
//! - `<pre>`/`<code>` become code cells (language from `data-code-language`,
//!   `python` by default)
//! - paragraphs are converted to Markdown
//! - lists, tables, figures, math and embedded media are kept as raw HTML in
//!   Markdown cells, which notebook viewers render directly
//!
//! Images inside figures are re-rooted under `files/` so the notebook server
//! can serve them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use chapnb::{BatchConfig, convert_dir};
//!
//! // Convert every ch*.html in the current directory
//! let report = convert_dir(Path::new("."), &BatchConfig::default()).unwrap();
//! for done in &report.converted {
//!     println!("{} -> {}", done.input.display(), done.output.display());
//! }
//! ```
//!
//! ## Converting in memory
//!
//! ```
//! use chapnb::{ConvertConfig, convert_html, export::sanitize_filename};
//!
//! let nb = convert_html(
//!     "<section><h1>Getting Started</h1><p>Hi</p></section>",
//!     &ConvertConfig::default(),
//! ).unwrap();
//!
//! assert_eq!(nb.title(), "Getting Started");
//! assert_eq!(sanitize_filename(nb.title()), "getting_started");
//! ```

pub mod config;
pub mod convert;
pub mod dom;
pub mod error;
pub mod export;
pub mod markdown;
pub mod notebook;
pub(crate) mod util;

pub use config::{BatchConfig, ConvertConfig, HeadingStyle, TitleSource};
pub use convert::{convert_dom, convert_html};
pub use error::{Error, Result};
pub use export::{BatchReport, convert_dir, convert_file, write_notebook};
pub use notebook::{Cell, Notebook};
