//! Writing notebooks to disk.
//!
//! - `filename`: title → file name slug
//! - `batch`: discovering and converting every chapter in a directory
//!
//! Output files are written atomically: the notebook is serialized in full,
//! written to a temporary file next to the destination and renamed over it,
//! so an interrupted run never leaves a truncated notebook behind.

mod batch;
mod filename;

pub use batch::{BatchReport, Converted, Failed, convert_dir, discover_inputs};
pub use filename::{sanitize_filename, sanitize_filename_with_limit, transliterate};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::ConvertConfig;
use crate::convert::convert_dom;
use crate::dom::parse_html_bytes;
use crate::error::{Error, Result};
use crate::markdown::MarkdownConverter;
use crate::notebook::Notebook;

/// Output path for a chapter: `{stem}_{slug}.{ext}` next to the input, or
/// `{stem}.{ext}` when the title has no usable characters.
pub fn output_path(input: &Path, title: &str, config: &ConvertConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = sanitize_filename_with_limit(title, config.max_slug_chars);

    let name = if slug.is_empty() {
        format!("{stem}.{}", config.output_extension)
    } else {
        format!("{stem}_{slug}.{}", config.output_extension)
    };
    input.with_file_name(name)
}

/// Read and convert one chapter file without writing anything.
///
/// Returns the notebook and the path it should be written to.
pub fn convert_file(input: &Path, config: &ConvertConfig) -> Result<(Notebook, PathBuf)> {
    let bytes = fs::read(input).map_err(|e| Error::file(input, e))?;
    let notebook = convert_dom(parse_html_bytes(&bytes), config, &MarkdownConverter)?;
    let output = output_path(input, notebook.title(), config);
    Ok((notebook, output))
}

/// Serialize a notebook as pretty JSON and write it atomically.
pub fn write_notebook(notebook: &Notebook, path: &Path) -> Result<()> {
    let mut json = notebook.to_json_pretty()?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Write `contents` to a temporary file in the destination directory, then
/// rename it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::file(dir, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::file(tmp.path(), e))?;
    debug!(tmp = %tmp.path().display(), dest = %path.display(), "persisting");
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::Cell;

    #[test]
    fn test_output_path_with_title() {
        let config = ConvertConfig::default();
        assert_eq!(
            output_path(Path::new("book/ch01.html"), "Chapter One", &config),
            PathBuf::from("book/ch01_chapter_one.ipynb")
        );
    }

    #[test]
    fn test_output_path_without_title() {
        let config = ConvertConfig::default();
        assert_eq!(
            output_path(Path::new("ch02.html"), "", &config),
            PathBuf::from("ch02.ipynb")
        );
        assert_eq!(
            output_path(Path::new("ch02.html"), "?!", &config),
            PathBuf::from("ch02.ipynb")
        );
    }

    #[test]
    fn test_output_path_only_strips_last_extension() {
        let config = ConvertConfig::default().with_output_extension("json");
        assert_eq!(
            output_path(Path::new("ch03.v2.html"), "Arrays", &config),
            PathBuf::from("ch03.v2_arrays.json")
        );
    }

    #[test]
    fn test_write_notebook_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ch01_intro.ipynb");
        let nb = Notebook::new("Intro", vec![Cell::heading(1, "Intro")]);

        write_notebook(&nb, &path).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(Notebook::from_json(&written).unwrap(), nb);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ipynb");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.ipynb");
        assert!(matches!(
            write_atomic(&path, b"x"),
            Err(Error::File { .. })
        ));
    }
}
