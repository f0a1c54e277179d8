//! IPython notebook (nbformat 3) document model.
//!
//! Field order follows the order IPython itself writes, so serialized
//! notebooks diff cleanly against ones saved by the notebook server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notebook format major version written by this crate.
pub const NBFORMAT: u32 = 3;
/// Notebook format minor version written by this crate.
pub const NBFORMAT_MINOR: u32 = 0;

/// One unit of notebook content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Heading {
        level: u32,
        #[serde(default)]
        metadata: Map<String, Value>,
        source: String,
    },
    Code {
        collapsed: bool,
        input: String,
        language: String,
        #[serde(default)]
        metadata: Map<String, Value>,
        outputs: Vec<Value>,
    },
    Markdown {
        #[serde(default)]
        metadata: Map<String, Value>,
        source: String,
    },
}

impl Cell {
    pub fn heading(level: u32, source: impl Into<String>) -> Self {
        Cell::Heading {
            level,
            metadata: Map::new(),
            source: source.into(),
        }
    }

    /// A code cell with no outputs, expanded.
    pub fn code(input: impl Into<String>, language: impl Into<String>) -> Self {
        Cell::Code {
            collapsed: false,
            input: input.into(),
            language: language.into(),
            metadata: Map::new(),
            outputs: Vec::new(),
        }
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Cell::Markdown {
            metadata: Map::new(),
            source: source.into(),
        }
    }

    /// The `cell_type` tag this cell serializes with.
    pub fn cell_type(&self) -> &'static str {
        match self {
            Cell::Heading { .. } => "heading",
            Cell::Code { .. } => "code",
            Cell::Markdown { .. } => "markdown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A complete notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
    pub worksheets: Vec<Worksheet>,
}

impl Notebook {
    /// Wrap cells in a single-worksheet notebook named `title`.
    pub fn new(title: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            metadata: NotebookMetadata { name: title.into() },
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
            worksheets: vec![Worksheet {
                cells,
                metadata: Map::new(),
            }],
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.name
    }

    /// Cells of all worksheets, in order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.worksheets.iter().flat_map(|w| w.cells.iter())
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
