//! Conversion settings.
//!
//! Defaults reproduce the behaviour expected by notebook servers that serve
//! chapter images from a `files/` route.

/// Default language for code cells without `data-code-language`.
pub const DEFAULT_LANGUAGE: &str = "python";
/// Path component prepended to figure image sources.
pub const DEFAULT_IMAGE_PREFIX: &str = "files";
/// Upper bound (exclusive) on slug characters, separators not counted.
pub const DEFAULT_MAX_SLUG_CHARS: usize = 50;
pub const DEFAULT_OUTPUT_EXTENSION: &str = "ipynb";

/// How heading cell text is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Render the heading's inner markup as Markdown (keeps inline code,
    /// emphasis and links).
    #[default]
    Markdown,
    /// Use the heading's text content with whitespace collapsed.
    PlainText,
}

/// Where the notebook title comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleSource {
    /// First `<h1>` inside the first `<section>`.
    #[default]
    FirstSection,
    /// First `<h1>` anywhere in the document.
    Document,
}

/// Settings for converting a single chapter.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub default_language: String,
    pub image_prefix: String,
    pub max_slug_chars: usize,
    pub heading_style: HeadingStyle,
    pub title_source: TitleSource,
    pub output_extension: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            max_slug_chars: DEFAULT_MAX_SLUG_CHARS,
            heading_style: HeadingStyle::default(),
            title_source: TitleSource::default(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    pub fn with_max_slug_chars(mut self, max: usize) -> Self {
        self.max_slug_chars = max;
        self
    }

    pub fn with_heading_style(mut self, style: HeadingStyle) -> Self {
        self.heading_style = style;
        self
    }

    pub fn with_title_source(mut self, source: TitleSource) -> Self {
        self.title_source = source;
        self
    }

    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }
}

/// Settings for a directory batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Required file name prefix (`ch` for `ch01.html`).
    pub file_prefix: String,
    /// Accepted input extensions, without the dot.
    pub extensions: Vec<String>,
    /// Convert without writing output files.
    pub dry_run: bool,
    pub convert: ConvertConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            file_prefix: "ch".to_string(),
            extensions: vec!["html".to_string()],
            dry_run: false,
            convert: ConvertConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convert(mut self, convert: ConvertConfig) -> Self {
        self.convert = convert;
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
