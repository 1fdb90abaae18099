//! Contract between the highlight pipeline and an incremental parser.

use crate::kernel::highlight::DiffRange;
use crate::kernel::language::LanguageId;
use ropey::Rope;

pub type Result<T> = std::result::Result<T, ParserError>;

/// One parser output unit: a half-open byte range tagged with a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub kind: u16,
}

impl Highlight {
    /// Sentinel kind meaning "no specific kind"; styled with the default style.
    pub const NO_KIND: u16 = u16::MAX;

    pub fn new(start: usize, end: usize, kind: u16) -> Self {
        Self { start, end, kind }
    }

    pub fn fits(&self, text_len: usize) -> bool {
        self.start <= self.end && self.end <= text_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The grammar could not be loaded.
    Language(String),
    /// A parse was requested before any language was set.
    NoLanguage,
    /// The parser produced no tree for the input.
    TreeCreation,
    /// The diff does not fit the text the parser last saw, or the parser
    /// returned offsets outside the new text.
    InvalidDiffState(String),
    Other(String),
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserError::Language(e) => write!(f, "Language error: {}", e),
            ParserError::NoLanguage => write!(f, "No language selected"),
            ParserError::TreeCreation => write!(f, "Parser produced no syntax tree"),
            ParserError::InvalidDiffState(e) => write!(f, "Invalid diff state: {}", e),
            ParserError::Other(e) => write!(f, "Parser error: {}", e),
        }
    }
}

impl std::error::Error for ParserError {}

/// Incremental parser consumed by the highlight pipeline.
///
/// Calls are serialized by the pipeline and run on a blocking worker thread.
/// `parse_incremental` receives exactly `new[diff.start..diff.new_end]` and
/// must return offsets into the whole new text, never into `changed`.
pub trait HighlightParser: Send + 'static {
    fn set_language(&mut self, language: LanguageId) -> Result<()>;

    fn parse_full(&mut self, text: &Rope) -> Result<Vec<Highlight>>;

    fn parse_incremental(&mut self, changed: &str, diff: DiffRange) -> Result<Vec<Highlight>>;

    /// Node-kind vocabulary of the current language, for diagnostics.
    fn list_kinds(&self) -> Result<Vec<String>>;
}
