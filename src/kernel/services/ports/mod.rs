//! Service ports: traits + data contracts.

pub mod parser;
pub mod settings;

pub use parser::{Highlight, HighlightParser, ParserError, Result as ParserResult};
pub use settings::{HighlightSettings, Settings, SyntaxThemeSettings};
