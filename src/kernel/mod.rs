//! Headless highlighting core.

pub mod highlight;
pub mod language;
pub mod services;

pub use highlight::{HighlightPipeline, StylePalette, StyleSpan, ViewportFilter};
pub use language::LanguageId;
