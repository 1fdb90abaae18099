//! Incremental re-highlighting: diff -> parse -> style -> viewport.

mod diff;
mod kind;
mod layout;
mod pipeline;
mod style;
mod viewport;

pub use diff::{diff_range, DiffRange};
pub use kind::HighlightKind;
pub use layout::{LineLayout, MonospaceLayout};
pub use pipeline::HighlightPipeline;
pub use style::{to_style_spans, Rgb, Style, StylePalette, StyleSpan};
pub use viewport::{
    filter_visible, visible_byte_range, SharedLayout, ViewportBounds, ViewportFilter,
};
