//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the highlight pipeline is written against.
//! - `adapters`: OS/runtime specific implementations (filesystem, tokio, tree-sitter).

pub mod adapters;
pub mod ports;
