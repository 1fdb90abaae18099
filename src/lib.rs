//! rehighlight - incremental syntax re-highlighting library
//!
//! Module layout:
//! - kernel::highlight: diff, style mapping, pipeline, viewport filter
//! - kernel::language: language catalogue
//! - kernel::services: parser/settings ports and their adapters

pub mod kernel;
