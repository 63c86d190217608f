//! Generator configuration loaded from a JSON file.
//!
//! This module defines the [`Configuration`] struct that feeds template
//! rendering. Parsing is forward-compatible: keys the struct does not name
//! are kept as extra template variables instead of being rejected, and
//! missing keys fall back to zero values.

mod model;
mod operations;


pub use model::Configuration;
