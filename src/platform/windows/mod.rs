//! Windows implementation using GDI display APIs.

mod display;

pub use display::{apply_layout, displays, primary_display};
