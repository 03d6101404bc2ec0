//! macOS implementation using CoreGraphics display configuration.

mod display;

pub use display::{apply_layout, displays, primary_display};
