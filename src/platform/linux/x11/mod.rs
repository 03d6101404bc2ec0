//! X11 implementation using XRandR.

mod display;

pub use display::{apply_layout, displays, primary_display};
