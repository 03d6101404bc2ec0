//! Linux platform implementation.
//!
//! Display geometry is read and changed through the XRandR extension. There
//! is no portable way to move outputs on Wayland compositors, so without the
//! `x11` feature every call reports [`Error::NotSupported`](crate::Error).
//!
//! ## Feature Flags
//!
//! - `x11` (default): Use Xlib + XRandR

#[cfg(feature = "x11")]
mod x11;

#[cfg(feature = "x11")]
pub use x11::*;

#[cfg(not(feature = "x11"))]
mod stub {
    use crate::display::{DisplayInfo, Placement};
    use crate::error::{Error, Result};

    pub fn displays() -> Result<Vec<DisplayInfo>> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }

    pub fn primary_display() -> Result<DisplayInfo> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }

    pub fn apply_layout(_placements: &[Placement]) -> Result<()> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }
}

#[cfg(not(feature = "x11"))]
pub use stub::*;
