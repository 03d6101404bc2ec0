//! Display queries and layout commits.

use crate::error::Result;

/// A rectangle in virtual screen coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left coordinate.
    pub x: i32,
    /// Top coordinate.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Bounding rectangle of a set of rectangles, `None` when empty.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(acc) => Some(acc.union(r)),
                None => Some(*r),
            })
    }
}

/// Information about a display/monitor as reported by the OS.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    /// Platform-specific identifier (CRTC on X11, CGDirectDisplayID on macOS).
    pub id: u32,
    /// Device name, unique among attached displays.
    pub device_name: String,
    /// Display bounds in virtual screen coordinates.
    pub bounds: Rect,
    /// Scale factor relative to 1.0 (96 DPI on Windows, 1x on macOS).
    pub scale_factor: f64,
    /// Refresh rate in Hz, if available.
    pub refresh_rate: Option<u32>,
    /// Whether this is the primary display.
    pub is_primary: bool,
}

/// A requested position for one display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Platform-specific identifier, as reported in [`DisplayInfo::id`].
    pub id: u32,
    /// Device name, as reported in [`DisplayInfo::device_name`].
    pub device_name: String,
    /// New left coordinate.
    pub x: i32,
    /// New top coordinate.
    pub y: i32,
}

/// List all active displays.
pub fn displays() -> Result<Vec<DisplayInfo>> {
    crate::platform::displays()
}

/// Get the primary display.
pub fn primary_display() -> Result<DisplayInfo> {
    crate::platform::primary_display()
}

/// Move displays to new positions and commit the layout to the OS.
///
/// Displays not listed keep their position.
pub fn apply_layout(placements: &[Placement]) -> Result<()> {
    crate::platform::apply_layout(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_rect() {
        let rects = [
            Rect::new(0, 0, 1920, 1080),
            Rect::new(-1280, 200, 1280, 1024),
        ];
        assert_eq!(
            Rect::bounding(&rects),
            Some(Rect::new(-1280, 0, 3200, 1224))
        );
        assert_eq!(Rect::bounding(&[]), None);
    }
}
