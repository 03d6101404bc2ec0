//! Box layout helpers for the overlay scene.
//!
//! Items are laid out in a single row: each item is wrapped in its margins,
//! items are separated by a fixed spacing, every item is vertically centered
//! in the row and the row is centered in its container. A row that does not
//! fit is pinned to the container's top-left corner.

use crate::display::Rect;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Space reserved around an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    /// Same margin on every side.
    pub const fn uniform(margin: i32) -> Self {
        Self {
            left: margin,
            top: margin,
            right: margin,
            bottom: margin,
        }
    }

    fn outer(&self, size: Size) -> Size {
        Size::new(
            size.width + self.left + self.right,
            size.height + self.top + self.bottom,
        )
    }
}

/// Center `size` inside `container`, pinned to the container origin on overflow.
pub fn aligned_center(size: Size, container: Rect) -> Rect {
    Rect::new(
        container.x + ((container.width - size.width) / 2).max(0),
        container.y + ((container.height - size.height) / 2).max(0),
        size.width,
        size.height,
    )
}

/// Lay `items` out left to right and center the row in `container`.
///
/// Returns one rectangle per item (margins excluded), in input order.
pub fn row_layout(items: &[(Size, Margins)], spacing: i32, container: Rect) -> Vec<Rect> {
    if items.is_empty() {
        return Vec::new();
    }

    let outer: Vec<Size> = items
        .iter()
        .map(|(size, margins)| margins.outer(*size))
        .collect();
    let row = Size::new(
        outer.iter().map(|s| s.width).sum::<i32>() + spacing * (items.len() as i32 - 1),
        outer.iter().map(|s| s.height).max().unwrap_or(0),
    );
    let block = aligned_center(row, container);

    let mut x = block.x;
    items
        .iter()
        .zip(&outer)
        .map(|((size, margins), outer)| {
            let top = block.y + (row.height - outer.height) / 2;
            let rect = Rect::new(x + margins.left, top + margins.top, size.width, size.height);
            x += outer.width + spacing;
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_aligned_center() {
        let rect = aligned_center(Size::new(200, 100), SCREEN);
        assert_eq!(rect, Rect::new(860, 490, 200, 100));
    }

    #[test]
    fn test_aligned_center_pins_oversized_items() {
        let rect = aligned_center(Size::new(4000, 100), SCREEN);
        assert_eq!((rect.x, rect.y), (0, 490));
    }

    #[test]
    fn test_row_layout_centers_block_and_items() {
        let items = [
            (Size::new(300, 200), Margins::uniform(10)),
            (Size::new(200, 100), Margins::uniform(10)),
        ];
        let rects = row_layout(&items, 20, SCREEN);

        // Row: 320 + 20 + 220 = 560 wide, 220 high.
        assert_eq!(rects[0], Rect::new(690, 440, 300, 200));
        // Second item is vertically centered in the 220 px row.
        assert_eq!(rects[1], Rect::new(1030, 490, 200, 100));
        assert_eq!(rects[1].x - rects[0].right(), 10 + 20 + 10);
    }

    #[test]
    fn test_row_layout_single_item_matches_center() {
        let size = Size::new(240, 120);
        let rects = row_layout(&[(size, Margins::default())], 16, SCREEN);
        assert_eq!(rects, vec![aligned_center(size, SCREEN)]);
    }

    #[test]
    fn test_row_layout_empty() {
        assert!(row_layout(&[], 10, SCREEN).is_empty());
    }
}
