//! Scene items drawn on an overlay.
//!
//! Coordinates are local to the overlay: (0, 0) is the monitor's top-left
//! pixel. Text is measured with a fixed cell size so layout stays
//! deterministic without a font backend; renderers draw text inside the
//! measured box.

use crate::display::Rect;
use crate::layout::{Margins, Size};
use crate::model::AlignModel;
use crate::view_model::ViewOption;

/// Width of one text cell in pixels.
pub const CHAR_WIDTH: i32 = 9;
/// Height of one text line in pixels.
pub const LINE_HEIGHT: i32 = 20;
/// Padding inside boxes.
pub const BOX_PADDING: i32 = 12;

const BUTTON_SIZE: Size = Size::new(84, 28);
const BUTTON_SPACING: i32 = 8;
const CHECKBOX_HEIGHT: i32 = 24;
const CHECKBOX_INDENT: i32 = 24;

/// A point in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    pub from: Point,
    pub to: Point,
}

impl LineItem {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }
}

/// Both diagonals of a `width` x `height` screen.
pub fn diagonal_lines(width: i32, height: i32) -> Vec<LineItem> {
    let (w, h) = (width as f32, height as f32);
    vec![LineItem::new(0.0, 0.0, w, h), LineItem::new(w, 0.0, 0.0, h)]
}

/// The vertical center line of a `width` x `height` screen.
pub fn vertical_center_line(width: i32, height: i32) -> LineItem {
    let x = width as f32 / 2.0;
    LineItem::new(x, 0.0, x, height as f32)
}

/// Horizontal lines at every `spacing` pixels of normalized virtual y.
///
/// `normalize_y` is added to the monitor's virtual position so line 0 sits on
/// the top edge of the virtual screen. Because the lines follow the model's
/// current position, lines on neighbouring monitors continue into each other
/// once the offsets match the physical arrangement.
pub fn alignment_lines(model: &AlignModel, normalize_y: i32, spacing: i32) -> Vec<LineItem> {
    let spacing = spacing.max(1);
    let monitor = model.monitor();
    let top = model.position().y + normalize_y;
    let width = monitor.screen_width as f32;

    let first = top.div_euclid(spacing) * spacing;
    let first = if first < top { first + spacing } else { first };

    (first..top + monitor.screen_height)
        .step_by(spacing as usize)
        .map(|virtual_y| {
            let y = (virtual_y - top) as f32;
            LineItem::new(0.0, y, width, y)
        })
        .collect()
}

fn text_size(lines: &[String]) -> Size {
    let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    Size::new(
        columns * CHAR_WIDTH + 2 * BOX_PADDING,
        lines.len() as i32 * LINE_HEIGHT + 2 * BOX_PADDING,
    )
}

/// Box listing a monitor's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBox {
    /// Placement in overlay coordinates.
    pub rect: Rect,
    /// Frame margins used when laying the box out.
    pub margins: Margins,
    /// One entry per text line.
    pub lines: Vec<String>,
}

impl InfoBox {
    /// Describe `model`'s monitor; the box is placed at the origin until laid out.
    pub fn new(model: &AlignModel) -> Self {
        let monitor = model.monitor();
        let position = model.position();
        let offset = model.offset();

        let mut lines = vec![
            monitor.device_name.clone(),
            format!("{} x {}", monitor.screen_width, monitor.screen_height),
            format!("Position: {}, {}", position.x, position.y),
            format!("Offset: {:+}, {:+}", offset.x, offset.y),
        ];
        if let Some(hz) = monitor.refresh_rate {
            lines.push(format!("{hz} Hz"));
        }
        if monitor.primary {
            lines.push("Primary".to_string());
        }

        let size = text_size(&lines);
        Self {
            rect: Rect::new(0, 0, size.width, size.height),
            margins: Margins::uniform(8),
            lines,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.rect.width, self.rect.height)
    }
}

/// Something the user can trigger from the control box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Apply,
    Close,
    Reset,
    Toggle(ViewOption),
}

impl ControlAction {
    /// Button caption or checkbox label.
    pub fn label(&self) -> &'static str {
        match self {
            ControlAction::Apply => "Apply",
            ControlAction::Close => "Close",
            ControlAction::Reset => "Reset",
            ControlAction::Toggle(option) => option.label(),
        }
    }
}

/// A clickable region of the control box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub action: ControlAction,
    /// Placement in overlay coordinates.
    pub rect: Rect,
}

/// Apply / Close / Reset buttons plus one checkbox per view option.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBox {
    /// Placement in overlay coordinates.
    pub rect: Rect,
    /// Frame margins used when laying the box out.
    pub margins: Margins,
    controls: Vec<Control>,
}

impl ControlBox {
    pub fn new() -> Self {
        let buttons = [ControlAction::Apply, ControlAction::Close, ControlAction::Reset];
        let toggles = ViewOption::ALL.map(ControlAction::Toggle);

        let button_row = buttons.len() as i32 * BUTTON_SIZE.width
            + (buttons.len() as i32 - 1) * BUTTON_SPACING;
        let label_width = toggles
            .iter()
            .map(|t| t.label().len() as i32 * CHAR_WIDTH + CHECKBOX_INDENT)
            .max()
            .unwrap_or(0);
        let width = button_row.max(label_width) + 2 * BOX_PADDING;
        let height = 2 * BOX_PADDING
            + BUTTON_SIZE.height
            + BUTTON_SPACING
            + toggles.len() as i32 * CHECKBOX_HEIGHT;

        let mut controls = Vec::with_capacity(buttons.len() + toggles.len());
        let mut x = BOX_PADDING;
        for action in buttons {
            controls.push(Control {
                action,
                rect: Rect::new(x, BOX_PADDING, BUTTON_SIZE.width, BUTTON_SIZE.height),
            });
            x += BUTTON_SIZE.width + BUTTON_SPACING;
        }
        let mut y = BOX_PADDING + BUTTON_SIZE.height + BUTTON_SPACING;
        for action in toggles {
            controls.push(Control {
                action,
                rect: Rect::new(BOX_PADDING, y, width - 2 * BOX_PADDING, CHECKBOX_HEIGHT),
            });
            y += CHECKBOX_HEIGHT;
        }

        Self {
            rect: Rect::new(0, 0, width, height),
            margins: Margins::uniform(8),
            controls,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.rect.width, self.rect.height)
    }

    /// Controls in overlay coordinates.
    pub fn controls(&self) -> impl Iterator<Item = Control> + '_ {
        self.controls.iter().map(|control| Control {
            action: control.action,
            rect: Rect::new(
                self.rect.x + control.rect.x,
                self.rect.y + control.rect.y,
                control.rect.width,
                control.rect.height,
            ),
        })
    }
}

impl Default for ControlBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::two_monitor_backend;
    use crate::vscreen::VScreen;

    fn secondary_model() -> AlignModel {
        let vscreen = VScreen::load(two_monitor_backend()).unwrap();
        AlignModel::new(vscreen.monitor("HDMI-1").unwrap())
    }

    #[test]
    fn test_diagonals_span_the_screen() {
        let lines = diagonal_lines(1920, 1080);
        assert_eq!(lines[0], LineItem::new(0.0, 0.0, 1920.0, 1080.0));
        assert_eq!(lines[1], LineItem::new(1920.0, 0.0, 0.0, 1080.0));
    }

    #[test]
    fn test_alignment_lines_follow_position() {
        let mut model = secondary_model();
        let lines = alignment_lines(&model, 0, 100);
        assert_eq!(lines.len(), 11); // y = 0, 100, ..., 1000 on a 1024 px screen
        assert_eq!(lines[1].from.y, 100.0);

        model.nudge(0, 1);
        let lines = alignment_lines(&model, 0, 100);
        // Top edge is now virtual y = 1, so the first line is at local y = 99.
        assert_eq!(lines[0].from.y, 99.0);
        assert_eq!(lines[0].to.x, 1280.0);
    }

    #[test]
    fn test_alignment_lines_with_negative_position() {
        let mut model = secondary_model();
        model.nudge(0, -30);
        let lines = alignment_lines(&model, 30, 100);
        assert_eq!(lines[0].from.y, 0.0);
        model.nudge(0, -5);
        let lines = alignment_lines(&model, 30, 100);
        assert_eq!(lines[0].from.y, 5.0);
    }

    #[test]
    fn test_info_box_lists_metadata() {
        let mut model = secondary_model();
        model.nudge(3, 0);
        let info = InfoBox::new(&model);
        assert_eq!(info.lines[0], "HDMI-1");
        assert_eq!(info.lines[1], "1280 x 1024");
        assert_eq!(info.lines[2], "Position: 1923, 0");
        assert_eq!(info.lines[3], "Offset: +3, +0");
        assert!(info.rect.width > 0 && info.rect.height > 0);
    }

    #[test]
    fn test_controls_follow_placement() {
        let mut controls = ControlBox::new();
        controls.rect.x = 500;
        controls.rect.y = 300;

        let apply = controls
            .controls()
            .find(|c| c.action == ControlAction::Apply)
            .unwrap();
        assert_eq!((apply.rect.x, apply.rect.y), (500 + BOX_PADDING, 300 + BOX_PADDING));
        assert_eq!(controls.controls().count(), 3 + ViewOption::ALL.len());
    }
}
