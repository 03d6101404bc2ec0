//! Session-wide view state shared by every overlay.

use crate::observer::{Emitter, SubscriptionId};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// A toggleable view option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewOption {
    DiagonalLines,
    HorizontalLines,
    VerticalLines,
    InfoBox,
    Antialiasing,
    CursorPosition,
}

impl ViewOption {
    /// Every option, in control box order.
    pub const ALL: [ViewOption; 6] = [
        ViewOption::DiagonalLines,
        ViewOption::HorizontalLines,
        ViewOption::VerticalLines,
        ViewOption::InfoBox,
        ViewOption::Antialiasing,
        ViewOption::CursorPosition,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewOption::DiagonalLines => "Diagonal lines",
            ViewOption::HorizontalLines => "Horizontal lines",
            ViewOption::VerticalLines => "Vertical lines",
            ViewOption::InfoBox => "Info box",
            ViewOption::Antialiasing => "Antialiasing",
            ViewOption::CursorPosition => "Cursor position",
        }
    }
}

/// Values of every view option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ViewOptions {
    pub show_diagonal_lines: bool,
    pub show_horizontal_lines: bool,
    pub show_vertical_lines: bool,
    pub show_info_box: bool,
    pub antialiasing: bool,
    pub show_cursor_position: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_diagonal_lines: true,
            show_horizontal_lines: true,
            show_vertical_lines: true,
            show_info_box: true,
            antialiasing: true,
            show_cursor_position: false,
        }
    }
}

impl ViewOptions {
    /// Read one option.
    pub fn get(&self, option: ViewOption) -> bool {
        match option {
            ViewOption::DiagonalLines => self.show_diagonal_lines,
            ViewOption::HorizontalLines => self.show_horizontal_lines,
            ViewOption::VerticalLines => self.show_vertical_lines,
            ViewOption::InfoBox => self.show_info_box,
            ViewOption::Antialiasing => self.antialiasing,
            ViewOption::CursorPosition => self.show_cursor_position,
        }
    }

    fn slot(&mut self, option: ViewOption) -> &mut bool {
        match option {
            ViewOption::DiagonalLines => &mut self.show_diagonal_lines,
            ViewOption::HorizontalLines => &mut self.show_horizontal_lines,
            ViewOption::VerticalLines => &mut self.show_vertical_lines,
            ViewOption::InfoBox => &mut self.show_info_box,
            ViewOption::Antialiasing => &mut self.antialiasing,
            ViewOption::CursorPosition => &mut self.show_cursor_position,
        }
    }
}

/// View state for one alignment session.
///
/// Overlays subscribe to the options they render; every change is pushed to
/// all subscribers before [`set`](Self::set) returns.
#[derive(Debug, Default)]
pub struct AlignViewModel {
    options: ViewOptions,
    changed: Emitter<ViewOption, bool>,
}

impl AlignViewModel {
    /// Create a view model with the given initial values.
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options,
            changed: Emitter::new(),
        }
    }

    /// Current values.
    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// Read one option.
    pub fn get(&self, option: ViewOption) -> bool {
        self.options.get(option)
    }

    /// Change one option, notifying subscribers if the value differs.
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, option: ViewOption, value: bool) -> bool {
        let slot = self.options.slot(option);
        if *slot == value {
            return false;
        }
        *slot = value;
        log::debug!("{option:?} -> {value}");
        self.changed.emit(option, &value);
        true
    }

    /// Flip one option and return its new value.
    pub fn toggle(&mut self, option: ViewOption) -> bool {
        let value = !self.get(option);
        self.set(option, value);
        value
    }

    /// Call `callback` with the new value whenever `option` changes.
    pub fn subscribe(
        &mut self,
        option: ViewOption,
        callback: impl FnMut(&bool) + 'static,
    ) -> SubscriptionId {
        self.changed.subscribe(option, callback)
    }

    /// Remove a subscription made with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    /// Number of subscribers for `option`.
    pub fn subscriber_count(&self, option: ViewOption) -> usize {
        self.changed.subscriber_count(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_set_notifies_only_on_change() {
        let mut model = AlignViewModel::new(ViewOptions::default());
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        model.subscribe(ViewOption::DiagonalLines, move |_| {
            counter.set(counter.get() + 1)
        });

        assert!(!model.set(ViewOption::DiagonalLines, true));
        assert_eq!(seen.get(), 0);
        assert!(model.set(ViewOption::DiagonalLines, false));
        assert_eq!(seen.get(), 1);
        assert!(!model.get(ViewOption::DiagonalLines));
    }

    #[test]
    fn test_toggle_flips_value() {
        let mut model = AlignViewModel::default();
        assert!(!model.get(ViewOption::CursorPosition));
        assert!(model.toggle(ViewOption::CursorPosition));
        assert!(model.options().show_cursor_position);
        assert!(!model.toggle(ViewOption::CursorPosition));
    }

    #[test]
    fn test_subscriber_receives_new_value() {
        let mut model = AlignViewModel::default();
        let last = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last);
        model.subscribe(ViewOption::InfoBox, move |value| sink.set(Some(*value)));

        model.set(ViewOption::InfoBox, false);
        assert_eq!(last.get(), Some(false));
    }

    #[test]
    fn test_every_option_round_trips_through_slot() {
        let mut options = ViewOptions::default();
        for option in ViewOption::ALL {
            let value = !options.get(option);
            *options.slot(option) = value;
            assert_eq!(options.get(option), value, "{option:?}");
        }
    }
}
