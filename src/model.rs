//! Per-monitor alignment model.

use crate::error::Result;
use crate::vscreen::{Monitor, VScreen};

/// A monitor position in virtual screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Alignment state of one monitor during a session.
///
/// The model remembers where the monitor was when the session started and
/// accumulates a pending offset from user input. Nothing reaches the virtual
/// screen until [`apply_offset`](Self::apply_offset).
#[derive(Debug, Clone)]
pub struct AlignModel {
    monitor: Monitor,
    original: Position,
    offset: Position,
}

impl AlignModel {
    /// Start tracking `monitor` at its current position.
    pub fn new(monitor: &Monitor) -> Self {
        Self {
            monitor: monitor.clone(),
            original: Position {
                x: monitor.position_x,
                y: monitor.position_y,
            },
            offset: Position::default(),
        }
    }

    /// The monitor as it was when the session started.
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Device name of the tracked monitor.
    pub fn device_name(&self) -> &str {
        &self.monitor.device_name
    }

    /// Whether the tracked monitor is primary.
    pub fn is_primary(&self) -> bool {
        self.monitor.primary
    }

    /// Position at session start.
    pub fn original(&self) -> Position {
        self.original
    }

    /// Pending offset relative to [`original`](Self::original).
    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Position including the pending offset.
    pub fn position(&self) -> Position {
        Position {
            x: self.original.x + self.offset.x,
            y: self.original.y + self.offset.y,
        }
    }

    /// Move the monitor by `(dx, dy)`.
    ///
    /// The primary monitor anchors the layout and never moves; returns
    /// whether the position changed.
    pub fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        if self.monitor.primary || (dx == 0 && dy == 0) {
            return false;
        }
        self.offset.x += dx;
        self.offset.y += dy;
        log::debug!(
            "{} offset now ({}, {})",
            self.monitor.device_name,
            self.offset.x,
            self.offset.y
        );
        true
    }

    /// Write the current position into the virtual screen.
    pub fn apply_offset(&self, vscreen: &mut VScreen) -> Result<()> {
        let position = self.position();
        vscreen.set_position(&self.monitor.device_name, position.x, position.y)
    }

    /// Discard the pending offset.
    pub fn rollback(&mut self) {
        self.offset = Position::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::two_monitor_backend;

    #[test]
    fn test_nudge_accumulates_offset() {
        let vscreen = VScreen::load(two_monitor_backend()).unwrap();
        let mut model = AlignModel::new(vscreen.monitor("HDMI-1").unwrap());

        assert!(model.nudge(1, 0));
        assert!(model.nudge(1, -10));
        assert_eq!(model.offset(), Position { x: 2, y: -10 });
        assert_eq!(model.position(), Position { x: 1922, y: -10 });
    }

    #[test]
    fn test_primary_never_moves() {
        let vscreen = VScreen::load(two_monitor_backend()).unwrap();
        let mut model = AlignModel::new(vscreen.monitor("DP-1").unwrap());

        assert!(!model.nudge(1, 1));
        assert_eq!(model.position(), Position { x: 0, y: 0 });
    }

    #[test]
    fn test_rollback_then_apply_restores_original() {
        let mut vscreen = VScreen::load(two_monitor_backend()).unwrap();
        let mut model = AlignModel::new(vscreen.monitor("HDMI-1").unwrap());

        model.nudge(5, 5);
        model.apply_offset(&mut vscreen).unwrap();
        assert_eq!(vscreen.monitor("HDMI-1").unwrap().position_x, 1925);

        model.rollback();
        model.apply_offset(&mut vscreen).unwrap();
        let monitor = vscreen.monitor("HDMI-1").unwrap();
        assert_eq!((monitor.position_x, monitor.position_y), (1920, 0));
    }
}
