//! Display backends.
//!
//! A [`Backend`] answers the geometry queries the alignment session needs and
//! commits new layouts. [`SystemBackend`] talks to the operating system;
//! [`StaticBackend`] keeps everything in memory, which is what `--dry-run`
//! and the tests use.

use crate::display::{self, DisplayInfo, Placement, Rect};
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Source of display geometry and sink for layout changes.
pub trait Backend {
    /// Currently attached displays.
    fn displays(&self) -> Result<Vec<DisplayInfo>>;

    /// Commit new display positions.
    fn apply_layout(&mut self, placements: &[Placement]) -> Result<()>;

    /// Width and height of the virtual screen in pixels.
    ///
    /// The virtual screen is the bounding rectangle of all display monitors.
    fn get_vscreen_size(&self) -> Result<(i32, i32)> {
        let bounds = vscreen_bounds(&self.displays()?)?;
        Ok((bounds.width, bounds.height))
    }

    /// Offset that moves the top left corner of the virtual screen to (0, 0).
    fn get_vscreen_normalize_offset(&self) -> Result<(i32, i32)> {
        let bounds = vscreen_bounds(&self.displays()?)?;
        Ok((-bounds.x, -bounds.y))
    }
}

/// Bounding rectangle of all displays.
pub fn vscreen_bounds(displays: &[DisplayInfo]) -> Result<Rect> {
    Rect::bounding(displays.iter().map(|d| &d.bounds)).ok_or(Error::NoDisplays)
}

/// Backend backed by the native display APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl Backend for SystemBackend {
    fn displays(&self) -> Result<Vec<DisplayInfo>> {
        display::displays()
    }

    fn apply_layout(&mut self, placements: &[Placement]) -> Result<()> {
        log::info!("committing layout for {} display(s)", placements.len());
        display::apply_layout(placements)
    }
}

/// Shared record of every layout committed to a [`StaticBackend`].
pub type CommitLog = Rc<RefCell<Vec<Vec<Placement>>>>;

/// In-memory backend with a fixed display list.
///
/// Commits update the stored display positions and are appended to a
/// [`CommitLog`] that stays readable after the backend has been handed off.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    displays: Vec<DisplayInfo>,
    commits: CommitLog,
    fail_commits: bool,
}

impl StaticBackend {
    /// Create a backend reporting `displays`.
    pub fn new(displays: Vec<DisplayInfo>) -> Self {
        Self {
            displays,
            commits: Rc::default(),
            fail_commits: false,
        }
    }

    /// Reject every commit with [`Error::ApplyFailed`] (still recorded in the log).
    pub fn failing(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Handle on the commit log.
    pub fn commits(&self) -> CommitLog {
        Rc::clone(&self.commits)
    }
}

impl Backend for StaticBackend {
    fn displays(&self) -> Result<Vec<DisplayInfo>> {
        if self.displays.is_empty() {
            return Err(Error::NoDisplays);
        }
        Ok(self.displays.clone())
    }

    fn apply_layout(&mut self, placements: &[Placement]) -> Result<()> {
        self.commits.borrow_mut().push(placements.to_vec());
        if self.fail_commits {
            return Err(Error::ApplyFailed("commit rejected".into()));
        }
        for placement in placements {
            let display = self
                .displays
                .iter_mut()
                .find(|d| d.device_name == placement.device_name)
                .ok_or_else(|| Error::UnknownMonitor(placement.device_name.clone()))?;
            display.bounds.x = placement.x;
            display.bounds.y = placement.y;
        }
        log::debug!("static backend stored layout #{}", self.commits.borrow().len());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn display(
        id: u32,
        name: &str,
        bounds: Rect,
        is_primary: bool,
    ) -> DisplayInfo {
        DisplayInfo {
            id,
            device_name: name.to_string(),
            bounds,
            scale_factor: 1.0,
            refresh_rate: Some(60),
            is_primary,
        }
    }

    pub(crate) fn two_monitor_backend() -> StaticBackend {
        StaticBackend::new(vec![
            display(1, "DP-1", Rect::new(0, 0, 1920, 1080), true),
            display(2, "HDMI-1", Rect::new(1920, 0, 1280, 1024), false),
        ])
    }

    #[test]
    fn test_vscreen_size_and_offset() {
        let backend = two_monitor_backend();
        assert_eq!(backend.get_vscreen_size().unwrap(), (3200, 1080));
        assert_eq!(backend.get_vscreen_normalize_offset().unwrap(), (0, 0));
    }

    #[test]
    fn test_normalize_offset_with_negative_origin() {
        let backend = StaticBackend::new(vec![
            display(1, "DP-1", Rect::new(0, 0, 1920, 1080), true),
            display(2, "DP-2", Rect::new(-1280, -100, 1280, 1024), false),
        ]);
        assert_eq!(backend.get_vscreen_normalize_offset().unwrap(), (1280, 100));
        assert_eq!(backend.get_vscreen_size().unwrap(), (3200, 1180));
    }

    #[test]
    fn test_empty_backend_reports_no_displays() {
        let backend = StaticBackend::new(Vec::new());
        assert!(matches!(backend.get_vscreen_size(), Err(Error::NoDisplays)));
    }

    #[test]
    fn test_commit_updates_positions_and_log() {
        let mut backend = two_monitor_backend();
        let log = backend.commits();
        backend
            .apply_layout(&[Placement {
                id: 2,
                device_name: "HDMI-1".into(),
                x: 1925,
                y: -3,
            }])
            .unwrap();

        assert_eq!(log.borrow().len(), 1);
        let moved = backend
            .displays()
            .unwrap()
            .into_iter()
            .find(|d| d.device_name == "HDMI-1")
            .unwrap();
        assert_eq!((moved.bounds.x, moved.bounds.y), (1925, -3));
    }

    #[test]
    fn test_failing_backend_still_logs() {
        let mut backend = two_monitor_backend().failing();
        let log = backend.commits();
        assert!(matches!(
            backend.apply_layout(&[]),
            Err(Error::ApplyFailed(_))
        ));
        assert_eq!(log.borrow().len(), 1);
    }
}
