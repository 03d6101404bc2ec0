//! The virtual screen: every attached monitor and their positions.

use crate::backend::{Backend, vscreen_bounds};
use crate::display::{DisplayInfo, Placement, Rect};
use crate::error::{Error, Result};

/// A physical monitor inside the virtual screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Platform identifier used when committing the layout.
    pub id: u32,
    /// Unique device name.
    pub device_name: String,
    /// Horizontal resolution in pixels.
    pub screen_width: i32,
    /// Vertical resolution in pixels.
    pub screen_height: i32,
    /// Left edge in virtual screen coordinates.
    pub position_x: i32,
    /// Top edge in virtual screen coordinates.
    pub position_y: i32,
    /// Whether this monitor anchors the layout.
    pub primary: bool,
    /// Refresh rate in Hz, if known.
    pub refresh_rate: Option<u32>,
    /// Scale factor relative to 1.0.
    pub scale_factor: f64,
}

impl Monitor {
    /// Monitor rectangle in virtual screen coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position_x,
            self.position_y,
            self.screen_width,
            self.screen_height,
        )
    }
}

impl From<DisplayInfo> for Monitor {
    fn from(info: DisplayInfo) -> Self {
        Self {
            id: info.id,
            device_name: info.device_name,
            screen_width: info.bounds.width,
            screen_height: info.bounds.height,
            position_x: info.bounds.x,
            position_y: info.bounds.y,
            primary: info.is_primary,
            refresh_rate: info.refresh_rate,
            scale_factor: info.scale_factor,
        }
    }
}

/// All monitors plus the backend their layout is committed through.
pub struct VScreen {
    monitors: Vec<Monitor>,
    backend: Box<dyn Backend>,
}

impl VScreen {
    /// Read the current layout from `backend`.
    ///
    /// Exactly one monitor ends up primary: the first reported primary wins,
    /// and the first monitor is promoted when none is reported.
    pub fn load(backend: impl Backend + 'static) -> Result<Self> {
        let displays = backend.displays()?;
        if displays.is_empty() {
            return Err(Error::NoDisplays);
        }
        let mut monitors: Vec<Monitor> = displays.into_iter().map(Monitor::from).collect();

        let mut seen_primary = false;
        for monitor in &mut monitors {
            if monitor.primary && seen_primary {
                log::warn!(
                    "{} also reported as primary, keeping the first one",
                    monitor.device_name
                );
                monitor.primary = false;
            }
            seen_primary |= monitor.primary;
        }
        if !seen_primary {
            log::warn!(
                "no primary monitor reported, using {}",
                monitors[0].device_name
            );
            monitors[0].primary = true;
        }

        log::debug!("loaded virtual screen with {} monitor(s)", monitors.len());
        Ok(Self {
            monitors,
            backend: Box::new(backend),
        })
    }

    /// Monitors in the order the backend reported them.
    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    /// Look up a monitor by device name.
    pub fn monitor(&self, device_name: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.device_name == device_name)
    }

    /// The primary monitor.
    pub fn primary(&self) -> &Monitor {
        self.monitors
            .iter()
            .find(|m| m.primary)
            .unwrap_or(&self.monitors[0])
    }

    /// Change a monitor's in-memory position; nothing is committed yet.
    pub fn set_position(&mut self, device_name: &str, x: i32, y: i32) -> Result<()> {
        let monitor = self
            .monitors
            .iter_mut()
            .find(|m| m.device_name == device_name)
            .ok_or_else(|| Error::UnknownMonitor(device_name.to_string()))?;
        monitor.position_x = x;
        monitor.position_y = y;
        Ok(())
    }

    /// Bounding rectangle of all monitors.
    pub fn bounds(&self) -> Rect {
        let rects: Vec<Rect> = self.monitors.iter().map(Monitor::rect).collect();
        Rect::bounding(&rects).unwrap_or_default()
    }

    /// Width and height of the virtual screen as the backend currently reports it.
    pub fn size(&self) -> Result<(i32, i32)> {
        self.backend.get_vscreen_size()
    }

    /// Offset that normalizes the in-memory layout to a (0, 0) origin.
    pub fn normalize_offset(&self) -> (i32, i32) {
        let bounds = self.bounds();
        (-bounds.x, -bounds.y)
    }

    /// Commit the in-memory monitor positions to the OS.
    pub fn apply_changes(&mut self) -> Result<()> {
        let placements: Vec<Placement> = self
            .monitors
            .iter()
            .map(|m| Placement {
                id: m.id,
                device_name: m.device_name.clone(),
                x: m.position_x,
                y: m.position_y,
            })
            .collect();
        log::debug!("applying {placements:?}");
        self.backend.apply_layout(&placements)
    }

    /// Re-read positions from the backend, discarding in-memory changes.
    pub fn reload(&mut self) -> Result<()> {
        let displays = self.backend.displays()?;
        vscreen_bounds(&displays)?;
        for info in displays {
            if let Some(monitor) = self
                .monitors
                .iter_mut()
                .find(|m| m.device_name == info.device_name)
            {
                monitor.position_x = info.bounds.x;
                monitor.position_y = info.bounds.y;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for VScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VScreen")
            .field("monitors", &self.monitors)
            .finish_non_exhaustive()
    }
}
