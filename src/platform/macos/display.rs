//! macOS display queries and layout commits.

use crate::display::{DisplayInfo, Placement, Rect};
use crate::error::{Error, Result};
use objc2_core_graphics::{
    CGBeginDisplayConfiguration, CGCancelDisplayConfiguration, CGCompleteDisplayConfiguration,
    CGConfigureDisplayOrigin, CGConfigureOption, CGDirectDisplayID, CGDisplayBounds,
    CGDisplayConfigRef, CGDisplayCopyDisplayMode, CGDisplayMode, CGDisplayPixelsWide, CGError,
    CGGetActiveDisplayList, CGMainDisplayID,
};

fn display_info(display_id: CGDirectDisplayID) -> DisplayInfo {
    let bounds = CGDisplayBounds(display_id);
    let width_points = bounds.size.width;
    let width_pixels = CGDisplayPixelsWide(display_id) as f64;
    let scale_factor = if width_points > 0.0 {
        width_pixels / width_points
    } else {
        1.0
    };

    let refresh_rate = CGDisplayCopyDisplayMode(display_id)
        .map(|mode| CGDisplayMode::refresh_rate(Some(&mode)))
        .filter(|&rate| rate > 0.0)
        .map(|rate| rate.round() as u32);

    DisplayInfo {
        id: display_id,
        device_name: format!("display-{display_id}"),
        bounds: Rect::new(
            bounds.origin.x.round() as i32,
            bounds.origin.y.round() as i32,
            bounds.size.width.round() as i32,
            bounds.size.height.round() as i32,
        ),
        scale_factor,
        refresh_rate,
        is_primary: display_id == CGMainDisplayID(),
    }
}

pub fn displays() -> Result<Vec<DisplayInfo>> {
    let mut max_displays = 8usize;
    loop {
        let mut displays = vec![0; max_displays];
        let mut count: u32 = 0;
        let status = unsafe {
            CGGetActiveDisplayList(max_displays as u32, displays.as_mut_ptr(), &mut count)
        };
        if status != CGError::Success {
            return Err(Error::Platform(format!(
                "CGGetActiveDisplayList failed: {:?}",
                status
            )));
        }

        if (count as usize) < max_displays {
            displays.truncate(count as usize);
            return Ok(displays.into_iter().map(display_info).collect());
        }

        max_displays *= 2;
    }
}

pub fn primary_display() -> Result<DisplayInfo> {
    Ok(display_info(CGMainDisplayID()))
}

/// Configure every display origin inside one CoreGraphics transaction.
///
/// The main display defines the global origin, so placements are translated
/// by its requested position before being configured.
pub fn apply_layout(placements: &[Placement]) -> Result<()> {
    let main = CGMainDisplayID();
    let (origin_x, origin_y) = placements
        .iter()
        .find(|placement| placement.id == main)
        .map(|placement| (placement.x, placement.y))
        .unwrap_or((0, 0));

    let mut config: CGDisplayConfigRef = std::ptr::null_mut();
    let status = unsafe { CGBeginDisplayConfiguration(&mut config) };
    if status != CGError::Success {
        return Err(Error::ApplyFailed(format!(
            "CGBeginDisplayConfiguration failed: {:?}",
            status
        )));
    }

    for placement in placements {
        let status = unsafe {
            CGConfigureDisplayOrigin(
                config,
                placement.id,
                placement.x - origin_x,
                placement.y - origin_y,
            )
        };
        if status != CGError::Success {
            unsafe {
                let _ = CGCancelDisplayConfiguration(config);
            }
            return Err(Error::ApplyFailed(format!(
                "CGConfigureDisplayOrigin failed for {}: {:?}",
                placement.device_name, status
            )));
        }
    }

    let status = unsafe { CGCompleteDisplayConfiguration(config, CGConfigureOption::Permanently) };
    if status != CGError::Success {
        return Err(Error::ApplyFailed(format!(
            "CGCompleteDisplayConfiguration failed: {:?}",
            status
        )));
    }
    Ok(())
}
