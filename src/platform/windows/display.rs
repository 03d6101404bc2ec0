//! Windows display queries and layout commits.

use crate::display::{DisplayInfo, Placement, Rect};
use crate::error::{Error, Result};
use std::mem::{MaybeUninit, size_of};
use windows::Win32::Foundation::{BOOL, LPARAM, POINTL, RECT};
use windows::Win32::Graphics::Gdi::{
    CDS_NORESET, CDS_TYPE, CDS_UPDATEREGISTRY, ChangeDisplaySettingsExW, DEVMODEW,
    DISP_CHANGE_SUCCESSFUL, DM_POSITION, ENUM_CURRENT_SETTINGS, EnumDisplayMonitors,
    EnumDisplaySettingsW, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, GetDpiForSystem, MDT_EFFECTIVE_DPI};
use windows::Win32::UI::WindowsAndMessaging::MONITORINFOF_PRIMARY;
use windows::core::PCWSTR;

pub fn displays() -> Result<Vec<DisplayInfo>> {
    let mut context = MonitorContext {
        displays: Vec::new(),
        next_id: 1,
    };

    let ok = unsafe {
        EnumDisplayMonitors(
            Some(HDC(std::ptr::null_mut())),
            None,
            Some(monitor_enum_proc),
            LPARAM(&mut context as *mut _ as isize),
        )
    };

    if ok.as_bool() && !context.displays.is_empty() {
        Ok(context.displays)
    } else {
        Err(Error::Platform("EnumDisplayMonitors failed".into()))
    }
}

pub fn primary_display() -> Result<DisplayInfo> {
    let displays = displays()?;
    displays
        .into_iter()
        .find(|display| display.is_primary)
        .ok_or_else(|| Error::Platform("primary display not found".into()))
}

/// Stage every placement in the registry, then commit them in one mode change.
///
/// Windows anchors the primary display at (0, 0), so all placements are
/// translated by the primary display's requested position.
pub fn apply_layout(placements: &[Placement]) -> Result<()> {
    let current = displays()?;
    let primary = current
        .iter()
        .find(|display| display.is_primary)
        .ok_or_else(|| Error::Platform("primary display not found".into()))?;
    let (origin_x, origin_y) = placements
        .iter()
        .find(|placement| placement.device_name == primary.device_name)
        .map(|placement| (placement.x, placement.y))
        .unwrap_or((primary.bounds.x, primary.bounds.y));

    for placement in placements {
        let device = encode_wide(&placement.device_name);
        let mut devmode = current_devmode(&device).ok_or_else(|| {
            Error::UnknownMonitor(placement.device_name.clone())
        })?;
        devmode.dmFields = DM_POSITION;
        devmode.Anonymous1.Anonymous2.dmPosition = POINTL {
            x: placement.x - origin_x,
            y: placement.y - origin_y,
        };

        let result = unsafe {
            ChangeDisplaySettingsExW(
                PCWSTR(device.as_ptr()),
                Some(&devmode),
                None,
                CDS_UPDATEREGISTRY | CDS_NORESET,
                None,
            )
        };
        if result != DISP_CHANGE_SUCCESSFUL {
            return Err(Error::ApplyFailed(format!(
                "staging {} failed with code {}",
                placement.device_name, result.0
            )));
        }
    }

    let result =
        unsafe { ChangeDisplaySettingsExW(PCWSTR::null(), None, None, CDS_TYPE(0), None) };
    if result != DISP_CHANGE_SUCCESSFUL {
        return Err(Error::ApplyFailed(format!(
            "committing display settings failed with code {}",
            result.0
        )));
    }
    Ok(())
}

struct MonitorContext {
    displays: Vec<DisplayInfo>,
    next_id: u32,
}

unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _lprc: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let context = unsafe { &mut *(lparam.0 as *mut MonitorContext) };
    let info = monitor_info(hmonitor);
    let display = display_from_info(hmonitor, &info, context.next_id);
    context.next_id += 1;
    context.displays.push(display);
    BOOL(1)
}

fn monitor_info(hmonitor: HMONITOR) -> MONITORINFOEXW {
    let mut info = MONITORINFOEXW {
        monitorInfo: MONITORINFO {
            cbSize: size_of::<MONITORINFOEXW>() as u32,
            ..Default::default()
        },
        ..Default::default()
    };
    unsafe {
        let _ = GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut MONITORINFO);
    }
    info
}

fn display_from_info(hmonitor: HMONITOR, info: &MONITORINFOEXW, id: u32) -> DisplayInfo {
    let rect = info.monitorInfo.rcMonitor;
    let is_primary = (info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY) != 0;
    let device_name = String::from_utf16_lossy(&info.szDevice)
        .trim_end_matches('\0')
        .to_string();
    let device = encode_wide(&device_name);

    DisplayInfo {
        id,
        device_name,
        bounds: Rect::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        ),
        scale_factor: monitor_dpi_scale(hmonitor).unwrap_or(1.0),
        refresh_rate: current_devmode(&device)
            .map(|devmode| devmode.dmDisplayFrequency)
            .filter(|&hz| hz > 1),
        is_primary,
    }
}

fn monitor_dpi_scale(hmonitor: HMONITOR) -> Option<f64> {
    let mut dpi_x: u32 = 0;
    let mut dpi_y: u32 = 0;
    let result = unsafe { GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };
    if result.is_ok() && dpi_x > 0 {
        Some(dpi_x as f64 / 96.0)
    } else {
        let dpi = unsafe { GetDpiForSystem() };
        if dpi > 0 {
            Some(dpi as f64 / 96.0)
        } else {
            None
        }
    }
}

fn current_devmode(device: &[u16]) -> Option<DEVMODEW> {
    let mut devmode = unsafe { MaybeUninit::<DEVMODEW>::zeroed().assume_init() };
    devmode.dmSize = size_of::<DEVMODEW>() as u16;

    let ok = unsafe {
        EnumDisplaySettingsW(PCWSTR(device.as_ptr()), ENUM_CURRENT_SETTINGS, &mut devmode)
    };
    if ok.as_bool() { Some(devmode) } else { None }
}

fn encode_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
