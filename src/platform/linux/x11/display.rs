//! X11 display queries and layout commits through XRandR.

use crate::display::{DisplayInfo, Placement, Rect};
use crate::error::{Error, Result};
use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr::null;
use std::slice;
use x11::{xlib, xrandr};

/// Snapshot of an enabled CRTC, enough to re-issue `XRRSetCrtcConfig`.
struct CrtcState {
    crtc: xrandr::RRCrtc,
    bounds: Rect,
    mode: xrandr::RRMode,
    rotation: xrandr::Rotation,
    outputs: Vec<xrandr::RROutput>,
}

pub fn displays() -> Result<Vec<DisplayInfo>> {
    with_resources(|display, root, resources| unsafe {
        let primary_output = xrandr::XRRGetOutputPrimary(display, root);
        let res = &*resources;
        let outputs = raw_slice(res.outputs, res.noutput);

        let mut displays = Vec::new();
        for &output in outputs {
            let info = xrandr::XRRGetOutputInfo(display, resources, output);
            if info.is_null() {
                continue;
            }
            let connected = (*info).connection as c_int == xrandr::RR_Connected as c_int;
            let crtc = (*info).crtc;
            let name = CStr::from_ptr((*info).name).to_string_lossy().into_owned();
            xrandr::XRRFreeOutputInfo(info);

            if !connected || crtc == 0 {
                continue;
            }

            let crtc_info = xrandr::XRRGetCrtcInfo(display, resources, crtc);
            if crtc_info.is_null() {
                continue;
            }
            let bounds = Rect::new(
                (*crtc_info).x,
                (*crtc_info).y,
                (*crtc_info).width as i32,
                (*crtc_info).height as i32,
            );
            let refresh_rate = refresh_rate(res, (*crtc_info).mode);
            xrandr::XRRFreeCrtcInfo(crtc_info);

            displays.push(DisplayInfo {
                id: crtc as u32,
                device_name: name,
                bounds,
                scale_factor: 1.0,
                refresh_rate,
                is_primary: output == primary_output,
            });
        }

        // XRandR reports no primary output unless one was set explicitly.
        if !displays.is_empty() && !displays.iter().any(|d| d.is_primary) {
            if let Some(origin) = displays.iter_mut().find(|d| d.bounds.x == 0 && d.bounds.y == 0)
            {
                origin.is_primary = true;
            }
        }

        Ok(displays)
    })
}

pub fn primary_display() -> Result<DisplayInfo> {
    let displays = displays()?;
    displays
        .iter()
        .find(|display| display.is_primary)
        .or(displays.first())
        .cloned()
        .ok_or(Error::NoDisplays)
}

pub fn apply_layout(placements: &[Placement]) -> Result<()> {
    with_resources(|display, root, resources| unsafe {
        let mut crtcs = crtc_states(display, resources);
        for placement in placements {
            let state = crtcs
                .iter_mut()
                .find(|state| state.crtc as u32 == placement.id)
                .ok_or_else(|| Error::UnknownMonitor(placement.device_name.clone()))?;
            state.bounds.x = placement.x;
            state.bounds.y = placement.y;
        }

        // The X root window starts at (0, 0); shift everything so the
        // bounding box does too.
        let bounds = Rect::bounding(crtcs.iter().map(|state| &state.bounds))
            .ok_or(Error::NoDisplays)?;
        for state in &mut crtcs {
            state.bounds.x -= bounds.x;
            state.bounds.y -= bounds.y;
        }

        let screen = xlib::XDefaultScreen(display);
        let current_width = xlib::XDisplayWidth(display, screen);
        let current_height = xlib::XDisplayHeight(display, screen);
        let mm_width = xlib::XDisplayWidthMM(display, screen);
        let mm_height = xlib::XDisplayHeightMM(display, screen);
        let scaled_mm = |mm: c_int, px: c_int, current: c_int| {
            if current > 0 { mm * px / current } else { mm }
        };

        // Grow first so no CRTC ever lands outside the root window.
        let grow_width = bounds.width.max(current_width);
        let grow_height = bounds.height.max(current_height);
        if grow_width != current_width || grow_height != current_height {
            xrandr::XRRSetScreenSize(
                display,
                root,
                grow_width,
                grow_height,
                scaled_mm(mm_width, grow_width, current_width),
                scaled_mm(mm_height, grow_height, current_height),
            );
        }

        for state in &mut crtcs {
            let status = xrandr::XRRSetCrtcConfig(
                display,
                resources,
                state.crtc,
                xlib::CurrentTime,
                state.bounds.x,
                state.bounds.y,
                state.mode,
                state.rotation,
                state.outputs.as_mut_ptr(),
                state.outputs.len() as c_int,
            );
            if status != 0 {
                return Err(Error::ApplyFailed(format!(
                    "XRRSetCrtcConfig failed for CRTC {} (status {status})",
                    state.crtc
                )));
            }
        }

        if bounds.width != grow_width || bounds.height != grow_height {
            xrandr::XRRSetScreenSize(
                display,
                root,
                bounds.width,
                bounds.height,
                scaled_mm(mm_width, bounds.width, current_width),
                scaled_mm(mm_height, bounds.height, current_height),
            );
        }

        xlib::XSync(display, xlib::False);
        Ok(())
    })
}

unsafe fn crtc_states(
    display: *mut xlib::Display,
    resources: *mut xrandr::XRRScreenResources,
) -> Vec<CrtcState> {
    unsafe {
        let res = &*resources;
        let mut states = Vec::new();
        for &crtc in raw_slice(res.crtcs, res.ncrtc) {
            let info = xrandr::XRRGetCrtcInfo(display, resources, crtc);
            if info.is_null() {
                continue;
            }
            if (*info).mode != 0 {
                states.push(CrtcState {
                    crtc,
                    bounds: Rect::new(
                        (*info).x,
                        (*info).y,
                        (*info).width as i32,
                        (*info).height as i32,
                    ),
                    mode: (*info).mode,
                    rotation: (*info).rotation,
                    outputs: raw_slice((*info).outputs, (*info).noutput).to_vec(),
                });
            }
            xrandr::XRRFreeCrtcInfo(info);
        }
        states
    }
}

fn refresh_rate(resources: &xrandr::XRRScreenResources, mode: xrandr::RRMode) -> Option<u32> {
    let modes = unsafe { raw_slice(resources.modes, resources.nmode) };
    let info = modes.iter().find(|info| info.id == mode)?;
    let total = info.hTotal as f64 * info.vTotal as f64;
    if total > 0.0 {
        Some((info.dotClock as f64 / total).round() as u32)
    } else {
        None
    }
}

/// View an Xlib-owned array as a slice; null or negative lengths yield an empty slice.
unsafe fn raw_slice<'a, T>(ptr: *const T, len: c_int) -> &'a [T] {
    if ptr.is_null() || len <= 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len as usize) }
    }
}

fn with_resources<T>(
    f: impl FnOnce(*mut xlib::Display, xlib::Window, *mut xrandr::XRRScreenResources) -> Result<T>,
) -> Result<T> {
    with_display(|display| unsafe {
        let root = xlib::XDefaultRootWindow(display);
        let resources = xrandr::XRRGetScreenResourcesCurrent(display, root);
        if resources.is_null() {
            return Err(Error::Platform(
                "XRRGetScreenResourcesCurrent failed (is XRandR available?)".into(),
            ));
        }
        let result = f(display, root, resources);
        xrandr::XRRFreeScreenResources(resources);
        result
    })
}

fn with_display<T>(f: impl FnOnce(*mut xlib::Display) -> Result<T>) -> Result<T> {
    unsafe {
        let display = xlib::XOpenDisplay(null());
        if display.is_null() {
            return Err(Error::Platform("XOpenDisplay failed".into()));
        }
        let result = f(display);
        xlib::XCloseDisplay(display);
        result
    }
}
