//! Multi-monitor queries with a synthesized-primary fallback.
//!
//! The monitor entry points are resolved from `user32.dll` at first use.
//! When they cannot be resolved, the wrappers degrade to a single synthetic
//! "primary display": the `MonitorFrom*` wrappers hand out
//! [`PRIMARY_MONITOR`], and [`monitor_info`] synthesizes display metrics for
//! exactly that sentinel handle. Any other handle fails under the fallback.

use std::ffi::c_void;
use std::mem;

use once_cell::sync::OnceCell;
use windows::core::s;
use windows::Win32::Foundation::{BOOL, HWND, RECT};
use windows::Win32::Graphics::Gdi::{HMONITOR, MONITORINFO, MONITOR_FROM_FLAGS};
use windows::Win32::System::SystemInformation::GetVersion;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SystemParametersInfoA, SM_CXSCREEN, SM_CYSCREEN, SPI_GETWORKAREA,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use crate::module::{self, CachedSymbol};

/// Sentinel handle representing the primary display when the multi-monitor
/// API is unavailable.
pub const PRIMARY_MONITOR: HMONITOR = HMONITOR(0x12340042usize as *mut c_void);

const MONITORINFOF_PRIMARY: u32 = 1;

type MonitorFromWindowFn = unsafe extern "system" fn(HWND, MONITOR_FROM_FLAGS) -> HMONITOR;
type MonitorFromRectFn = unsafe extern "system" fn(*const RECT, MONITOR_FROM_FLAGS) -> HMONITOR;
type GetMonitorInfoFn = unsafe extern "system" fn(HMONITOR, *mut MONITORINFO) -> BOOL;

static MONITOR_FROM_WINDOW: CachedSymbol =
    CachedSymbol::new(&module::USER32, b"MonitorFromWindow\0");
static MONITOR_FROM_RECT: CachedSymbol = CachedSymbol::new(&module::USER32, b"MonitorFromRect\0");

/// `GetMonitorInfo` has ANSI and wide variants; the one matching the
/// platform is chosen once and fixed for the process lifetime.
static GET_MONITOR_INFO: OnceCell<Option<GetMonitorInfoFn>> = OnceCell::new();

fn get_monitor_info_fn() -> Option<GetMonitorInfoFn> {
    *GET_MONITOR_INFO.get_or_init(|| {
        // High bit set means a non-NT platform without the wide variant.
        let nt = unsafe { GetVersion() } & 0x8000_0000 == 0;
        let name = if nt {
            s!("GetMonitorInfoW")
        } else {
            s!("GetMonitorInfoA")
        };
        module::USER32
            .symbol(name)
            .map(|func| unsafe { mem::transmute::<_, GetMonitorInfoFn>(func) })
    })
}

/// The monitor hosting `window`, or [`PRIMARY_MONITOR`] when the
/// multi-monitor API is unavailable.
pub fn monitor_from_window(window: HWND, flags: MONITOR_FROM_FLAGS) -> HMONITOR {
    match MONITOR_FROM_WINDOW.get() {
        Some(func) => {
            let func: MonitorFromWindowFn = unsafe { mem::transmute(func) };
            unsafe { func(window, flags) }
        }
        None => PRIMARY_MONITOR,
    }
}

/// The monitor intersecting `rect` (in screen coordinates), or
/// [`PRIMARY_MONITOR`] when the multi-monitor API is unavailable.
pub fn monitor_from_rect(rect: &RECT, flags: MONITOR_FROM_FLAGS) -> HMONITOR {
    match MONITOR_FROM_RECT.get() {
        Some(func) => {
            let func: MonitorFromRectFn = unsafe { mem::transmute(func) };
            unsafe { func(rect, flags) }
        }
        None => PRIMARY_MONITOR,
    }
}

/// Geometry and flags for `monitor`.
///
/// Under the fallback path only [`PRIMARY_MONITOR`] can be described, from
/// the always-available system metrics; any other handle yields `None`.
pub fn monitor_info(monitor: HMONITOR) -> Option<MONITORINFO> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    if let Some(func) = get_monitor_info_fn() {
        return unsafe { func(monitor, &mut info) }.as_bool().then_some(info);
    }

    if monitor != PRIMARY_MONITOR {
        return None;
    }

    let mut work = RECT::default();
    unsafe {
        SystemParametersInfoA(
            SPI_GETWORKAREA,
            0,
            Some(&mut work as *mut RECT as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
        .ok()?;
    }

    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    Some(synthesize_primary(work, width, height))
}

fn synthesize_primary(work: RECT, width: i32, height: i32) -> MONITORINFO {
    MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        rcMonitor: RECT {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        },
        rcWork: work,
        dwFlags: MONITORINFOF_PRIMARY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Graphics::Gdi::MONITOR_DEFAULTTOPRIMARY;

    #[test]
    fn synthesized_primary_is_flagged_and_anchored_at_origin() {
        let work = RECT {
            left: 0,
            top: 0,
            right: 1920,
            bottom: 1040,
        };
        let info = synthesize_primary(work, 1920, 1080);
        assert_eq!(info.dwFlags, MONITORINFOF_PRIMARY);
        assert_eq!(info.rcMonitor.right, 1920);
        assert_eq!(info.rcMonitor.bottom, 1080);
        assert_eq!(info.rcWork.bottom, 1040);
        assert_eq!((info.rcMonitor.left, info.rcMonitor.top), (0, 0));
    }

    #[test]
    fn primary_monitor_resolves_and_describes() {
        // A null window handle with DEFAULTTOPRIMARY always lands on the
        // primary display, resolved or degraded alike.
        let monitor = monitor_from_window(HWND::default(), MONITOR_DEFAULTTOPRIMARY);
        let info = monitor_info(monitor).expect("primary monitor info");
        assert!(info.rcMonitor.right > info.rcMonitor.left);
        assert!(info.rcMonitor.bottom > info.rcMonitor.top);
    }

    #[test]
    fn monitor_from_rect_is_consistent_with_from_window() {
        let rect = RECT {
            left: 0,
            top: 0,
            right: 1,
            bottom: 1,
        };
        let by_rect = monitor_from_rect(&rect, MONITOR_DEFAULTTOPRIMARY);
        let by_window = monitor_from_window(HWND::default(), MONITOR_DEFAULTTOPRIMARY);
        assert_eq!(by_rect, by_window);
    }
}
