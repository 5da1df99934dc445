//! [`Pointer`] implementation backed by the Win32 API.
//!
//! Cursor position comes from `GetCursorPos`, the work area from
//! `MonitorFromPoint` + `GetMonitorInfoW` (so task bars are excluded), and
//! the cursor is moved with `SetCursorPos`.  Every call is a cheap,
//! non-blocking user32 query.

use crate::geometry::{Point, Rect};
use crate::traits::Pointer;
use windows::Win32::Foundation::POINT;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

/// The real Windows cursor.
#[derive(Debug, Default)]
pub struct Win32Pointer;

/// Errors returned by user32.
#[derive(Debug, thiserror::Error)]
#[error("win32 error: {0}")]
pub struct Win32Error(String);

impl Win32Pointer {
    pub fn new() -> Self {
        Self
    }
}

impl Pointer for Win32Pointer {
    type Error = Win32Error;

    fn cursor_position(&self) -> Result<Point, Win32Error> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }
            .map_err(|e| Win32Error(format!("GetCursorPos: {}", e)))?;
        Ok(Point::new(pt.x, pt.y))
    }

    fn work_area(&self, at: Point) -> Result<Rect, Win32Error> {
        let monitor = unsafe { MonitorFromPoint(POINT { x: at.x, y: at.y }, MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            return Err(Win32Error(format!("no monitor near {}", at)));
        }
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            return Err(Win32Error(format!("GetMonitorInfoW failed for monitor near {}", at)));
        }
        let rc = info.rcWork;
        Ok(Rect::new(rc.left, rc.top, rc.right, rc.bottom))
    }

    fn set_cursor_position(&mut self, to: Point) -> Result<(), Win32Error> {
        unsafe { SetCursorPos(to.x, to.y) }
            .map_err(|e| Win32Error(format!("SetCursorPos{}: {}", to, e)))
    }
}
