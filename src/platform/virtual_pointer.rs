//! In-memory [`Pointer`] with a configurable monitor layout.

use crate::geometry::{Point, Rect};
use crate::traits::Pointer;
use std::cell::Cell;

/// Errors from the virtual pointer.
#[derive(Debug, thiserror::Error)]
pub enum VirtualPointerError {
    #[error("no monitors configured")]
    NoMonitors,
    /// Injected with [`VirtualPointer::fail_next`] to simulate a display
    /// change mid-query.
    #[error("display configuration changed")]
    DisplayChanged,
}

/// A cursor and a set of monitor work areas held in memory.
///
/// Cursor moves are recorded so callers can check what the engine did.
#[derive(Debug, Clone)]
pub struct VirtualPointer {
    monitors: Vec<Rect>,
    cursor: Point,
    moves: Vec<Point>,
    fail_next: Cell<u32>,
}

impl VirtualPointer {
    /// A pointer over the given monitor work areas, with the cursor at the
    /// top-left corner of the first one.
    pub fn new(monitors: Vec<Rect>) -> Self {
        let cursor = monitors.first().map(Rect::origin).unwrap_or_default();
        Self {
            monitors,
            cursor,
            moves: Vec::new(),
            fail_next: Cell::new(0),
        }
    }

    /// One 1920×1080 monitor at the origin.
    pub fn single_full_hd() -> Self {
        Self::new(vec![Rect::new(0, 0, 1920, 1080)])
    }

    /// Move the cursor as the user would (not recorded as an engine move).
    pub fn move_to(&mut self, to: Point) {
        self.cursor = to;
    }

    /// Every position the engine moved the cursor to, oldest first.
    pub fn moves(&self) -> &[Point] {
        &self.moves
    }

    /// Make the next `n` calls fail with
    /// [`VirtualPointerError::DisplayChanged`].
    pub fn fail_next(&mut self, n: u32) {
        self.fail_next.set(n);
    }

    fn check_failure(&self) -> Result<(), VirtualPointerError> {
        let left = self.fail_next.get();
        if left > 0 {
            self.fail_next.set(left - 1);
            Err(VirtualPointerError::DisplayChanged)
        } else {
            Ok(())
        }
    }

    /// Squared distance from `p` to the nearest point of `r`.
    fn distance_sq(r: &Rect, p: Point) -> i64 {
        let dx = i64::from((r.left - p.x).max(0).max(p.x - (r.right - 1)));
        let dy = i64::from((r.top - p.y).max(0).max(p.y - (r.bottom - 1)));
        dx * dx + dy * dy
    }
}

impl Pointer for VirtualPointer {
    type Error = VirtualPointerError;

    fn cursor_position(&self) -> Result<Point, VirtualPointerError> {
        self.check_failure()?;
        Ok(self.cursor)
    }

    fn work_area(&self, at: Point) -> Result<Rect, VirtualPointerError> {
        self.check_failure()?;
        self.monitors
            .iter()
            .find(|m| m.contains(at))
            .or_else(|| self.monitors.iter().min_by_key(|m| Self::distance_sq(m, at)))
            .copied()
            .ok_or(VirtualPointerError::NoMonitors)
    }

    fn set_cursor_position(&mut self, to: Point) -> Result<(), VirtualPointerError> {
        self.check_failure()?;
        self.cursor = to;
        self.moves.push(to);
        Ok(())
    }
}
