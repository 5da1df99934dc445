//! Mouse catching.
//!
//! While the popup is open the cursor is not allowed into a thin strip along
//! the popup side that faces the triggering screen edge.  Whenever a tick
//! finds the cursor in that strip it is put back just past it, which forms a
//! soft wall: the user can roam the popup freely but cannot slide back over
//! the screen edge (and into whatever the OS has there) before choosing.
//!
//! Correction happens once per poller tick, so it lags real mouse movement
//! by up to one tick interval.

use crate::geometry::{catch_zone_for, reposition_target, Edge, HotArea, Point, Rect};
use crate::traits::Pointer;
use log::debug;

#[derive(Debug, Clone, Copy)]
struct Armed {
    bounds: Rect,
    edge: Edge,
}

/// Keeps the cursor out of the catch strip of the open popup.
#[derive(Debug, Default)]
pub struct MouseCatchController {
    armed: Option<Armed>,
}

impl MouseCatchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start catching for a popup at `bounds` opened from `edge`.
    pub fn enable(&mut self, bounds: Rect, edge: Edge) {
        self.armed = Some(Armed { bounds, edge });
    }

    /// Stop catching and forget the popup bounds.
    pub fn disable(&mut self) {
        self.armed = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.armed.is_some()
    }

    /// The current catch strip, if armed.
    pub fn zone(&self, area: &HotArea) -> Option<Rect> {
        self.armed
            .map(|a| catch_zone_for(a.bounds, a.edge, area.catch_thickness_px.max(0)))
    }

    /// Move the cursor out of the catch strip if it is in it.
    ///
    /// `area` is the hot area of the current tick; its thickness and
    /// `catch_mouse` flag apply immediately after a config reload.  Returns
    /// the new cursor position when the cursor was moved.
    pub fn update_catch<P: Pointer>(
        &mut self,
        cursor: Point,
        area: &HotArea,
        pointer: &mut P,
    ) -> Result<Option<Point>, P::Error> {
        let Some(armed) = self.armed else {
            return Ok(None);
        };
        if !area.catch_mouse {
            return Ok(None);
        }
        let thickness = area.catch_thickness_px.max(0);
        let zone = catch_zone_for(armed.bounds, armed.edge, thickness);
        if !zone.contains(cursor) {
            return Ok(None);
        }
        let target = reposition_target(armed.bounds, armed.edge, thickness, cursor);
        debug!("caught cursor at {}, moving to {}", cursor, target);
        pointer.set_cursor_position(target)?;
        Ok(Some(target))
    }
}
