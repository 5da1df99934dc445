//! Popup placement.
//!
//! [`place`] decides where the popup goes for a given cursor and edge;
//! [`MenuPositioner`] additionally remembers the bounds of the popup that is
//! currently on screen so the hide test and the mouse catcher can read them.

use crate::geometry::{Edge, Point, Rect, Size};

/// How far the cursor is pushed into the popup right after it opens on a
/// top or bottom edge, so the first row is hovered immediately.
///
/// With mouse catching on and a catch strip thicker than this, the nudged
/// cursor is still inside the strip; the catcher moves it the rest of the
/// way on the next tick.
pub const OPEN_NUDGE_PX: i32 = 5;

/// The result of placing a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Top-left corner to show the popup at.
    pub origin: Point,
    /// The rectangle the popup will cover.
    pub bounds: Rect,
    /// Where to move the cursor once, right after showing.
    pub nudge: Option<Point>,
}

/// Clamp `v` so that `[v, v + len)` stays inside `[lo, hi)`, preferring `lo`
/// when the span is longer than the range.
fn clamp_span(v: i32, len: i32, lo: i32, hi: i32) -> i32 {
    v.min(hi - len).max(lo)
}

/// Place a popup of `size` for a cursor that triggered on `edge` of
/// `screen`.
///
/// Top/bottom: centred horizontally under the cursor and glued to the edge.
/// Left/right: glued to the edge with its top at the cursor's Y.  Both are
/// clamped to the screen.
pub fn place(size: Size, cursor: Point, screen: Rect, edge: Edge) -> Placement {
    let origin = match edge {
        Edge::Top | Edge::Bottom => {
            let x = clamp_span(cursor.x - size.width / 2, size.width, screen.left, screen.right);
            let y = if edge == Edge::Top {
                screen.top
            } else {
                (screen.bottom - size.height).max(screen.top)
            };
            Point::new(x, y)
        }
        Edge::Left | Edge::Right => {
            let x = if edge == Edge::Left {
                screen.left
            } else {
                (screen.right - size.width).max(screen.left)
            };
            let y = clamp_span(cursor.y, size.height, screen.top, screen.bottom);
            Point::new(x, y)
        }
    };

    let nudge = match edge {
        Edge::Top => Some(Point::new(cursor.x, cursor.y + OPEN_NUDGE_PX)),
        Edge::Bottom => Some(Point::new(cursor.x, cursor.y - OPEN_NUDGE_PX)),
        Edge::Left | Edge::Right => None,
    };

    Placement {
        origin,
        bounds: Rect::from_origin(origin, size),
        nudge,
    }
}

/// Place a popup with its top-left corner on the cursor, clamped to
/// `screen`.  Used when the popup is opened on request rather than from an
/// edge; the cursor is not nudged.
pub fn place_at_cursor(size: Size, cursor: Point, screen: Rect) -> Placement {
    let origin = Point::new(
        clamp_span(cursor.x, size.width, screen.left, screen.right),
        clamp_span(cursor.y, size.height, screen.top, screen.bottom),
    );
    Placement {
        origin,
        bounds: Rect::from_origin(origin, size),
        nudge: None,
    }
}

/// Computes placements and holds the bounds of the popup on screen.
#[derive(Debug, Default)]
pub struct MenuPositioner {
    bounds: Option<Rect>,
}

impl MenuPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a placement.  Nothing is remembered until
    /// [`publish`](Self::publish) is called for the shown popup.
    pub fn place(&self, size: Size, cursor: Point, screen: Rect, edge: Edge) -> Placement {
        place(size, cursor, screen, edge)
    }

    /// See [`place_at_cursor`].
    pub fn place_at_cursor(&self, size: Size, cursor: Point, screen: Rect) -> Placement {
        place_at_cursor(size, cursor, screen)
    }

    /// Record the bounds of the popup that is now on screen.
    pub fn publish(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Bounds of the popup on screen, `None` while hidden.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Forget the bounds (the popup closed).
    pub fn clear(&mut self) {
        self.bounds = None;
    }
}
