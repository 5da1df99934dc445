//! Screen geometry shared by the poller, positioner and mouse catcher.
//!
//! Everything here is pure: given the working area of the monitor under the
//! cursor and a [`HotArea`], decide whether the cursor sits in the hot zone,
//! where the catch strip of an open popup lies, and where a caught cursor
//! should be put back.
//!
//! Rectangles are half-open: `right` and `bottom` are the first pixel
//! *outside* the rectangle, the same convention the Win32 `RECT` uses.

use log::warn;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far (in pixels) from the outermost pixel row/column of the screen
/// the cursor may be and still count as "at the edge".
pub const HOT_ZONE_TOLERANCE: i32 = 3;

/// Padding around the popup bounds inside which the popup stays open.
pub const HIDE_PADDING: i32 = 8;

/// A point in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a popup, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle with exclusive `right` / `bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle with its top-left corner at `origin`.
    pub const fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Whether `p` lies inside the rectangle (`right` / `bottom` excluded).
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom.
    pub const fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left - dx,
            top: self.top - dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width(),
            self.height(),
            self.left,
            self.top
        )
    }
}

/// The screen edge a hot area is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// `true` for the two edges along which the popup slides horizontally.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

/// Parse an edge name, case-insensitively.
pub fn parse_edge(s: &str) -> Option<Edge> {
    match s.trim().to_ascii_lowercase().as_str() {
        "top" | "up" => Some(Edge::Top),
        "bottom" | "down" => Some(Edge::Bottom),
        "left" => Some(Edge::Left),
        "right" => Some(Edge::Right),
        _ => None,
    }
}

// Unknown names are normalised here instead of failing the whole config.
impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(parse_edge(&s).unwrap_or_else(|| {
            warn!("unknown edge {:?}, falling back to {}", s, Edge::Top);
            Edge::Top
        }))
    }
}

/// Where on the screen the fly-out is triggered and how the cursor is
/// caught once it is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotArea {
    /// Screen edge the hot zone hugs.
    pub edge: Edge,
    /// Start of the hot zone along the edge, in percent of the edge length.
    pub start_percent: f64,
    /// End of the hot zone along the edge, in percent of the edge length.
    pub end_percent: f64,
    /// Keep the cursor from sliding back over the triggering edge while the
    /// popup is open.
    pub catch_mouse: bool,
    /// Thickness of the catch strip, in pixels.
    pub catch_thickness_px: i32,
}

impl Default for HotArea {
    fn default() -> Self {
        Self {
            edge: Edge::Top,
            start_percent: 15.0,
            end_percent: 45.0,
            catch_mouse: true,
            catch_thickness_px: 10,
        }
    }
}

fn clamp_percent(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

impl HotArea {
    /// Clamp percentages into `[0, 100]`, swap an inverted range and drop a
    /// negative catch thickness to zero.
    pub fn normalized(&self) -> Self {
        let a = clamp_percent(self.start_percent);
        let b = clamp_percent(self.end_percent);
        Self {
            edge: self.edge,
            start_percent: a.min(b),
            end_percent: a.max(b),
            catch_mouse: self.catch_mouse,
            catch_thickness_px: self.catch_thickness_px.max(0),
        }
    }

    /// The inclusive `[first, last]` pixel range along the edge covered by
    /// the hot zone on `screen`.
    ///
    /// This is an X range for top/bottom edges and a Y range for left/right.
    pub fn span(&self, screen: Rect) -> (i32, i32) {
        let area = self.normalized();
        let (lo, extent) = if area.edge.is_horizontal() {
            (screen.left, screen.width())
        } else {
            (screen.top, screen.height())
        };
        let at = |percent: f64| lo + (f64::from(extent) * percent / 100.0).floor() as i32;
        (at(area.start_percent), at(area.end_percent))
    }
}

/// Whether `cursor` is inside the hot zone described by `area` on `screen`.
pub fn is_in_hot_zone(cursor: Point, screen: Rect, area: &HotArea) -> bool {
    let at_edge = match area.edge {
        Edge::Top => cursor.y <= screen.top + HOT_ZONE_TOLERANCE,
        Edge::Bottom => cursor.y >= screen.bottom - 1 - HOT_ZONE_TOLERANCE,
        Edge::Left => cursor.x <= screen.left + HOT_ZONE_TOLERANCE,
        Edge::Right => cursor.x >= screen.right - 1 - HOT_ZONE_TOLERANCE,
    };
    if !at_edge {
        return false;
    }
    let (first, last) = area.span(screen);
    let along = if area.edge.is_horizontal() {
        cursor.x
    } else {
        cursor.y
    };
    (first..=last).contains(&along)
}

/// Catch thickness capped to half the popup extent across `edge`.
fn effective_thickness(bounds: Rect, edge: Edge, thickness: i32) -> i32 {
    let across = if edge.is_horizontal() {
        bounds.height()
    } else {
        bounds.width()
    };
    thickness.clamp(0, (across / 2).max(0))
}

/// The strip of `bounds` nearest the triggering `edge` in which the cursor
/// gets caught.
pub fn catch_zone_for(bounds: Rect, edge: Edge, thickness: i32) -> Rect {
    let t = effective_thickness(bounds, edge, thickness);
    match edge {
        Edge::Top => Rect::new(bounds.left, bounds.top, bounds.right, bounds.top + t),
        Edge::Bottom => Rect::new(bounds.left, bounds.bottom - t, bounds.right, bounds.bottom),
        Edge::Left => Rect::new(bounds.left, bounds.top, bounds.left + t, bounds.bottom),
        Edge::Right => Rect::new(bounds.right - t, bounds.top, bounds.right, bounds.bottom),
    }
}

/// Where a cursor caught in the strip is moved to: the first pixel row (or
/// column) just past the strip, keeping the coordinate parallel to the edge.
pub fn reposition_target(bounds: Rect, edge: Edge, thickness: i32, cursor: Point) -> Point {
    let t = effective_thickness(bounds, edge, thickness);
    match edge {
        Edge::Top => Point::new(cursor.x, bounds.top + t),
        Edge::Bottom => Point::new(cursor.x, bounds.bottom - t - 1),
        Edge::Left => Point::new(bounds.left + t, cursor.y),
        Edge::Right => Point::new(bounds.right - t - 1, cursor.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    fn area(edge: Edge, start: f64, end: f64) -> HotArea {
        HotArea {
            edge,
            start_percent: start,
            end_percent: end,
            ..HotArea::default()
        }
    }

    #[test]
    fn top_span_matches_percentages() {
        let a = area(Edge::Top, 15.0, 45.0);
        assert_eq!(a.span(SCREEN), (288, 864));
    }

    #[test]
    fn left_span_uses_screen_height() {
        let a = area(Edge::Left, 30.0, 70.0);
        assert_eq!(a.span(SCREEN), (324, 756));
    }

    #[test]
    fn span_is_offset_by_screen_origin() {
        let second = Rect::new(1920, 0, 3840, 1080);
        let a = area(Edge::Top, 15.0, 45.0);
        assert_eq!(a.span(second), (2208, 2784));
    }

    #[test]
    fn top_edge_tolerance_boundary() {
        let a = area(Edge::Top, 15.0, 45.0);
        assert!(is_in_hot_zone(Point::new(500, 0), SCREEN, &a));
        assert!(is_in_hot_zone(Point::new(500, 3), SCREEN, &a));
        assert!(!is_in_hot_zone(Point::new(500, 4), SCREEN, &a));
    }

    #[test]
    fn bottom_edge_tolerance_boundary() {
        let a = area(Edge::Bottom, 15.0, 45.0);
        assert!(is_in_hot_zone(Point::new(500, 1079), SCREEN, &a));
        assert!(is_in_hot_zone(Point::new(500, 1076), SCREEN, &a));
        assert!(!is_in_hot_zone(Point::new(500, 1075), SCREEN, &a));
    }

    #[test]
    fn left_and_right_edge_tolerance_boundary() {
        let l = area(Edge::Left, 30.0, 70.0);
        assert!(is_in_hot_zone(Point::new(3, 500), SCREEN, &l));
        assert!(!is_in_hot_zone(Point::new(4, 500), SCREEN, &l));

        let r = area(Edge::Right, 30.0, 70.0);
        assert!(is_in_hot_zone(Point::new(1916, 500), SCREEN, &r));
        assert!(!is_in_hot_zone(Point::new(1915, 500), SCREEN, &r));
    }

    #[test]
    fn span_endpoints_are_inclusive() {
        let a = area(Edge::Top, 15.0, 45.0);
        assert!(is_in_hot_zone(Point::new(288, 1), SCREEN, &a));
        assert!(is_in_hot_zone(Point::new(864, 1), SCREEN, &a));
        assert!(!is_in_hot_zone(Point::new(287, 1), SCREEN, &a));
        assert!(!is_in_hot_zone(Point::new(865, 1), SCREEN, &a));
    }

    #[test]
    fn left_scenario_triggers_at_mid_height() {
        let a = area(Edge::Left, 30.0, 70.0);
        assert!(is_in_hot_zone(Point::new(0, 500), SCREEN, &a));
        assert!(!is_in_hot_zone(Point::new(0, 200), SCREEN, &a));
    }

    #[test]
    fn inverted_percentages_are_swapped() {
        let a = area(Edge::Top, 45.0, 15.0).normalized();
        assert_eq!(a.start_percent, 15.0);
        assert_eq!(a.end_percent, 45.0);
        assert_eq!(area(Edge::Top, 45.0, 15.0).span(SCREEN), (288, 864));
    }

    #[test]
    fn out_of_range_percentages_are_clamped() {
        let a = area(Edge::Top, -20.0, 250.0).normalized();
        assert_eq!(a.start_percent, 0.0);
        assert_eq!(a.end_percent, 100.0);

        let nan = area(Edge::Top, f64::NAN, 50.0).normalized();
        assert_eq!(nan.start_percent, 0.0);
    }

    #[test]
    fn negative_thickness_becomes_zero() {
        let a = HotArea {
            catch_thickness_px: -4,
            ..HotArea::default()
        };
        assert_eq!(a.normalized().catch_thickness_px, 0);
    }

    #[test]
    fn edge_parses_case_insensitively() {
        assert_eq!(parse_edge("TOP"), Some(Edge::Top));
        assert_eq!(parse_edge(" Right "), Some(Edge::Right));
        assert_eq!(parse_edge("diagonal"), None);
    }

    #[test]
    fn unknown_edge_deserializes_to_top() {
        let e: Edge = serde_json::from_str(r#""sideways""#).unwrap();
        assert_eq!(e, Edge::Top);
        let e: Edge = serde_json::from_str(r#""Bottom""#).unwrap();
        assert_eq!(e, Edge::Bottom);
    }

    #[test]
    fn catch_zone_is_strip_on_trigger_side() {
        let b = Rect::new(100, 0, 320, 200);
        assert_eq!(catch_zone_for(b, Edge::Top, 10), Rect::new(100, 0, 320, 10));
        assert_eq!(
            catch_zone_for(b, Edge::Bottom, 10),
            Rect::new(100, 190, 320, 200)
        );
        assert_eq!(catch_zone_for(b, Edge::Left, 10), Rect::new(100, 0, 110, 200));
        assert_eq!(
            catch_zone_for(b, Edge::Right, 10),
            Rect::new(310, 0, 320, 200)
        );
    }

    #[test]
    fn catch_zone_never_exceeds_half_the_popup() {
        let b = Rect::new(0, 0, 200, 40);
        assert_eq!(catch_zone_for(b, Edge::Top, 500).height(), 20);
    }

    #[test]
    fn reposition_keeps_the_parallel_coordinate() {
        let b = Rect::new(100, 0, 320, 200);
        assert_eq!(
            reposition_target(b, Edge::Top, 10, Point::new(150, 2)),
            Point::new(150, 10)
        );
        assert_eq!(
            reposition_target(b, Edge::Bottom, 10, Point::new(150, 195)),
            Point::new(150, 189)
        );
        assert_eq!(
            reposition_target(b, Edge::Right, 10, Point::new(315, 77)),
            Point::new(309, 77)
        );
    }

    #[test]
    fn inflate_and_contains() {
        let b = Rect::new(10, 10, 20, 20);
        assert!(b.contains(Point::new(10, 10)));
        assert!(!b.contains(Point::new(20, 15)));
        let padded = b.inflate(8, 8);
        assert!(padded.contains(Point::new(2, 27)));
        assert!(!padded.contains(Point::new(1, 15)));
    }

    fn any_edge() -> impl Strategy<Value = Edge> {
        prop_oneof![
            Just(Edge::Top),
            Just(Edge::Bottom),
            Just(Edge::Left),
            Just(Edge::Right),
        ]
    }

    proptest! {
        #[test]
        fn widening_the_range_never_loses_points(
            edge in any_edge(),
            start in 0.0f64..100.0,
            end in 0.0f64..100.0,
            widen_lo in 0.0f64..50.0,
            widen_hi in 0.0f64..50.0,
            x in 0i32..1920,
            y in 0i32..1080,
        ) {
            let narrow = area(edge, start.min(end), start.max(end));
            let wide = area(
                edge,
                narrow.start_percent - widen_lo,
                narrow.end_percent + widen_hi,
            );
            let p = Point::new(x, y);
            if is_in_hot_zone(p, SCREEN, &narrow) {
                prop_assert!(is_in_hot_zone(p, SCREEN, &wide));
            }
        }

        #[test]
        fn normalized_span_is_never_inverted(
            edge in any_edge(),
            start in -50.0f64..150.0,
            end in -50.0f64..150.0,
        ) {
            let (first, last) = area(edge, start, end).span(SCREEN);
            prop_assert!(first <= last);
        }

        #[test]
        fn one_reposition_leaves_the_catch_zone(
            edge in any_edge(),
            left in -2000i32..2000,
            top in -2000i32..2000,
            w in 1i32..800,
            h in 1i32..800,
            thickness in 0i32..100,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let bounds = Rect::new(left, top, left + w, top + h);
            let zone = catch_zone_for(bounds, edge, thickness);
            prop_assume!(zone.width() > 0 && zone.height() > 0);
            let cursor = Point::new(
                zone.left + (f64::from(zone.width() - 1) * fx) as i32,
                zone.top + (f64::from(zone.height() - 1) * fy) as i32,
            );
            prop_assert!(zone.contains(cursor));
            let target = reposition_target(bounds, edge, thickness, cursor);
            prop_assert!(!zone.contains(target));
            prop_assert!(bounds.contains(target));
        }
    }
}
