//! Core traits that decouple edgeflyout from the operating system, the
//! popup renderer and the transport commands arrive on.
//!
//! Every concrete backend (Win32, the in-memory virtual pointer, the TCP
//! listener or a test harness) implements one of these traits.  The
//! [`EdgeTriggerPoller`](crate::poller::EdgeTriggerPoller) only depends on
//! these abstractions.

use crate::action::{Action, MenuItem};
use crate::command::Event;
use crate::config::ConfigError;
use crate::geometry::{HotArea, Point, Rect, Size};
use std::sync::mpsc;

/// Access to the system cursor and the monitor layout.
///
/// Implementations must be fast and non-blocking: they are called on every
/// tick of the poller.
pub trait Pointer {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Current cursor position in virtual-desktop coordinates.
    fn cursor_position(&self) -> Result<Point, Self::Error>;

    /// Working area (monitor minus task bars) of the monitor containing
    /// `at`, or the nearest monitor if `at` is off every screen.
    fn work_area(&self, at: Point) -> Result<Rect, Self::Error>;

    /// Move the system cursor to `to`.
    fn set_cursor_position(&mut self, to: Point) -> Result<(), Self::Error>;
}

/// The fly-out window itself.
///
/// Drawing is entirely the implementation's business; the poller only asks
/// it to lay out the items, show at a position, and close.
pub trait Popup {
    /// The error type produced by this popup.
    type Error: std::error::Error + Send + 'static;

    /// Lay out `items` and return the size the popup wants to be.
    fn render(&mut self, items: &[MenuItem]) -> Result<Size, Self::Error>;

    /// Show the popup with its top-left corner at `at`.
    fn show(&mut self, at: Point) -> Result<(), Self::Error>;

    /// Close the popup.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// The on-screen rectangle, if the popup knows it (it may differ from the
    /// requested placement when the window system adjusts it).
    fn bounds(&self) -> Option<Rect>;

    /// Whether the popup is currently on screen.
    fn is_visible(&self) -> bool;
}

/// Where the hot area and menu come from.
///
/// Implementations may cache; [`reload`](ConfigSource::reload) drops the
/// cache.
pub trait ConfigSource {
    /// The hot area for the current polling cycle.
    fn hot_area(&self) -> HotArea;

    /// The menu entries, in display order.
    fn menu_items(&self) -> Vec<MenuItem>;

    /// Re-read the configuration.  On failure the previous values stay in
    /// effect.
    fn reload(&mut self) -> Result<(), ConfigError>;
}

/// Executes menu [`Action`]s.
pub trait ActionDispatcher {
    /// The error type produced by this dispatcher.
    type Error: std::error::Error + Send + 'static;

    /// Execute `action`.  [`Action::Exit`] never reaches the dispatcher; the
    /// router turns it into a shutdown.
    fn dispatch(&mut self, action: &Action) -> Result<(), Self::Error>;
}

//  Event Source

/// A producer of [`Event`]s.
///
/// Implementations listen on some transport (a TCP socket, a timer, an
/// in-memory channel) and forward what they receive into the provided
/// [`mpsc::Sender`].  The event loop drains that channel on the one thread
/// that owns the popup state.
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted,
///   the sink is closed, or an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Event`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error>;
}
