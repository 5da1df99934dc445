//! The edge-trigger state machine.
//!
//! [`EdgeTriggerPoller`] samples the cursor once per tick and decides
//! whether the fly-out should open, stay open, or close.  It owns the only
//! [`PopupState`] in the process together with the positioner (popup bounds)
//! and the mouse catcher, so nothing else can change them behind its back.
//!
//! # One tick
//!
//! 1. Read the cursor and the work area of the monitor it is on.
//! 2. Read the current [`HotArea`] from the config source.
//! 3. Cursor in the hot zone: open if hidden; if already visible, stay open
//!    without running the close test.
//! 4. Cursor outside the hot zone while visible: close once it has left the
//!    popup bounds padded by [`HIDE_PADDING`].
//! 5. Still visible: let the mouse catcher correct the cursor.
//!
//! A tick never fails.  Errors from the pointer or the popup are logged and
//! the tick is reported as [`TickOutcome::Skipped`] with no state change;
//! the next tick simply tries again.

use crate::catcher::MouseCatchController;
use crate::geometry::{is_in_hot_zone, HotArea, Point, Rect, HIDE_PADDING};
use crate::positioner::MenuPositioner;
use crate::traits::{ConfigSource, Pointer, Popup};
use log::{debug, info, warn};

/// Visibility of the fly-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Hidden and staying hidden.
    Idle,
    /// The popup opened with these bounds.
    Opened(Rect),
    /// Visible and staying visible; the cursor was not touched.
    Held,
    /// Visible and staying visible; the cursor was moved out of the catch
    /// strip to this point.
    Caught(Point),
    /// The popup closed.
    Closed,
    /// Something failed; state is unchanged.
    Skipped,
}

/// Possible errors inside a tick.  They never leave [`EdgeTriggerPoller::tick`].
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// Querying or moving the cursor failed.
    #[error("pointer error: {0}")]
    Pointer(String),
    /// The popup failed to render, show or close.
    #[error("popup error: {0}")]
    Popup(String),
}

/// Orchestrates hot-zone detection, placement and mouse catching.
///
/// Generic over the [`Pointer`], [`Popup`] and [`ConfigSource`]
/// implementations, so the state machine runs the same against Win32, an
/// in-memory pointer, or a test double.
pub struct EdgeTriggerPoller<P: Pointer, U: Popup, C: ConfigSource> {
    pointer: P,
    popup: U,
    config: C,
    state: PopupState,
    positioner: MenuPositioner,
    catcher: MouseCatchController,
}

impl<P: Pointer, U: Popup, C: ConfigSource> EdgeTriggerPoller<P, U, C> {
    /// Create a poller in the [`Hidden`](PopupState::Hidden) state.
    pub fn new(pointer: P, popup: U, config: C) -> Self {
        Self {
            pointer,
            popup,
            config,
            state: PopupState::Hidden,
            positioner: MenuPositioner::new(),
            catcher: MouseCatchController::new(),
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Bounds of the popup on screen, `None` while hidden.
    pub fn popup_bounds(&self) -> Option<Rect> {
        self.positioner.bounds()
    }

    /// Whether the mouse catcher is armed.
    pub fn is_catching(&self) -> bool {
        self.catcher.is_enabled()
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut P {
        &mut self.pointer
    }

    pub fn popup(&self) -> &U {
        &self.popup
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }

    /// Run one polling cycle.  Never fails; see the module docs.
    pub fn tick(&mut self) -> TickOutcome {
        match self.try_tick() {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("tick skipped: {}", e);
                TickOutcome::Skipped
            }
        }
    }

    fn try_tick(&mut self) -> Result<TickOutcome, PollError> {
        let (cursor, screen) = self.sample()?;
        let area = self.config.hot_area().normalized();

        if is_in_hot_zone(cursor, screen, &area) {
            if self.state == PopupState::Hidden {
                let bounds = self.open(cursor, screen, &area, false)?;
                return Ok(TickOutcome::Opened(bounds));
            }
            // Re-entering the hot zone keeps the popup open; no close test.
            return self.catch(cursor, &area);
        }

        if self.state == PopupState::Hidden {
            return Ok(TickOutcome::Idle);
        }

        let inside = self
            .positioner
            .bounds()
            .map(|b| b.inflate(HIDE_PADDING, HIDE_PADDING).contains(cursor))
            .unwrap_or(false);
        if !inside {
            self.hide()?;
            return Ok(TickOutcome::Closed);
        }
        self.catch(cursor, &area)
    }

    /// Open the popup at the cursor regardless of the hot zone.
    ///
    /// The popup's top-left corner goes to the cursor (clamped to the
    /// screen), so the cursor starts out inside it.  The mouse catcher stays
    /// disarmed and the cursor is never moved.  Returns `Ok(false)` without
    /// touching anything when the popup is already visible.
    pub fn force_show(&mut self) -> Result<bool, PollError> {
        if self.state == PopupState::Visible {
            debug!("show requested while visible, ignoring");
            return Ok(false);
        }
        let (cursor, screen) = self.sample()?;
        let area = self.config.hot_area().normalized();
        self.open(cursor, screen, &area, true)?;
        Ok(true)
    }

    /// Close the popup on request.  Returns `Ok(false)` when it was already
    /// hidden.
    pub fn close(&mut self) -> Result<bool, PollError> {
        if self.state == PopupState::Hidden {
            return Ok(false);
        }
        self.hide()?;
        Ok(true)
    }

    /// The popup closed by itself.  Reset to hidden without asking the popup
    /// to close again.
    pub fn notify_closed(&mut self) {
        if self.state == PopupState::Visible {
            info!("popup closed externally");
        }
        self.reset();
    }

    //  internals

    fn sample(&self) -> Result<(Point, Rect), PollError> {
        let cursor = self
            .pointer
            .cursor_position()
            .map_err(|e| PollError::Pointer(e.to_string()))?;
        let screen = self
            .pointer
            .work_area(cursor)
            .map_err(|e| PollError::Pointer(e.to_string()))?;
        Ok((cursor, screen))
    }

    fn open(
        &mut self,
        cursor: Point,
        screen: Rect,
        area: &HotArea,
        at_cursor: bool,
    ) -> Result<Rect, PollError> {
        let items = self.config.menu_items();
        let size = self
            .popup
            .render(&items)
            .map_err(|e| PollError::Popup(e.to_string()))?;
        let placement = if at_cursor {
            self.positioner.place_at_cursor(size, cursor, screen)
        } else {
            self.positioner.place(size, cursor, screen, area.edge)
        };
        self.popup
            .show(placement.origin)
            .map_err(|e| PollError::Popup(e.to_string()))?;

        let bounds = self.popup.bounds().unwrap_or(placement.bounds);
        self.positioner.publish(bounds);
        self.state = PopupState::Visible;
        info!("popup opened from {} edge at {} (cursor {})", area.edge, bounds, cursor);

        if let Some(to) = placement.nudge {
            if let Err(e) = self.pointer.set_cursor_position(to) {
                warn!("could not nudge cursor into popup: {}", e);
            }
        }
        // A popup opened on request is not attached to any screen edge.
        if area.catch_mouse && !at_cursor {
            self.catcher.enable(bounds, area.edge);
        }
        Ok(bounds)
    }

    fn hide(&mut self) -> Result<(), PollError> {
        if self.popup.is_visible() {
            self.popup
                .close()
                .map_err(|e| PollError::Popup(e.to_string()))?;
        }
        info!("popup hidden");
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.state = PopupState::Hidden;
        self.positioner.clear();
        self.catcher.disable();
    }

    fn catch(&mut self, cursor: Point, area: &HotArea) -> Result<TickOutcome, PollError> {
        let moved = self
            .catcher
            .update_catch(cursor, area, &mut self.pointer)
            .map_err(|e| PollError::Pointer(e.to_string()))?;
        Ok(match moved {
            Some(to) => TickOutcome::Caught(to),
            None => TickOutcome::Held,
        })
    }
}

//  Tests
