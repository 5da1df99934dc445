//! Turns command tokens from the control channel into poller calls and menu
//! actions.
//!
//! Tokens never act on the thread they arrive on: the listener only enqueues
//! them as [`Event::Command`](crate::command::Event::Command), and the event
//! loop hands them to [`CommandRouter::route`] on the thread that owns the
//! poller.  The same token repeated before the next tick is dropped, so a
//! burst of identical commands acts once.

use crate::action::Action;
use crate::command::ExternalCommand;
use crate::config::ConfigError;
use crate::poller::{EdgeTriggerPoller, PollError};
use crate::traits::{ActionDispatcher, ConfigSource, Pointer, Popup};
use log::{debug, info, warn};

/// What routing a token did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The popup was opened.
    Shown,
    /// `show` arrived while the popup was already open.
    AlreadyVisible,
    /// The configuration was re-read.
    Reloaded,
    /// The caller should shut down.
    Quit,
    /// The menu item with this label was executed.
    Dispatched(String),
    /// Same token as the previous one within this tick; ignored.
    Duplicate,
}

/// Errors from routing a token.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no menu item labelled {0:?}")]
    UnknownItem(String),
    #[error("action {label:?} failed: {reason}")]
    Dispatch { label: String, reason: String },
    #[error(transparent)]
    Reload(#[from] ConfigError),
    #[error(transparent)]
    Poller(#[from] PollError),
}

/// Routes command tokens.
#[derive(Debug, Default)]
pub struct CommandRouter {
    /// Last token routed since the previous tick.
    last: Option<String>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new scheduling window; a repeated token is accepted again.
    pub fn on_tick(&mut self) {
        self.last = None;
    }

    /// Route one token.
    pub fn route<P, U, C, D>(
        &mut self,
        token: &str,
        poller: &mut EdgeTriggerPoller<P, U, C>,
        dispatcher: &mut D,
    ) -> Result<RouteOutcome, RouteError>
    where
        P: Pointer,
        U: Popup,
        C: ConfigSource,
        D: ActionDispatcher,
    {
        let token = token.trim();
        if self.last.as_deref() == Some(token) {
            debug!("dropping repeated command {:?}", token);
            return Ok(RouteOutcome::Duplicate);
        }
        self.last = Some(token.to_string());

        let cmd = ExternalCommand::parse(token);
        info!("command: {}", cmd);
        match cmd {
            ExternalCommand::Show => {
                if poller.force_show()? {
                    Ok(RouteOutcome::Shown)
                } else {
                    Ok(RouteOutcome::AlreadyVisible)
                }
            }
            ExternalCommand::Reload => {
                poller.config_mut().reload()?;
                Ok(RouteOutcome::Reloaded)
            }
            ExternalCommand::Quit => Ok(RouteOutcome::Quit),
            ExternalCommand::Item(label) => Self::run_item(&label, poller, dispatcher),
        }
    }

    fn run_item<P, U, C, D>(
        label: &str,
        poller: &mut EdgeTriggerPoller<P, U, C>,
        dispatcher: &mut D,
    ) -> Result<RouteOutcome, RouteError>
    where
        P: Pointer,
        U: Popup,
        C: ConfigSource,
        D: ActionDispatcher,
    {
        let items = poller.config().menu_items();
        let item = items
            .iter()
            .find(|i| i.label == label)
            .or_else(|| items.iter().find(|i| i.label.eq_ignore_ascii_case(label)))
            .ok_or_else(|| RouteError::UnknownItem(label.to_string()))?;

        if item.action == Action::Exit {
            return Ok(RouteOutcome::Quit);
        }

        // The menu goes away once an entry has been chosen, whether or not
        // the action works out.
        if let Err(e) = poller.close() {
            warn!("closing popup after {:?}: {}", item.label, e);
        }
        dispatcher
            .dispatch(&item.action)
            .map_err(|e| RouteError::Dispatch {
                label: item.label.clone(),
                reason: e.to_string(),
            })?;
        Ok(RouteOutcome::Dispatched(item.label.clone()))
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MenuItem;
    use crate::config::{Config, PopupConfig};
    use crate::geometry::{Edge, HotArea, Point};
    use crate::platform::headless::HeadlessPopup;
    use crate::platform::virtual_pointer::VirtualPointer;
    use crate::poller::PopupState;

    type TestPoller = EdgeTriggerPoller<VirtualPointer, HeadlessPopup, Config>;

    /// Records every action; fails on `Shortcut`.
    #[derive(Debug, Default)]
    struct RecorderDispatcher {
        actions: Vec<Action>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recorder error")]
    struct RecorderErr;

    impl ActionDispatcher for RecorderDispatcher {
        type Error = RecorderErr;

        fn dispatch(&mut self, action: &Action) -> Result<(), RecorderErr> {
            if matches!(action, Action::Shortcut(_)) {
                return Err(RecorderErr);
            }
            self.actions.push(action.clone());
            Ok(())
        }
    }

    fn poller() -> TestPoller {
        let cfg = Config {
            hot_area: HotArea {
                edge: Edge::Top,
                catch_mouse: false,
                ..HotArea::default()
            },
            items: vec![
                MenuItem::new("Desktop 2", Action::SwitchTo(1)),
                MenuItem::new("Terminal", Action::Run("wt.exe".into())),
                MenuItem::new("Peek", Action::Shortcut("win+d".into())),
                MenuItem::new("Bye", Action::Exit),
            ],
            ..Config::default()
        };
        let mut pointer = VirtualPointer::single_full_hd();
        pointer.move_to(Point::new(800, 400));
        EdgeTriggerPoller::new(pointer, HeadlessPopup::new(PopupConfig::default()), cfg)
    }

    #[test]
    fn show_opens_and_is_idempotent() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        assert_eq!(r.route("show", &mut p, &mut d).unwrap(), RouteOutcome::Shown);
        assert_eq!(p.state(), PopupState::Visible);
        let bounds = p.popup_bounds();

        r.on_tick();
        assert_eq!(
            r.route("SHOW", &mut p, &mut d).unwrap(),
            RouteOutcome::AlreadyVisible
        );
        assert_eq!(p.popup_bounds(), bounds);
        assert_eq!(p.popup().show_count(), 1);
    }

    #[test]
    fn repeated_token_within_a_tick_acts_once() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        assert_eq!(
            r.route("Terminal", &mut p, &mut d).unwrap(),
            RouteOutcome::Dispatched("Terminal".into())
        );
        assert_eq!(
            r.route(" Terminal ", &mut p, &mut d).unwrap(),
            RouteOutcome::Duplicate
        );
        assert_eq!(d.actions.len(), 1);

        r.on_tick();
        r.route("Terminal", &mut p, &mut d).unwrap();
        assert_eq!(d.actions.len(), 2);
    }

    #[test]
    fn quit_aliases() {
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        for t in ["quit", "exit", "Stop"] {
            let mut r = CommandRouter::new();
            assert_eq!(r.route(t, &mut p, &mut d).unwrap(), RouteOutcome::Quit);
        }
    }

    #[test]
    fn exit_item_quits_without_dispatching() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        assert_eq!(r.route("Bye", &mut p, &mut d).unwrap(), RouteOutcome::Quit);
        assert!(d.actions.is_empty());
    }

    #[test]
    fn item_lookup_falls_back_to_case_insensitive() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        assert_eq!(
            r.route("desktop 2", &mut p, &mut d).unwrap(),
            RouteOutcome::Dispatched("Desktop 2".into())
        );
        assert_eq!(d.actions, vec![Action::SwitchTo(1)]);
    }

    #[test]
    fn executing_an_item_closes_the_popup() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        r.route("show", &mut p, &mut d).unwrap();
        r.route("Terminal", &mut p, &mut d).unwrap();
        assert_eq!(p.state(), PopupState::Hidden);
        assert!(!p.popup().is_visible());
    }

    #[test]
    fn unknown_item_is_an_error() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        let err = r.route("Nope", &mut p, &mut d).unwrap_err();
        assert!(matches!(err, RouteError::UnknownItem(ref l) if l == "Nope"));
    }

    #[test]
    fn dispatch_failure_is_reported() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        let err = r.route("Peek", &mut p, &mut d).unwrap_err();
        assert!(matches!(err, RouteError::Dispatch { ref label, .. } if label == "Peek"));
    }

    #[test]
    fn reload_on_static_config_succeeds() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        assert_eq!(r.route("reload", &mut p, &mut d).unwrap(), RouteOutcome::Reloaded);
    }

    #[test]
    fn show_failure_surfaces_as_poller_error() {
        let mut r = CommandRouter::new();
        let mut p = poller();
        let mut d = RecorderDispatcher::default();
        p.pointer_mut().fail_next(1);
        let err = r.route("show", &mut p, &mut d).unwrap_err();
        assert!(matches!(err, RouteError::Poller(_)));
        assert_eq!(p.state(), PopupState::Hidden);
    }
}
