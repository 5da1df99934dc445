//! Events and commands shared by every component.
//!
//! [`Event`] is what travels over the channel into the event loop: timer
//! ticks, raw command tokens from the control channel, and notifications from
//! the popup layer.  [`ExternalCommand`] is the parsed form of a token.

use std::fmt;

/// Everything the event loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sample the cursor once.  Sent by the ticker at a fixed interval.
    Tick,
    /// A raw token from the control channel (`"show"`, `"reload"`, a menu
    /// label, …).
    Command(String),
    /// The popup went away on its own (an item was clicked, it lost focus,
    /// …).  The poller resets to hidden without closing it again.
    PopupClosed,
}

/// A command token after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalCommand {
    /// Open the popup at the cursor, bypassing the hot-zone test.
    Show,
    /// Drop cached configuration and read it again.
    Reload,
    /// Shut down.
    Quit,
    /// Anything else: the label of a menu item.
    Item(String),
}

impl ExternalCommand {
    /// Parse a token.  Keywords are matched case-insensitively after
    /// trimming; everything else is kept verbatim (trimmed) as an item label.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.to_ascii_lowercase().as_str() {
            "show" => ExternalCommand::Show,
            "reload" => ExternalCommand::Reload,
            "quit" | "exit" | "stop" => ExternalCommand::Quit,
            _ => ExternalCommand::Item(token.to_string()),
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalCommand::Show => write!(f, "show"),
            ExternalCommand::Reload => write!(f, "reload"),
            ExternalCommand::Quit => write!(f, "quit"),
            ExternalCommand::Item(label) => write!(f, "item {:?}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(ExternalCommand::parse("show"), ExternalCommand::Show);
        assert_eq!(ExternalCommand::parse("  SHOW\n"), ExternalCommand::Show);
        assert_eq!(ExternalCommand::parse("Reload"), ExternalCommand::Reload);
    }

    #[test]
    fn quit_aliases() {
        for t in ["quit", "exit", "stop", "STOP"] {
            assert_eq!(ExternalCommand::parse(t), ExternalCommand::Quit, "{}", t);
        }
    }

    #[test]
    fn other_tokens_are_item_labels() {
        assert_eq!(
            ExternalCommand::parse(" Desktop 2 "),
            ExternalCommand::Item("Desktop 2".into())
        );
    }

    #[test]
    fn display() {
        assert_eq!(ExternalCommand::Show.to_string(), "show");
        assert_eq!(
            ExternalCommand::Item("Terminal".into()).to_string(),
            r#"item "Terminal""#
        );
    }
}
