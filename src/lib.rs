//! **edgeflyout**: a fly-out menu that opens when the cursor touches a
//! configured stretch of a screen edge.
//!
//! A ticker samples the cursor at a fixed interval.  When it enters the hot
//! zone the popup opens next to the edge; it closes again once the cursor
//! has wandered well away from it.  While open, an optional mouse catcher
//! keeps the cursor from slipping off the edge side of the popup.
//!
//! # Architecture
//!
//! Everything that touches state runs on one thread:
//!
//! * [`poller::EdgeTriggerPoller`] owns the popup state, the
//!   [`positioner::MenuPositioner`] and the [`catcher::MouseCatchController`].
//! * [`router::CommandRouter`] turns tokens from the control channel into
//!   poller calls and menu actions.
//! * [`event_loop::EventLoop`] feeds both from a single channel of
//!   [`command::Event`]s.
//!
//! The operating system, the popup window and the transport are behind the
//! traits in [`traits`].  Backends live in [`platform`] (Win32 cursor, an
//! in-memory pointer, a headless popup) and [`ipc`] (TCP command listener).

pub mod action;
pub mod catcher;
pub mod command;
pub mod config;
pub mod event_loop;
pub mod geometry;
pub mod ipc;
pub mod platform;
pub mod poller;
pub mod positioner;
pub mod router;
pub mod traits;
