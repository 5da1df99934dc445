//! The single-threaded event loop.
//!
//! All state lives on one thread.  Other threads only produce [`Event`]s:
//! [`spawn_ticker`] sends a [`Event::Tick`] at a fixed interval and the
//! command listener forwards tokens.  [`EventLoop::run`] drains the channel
//! in arrival order, so a tick and a command never interleave.

use crate::command::Event;
use crate::poller::{EdgeTriggerPoller, TickOutcome};
use crate::router::{CommandRouter, RouteOutcome};
use crate::traits::{ActionDispatcher, ConfigSource, Pointer, Popup};
use log::{debug, info, warn};
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Send [`Event::Tick`] into `tx` every `interval` until the receiving end
/// goes away.
pub fn spawn_ticker(tx: mpsc::Sender<Event>, interval: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || loop {
        std::thread::sleep(interval);
        if tx.send(Event::Tick).is_err() {
            debug!("event loop gone, ticker stopping");
            return;
        }
    })
}

/// Owns the poller and routes every event to it.
pub struct EventLoop<P, U, C, D>
where
    P: Pointer,
    U: Popup,
    C: ConfigSource,
    D: ActionDispatcher,
{
    poller: EdgeTriggerPoller<P, U, C>,
    router: CommandRouter,
    dispatcher: D,
}

impl<P, U, C, D> EventLoop<P, U, C, D>
where
    P: Pointer,
    U: Popup,
    C: ConfigSource,
    D: ActionDispatcher,
{
    pub fn new(poller: EdgeTriggerPoller<P, U, C>, dispatcher: D) -> Self {
        Self {
            poller,
            router: CommandRouter::new(),
            dispatcher,
        }
    }

    pub fn poller(&self) -> &EdgeTriggerPoller<P, U, C> {
        &self.poller
    }

    pub fn poller_mut(&mut self) -> &mut EdgeTriggerPoller<P, U, C> {
        &mut self.poller
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// React to one event.  Returns [`ControlFlow::Break`] when the loop
    /// should stop.
    pub fn handle(&mut self, event: Event) -> ControlFlow<()> {
        match event {
            Event::Tick => {
                self.router.on_tick();
                match self.poller.tick() {
                    TickOutcome::Idle | TickOutcome::Held => {}
                    outcome => debug!("tick: {:?}", outcome),
                }
            }
            Event::Command(token) => {
                match self
                    .router
                    .route(&token, &mut self.poller, &mut self.dispatcher)
                {
                    Ok(RouteOutcome::Quit) => {
                        info!("quit requested");
                        return ControlFlow::Break(());
                    }
                    Ok(outcome) => debug!("{:?} -> {:?}", token, outcome),
                    Err(e) => warn!("command {:?} failed: {}", token, e),
                }
            }
            Event::PopupClosed => self.poller.notify_closed(),
        }
        ControlFlow::Continue(())
    }

    /// Process events until a quit command arrives or every sender is gone.
    pub fn run(&mut self, rx: mpsc::Receiver<Event>) {
        info!("edgeflyout running");
        for event in rx {
            if self.handle(event).is_break() {
                break;
            }
        }
        if let Err(e) = self.poller.close() {
            warn!("closing popup on shutdown: {}", e);
        }
        info!("event loop stopped");
    }
}

//  Tests
