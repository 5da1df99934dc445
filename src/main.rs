//! Entry point for **edgeflyout**.
//!
//! `edgeflyout` runs the daemon.  `edgeflyout <token>` forwards the token
//! (`show`, `reload`, `quit` or a menu label) to the running daemon over the
//! control channel and prints its reply.

use edgeflyout::action::SystemDispatcher;
use edgeflyout::command::Event;
use edgeflyout::config::FileConfig;
use edgeflyout::event_loop::{spawn_ticker, EventLoop};
use edgeflyout::ipc::listener::TcpCommandListener;
use edgeflyout::ipc::send_command;
use edgeflyout::platform::headless::HeadlessPopup;
use edgeflyout::poller::EdgeTriggerPoller;
use edgeflyout::traits::{CommandSource, Pointer};
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the config directory: `%APPDATA%\edgeflyout` on Windows,
/// `$XDG_CONFIG_HOME/edgeflyout` (or `~/.config/edgeflyout`) elsewhere.
fn config_dir() -> PathBuf {
    let base = std::env::var("APPDATA")
        .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{}/.config", home)
        });
    PathBuf::from(base).join("edgeflyout")
}

//  Main

fn main() {
    env_logger::init();

    let config = FileConfig::open(config_dir().join("config.json"));

    match std::env::args().nth(1) {
        Some(token) => run_client(&config.config().ipc.address, &token),
        None => run_daemon(config),
    }
}

/// Forward one token to the running daemon.
fn run_client(addr: &str, token: &str) {
    match send_command(addr, token) {
        Ok(reply) => {
            println!("{}", reply);
            if reply.starts_with("error") {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("could not reach edgeflyout at {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

/// Normal daemon mode.
fn run_daemon(config: FileConfig) {
    #[cfg(windows)]
    let pointer = edgeflyout::platform::win32::Win32Pointer::new();
    #[cfg(not(windows))]
    let pointer = {
        info!("no native cursor backend on this platform, using a virtual 1920x1080 screen");
        edgeflyout::platform::virtual_pointer::VirtualPointer::single_full_hd()
    };

    start(pointer, config);
}

fn start<P: Pointer>(pointer: P, config: FileConfig) {
    let cfg = config.config().clone();

    let mut listener = match TcpCommandListener::bind(&cfg.ipc.address) {
        Ok(l) => l,
        Err(e) => {
            error!(
                "cannot listen on {} ({}); is another instance running?",
                cfg.ipc.address, e
            );
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel::<Event>();
    {
        let tx = tx.clone();
        std::thread::spawn(move || {
            if let Err(e) = listener.run(tx) {
                error!("command listener error: {}", e);
            }
        });
    }
    spawn_ticker(tx, cfg.poller.interval());

    let popup = HeadlessPopup::new(cfg.popup.clone());
    let poller = EdgeTriggerPoller::new(pointer, popup, config);
    info!(
        "watching the {} edge every {:?}",
        cfg.hot_area.edge,
        cfg.poller.interval()
    );

    EventLoop::new(poller, SystemDispatcher::new()).run(rx);
}
