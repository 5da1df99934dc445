//! TCP [`CommandSource`] implementation.
//!
//! Binds a loopback TCP socket and accepts one connection at a time.
//! Each line received is one command token.
//!
//! # Wire format
//!
//! Every message is a single line of UTF-8 followed by `\n`:
//!
//! ```text
//! show
//! reload
//! Desktop 2
//! quit
//! ```
//!
//! Every non-empty line is answered with one line: `ok` once the token has
//! been queued for the event loop, or `error: <reason>` when it could not
//! be.  `ok` does not mean the command succeeded; it runs later, on the
//! event loop thread.

use crate::command::Event;
use crate::ipc::IpcError;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a TCP socket for command tokens.
///
/// The socket is bound in [`bind`](Self::bind), so a second instance fails
/// right away instead of on its listener thread.
pub struct TcpCommandListener {
    listener: TcpListener,
}

impl TcpCommandListener {
    /// Bind to `addr`.  Use port 0 to let the OS pick one.
    pub fn bind(addr: &str) -> Result<Self, IpcError> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr, IpcError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve one client.  Returns `false` when the sink is closed and the
    /// listener should stop.
    fn serve(&self, stream: TcpStream, sink: &mpsc::Sender<Event>) -> bool {
        let mut writer = match stream.try_clone() {
            Ok(w) => w,
            Err(e) => {
                error!("cannot reply to client: {}", e);
                return true;
            }
        };
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            let text = match line {
                Ok(text) => text,
                Err(e) => {
                    error!("read error: {}", e);
                    break;
                }
            };
            let token = text.trim();
            if token.is_empty() {
                continue;
            }
            debug!("received {:?}", token);
            let open = sink.send(Event::Command(token.to_string())).is_ok();
            let reply = if open {
                "ok\n"
            } else {
                "error: event loop closed\n"
            };
            if let Err(e) = writer.write_all(reply.as_bytes()) {
                debug!("client went away before reply: {}", e);
            }
            if !open {
                info!("sink closed, shutting down");
                return false;
            }
        }
        true
    }
}

impl CommandSource for TcpCommandListener {
    type Error = IpcError;

    /// Accept connections and forward every token.
    ///
    /// This method **blocks** until the event loop goes away.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        info!("listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    if !self.serve(stream, &sink) {
                        return Ok(());
                    }
                    debug!("client disconnected");
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }
        Ok(())
    }
}

//  Tests
