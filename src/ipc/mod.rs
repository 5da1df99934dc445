//! Control channel.
//!
//! The daemon listens on a loopback TCP socket for newline-delimited command
//! tokens; [`send_command`] is the client side used by `edgeflyout <token>`
//! and by scripts.

pub mod listener;

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// How long the client waits for the daemon's reply.
const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors produced by the control channel.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("daemon closed the connection without replying")]
    NoReply,
}

/// Send one `token` to the daemon at `addr` and return its reply line
/// (`ok` or `error: …`).
pub fn send_command(addr: &str, token: &str) -> Result<String, IpcError> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(REPLY_TIMEOUT))?;
    writeln!(stream, "{}", token.trim())?;
    stream.shutdown(Shutdown::Write)?;

    let mut reply = String::new();
    if BufReader::new(stream).read_line(&mut reply)? == 0 {
        return Err(IpcError::NoReply);
    }
    Ok(reply.trim_end().to_string())
}
