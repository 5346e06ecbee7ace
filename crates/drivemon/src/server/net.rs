//! Network seam for the diff server.
//!
//! The server is ticked from a cooperative single-threaded loop, so every
//! primitive here must return immediately. `TcpNetwork` is the production
//! implementation over non-blocking `std::net` sockets; tests substitute an
//! in-memory fake.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use tracing::debug;

/// Non-blocking socket primitives consumed by the diff server.
pub trait Network {
    type Listener;
    type Client;

    /// Bind a listening socket.
    fn listen(&mut self, addr: SocketAddr) -> std::io::Result<Self::Listener>;

    /// Address the listener actually bound to, when known.
    fn local_addr(&self, listener: &Self::Listener) -> Option<SocketAddr>;

    /// Accept one pending connection, if any.
    fn poll_accept(&mut self, listener: &mut Self::Listener) -> Option<Self::Client>;

    /// Drain and discard any input from the client; report whether the peer
    /// has hung up (EOF or a hard error). The protocol is output-only, so
    /// received bytes carry no meaning.
    fn poll_hangup(&mut self, client: &mut Self::Client) -> bool;

    /// Fire-and-forget send. Failures are not reported back; disconnects
    /// are only observed through `poll_hangup`.
    fn send(&mut self, client: &mut Self::Client, line: &str);
}

/// `std::net` implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpNetwork;

impl Network for TcpNetwork {
    type Listener = TcpListener;
    type Client = TcpStream;

    fn listen(&mut self, addr: SocketAddr) -> std::io::Result<TcpListener> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(listener)
    }

    fn local_addr(&self, listener: &TcpListener) -> Option<SocketAddr> {
        listener.local_addr().ok()
    }

    fn poll_accept(&mut self, listener: &mut TcpListener) -> Option<TcpStream> {
        match listener.accept() {
            Ok((stream, peer)) => match stream.set_nonblocking(true) {
                Ok(()) => {
                    debug!("Client connected: {}", peer);
                    Some(stream)
                }
                Err(e) => {
                    debug!("Dropping client {}: {}", peer, e);
                    None
                }
            },
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => None,
            Err(e) => {
                debug!("Accept failed: {}", e);
                None
            }
        }
    }

    fn poll_hangup(&mut self, client: &mut TcpStream) -> bool {
        let mut scratch = [0u8; 64];
        loop {
            match client.read(&mut scratch) {
                Ok(0) => return true,
                Ok(_) => continue,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => return false,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Client read error: {}", e);
                    return true;
                }
            }
        }
    }

    fn send(&mut self, client: &mut TcpStream, line: &str) {
        if let Err(e) = client.write_all(line.as_bytes()) {
            debug!("Send failed: {}", e);
        }
    }
}
