//! Bind address specs.
//!
//! The configuration surface carries addresses as strings in the form
//! `ip4://HOST:PORT`, `ip6://[HOST]:PORT`, or bare `HOST:PORT`. Parsing
//! resolves them to a concrete socket address up front so that activation
//! failures are reported against the original spec string.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Error, Result};

/// A parsed server bind address, keeping the original spec string around
/// for display and config round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    spec: String,
    socket: SocketAddr,
}

impl ServerAddr {
    /// Parse an address spec.
    ///
    /// An `ip4://` or `ip6://` prefix restricts the resolved address to
    /// that family; a bare `HOST:PORT` takes whatever resolves first.
    pub fn parse(spec: &str) -> Result<Self> {
        let (rest, want_v4, want_v6) = if let Some(rest) = spec.strip_prefix("ip4://") {
            (rest, true, false)
        } else if let Some(rest) = spec.strip_prefix("ip6://") {
            (rest, false, true)
        } else {
            (spec, false, false)
        };

        let parse_err = |reason: String| Error::AddressParse {
            address: spec.to_string(),
            reason,
        };

        let mut candidates = rest
            .to_socket_addrs()
            .map_err(|e| parse_err(e.to_string()))?;

        let socket = candidates
            .find(|addr| {
                if want_v4 {
                    addr.is_ipv4()
                } else if want_v6 {
                    addr.is_ipv6()
                } else {
                    true
                }
            })
            .ok_or_else(|| parse_err("no address of the requested family".to_string()))?;

        Ok(Self {
            spec: spec.to_string(),
            socket,
        })
    }

    /// The resolved socket address.
    pub fn socket(&self) -> SocketAddr {
        self.socket
    }

    /// The original spec string.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec)
    }
}
