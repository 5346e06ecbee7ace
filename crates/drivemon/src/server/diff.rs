//! Diff-push status server.
//!
//! Owns the listening socket, at most one client, and the per-unit cache of
//! the last record delivered to that client. Ticked once per emulation
//! cycle via [`DiffServer::poll`]; nothing in here ever blocks.

use std::mem;

use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::hardware::DriveHardware;
use crate::server::addr::ServerAddr;
use crate::server::net::{Network, TcpNetwork};
use crate::server::wire;
use crate::status::{SnapshotAssembler, StatusRecord};
use crate::unit::NUM_UNITS;

/// Last record delivered to the connected client, per unit. `None` marks an
/// invalid entry (nothing delivered yet, or the unit went inactive).
#[derive(Debug, Clone, Copy, Default)]
struct DeliveredCache {
    entries: [Option<StatusRecord>; NUM_UNITS],
}

impl DeliveredCache {
    fn get(&self, unit: usize) -> Option<&StatusRecord> {
        self.entries.get(unit).and_then(|e| e.as_ref())
    }

    fn store(&mut self, unit: usize, record: StatusRecord) {
        if let Some(entry) = self.entries.get_mut(unit) {
            *entry = Some(record);
        }
    }

    fn invalidate(&mut self, unit: usize) {
        if let Some(entry) = self.entries.get_mut(unit) {
            *entry = None;
        }
    }
}

/// Connection lifecycle state. The delivered cache only exists while a
/// client is connected; dropping the state drops the sockets.
enum State<N: Network> {
    Disabled,
    Listening {
        listener: N::Listener,
    },
    Connected {
        listener: N::Listener,
        client: N::Client,
        delivered: DeliveredCache,
    },
}

/// Diff server over plain TCP.
pub type TcpDiffServer = DiffServer<TcpNetwork>;

/// Single-client status push server.
///
/// Lifecycle: `Disabled -> Listening -> Connected`, driven by
/// [`enable`](DiffServer::enable) / [`disable`](DiffServer::disable) and by
/// what [`poll`](DiffServer::poll) observes on the sockets. A new incoming
/// connection always evicts the current client.
pub struct DiffServer<N: Network> {
    net: N,
    address: ServerAddr,
    state: State<N>,
}

impl DiffServer<TcpNetwork> {
    pub fn new(address: ServerAddr) -> Self {
        Self::with_network(TcpNetwork, address)
    }
}

impl<N: Network> DiffServer<N> {
    /// Create a disabled server with an injected network implementation.
    pub fn with_network(net: N, address: ServerAddr) -> Self {
        Self {
            net,
            address,
            state: State::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, State::Disabled)
    }

    pub fn has_client(&self) -> bool {
        matches!(self.state, State::Connected { .. })
    }

    pub fn address(&self) -> &ServerAddr {
        &self.address
    }

    /// Address the listener actually bound to. Mostly useful when binding
    /// to port 0.
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        match &self.state {
            State::Disabled => None,
            State::Listening { listener } | State::Connected { listener, .. } => {
                self.net.local_addr(listener)
            }
        }
    }

    /// `Disabled -> Listening`. On bind failure the error is logged and the
    /// server stays disabled. Enabling an already enabled server is a no-op.
    pub fn enable(&mut self) -> Result<()> {
        if self.is_enabled() {
            return Ok(());
        }
        match self.net.listen(self.address.socket()) {
            Ok(listener) => {
                info!("Status server listening on {}", self.address);
                self.state = State::Listening { listener };
                Ok(())
            }
            Err(e) => {
                error!("Could not start status server on {}: {}", self.address, e);
                Err(Error::Bind {
                    address: self.address.spec().to_string(),
                    source: e,
                })
            }
        }
    }

    /// Tear down the listener and any connected client.
    pub fn disable(&mut self) {
        if self.is_enabled() {
            info!("Status server stopped");
        }
        self.state = State::Disabled;
    }

    /// Record a new bind address. If the server is currently enabled it is
    /// torn down and re-activated on the new address.
    pub fn change_address(&mut self, address: ServerAddr) -> Result<()> {
        if address == self.address {
            return Ok(());
        }
        let was_enabled = self.is_enabled();
        self.state = State::Disabled;
        self.address = address;
        if was_enabled {
            self.enable()
        } else {
            Ok(())
        }
    }

    /// Apply the configuration surface: address first, then the enable
    /// switch. Activation failures are logged and returned, never fatal to
    /// the caller's loop.
    pub fn apply_config(&mut self, config: &ServerConfig) -> Result<()> {
        let address = match ServerAddr::parse(&config.address) {
            Ok(address) => address,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };
        self.change_address(address)?;
        if config.enabled {
            self.enable()
        } else {
            self.disable();
            Ok(())
        }
    }

    /// Run one cooperative cycle: admit or evict clients, detect hangups,
    /// then push every changed record.
    pub fn poll<H: DriveHardware>(&mut self, drives: &mut SnapshotAssembler<'_, H>) {
        self.accept_phase(drives);
        self.hangup_phase();
        self.push_phase(drives);
    }

    fn accept_phase<H: DriveHardware>(&mut self, drives: &mut SnapshotAssembler<'_, H>) {
        let state = mem::replace(&mut self.state, State::Disabled);
        self.state = match state {
            State::Disabled => State::Disabled,
            State::Listening { mut listener } => match self.net.poll_accept(&mut listener) {
                Some(client) => self.admit(listener, client, drives),
                None => State::Listening { listener },
            },
            State::Connected {
                mut listener,
                client,
                delivered,
            } => match self.net.poll_accept(&mut listener) {
                Some(new_client) => {
                    debug!("Evicting connected client for a new connection");
                    drop(client);
                    self.admit(listener, new_client, drives)
                }
                None => State::Connected {
                    listener,
                    client,
                    delivered,
                },
            },
        };
    }

    /// Initial full push for a freshly admitted client: one line per active
    /// unit with the step flag consumed, or a single error line when no
    /// unit is active at all.
    fn admit<H: DriveHardware>(
        &mut self,
        listener: N::Listener,
        mut client: N::Client,
        drives: &mut SnapshotAssembler<'_, H>,
    ) -> State<N> {
        let mut delivered = DeliveredCache::default();
        let mut any_active = false;

        for unit in 0..NUM_UNITS {
            let Some(mut record) = drives.take_snapshot(unit) else {
                continue;
            };
            any_active = true;
            // The connect baseline consumes any pending step without
            // reporting it; steps only show up as diffs later.
            record.step_event = false;
            self.net.send(&mut client, &wire::status_line(&record));
            delivered.store(unit, record);
        }

        if !any_active {
            self.net.send(&mut client, wire::INVALID_DRIVE_LINE);
        }

        State::Connected {
            listener,
            client,
            delivered,
        }
    }

    fn hangup_phase(&mut self) {
        let Self { net, state, .. } = self;
        let hangup = match state {
            State::Connected { client, .. } => net.poll_hangup(client),
            _ => false,
        };
        if hangup {
            debug!("Client disconnected");
            let old = mem::replace(state, State::Disabled);
            if let State::Connected { listener, .. } = old {
                *state = State::Listening { listener };
            }
        }
    }

    fn push_phase<H: DriveHardware>(&mut self, drives: &mut SnapshotAssembler<'_, H>) {
        let Self { net, state, .. } = self;
        let State::Connected {
            client, delivered, ..
        } = state
        else {
            return;
        };

        for unit in 0..NUM_UNITS {
            match drives.snapshot(unit) {
                None => {
                    // Report a unit going inactive exactly once.
                    if delivered.get(unit).is_some() {
                        net.send(client, wire::INVALID_DRIVE_LINE);
                        delivered.invalidate(unit);
                    }
                }
                Some(record) => {
                    let unchanged = delivered.get(unit).is_some_and(|prev| *prev == record);
                    if unchanged {
                        continue;
                    }
                    net.send(client, &wire::status_line(&record));
                    debug!(
                        "Pushed drive {}: {} on track {}",
                        record.drive_num, record.rw_mode, record.track
                    );

                    let mut stored = record;
                    if stored.step_event {
                        // Reset the one-shot flag in the registry now that
                        // the step has been delivered.
                        drives.take_snapshot(unit);
                        stored.step_event = false;
                    }
                    delivered.store(unit, stored);
                }
            }
        }
    }
}
