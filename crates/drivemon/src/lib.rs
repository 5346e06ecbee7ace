//! # drivemon
//!
//! Live status monitoring for emulated disk drives.
//!
//! This crate provides:
//! - A per-unit status registry (cached motor state, one-shot step events)
//! - Snapshot assembly combining cached state with a live hardware readout
//! - A single-client, diff-based push server speaking a minimal line protocol
//! - A simulated drive bank for tests and front-end development
//!
//! The server is cooperative: the host ticks [`DiffServer::poll`] once per
//! emulation cycle, and no call ever blocks. External tooling (overlays,
//! front-ends, test harnesses) connects over TCP and receives one line per
//! drive whenever that drive's observable state changes.

pub mod config;
pub mod error;
pub mod hardware;
pub mod server;
pub mod sim;
pub mod status;
pub mod unit;

pub use config::{Config, DEFAULT_ADDRESS, ServerConfig};
pub use error::{Error, Result};
pub use hardware::DriveHardware;
pub use server::{DiffServer, Network, ServerAddr, TcpDiffServer, TcpNetwork};
pub use sim::SimulatedDrives;
pub use status::{MotorCache, RwMode, SnapshotAssembler, StatusRecord, StatusRegistry};
pub use unit::{FIRST_DRIVE_NUM, NUM_UNITS, drive_to_unit, unit_to_drive};
