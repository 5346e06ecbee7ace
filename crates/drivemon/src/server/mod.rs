//! Diff-push status server and its wire protocol.

mod addr;
mod diff;
mod net;
pub mod wire;

pub use addr::ServerAddr;
pub use diff::{DiffServer, TcpDiffServer};
pub use net::{Network, TcpNetwork};
