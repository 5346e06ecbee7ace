//! Status tracking: registry cache, record type, snapshot assembly.

mod assembler;
mod record;
mod registry;

pub use assembler::SnapshotAssembler;
pub use record::{RwMode, StatusRecord, track_from_half_track};
pub use registry::{MotorCache, StatusRegistry};
