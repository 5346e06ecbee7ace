//! Canonical per-unit status record.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Read/write mode reported on the wire.
///
/// `Idle` whenever the motor is off. With the motor on, the drive's raw
/// read/write flag selects the mode: flag set is reported as `1`, flag
/// clear as `2`. The hardware gives the two active modes no further
/// semantic label, so neither do we.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[repr(u8)]
pub enum RwMode {
    Idle = 0,
    ModeA = 1,
    ModeB = 2,
}

impl RwMode {
    /// Derive the mode from the motor state and the raw hardware flag.
    pub fn from_hardware(motor_on: bool, rw_flag: bool) -> Self {
        if !motor_on {
            RwMode::Idle
        } else if rw_flag {
            RwMode::ModeA
        } else {
            RwMode::ModeB
        }
    }

    /// Numeric encoding used on the wire.
    pub fn wire_code(self) -> u8 {
        self as u8
    }
}

/// One drive's status as delivered to the observer.
///
/// Compared field by field by the diff server; two equal consecutive
/// records mean no line is emitted for that unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// External drive number (8..=11).
    pub drive_num: u8,
    /// Lazily derived, cached motor state.
    pub motor_on: bool,
    /// Activity LED, read fresh from hardware every query.
    pub led_on: bool,
    /// Logical track; `0` when the head position is undefined.
    pub track: u32,
    pub rw_mode: RwMode,
    /// One-shot step flag; reported at most once per physical head step.
    pub step_event: bool,
}

/// Logical track from a half-track head position.
///
/// `0` stays `0` (undefined position); otherwise rounds up, so half-tracks
/// 1 and 2 both map to track 1.
pub fn track_from_half_track(half_track: u32) -> u32 {
    if half_track == 0 {
        0
    } else {
        (half_track + 1) / 2
    }
}
