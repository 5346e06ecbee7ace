//! Hardware collaborator interface.
//!
//! The status subsystem never owns drive hardware; it reads the live state
//! of each unit through this trait. The emulator's drive simulation is the
//! source of truth for everything here.

/// Per-unit readout of the drive hardware.
///
/// All accessors must tolerate out-of-range units by returning `false`
/// (or `0` for [`half_track`](DriveHardware::half_track)). Implementations
/// are queried from a single thread and must not block.
pub trait DriveHardware {
    /// Whether a hardware context backs this unit at all.
    fn unit_attached(&self, unit: usize) -> bool;

    /// Whether the unit is enabled.
    fn unit_enabled(&self, unit: usize) -> bool;

    /// Whether a drive type is configured for the unit.
    fn has_drive_type(&self, unit: usize) -> bool;

    /// Motor-active bit.
    fn motor_active(&self, unit: usize) -> bool;

    /// Activity LED bit.
    fn led_on(&self, unit: usize) -> bool;

    /// Head position in half-tracks; `0` means the position is undefined.
    fn half_track(&self, unit: usize) -> u32;

    /// Raw read/write mode flag. Only meaningful while the motor is on; the
    /// two active modes are reported on the wire as 1 (flag set) and
    /// 2 (flag clear).
    fn read_write_flag(&self, unit: usize) -> bool;
}
