//! Snapshot assembly.
//!
//! Combines the registry's cached state with a live hardware readout into
//! one [`StatusRecord`] per unit, per query.

use crate::hardware::DriveHardware;
use crate::status::record::{RwMode, StatusRecord, track_from_half_track};
use crate::status::registry::StatusRegistry;
use crate::unit::{NUM_UNITS, unit_to_drive};

/// Short-lived view that borrows the registry and the hardware collaborator
/// for the duration of one polling pass.
pub struct SnapshotAssembler<'a, H: DriveHardware> {
    registry: &'a mut StatusRegistry,
    hardware: &'a H,
}

impl<'a, H: DriveHardware> SnapshotAssembler<'a, H> {
    pub fn new(registry: &'a mut StatusRegistry, hardware: &'a H) -> Self {
        Self { registry, hardware }
    }

    /// Capability check: a unit is active when it is in range, has a backing
    /// hardware context, is enabled, and has a drive type configured.
    pub fn unit_active(&self, unit: usize) -> bool {
        unit < NUM_UNITS
            && self.hardware.unit_attached(unit)
            && self.hardware.unit_enabled(unit)
            && self.hardware.has_drive_type(unit)
    }

    /// Assemble a snapshot, leaving the one-shot step flag untouched.
    ///
    /// `None` (with no side effects) if the unit is out of range or
    /// inactive.
    pub fn snapshot(&mut self, unit: usize) -> Option<StatusRecord> {
        self.assemble(unit, false)
    }

    /// Assemble a snapshot, consuming the one-shot step flag.
    pub fn take_snapshot(&mut self, unit: usize) -> Option<StatusRecord> {
        self.assemble(unit, true)
    }

    fn assemble(&mut self, unit: usize, consume_step: bool) -> Option<StatusRecord> {
        if !self.unit_active(unit) {
            return None;
        }

        let motor_on = self
            .registry
            .resolve_motor(unit, self.hardware.motor_active(unit));
        let step_event = if consume_step {
            self.registry.take_step(unit)
        } else {
            self.registry.step_pending(unit)
        };

        Some(StatusRecord {
            drive_num: unit_to_drive(unit),
            motor_on,
            led_on: self.hardware.led_on(unit),
            track: track_from_half_track(self.hardware.half_track(unit)),
            rw_mode: RwMode::from_hardware(motor_on, self.hardware.read_write_flag(unit)),
            step_event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedDrives;
    use crate::status::registry::MotorCache;

    fn active_sim(unit: usize) -> SimulatedDrives {
        let mut sim = SimulatedDrives::new();
        sim.attach(unit);
        sim
    }

    #[test]
    fn test_inactive_unit_yields_none_without_side_effects() {
        let mut registry = StatusRegistry::new();
        registry.set_step_event(0);
        let sim = SimulatedDrives::new();

        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(assembler.take_snapshot(0).is_none());
        assert!(assembler.snapshot(NUM_UNITS + 1).is_none());

        // The pending step survived the failed clearing query.
        assert!(registry.step_pending(0));
        assert_eq!(registry.motor_cache(0), MotorCache::Unknown);
    }

    #[test]
    fn test_unit_active_requires_all_capabilities() {
        let mut registry = StatusRegistry::new();
        let mut sim = active_sim(0);

        let assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(assembler.unit_active(0));
        assert!(!assembler.unit_active(1));
        drop(assembler);

        sim.set_enabled(0, false);
        let assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(!assembler.unit_active(0));
        drop(assembler);

        sim.set_enabled(0, true);
        sim.set_drive_type_present(0, false);
        let assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(!assembler.unit_active(0));
    }

    #[test]
    fn test_motor_cached_on_first_snapshot() {
        let mut registry = StatusRegistry::new();
        let mut sim = active_sim(0);
        sim.set_motor(0, true);

        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(assembler.snapshot(0).unwrap().motor_on);

        // Hardware motor drops, cache does not follow.
        sim.set_motor(0, false);
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(assembler.snapshot(0).unwrap().motor_on);

        // Until the simulation overrides it explicitly.
        registry.set_motor(0, false);
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert!(!assembler.snapshot(0).unwrap().motor_on);
    }

    #[test]
    fn test_led_and_track_read_fresh() {
        let mut registry = StatusRegistry::new();
        let mut sim = active_sim(0);
        sim.set_half_track(0, 35);
        sim.set_led(0, true);

        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        let record = assembler.snapshot(0).unwrap();
        assert_eq!(record.track, 18);
        assert!(record.led_on);

        sim.set_half_track(0, 1);
        sim.set_led(0, false);
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        let record = assembler.snapshot(0).unwrap();
        assert_eq!(record.track, 1);
        assert!(!record.led_on);
    }

    #[test]
    fn test_rw_mode_follows_cached_motor() {
        let mut registry = StatusRegistry::new();
        let mut sim = active_sim(0);
        sim.set_read_write_flag(0, true);

        // Motor derived off: Idle regardless of the flag.
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert_eq!(assembler.snapshot(0).unwrap().rw_mode, RwMode::Idle);

        registry.set_motor(0, true);
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert_eq!(assembler.snapshot(0).unwrap().rw_mode, RwMode::ModeA);

        sim.set_read_write_flag(0, false);
        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert_eq!(assembler.snapshot(0).unwrap().rw_mode, RwMode::ModeB);
    }

    #[test]
    fn test_take_snapshot_consumes_step_once() {
        let mut registry = StatusRegistry::new();
        let sim = active_sim(0);
        registry.set_step_event(0);

        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);

        // Plain snapshots peek without consuming.
        assert!(assembler.snapshot(0).unwrap().step_event);
        assert!(assembler.snapshot(0).unwrap().step_event);

        // The clearing snapshot reports it once, then it is gone.
        assert!(assembler.take_snapshot(0).unwrap().step_event);
        assert!(!assembler.snapshot(0).unwrap().step_event);
        assert!(!assembler.take_snapshot(0).unwrap().step_event);
    }

    #[test]
    fn test_drive_num_mapping() {
        let mut registry = StatusRegistry::new();
        let sim = active_sim(3);

        let mut assembler = SnapshotAssembler::new(&mut registry, &sim);
        assert_eq!(assembler.snapshot(3).unwrap().drive_num, 11);
    }
}
