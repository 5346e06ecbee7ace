//! Simulated drive bank.
//!
//! A [`DriveHardware`] implementation with setters for every observable bit,
//! standing in for an emulator's drive simulation. The CLI demo drives it
//! from a script; tests use it as a controllable hardware collaborator.

use crate::hardware::DriveHardware;
use crate::unit::NUM_UNITS;

#[derive(Debug, Clone, Copy)]
struct SimUnit {
    attached: bool,
    enabled: bool,
    has_type: bool,
    motor: bool,
    led: bool,
    half_track: u32,
    rw_flag: bool,
}

impl Default for SimUnit {
    fn default() -> Self {
        Self {
            attached: false,
            enabled: false,
            has_type: false,
            motor: false,
            led: false,
            // Head parked on track 18, where a freshly attached drive sits.
            half_track: 36,
            rw_flag: false,
        }
    }
}

/// Bank of [`NUM_UNITS`] simulated drives.
///
/// Freshly constructed units are detached; [`attach`](SimulatedDrives::attach)
/// makes a unit active (attached, enabled, drive type present). All setters
/// silently ignore out-of-range units, matching what the status layer
/// expects from real hardware.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDrives {
    units: [SimUnit; NUM_UNITS],
}

impl SimulatedDrives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a unit: backing context present, enabled, drive type set.
    pub fn attach(&mut self, unit: usize) {
        if let Some(u) = self.units.get_mut(unit) {
            u.attached = true;
            u.enabled = true;
            u.has_type = true;
        }
    }

    /// Detach a unit entirely.
    pub fn detach(&mut self, unit: usize) {
        if let Some(u) = self.units.get_mut(unit) {
            *u = SimUnit::default();
        }
    }

    pub fn set_enabled(&mut self, unit: usize, enabled: bool) {
        if let Some(u) = self.units.get_mut(unit) {
            u.enabled = enabled;
        }
    }

    pub fn set_drive_type_present(&mut self, unit: usize, present: bool) {
        if let Some(u) = self.units.get_mut(unit) {
            u.has_type = present;
        }
    }

    pub fn set_motor(&mut self, unit: usize, on: bool) {
        if let Some(u) = self.units.get_mut(unit) {
            u.motor = on;
        }
    }

    pub fn set_led(&mut self, unit: usize, on: bool) {
        if let Some(u) = self.units.get_mut(unit) {
            u.led = on;
        }
    }

    pub fn set_half_track(&mut self, unit: usize, half_track: u32) {
        if let Some(u) = self.units.get_mut(unit) {
            u.half_track = half_track;
        }
    }

    pub fn set_read_write_flag(&mut self, unit: usize, flag: bool) {
        if let Some(u) = self.units.get_mut(unit) {
            u.rw_flag = flag;
        }
    }

    /// Move the head one half-track toward `target`.
    ///
    /// Returns `true` if the head moved (the caller should raise a step
    /// event on the registry), `false` if it was already at the target or
    /// the unit is out of range.
    pub fn seek_step(&mut self, unit: usize, target: u32) -> bool {
        let Some(u) = self.units.get_mut(unit) else {
            return false;
        };
        if u.half_track < target {
            u.half_track += 1;
            true
        } else if u.half_track > target {
            u.half_track -= 1;
            true
        } else {
            false
        }
    }
}

impl DriveHardware for SimulatedDrives {
    fn unit_attached(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.attached)
    }

    fn unit_enabled(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.enabled)
    }

    fn has_drive_type(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.has_type)
    }

    fn motor_active(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.motor)
    }

    fn led_on(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.led)
    }

    fn half_track(&self, unit: usize) -> u32 {
        self.units.get(unit).map_or(0, |u| u.half_track)
    }

    fn read_write_flag(&self, unit: usize) -> bool {
        self.units.get(unit).is_some_and(|u| u.rw_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_by_default() {
        let sim = SimulatedDrives::new();
        for unit in 0..NUM_UNITS {
            assert!(!sim.unit_attached(unit));
            assert!(!sim.unit_enabled(unit));
        }
    }

    #[test]
    fn test_attach_detach() {
        let mut sim = SimulatedDrives::new();
        sim.attach(1);
        assert!(sim.unit_attached(1));
        assert!(sim.unit_enabled(1));
        assert!(sim.has_drive_type(1));

        sim.detach(1);
        assert!(!sim.unit_attached(1));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut sim = SimulatedDrives::new();
        sim.attach(99);
        sim.set_motor(99, true);
        assert!(!sim.motor_active(99));
        assert_eq!(sim.half_track(99), 0);
        assert!(!sim.seek_step(99, 10));
    }

    #[test]
    fn test_seek_step_moves_one_half_track() {
        let mut sim = SimulatedDrives::new();
        sim.attach(0);
        sim.set_half_track(0, 10);

        assert!(sim.seek_step(0, 12));
        assert_eq!(sim.half_track(0), 11);
        assert!(sim.seek_step(0, 12));
        assert_eq!(sim.half_track(0), 12);
        assert!(!sim.seek_step(0, 12));

        assert!(sim.seek_step(0, 11));
        assert_eq!(sim.half_track(0), 11);
    }
}
