//! Per-unit status cache.
//!
//! Holds the state that is independent of hardware polling cadence: the
//! lazily derived motor value and the one-shot step flag. The drive
//! simulation pushes events in ([`set_motor`](StatusRegistry::set_motor),
//! [`set_step_event`](StatusRegistry::set_step_event)); the snapshot
//! assembler reads them back out.

use crate::unit::NUM_UNITS;

/// Cached motor state for one unit.
///
/// `Unknown` only before the first hardware read for the unit; once derived
/// the value sticks until an explicit override or a unit reset, regardless
/// of what the hardware bit does afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorCache {
    #[default]
    Unknown,
    On,
    Off,
}

impl MotorCache {
    fn from_bool(on: bool) -> Self {
        if on { MotorCache::On } else { MotorCache::Off }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RegistryEntry {
    motor: MotorCache,
    step_pending: bool,
}

/// Status cache for the whole drive bank.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    entries: [RegistryEntry; NUM_UNITS],
}

impl StatusRegistry {
    /// Create a registry with all units in the unknown-motor, no-step state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every unit.
    pub fn reset(&mut self) {
        for unit in 0..NUM_UNITS {
            self.reset_unit(unit);
        }
    }

    /// Reset one unit. No-op if `unit` is out of range.
    pub fn reset_unit(&mut self, unit: usize) {
        if let Some(entry) = self.entries.get_mut(unit) {
            *entry = RegistryEntry::default();
        }
    }

    /// Override the cached motor state. No-op if `unit` is out of range.
    pub fn set_motor(&mut self, unit: usize, on: bool) {
        if let Some(entry) = self.entries.get_mut(unit) {
            entry.motor = MotorCache::from_bool(on);
        }
    }

    /// Raise the one-shot step flag. Called by the drive simulation on a
    /// physical head step. No-op if `unit` is out of range.
    pub fn set_step_event(&mut self, unit: usize) {
        if let Some(entry) = self.entries.get_mut(unit) {
            entry.step_pending = true;
        }
    }

    /// Current motor cache value; `Unknown` for out-of-range units.
    pub fn motor_cache(&self, unit: usize) -> MotorCache {
        self.entries.get(unit).map_or(MotorCache::Unknown, |e| e.motor)
    }

    /// Return the cached motor value, deriving and caching it from the
    /// hardware bit on the first call for this unit.
    pub fn resolve_motor(&mut self, unit: usize, hardware_bit: bool) -> bool {
        let Some(entry) = self.entries.get_mut(unit) else {
            return hardware_bit;
        };
        match entry.motor {
            MotorCache::On => true,
            MotorCache::Off => false,
            MotorCache::Unknown => {
                entry.motor = MotorCache::from_bool(hardware_bit);
                hardware_bit
            }
        }
    }

    /// Peek at the one-shot step flag without consuming it.
    pub fn step_pending(&self, unit: usize) -> bool {
        self.entries.get(unit).is_some_and(|e| e.step_pending)
    }

    /// Take the one-shot step flag, clearing it.
    pub fn take_step(&mut self, unit: usize) -> bool {
        let Some(entry) = self.entries.get_mut(unit) else {
            return false;
        };
        std::mem::take(&mut entry.step_pending)
    }
}
