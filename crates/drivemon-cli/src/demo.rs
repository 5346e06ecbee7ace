//! Scripted drive activity for the demo loop.
//!
//! Cycles each attached unit through a plausible load sequence: spin up,
//! seek with step events, work with a blinking LED, spin down, idle.
//! Deterministic on purpose so overlay developers see a repeatable pattern.

use drivemon::{SimulatedDrives, StatusRegistry};

/// Seek targets cycled by the script, in half-tracks (tracks 18, 1, 35).
const SEEK_TARGETS: [u32; 3] = [35, 1, 69];

const SPIN_UP_TICKS: u32 = 15;
const BUSY_TICKS: u32 = 60;
const IDLE_TICKS: u32 = 120;

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle { ticks: u32 },
    SpinUp { ticks: u32 },
    Seek { target: u32 },
    Busy { ticks: u32 },
}

#[derive(Debug)]
struct UnitScript {
    phase: Phase,
    next_target: usize,
}

/// Drives the simulated bank through repeating activity bursts.
pub struct ActivityScript {
    units: Vec<UnitScript>,
}

impl ActivityScript {
    pub fn new(units: usize) -> Self {
        let units = (0..units)
            .map(|unit| UnitScript {
                // Stagger the units so they do not move in lockstep.
                phase: Phase::Idle {
                    ticks: 20 + 40 * unit as u32,
                },
                next_target: 0,
            })
            .collect();
        Self { units }
    }

    /// Advance every unit by one tick, mutating the drive bank and raising
    /// motor/step events on the registry as a real drive simulation would.
    pub fn tick(&mut self, drives: &mut SimulatedDrives, registry: &mut StatusRegistry) {
        for (unit, script) in self.units.iter_mut().enumerate() {
            script.phase = match script.phase {
                Phase::Idle { ticks: 0 } => {
                    drives.set_motor(unit, true);
                    registry.set_motor(unit, true);
                    drives.set_led(unit, true);
                    Phase::SpinUp {
                        ticks: SPIN_UP_TICKS,
                    }
                }
                Phase::Idle { ticks } => Phase::Idle { ticks: ticks - 1 },
                Phase::SpinUp { ticks: 0 } => {
                    let target = SEEK_TARGETS[script.next_target % SEEK_TARGETS.len()];
                    script.next_target += 1;
                    Phase::Seek { target }
                }
                Phase::SpinUp { ticks } => Phase::SpinUp { ticks: ticks - 1 },
                Phase::Seek { target } => {
                    if drives.seek_step(unit, target) {
                        registry.set_step_event(unit);
                        Phase::Seek { target }
                    } else {
                        // Alternate the rw flag between bursts.
                        drives.set_read_write_flag(unit, script.next_target % 2 == 1);
                        Phase::Busy { ticks: BUSY_TICKS }
                    }
                }
                Phase::Busy { ticks: 0 } => {
                    drives.set_motor(unit, false);
                    registry.set_motor(unit, false);
                    drives.set_led(unit, false);
                    drives.set_read_write_flag(unit, false);
                    Phase::Idle { ticks: IDLE_TICKS }
                }
                Phase::Busy { ticks } => {
                    // Blink the LED while the head works.
                    drives.set_led(unit, ticks / 5 % 2 == 0);
                    Phase::Busy { ticks: ticks - 1 }
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivemon::DriveHardware;

    #[test]
    fn test_script_produces_motor_and_steps() {
        let mut drives = SimulatedDrives::new();
        let mut registry = StatusRegistry::new();
        drives.attach(0);

        let mut script = ActivityScript::new(1);
        let mut saw_motor = false;
        let mut saw_step = false;

        for _ in 0..500 {
            script.tick(&mut drives, &mut registry);
            saw_motor |= drives.motor_active(0);
            saw_step |= registry.take_step(0);
        }

        assert!(saw_motor, "script never spun the motor up");
        assert!(saw_step, "script never produced a head step");
    }

    #[test]
    fn test_script_returns_to_idle() {
        let mut drives = SimulatedDrives::new();
        let mut registry = StatusRegistry::new();
        drives.attach(0);

        let mut script = ActivityScript::new(1);
        let mut motor_dropped = false;
        let mut was_on = false;

        for _ in 0..2000 {
            script.tick(&mut drives, &mut registry);
            if drives.motor_active(0) {
                was_on = true;
            } else if was_on {
                motor_dropped = true;
                break;
            }
        }

        assert!(motor_dropped, "script never spun the motor down");
    }
}
