//! Drive unit numbering.
//!
//! Units are zero-based slot indices into the fixed drive bank. Everything
//! user-facing (wire protocol, logs) uses the external drive numbers 8..=11
//! instead.

/// Number of drive slots in the bank.
pub const NUM_UNITS: usize = 4;

/// External drive number of unit 0.
pub const FIRST_DRIVE_NUM: u8 = 8;

/// External drive number of the last unit.
pub const LAST_DRIVE_NUM: u8 = FIRST_DRIVE_NUM + NUM_UNITS as u8 - 1;

/// Map a zero-based unit index to its external drive number.
///
/// The caller is expected to pass an in-range unit; the mapping itself is a
/// plain offset.
pub fn unit_to_drive(unit: usize) -> u8 {
    FIRST_DRIVE_NUM + unit as u8
}

/// Map an external drive number back to a unit index, if in range.
pub fn drive_to_unit(drive_num: u8) -> Option<usize> {
    if (FIRST_DRIVE_NUM..=LAST_DRIVE_NUM).contains(&drive_num) {
        Some((drive_num - FIRST_DRIVE_NUM) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_to_drive() {
        assert_eq!(unit_to_drive(0), 8);
        assert_eq!(unit_to_drive(3), 11);
    }

    #[test]
    fn test_drive_to_unit_in_range() {
        assert_eq!(drive_to_unit(8), Some(0));
        assert_eq!(drive_to_unit(11), Some(3));
    }

    #[test]
    fn test_drive_to_unit_out_of_range() {
        assert_eq!(drive_to_unit(7), None);
        assert_eq!(drive_to_unit(12), None);
        assert_eq!(drive_to_unit(0), None);
    }

    #[test]
    fn test_round_trip() {
        for unit in 0..NUM_UNITS {
            assert_eq!(drive_to_unit(unit_to_drive(unit)), Some(unit));
        }
    }
}
