//! Wire protocol formatting.
//!
//! One ASCII line per record:
//!
//! ```text
//! <drive_num> <motor_on:0|1> <led_on:0|1> <track> <rw_mode:0|1|2> <step:0|1>\n
//! ```

use crate::status::StatusRecord;

/// In-band error line for a queried unit that is not active.
pub const INVALID_DRIVE_LINE: &str = "ERROR: INVALID DRIVE\n";

/// Format one status record as a protocol line, newline included.
pub fn status_line(record: &StatusRecord) -> String {
    format!(
        "{} {} {} {} {} {}\n",
        record.drive_num,
        record.motor_on as u8,
        record.led_on as u8,
        record.track,
        record.rw_mode.wire_code(),
        record.step_event as u8,
    )
}
