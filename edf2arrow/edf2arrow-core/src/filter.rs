//! Column-level filters applied after assembly.

use crate::table::{Column, Table};

/// Substring marking velocity columns (`gxvel`, `left_rxvel`, ...).
pub const VELOCITY_MARKER: &str = "vel";

/// Substring marking message send-time bookkeeping columns.
pub const SEND_TIME_MARKER: &str = "message_send_time";

/// Replace every value of every velocity column with NaN.
///
/// The native library returns unreliable velocities at high sampling
/// rates; the columns are kept so the schema stays stable across files
/// and configurations.
pub fn null_velocity_columns(table: &mut Table) {
    let rows = table.num_rows();
    for (name, column) in table.columns_mut() {
        if name.contains(VELOCITY_MARKER) {
            *column = Column::nulls(rows);
        }
    }
}

/// Drop the message send-time bookkeeping columns entirely.
pub fn remove_time_fields(table: &mut Table) {
    table.retain_columns(|name| !name.contains(SEND_TIME_MARKER));
}
