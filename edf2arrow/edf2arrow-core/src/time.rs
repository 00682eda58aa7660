//! Half-tick timestamp correction.
//!
//! A 2000 Hz tracker emits two physical samples per integer millisecond
//! tick. The second sample of each tick carries the `SAMPLE_ADD_OFFSET`
//! flag bit on the raw record; its real time is the integer tick plus
//! half a millisecond. At 1000 Hz and below no sample carries the flag
//! and the conversion is exact.

use crate::error::NormalizeError;
use crate::table::{Column, Table};

/// Flag bit set on raw samples whose time needs the +0.5 ms offset.
pub const SAMPLE_ADD_OFFSET: i64 = 0x0002;

/// Name of the sample timestamp column.
pub const TIME_COLUMN: &str = "time";

/// Name of the raw flag-bits column.
pub const FLAGS_COLUMN: &str = "flags";

/// Convert the integer `time` column to floats, adding 0.5 ms wherever
/// the `flags` column has the offset bit set.
///
/// The transform reads the flag column, not the time column it mutates,
/// so a single application per raw load is well defined. It cannot be
/// re-applied to an already converted table without the original flags;
/// callers own that discipline.
pub fn samples_to_ftime(samples: &mut Table) -> Result<(), NormalizeError> {
    let flags = samples
        .column(FLAGS_COLUMN)
        .ok_or(NormalizeError::MissingColumn { name: FLAGS_COLUMN })?;

    let offsets: Vec<bool> = (0..flags.len())
        .map(|row| {
            flags
                .key_i64(row)
                .is_some_and(|bits| bits & SAMPLE_ADD_OFFSET != 0)
        })
        .collect();

    let time = samples
        .column(TIME_COLUMN)
        .ok_or(NormalizeError::MissingColumn { name: TIME_COLUMN })?;

    let converted: Vec<f64> = (0..time.len())
        .map(|row| {
            let t = time.key_f64(row).unwrap_or(f64::NAN);
            if offsets[row] { t + 0.5 } else { t }
        })
        .collect();

    samples.insert(TIME_COLUMN, Column::F64(converted));
    Ok(())
}
