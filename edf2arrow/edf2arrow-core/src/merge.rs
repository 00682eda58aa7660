//! Reconciliation of independently recorded left/right eye tables.

use std::collections::HashSet;

use crate::error::MergeError;
use crate::record::Eye;
use crate::table::{Column, Table};

/// Per-row key the two eye channels are aligned on.
pub const SAMPLE_TIME: &str = "sample_time";

/// Canonical name of the trial column after merging.
pub const TRIAL: &str = "trial";

/// Merge the per-eye tables of one recording.
///
/// With one side absent the present side is returned verbatim, with any
/// eye-prefixed trial column renamed to the canonical `trial`. With both
/// sides present, every non-key column gets a `left_`/`right_` prefix
/// and the rows of both sides are kept: each output row comes from
/// exactly one eye, with the other eye's columns missing, ordered by
/// `sample_time` (stable, left before right on ties). The per-eye trial
/// columns collapse into one unified `trial` column.
///
/// The output row count is always the sum of the input row counts.
pub fn join_eyes(left: Option<Table>, right: Option<Table>) -> Result<Table, MergeError> {
    match (left, right) {
        (None, None) => Err(MergeError::NoData),
        (Some(mut table), None) | (None, Some(mut table)) => {
            canonicalize_trial(&mut table);
            Ok(table)
        }
        (Some(left), Some(right)) => merge_binocular(left, right),
    }
}

fn canonicalize_trial(table: &mut Table) {
    if table.contains(TRIAL) {
        return;
    }
    for prefixed in ["left_trial", "right_trial"] {
        if table.rename(prefixed, TRIAL) {
            return;
        }
    }
}

fn merge_binocular(left: Table, right: Table) -> Result<Table, MergeError> {
    check_schemas(&left, &right)?;

    let left_time = left
        .column(SAMPLE_TIME)
        .ok_or(MergeError::MissingKey { key: SAMPLE_TIME })?;
    let right_time = right
        .column(SAMPLE_TIME)
        .ok_or(MergeError::MissingKey { key: SAMPLE_TIME })?;

    // One entry per source row, stably ordered by timestamp so ties keep
    // left before right.
    let mut order: Vec<(f64, Eye, usize)> = Vec::with_capacity(left_time.len() + right_time.len());
    for row in 0..left_time.len() {
        order.push((left_time.key_f64(row).unwrap_or(f64::NAN), Eye::Left, row));
    }
    for row in 0..right_time.len() {
        order.push((right_time.key_f64(row).unwrap_or(f64::NAN), Eye::Right, row));
    }
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    let left_rows: Vec<Option<usize>> = order
        .iter()
        .map(|&(_, eye, row)| (eye == Eye::Left).then_some(row))
        .collect();
    let right_rows: Vec<Option<usize>> = order
        .iter()
        .map(|&(_, eye, row)| (eye == Eye::Right).then_some(row))
        .collect();

    let mut merged = Table::new();
    merged.insert(SAMPLE_TIME, take_per_side(left_time, right_time, &order));

    for (side, table, rows) in [
        (Eye::Left, &left, &left_rows),
        (Eye::Right, &right, &right_rows),
    ] {
        for (name, column) in table.columns() {
            if name == SAMPLE_TIME || name == TRIAL {
                continue;
            }
            merged.insert(format!("{}{name}", side.prefix()), column.gather(rows));
        }
    }

    // The per-eye trial columns collapse into one; each row carries its
    // source eye's value.
    if let (Some(left_trial), Some(right_trial)) = (left.column(TRIAL), right.column(TRIAL)) {
        merged.insert(TRIAL, take_per_side(left_trial, right_trial, &order));
    }

    Ok(merged)
}

fn check_schemas(left: &Table, right: &Table) -> Result<(), MergeError> {
    let left_names: HashSet<&str> = left.names().collect();
    let right_names: HashSet<&str> = right.names().collect();
    if left_names == right_names {
        return Ok(());
    }
    let mut left_only: Vec<String> = left_names
        .difference(&right_names)
        .map(|s| s.to_string())
        .collect();
    let mut right_only: Vec<String> = right_names
        .difference(&left_names)
        .map(|s| s.to_string())
        .collect();
    left_only.sort();
    right_only.sort();
    Err(MergeError::SchemaMismatch {
        left_only,
        right_only,
    })
}

/// Build a merged column taking each output row's value from the side
/// the row originates from. Stays integer only if both inputs are.
fn take_per_side(left: &Column, right: &Column, order: &[(f64, Eye, usize)]) -> Column {
    if let (Column::I64(lv), Column::I64(rv)) = (left, right) {
        return Column::I64(
            order
                .iter()
                .map(|&(_, eye, row)| match eye {
                    Eye::Left => lv[row],
                    Eye::Right => rv[row],
                })
                .collect(),
        );
    }
    Column::F64(
        order
            .iter()
            .map(|&(_, eye, row)| {
                let side = match eye {
                    Eye::Left => left,
                    Eye::Right => right,
                };
                side.key_f64(row).unwrap_or(f64::NAN)
            })
            .collect(),
    )
}
