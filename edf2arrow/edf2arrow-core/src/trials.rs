//! Association of trial-level message metadata with event rows.

use std::collections::HashMap;

use crate::error::JoinError;
use crate::merge::TRIAL;
use crate::table::Table;

/// Left-join `messages` onto `events` keyed on `trial`.
///
/// Every event row is retained. Events whose trial has no message get
/// missing values in all message-derived columns; this is expected for
/// events recorded outside marked trials, not an error. This is a
/// single-shot join: when several messages share a trial id, each
/// matching event row fans out into one output row per message. Callers
/// that want one row per event must pre-aggregate the messages
/// themselves.
///
/// A message column whose name collides with an event column is kept on
/// both sides, suffixed `_x` (event) and `_y` (message).
pub fn trials2events(events: &Table, messages: &Table) -> Result<Table, JoinError> {
    let event_trial = events
        .column(TRIAL)
        .ok_or(JoinError::MissingTrialColumn { side: "events" })?;
    let message_trial = messages
        .column(TRIAL)
        .ok_or(JoinError::MissingTrialColumn { side: "messages" })?;

    let mut by_trial: HashMap<i64, Vec<usize>> = HashMap::new();
    for row in 0..message_trial.len() {
        if let Some(trial) = message_trial.key_i64(row) {
            by_trial.entry(trial).or_default().push(row);
        }
    }

    let mut event_rows: Vec<Option<usize>> = Vec::with_capacity(events.num_rows());
    let mut message_rows: Vec<Option<usize>> = Vec::with_capacity(events.num_rows());
    for row in 0..events.num_rows() {
        let matches = event_trial
            .key_i64(row)
            .and_then(|trial| by_trial.get(&trial));
        match matches {
            Some(found) => {
                for &message_row in found {
                    event_rows.push(Some(row));
                    message_rows.push(Some(message_row));
                }
            }
            None => {
                event_rows.push(Some(row));
                message_rows.push(None);
            }
        }
    }

    let mut joined = Table::new();
    for (name, column) in events.columns() {
        let name = if name != TRIAL && messages.contains(name) {
            format!("{name}_x")
        } else {
            name.to_string()
        };
        joined.insert(name, column.gather(&event_rows));
    }
    for (name, column) in messages.columns() {
        if name == TRIAL {
            continue;
        }
        let name = if events.contains(name) {
            format!("{name}_y")
        } else {
            name.to_string()
        };
        joined.insert(name, column.gather(&message_rows));
    }
    Ok(joined)
}
