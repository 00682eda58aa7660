//! Assembly of the raw record triple into analysis-ready tables.

use edf2arrow_core::{
    filter, join_eyes, time, trials2events, Column, Eye, FieldValue, RawEdfFile, SampleAccumulator,
    Table,
};
use edf2arrow_edfapi::SAMPLE_COLUMNS;

use crate::error::EdfReaderError;
use crate::messages::message_record;
use crate::options::ReadOptions;

/// The three tables assembled from one recording.
#[derive(Debug, Clone)]
pub struct EdfTables {
    pub samples: Table,
    pub events: Table,
    pub messages: Table,
}

/// Assemble the tables for one file.
///
/// Pure with respect to its inputs: all accumulators are local, so
/// nothing leaks between files or invocations.
pub fn assemble_tables(
    raw: &RawEdfFile,
    options: &ReadOptions,
) -> Result<EdfTables, EdfReaderError> {
    let samples = assemble_samples(raw, options)?;
    let mut events = assemble_events(raw, options)?;
    let messages = assemble_messages(raw, options);

    if options.join_trials && !events.is_empty() {
        events = trials2events(&events, &messages)?;
    }

    let mut tables = EdfTables {
        samples,
        events,
        messages,
    };
    if options.drop_send_time_fields {
        filter::remove_time_fields(&mut tables.events);
        filter::remove_time_fields(&mut tables.messages);
    }
    for (name, value) in options.meta.iter().rev() {
        for table in [&mut tables.samples, &mut tables.events, &mut tables.messages] {
            let rows = table.num_rows();
            table.insert_front(name.clone(), broadcast(value, rows));
        }
    }
    Ok(tables)
}

fn assemble_samples(raw: &RawEdfFile, options: &ReadOptions) -> Result<Table, EdfReaderError> {
    if options.ignore_samples {
        return Ok(empty_samples_table());
    }

    let mut accumulator = SampleAccumulator::new();
    for record in &raw.samples {
        accumulator.update(record);
    }
    // Sources that deliver constituent samples nested inside events
    // rather than top-level contribute them here; the two sets are
    // disjoint by construction.
    for event in &raw.events {
        for record in &event.samples {
            accumulator.update(record);
        }
    }
    let mut samples = accumulator.finalize();

    if options.half_tick_correction && samples.num_rows() > 0 {
        time::samples_to_ftime(&mut samples)?;
    }
    if options.null_velocity {
        filter::null_velocity_columns(&mut samples);
    }
    Ok(samples)
}

fn assemble_events(raw: &RawEdfFile, options: &ReadOptions) -> Result<Table, EdfReaderError> {
    if !options.binocular_events {
        let mut accumulator = SampleAccumulator::new();
        for event in &raw.events {
            accumulator.update(&event.record);
        }
        return Ok(accumulator.finalize());
    }

    if raw.events.is_empty() {
        return Ok(Table::new());
    }

    let mut left = SampleAccumulator::new();
    let mut right = SampleAccumulator::new();
    for event in &raw.events {
        match event.eye {
            Eye::Left => left.update(&event.record),
            Eye::Right => right.update(&event.record),
        }
    }
    let left = per_eye_table(left);
    let right = per_eye_table(right);
    Ok(join_eyes(left, right)?)
}

/// Finalize one eye's accumulator, keying each event row by its start
/// time for the merge; an eye with no events is absent, not empty.
fn per_eye_table(mut accumulator: SampleAccumulator) -> Option<Table> {
    if accumulator.num_rows() == 0 {
        return None;
    }
    let mut table = accumulator.finalize();
    let start = table.column("start")?;
    let times: Vec<f64> = (0..start.len())
        .map(|row| start.key_f64(row).unwrap_or(f64::NAN))
        .collect();
    table.insert("sample_time", Column::F64(times));
    Some(table)
}

fn assemble_messages(raw: &RawEdfFile, options: &ReadOptions) -> Table {
    let mut accumulator = SampleAccumulator::new();
    for message in &raw.messages {
        if let Some(record) = message_record(
            message,
            &options.message_filter,
            options.split_char,
            &options.trial_marker,
        ) {
            accumulator.update(&record);
        }
    }
    let mut messages = accumulator.finalize();
    // Keep the base schema present even when no message survived, so
    // the export always has the same three group layouts.
    if messages.is_empty() {
        messages.insert("trial", Column::I64(Vec::new()));
        messages.insert("sample", Column::I64(Vec::new()));
        messages.insert("time", Column::I64(Vec::new()));
        messages.insert("message", Column::Str(Vec::new()));
    }
    messages
}

fn empty_samples_table() -> Table {
    let mut table = Table::new();
    for name in SAMPLE_COLUMNS {
        table.insert(name, Column::F64(Vec::new()));
    }
    table
}

fn broadcast(value: &FieldValue, rows: usize) -> Column {
    match value {
        FieldValue::Int(v) => Column::I64(vec![*v; rows]),
        FieldValue::Num(v) => Column::F64(vec![*v; rows]),
        FieldValue::Text(s) => Column::Str(vec![Some(s.clone()); rows]),
        FieldValue::Pair(_) | FieldValue::Missing => Column::nulls(rows),
    }
}
