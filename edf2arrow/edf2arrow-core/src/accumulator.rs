//! Row-wise accumulation of heterogeneous records into stable columns.

use std::collections::HashMap;
use std::sync::Arc;

use crate::record::{Eye, FieldValue, RawRecord};
use crate::table::{Column, Table};

/// Accumulates field records whose key sets may drift from row to row
/// and produces a gap-filled columnar [`Table`].
///
/// The single invariant driving both back-fill and forward-fill is that
/// every buffer has length equal to the row counter after each
/// [`update`](Self::update): a column first seen at row `k` starts with
/// `k` missing cells, and a column absent from a record gets one missing
/// cell appended.
///
/// Accumulation never fails; cells that do not fit their column's
/// eventual type resolve to missing at [`finalize`](Self::finalize).
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    names: Vec<String>,
    buffers: Vec<Vec<FieldValue>>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Append one record as a new row.
    pub fn update(&mut self, record: &RawRecord) {
        for (name, value) in record.iter() {
            let idx = match self.index.get(name) {
                Some(&idx) => idx,
                None => {
                    let idx = self.buffers.len();
                    self.names.push(name.to_string());
                    // Back-fill so the new column covers earlier rows.
                    self.buffers.push(vec![FieldValue::Missing; self.rows]);
                    self.index.insert(name.to_string(), idx);
                    idx
                }
            };
            let buffer = &mut self.buffers[idx];
            if buffer.len() == self.rows {
                buffer.push(value.clone());
            } else {
                // Duplicate key within one record: last value wins.
                buffer[self.rows] = value.clone();
            }
        }
        // Columns the record did not mention get a missing cell.
        for buffer in &mut self.buffers {
            if buffer.len() == self.rows {
                buffer.push(FieldValue::Missing);
            }
        }
        self.rows += 1;
    }

    /// Resolve every buffer to a typed column, splitting paired fields
    /// into `left_`/`right_` columns, and reset the accumulator for the
    /// next file.
    pub fn finalize(&mut self) -> Table {
        let mut table = Table::new();
        let names = std::mem::take(&mut self.names);
        let buffers = std::mem::take(&mut self.buffers);
        self.index.clear();
        self.rows = 0;

        for (name, buffer) in names.into_iter().zip(buffers) {
            if is_pair_column(&buffer) {
                for eye in [Eye::Left, Eye::Right] {
                    let values = buffer
                        .iter()
                        .map(|v| match v {
                            FieldValue::Pair(pair) => pair[eye.index()],
                            _ => f64::NAN,
                        })
                        .collect();
                    table.insert(format!("{}{name}", eye.prefix()), Column::F64(values));
                }
            } else {
                table.insert(name, resolve_column(buffer));
            }
        }
        table
    }
}

/// A buffer splits per eye only if every present cell is a pair.
fn is_pair_column(buffer: &[FieldValue]) -> bool {
    let mut any_pair = false;
    for value in buffer {
        match value {
            FieldValue::Pair(_) => any_pair = true,
            FieldValue::Missing => {}
            _ => return false,
        }
    }
    any_pair
}

fn resolve_column(buffer: Vec<FieldValue>) -> Column {
    let any_text = buffer.iter().any(|v| matches!(v, FieldValue::Text(_)));
    if any_text {
        return Column::Str(
            buffer
                .iter()
                .map(|v| match v {
                    FieldValue::Text(s) => Some(Arc::clone(s)),
                    _ => None,
                })
                .collect(),
        );
    }

    let all_int = buffer
        .iter()
        .all(|v| matches!(v, FieldValue::Int(_)));
    if all_int && !buffer.is_empty() {
        return Column::I64(
            buffer
                .iter()
                .map(|v| match v {
                    FieldValue::Int(i) => *i,
                    _ => unreachable!(),
                })
                .collect(),
        );
    }

    Column::F64(
        buffer
            .into_iter()
            .map(|v| match v {
                FieldValue::Num(x) => x,
                FieldValue::Int(i) => i as f64,
                _ => f64::NAN,
            })
            .collect(),
    )
}
