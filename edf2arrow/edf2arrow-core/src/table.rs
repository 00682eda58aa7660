//! Insertion-ordered columnar table with a deliberately small type system.
//!
//! Missing data is NaN in float columns and `None` in string columns.
//! Integer columns never carry gaps; any operation that would introduce
//! one promotes the column to floats, mirroring how the original
//! analysis stack widened integer columns on joins.

use std::sync::Arc;

/// One column of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    F64(Vec<f64>),
    I64(Vec<i64>),
    Str(Vec<Option<Arc<str>>>),
}

/// An owned view of a single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    F64(f64),
    I64(i64),
    Str(Arc<str>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::F64(v) => v.len(),
            Column::I64(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An all-missing float column of the given length.
    pub fn nulls(len: usize) -> Self {
        Column::F64(vec![f64::NAN; len])
    }

    pub fn cell(&self, row: usize) -> Cell {
        match self {
            Column::F64(v) => {
                if v[row].is_nan() {
                    Cell::Null
                } else {
                    Cell::F64(v[row])
                }
            }
            Column::I64(v) => Cell::I64(v[row]),
            Column::Str(v) => match &v[row] {
                Some(s) => Cell::Str(Arc::clone(s)),
                None => Cell::Null,
            },
        }
    }

    /// Integer view of a cell, for integer-valued join keys. NaN and
    /// string cells have no key.
    pub fn key_i64(&self, row: usize) -> Option<i64> {
        match self {
            Column::I64(v) => Some(v[row]),
            Column::F64(v) if v[row].is_finite() => Some(v[row] as i64),
            _ => None,
        }
    }

    /// Float view of a cell, for ordering by timestamp columns.
    pub fn key_f64(&self, row: usize) -> Option<f64> {
        match self {
            Column::F64(v) if !v[row].is_nan() => Some(v[row]),
            Column::I64(v) => Some(v[row] as f64),
            _ => None,
        }
    }

    /// Reindex the column by `rows`; `None` entries become missing.
    /// Integer columns that pick up a gap are promoted to floats.
    pub fn gather(&self, rows: &[Option<usize>]) -> Column {
        match self {
            Column::F64(v) => Column::F64(
                rows.iter()
                    .map(|r| r.map_or(f64::NAN, |i| v[i]))
                    .collect(),
            ),
            Column::I64(v) => {
                if rows.iter().all(|r| r.is_some()) {
                    Column::I64(rows.iter().flatten().map(|&i| v[i]).collect())
                } else {
                    Column::F64(
                        rows.iter()
                            .map(|r| r.map_or(f64::NAN, |i| v[i] as f64))
                            .collect(),
                    )
                }
            }
            Column::Str(v) => Column::Str(
                rows.iter()
                    .map(|r| r.and_then(|i| v[i].clone()))
                    .collect(),
            ),
        }
    }
}

/// Named columns in insertion order. All columns have the same length.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Insert a column, replacing any existing column of the same name
    /// in place.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = column,
            None => self.columns.push((name, column)),
        }
    }

    /// Insert a column at the front of the column order, replacing any
    /// existing column of the same name in place.
    pub fn insert_front(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = column,
            None => self.columns.insert(0, (name, column)),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Rename a column, keeping its position. Returns false if absent.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
        match self.columns.iter_mut().find(|(n, _)| n == from) {
            Some((name, _)) => {
                *name = to.into();
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = (&str, &mut Column)> {
        self.columns.iter_mut().map(|(n, c)| (n.as_str(), c))
    }

    /// Drop every column for which `keep` returns false.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.columns.retain(|(n, _)| keep(n));
    }

    pub fn cell(&self, name: &str, row: usize) -> Option<Cell> {
        self.column(name).map(|c| c.cell(row))
    }
}
