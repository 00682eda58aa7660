//! Raw record types handed back by the native reader layer.

use std::sync::Arc;

/// Eye channel index, matching the EDF access API convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Eye::Left),
            1 => Some(Eye::Right),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }

    /// Column-name prefix used when a paired field is split per eye.
    pub const fn prefix(self) -> &'static str {
        match self {
            Eye::Left => "left_",
            Eye::Right => "right_",
        }
    }
}

/// One field of a raw record.
///
/// Paired binocular values are an explicit variant rather than a runtime
/// shape: index 0 is the left eye, index 1 the right eye.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Num(f64),
    Int(i64),
    Pair([f64; 2]),
    Text(Arc<str>),
}

impl FieldValue {
    pub fn text(s: impl AsRef<str>) -> Self {
        Self::Text(Arc::from(s.as_ref()))
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

/// An ordered field mapping for one raw sample, event or message record.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: Vec<(Arc<str>, FieldValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl AsRef<str>, value: FieldValue) {
        self.fields.push((Arc::from(name.as_ref()), value));
    }

    pub fn with(mut self, name: impl AsRef<str>, value: FieldValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A raw end-of-event record plus the eye it belongs to and, when the
/// native reader delivered them inline, the constituent samples.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub record: RawRecord,
    pub eye: Eye,
    pub samples: Vec<RawRecord>,
}

/// A raw message record. `trial` is assigned by the reader from the
/// trial-marker messages seen so far; `sample` is the index of the last
/// sample read before the message.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub trial: i64,
    pub sample: i64,
    pub time: i64,
    pub text: String,
}

/// The per-file triple handed back by one blocking native read.
#[derive(Debug, Clone, Default)]
pub struct RawEdfFile {
    pub samples: Vec<RawRecord>,
    pub events: Vec<RawEvent>,
    pub messages: Vec<RawMessage>,
}
