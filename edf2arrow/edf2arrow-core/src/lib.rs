//! Arrow-independent record model and table assembly for EDF recordings.
//!
//! The native EDF reader hands back a heterogeneous stream of per-sample,
//! per-event and per-message field records. This crate turns that stream
//! into schema-stable columnar tables: [`SampleAccumulator`] assembles
//! rows with NaN back-fill and left/right pair splitting, [`join_eyes`]
//! reconciles independently recorded eye channels, [`trials2events`]
//! attaches trial metadata, and the normalizers in [`time`] and [`filter`]
//! handle the half-tick clock artifact and unreliable velocity columns.

mod accumulator;
mod error;
pub mod filter;
mod merge;
mod record;
mod table;
pub mod time;
mod trials;

pub use accumulator::SampleAccumulator;
pub use error::{JoinError, MergeError, NormalizeError};
pub use merge::join_eyes;
pub use record::{Eye, FieldValue, RawEdfFile, RawEvent, RawMessage, RawRecord};
pub use table::{Cell, Column, Table};
pub use trials::trials2events;
