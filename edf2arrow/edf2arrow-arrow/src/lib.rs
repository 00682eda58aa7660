//! Arrow integration layer for `edf2arrow`.
//!
//! This crate has two responsibilities:
//! 1. Convert assembled [`Table`](edf2arrow_core::Table)s into Arrow
//!    `RecordBatch`es, coding string columns as dense integers with a
//!    recoverable value→index mapping attached as field metadata.
//! 2. Write the `samples`/`events`/`messages` group triple as one
//!    Parquet file per group via [`TabularExporter`].
//!
//! The mapping metadata key is the column name with a `mapping` suffix
//! and its value is a JSON object literal; [`decode_mapped_column`]
//! reproduces the original strings exactly from a coded array plus its
//! mapping.

mod convert;
mod error;
mod export;

pub use convert::{
    decode_mapped_column, string_mapping, table_to_record_batch, StringFormat, MAPPING_SUFFIX,
};
pub use error::{ArrowConvertError, ExportError};
pub use export::{ExportFormat, TabularExporter, GROUP_NAMES};
