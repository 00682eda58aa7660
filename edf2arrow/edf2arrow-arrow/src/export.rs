//! Parquet export of the assembled group triple.

use std::fs;
use std::path::Path;

use edf2arrow_core::Table;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;

use crate::convert::{table_to_record_batch, StringFormat};
use crate::error::ExportError;

/// The three top-level groups of an exported store.
pub const GROUP_NAMES: [&str; 3] = ["samples", "events", "messages"];

/// Output flavor of [`TabularExporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// String columns coded as integers with the mapping stored as
    /// field metadata; every dataset in the store is numeric.
    Mapped,
    /// String columns written as Utf8.
    Plain,
}

/// Writes the `samples`/`events`/`messages` triple as one
/// gzip-compressed Parquet file per group under a destination
/// directory. Constructed per invocation; carries no cross-file state.
#[derive(Debug, Clone, Copy)]
pub struct TabularExporter {
    format: ExportFormat,
}

impl TabularExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn export(
        &self,
        samples: &Table,
        events: &Table,
        messages: &Table,
        destination: &Path,
    ) -> Result<(), ExportError> {
        fs::create_dir_all(destination)?;
        for (name, table) in GROUP_NAMES.into_iter().zip([samples, events, messages]) {
            self.write_group(table, &destination.join(format!("{name}.parquet")))?;
        }
        Ok(())
    }

    fn write_group(&self, table: &Table, path: &Path) -> Result<(), ExportError> {
        let string_format = match self.format {
            ExportFormat::Mapped => StringFormat::Mapped,
            ExportFormat::Plain => StringFormat::Plain,
        };
        let batch = table_to_record_batch(table, string_format)?;

        let file = fs::File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::GZIP(GzipLevel::try_new(1)?))
            .build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }
}
