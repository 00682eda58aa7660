//! EDF file reader: native read plus table assembly.

use std::path::Path;

use edf2arrow_edfapi::{EdfApi, RawReadOptions};

use crate::assemble::{assemble_tables, EdfTables};
use crate::error::EdfReaderError;
use crate::options::ReadOptions;

/// Reads one EDF file into assembled tables.
///
/// A reader is a plain value constructed per use; the native library
/// handle is acquired inside [`read`](Self::read) and released before
/// it returns, error or not. One fresh read is deterministic, but the
/// vendor library has shown small numeric drift across repeated
/// in-process reads of the same file, so callers comparing repeats
/// should use tolerance-based comparison.
#[derive(Debug, Clone, Default)]
pub struct EdfReader {
    options: ReadOptions,
    library: Option<String>,
}

impl EdfReader {
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            library: None,
        }
    }

    /// Load the vendor library from an explicit path instead of the
    /// platform-default name.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Read and assemble one file.
    pub fn read(&self, path: &Path) -> Result<EdfTables, EdfReaderError> {
        check_exists(path)?;
        let raw_options = RawReadOptions {
            ignore_samples: self.options.ignore_samples,
            trial_marker: self.options.trial_marker.clone(),
        };
        let api = self.load_api()?;
        let raw = {
            let mut file = api.open(path, !self.options.ignore_samples)?;
            file.read_raw(&raw_options)?
        };
        assemble_tables(&raw, &self.options)
    }

    /// Read the preamble text block of one file.
    pub fn preamble(&self, path: &Path) -> Result<String, EdfReaderError> {
        check_exists(path)?;
        let api = self.load_api()?;
        let mut file = api.open(path, false)?;
        Ok(file.preamble_text()?)
    }

    /// Total element count of one file, for progress reporting.
    pub fn element_count(&self, path: &Path) -> Result<u64, EdfReaderError> {
        check_exists(path)?;
        let api = self.load_api()?;
        let file = api.open(path, !self.options.ignore_samples)?;
        Ok(u64::from(file.element_count()))
    }

    fn load_api(&self) -> Result<std::sync::Arc<EdfApi>, EdfReaderError> {
        Ok(match &self.library {
            Some(library) => EdfApi::load(library)?,
            None => EdfApi::load_default()?,
        })
    }
}

/// The existence check runs before any native call so a bad path fails
/// cleanly instead of inside the vendor library.
fn check_exists(path: &Path) -> Result<(), EdfReaderError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EdfReaderError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}
