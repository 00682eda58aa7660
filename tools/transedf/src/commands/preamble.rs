use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use edf2arrow::{EdfReader, ReadOptions};

#[derive(Args)]
pub struct PreambleArgs {
    /// Path to the EDF file
    input: PathBuf,

    /// Explicit path to the EDF API shared library
    #[arg(long)]
    library: Option<PathBuf>,
}

impl PreambleArgs {
    pub fn run(self) -> Result<()> {
        let mut reader = EdfReader::new(ReadOptions::new());
        if let Some(library) = &self.library {
            reader = reader.with_library(library.display().to_string());
        }
        print!("{}", reader.preamble(&self.input)?);
        Ok(())
    }
}
