use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use edf2arrow::arrow::{ExportFormat, TabularExporter};
use edf2arrow::core::FieldValue;
use edf2arrow::{EdfReader, MessageFilter, ReadOptions};
use indicatif::ProgressBar;

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the EDF file
    input: PathBuf,

    /// Directory the samples/events/messages Parquet groups are written to
    output: PathBuf,

    /// Do not read individual samples (the samples table keeps its
    /// schema, with zero rows)
    #[arg(short, long)]
    ignore_samples: bool,

    /// Join trial message metadata onto events by trial number
    #[arg(short, long)]
    join: bool,

    /// Write string columns as plain Utf8 instead of integer codes with
    /// an attached mapping
    #[arg(short, long)]
    plain: bool,

    /// Keep only messages whose first token is in this list (plus trial
    /// markers); default keeps everything
    #[arg(long, value_name = "TOKEN")]
    filter: Vec<String>,

    /// Character used to split metadata messages
    #[arg(long, default_value = " ")]
    split_char: char,

    /// Message prefix that starts a new trial
    #[arg(long, default_value = "TRIALID")]
    trial_marker: String,

    /// Null out velocity columns (unreliable at high sampling rates)
    #[arg(long)]
    null_velocity: bool,

    /// Skip the 2000 Hz half-tick time correction
    #[arg(long)]
    no_half_tick: bool,

    /// Drop message send-time bookkeeping columns
    #[arg(long)]
    drop_send_time: bool,

    /// Accumulate events per eye and merge the channels on sample_time
    #[arg(long)]
    binocular_events: bool,

    /// Constant metadata column added to all tables, as name=value
    #[arg(long, value_name = "NAME=VALUE", value_parser = parse_meta)]
    meta: Vec<(String, String)>,

    /// Explicit path to the EDF API shared library
    #[arg(long)]
    library: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let mut options = ReadOptions::new()
            .with_ignore_samples(self.ignore_samples)
            .with_join_trials(self.join)
            .with_split_char(self.split_char)
            .with_trial_marker(&self.trial_marker)
            .with_null_velocity(self.null_velocity)
            .with_half_tick_correction(!self.no_half_tick)
            .with_drop_send_time_fields(self.drop_send_time)
            .with_binocular_events(self.binocular_events);
        if !self.filter.is_empty() {
            options = options.with_message_filter(MessageFilter::Keep(self.filter.clone()));
        }
        for (name, value) in &self.meta {
            options = options.with_meta(name, meta_value(value));
        }

        let mut reader = EdfReader::new(options);
        if let Some(library) = &self.library {
            reader = reader.with_library(library.display().to_string());
        }

        let pb = ProgressBar::new_spinner().with_message(format!(
            "reading {} ...",
            self.input.display()
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        let tables = reader.read(&self.input)?;
        pb.finish_and_clear();

        eprintln!(
            "samples: {} x {}, events: {} x {}, messages: {} x {}",
            tables.samples.num_rows(),
            tables.samples.num_columns(),
            tables.events.num_rows(),
            tables.events.num_columns(),
            tables.messages.num_rows(),
            tables.messages.num_columns(),
        );

        let format = if self.plain {
            ExportFormat::Plain
        } else {
            ExportFormat::Mapped
        };
        TabularExporter::new(format).export(
            &tables.samples,
            &tables.events,
            &tables.messages,
            &self.output,
        )?;
        eprintln!("Written to {}", self.output.display());
        Ok(())
    }
}

fn parse_meta(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn meta_value(raw: &str) -> FieldValue {
    match raw.parse::<i64>() {
        Ok(value) => FieldValue::Int(value),
        Err(_) => match raw.parse::<f64>() {
            Ok(value) => FieldValue::Num(value),
            Err(_) => FieldValue::text(raw),
        },
    }
}
