//! Pipeline configuration.

use edf2arrow_core::FieldValue;

use crate::messages::MessageFilter;

/// Options controlling one read-and-assemble invocation.
///
/// The defaults match the most common configuration: read samples,
/// keep every message, apply the half-tick time correction, and leave
/// events as one table with an `eye` column.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Skip individual samples; the samples table still carries its
    /// full column set, with zero rows.
    pub ignore_samples: bool,
    /// Which non-marker messages to keep, and which derive metadata
    /// fields.
    pub message_filter: MessageFilter,
    /// Character that splits metadata messages into tokens.
    pub split_char: char,
    /// Message prefix that starts a new trial.
    pub trial_marker: String,
    /// Left-join trial message metadata onto the events table.
    pub join_trials: bool,
    /// Null out velocity columns reported unreliably by the native
    /// library at high sampling rates.
    pub null_velocity: bool,
    /// Convert sample times to floats with the 2000 Hz half-tick
    /// offset applied.
    pub half_tick_correction: bool,
    /// Drop message send-time bookkeeping columns from the output.
    pub drop_send_time_fields: bool,
    /// Accumulate events per eye and merge the two channels on
    /// `sample_time` instead of keeping one table with an `eye` column.
    pub binocular_events: bool,
    /// Constant metadata columns prepended to all three tables.
    pub meta: Vec<(String, FieldValue)>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            ignore_samples: false,
            message_filter: MessageFilter::All,
            split_char: ' ',
            trial_marker: "TRIALID".to_string(),
            join_trials: false,
            null_velocity: false,
            half_tick_correction: true,
            drop_send_time_fields: false,
            binocular_events: false,
            meta: Vec::new(),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_samples(mut self, ignore: bool) -> Self {
        self.ignore_samples = ignore;
        self
    }

    pub fn with_message_filter(mut self, filter: MessageFilter) -> Self {
        self.message_filter = filter;
        self
    }

    pub fn with_split_char(mut self, split_char: char) -> Self {
        self.split_char = split_char;
        self
    }

    pub fn with_trial_marker(mut self, marker: impl Into<String>) -> Self {
        self.trial_marker = marker.into();
        self
    }

    pub fn with_join_trials(mut self, join: bool) -> Self {
        self.join_trials = join;
        self
    }

    pub fn with_null_velocity(mut self, null: bool) -> Self {
        self.null_velocity = null;
        self
    }

    pub fn with_half_tick_correction(mut self, correct: bool) -> Self {
        self.half_tick_correction = correct;
        self
    }

    pub fn with_drop_send_time_fields(mut self, drop: bool) -> Self {
        self.drop_send_time_fields = drop;
        self
    }

    pub fn with_binocular_events(mut self, binocular: bool) -> Self {
        self.binocular_events = binocular;
        self
    }

    /// Add a constant metadata column to all three tables.
    pub fn with_meta(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.meta.push((name.into(), value));
        self
    }
}
