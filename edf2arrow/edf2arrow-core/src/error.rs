//! Error types for table assembly and normalization.

/// Errors produced by [`join_eyes`](crate::join_eyes).
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Neither eye channel carried any data.
    #[error("no data recorded for either eye")]
    NoData,

    /// The two eye tables disagree in a way the eye-prefix convention
    /// cannot explain; the caller must resolve the upstream
    /// inconsistency.
    #[error("eye channel schemas differ: left-only [{}], right-only [{}]", left_only.join(", "), right_only.join(", "))]
    SchemaMismatch {
        left_only: Vec<String>,
        right_only: Vec<String>,
    },

    /// The per-row join key is missing from one of the tables.
    #[error("merge key column '{key}' not present in both eye tables")]
    MissingKey { key: &'static str },
}

/// Errors produced by [`trials2events`](crate::trials2events).
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// The join key column is absent from one side.
    #[error("join key column 'trial' not present in {side} table")]
    MissingTrialColumn { side: &'static str },
}

/// Errors produced by the time and column normalizers.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// A column the transform reads is not in the table.
    #[error("required column '{name}' not present")]
    MissingColumn { name: &'static str },
}
