//! Splitting and filtering of raw message text into message records.

use edf2arrow_core::{FieldValue, RawMessage, RawRecord};

/// Decides which non-marker messages become rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageFilter {
    /// Every message becomes a row; no metadata fields are derived.
    #[default]
    All,
    /// Only trial-marker messages and messages whose first token (after
    /// splitting on the configured character) is in this list are kept;
    /// matching messages derive a metadata field named after the token.
    Keep(Vec<String>),
}

impl MessageFilter {
    fn accepts(&self, head: &str) -> bool {
        match self {
            MessageFilter::All => true,
            MessageFilter::Keep(tokens) => tokens.iter().any(|t| t == head),
        }
    }
}

/// Turn one raw message into a record, or drop it.
///
/// Every kept message carries `trial`, `sample`, `time` and the full
/// `message` text. A trial-marker message additionally records the
/// marker's receive time under `<marker_lowercase>_time`. With a keep
/// list, a matching message derives a field named after its first
/// token: the remainder parsed as a number when it is one token of
/// digits, the remainder text otherwise.
pub fn message_record(
    message: &RawMessage,
    filter: &MessageFilter,
    split_char: char,
    trial_marker: &str,
) -> Option<RawRecord> {
    let text = message.text.as_str();
    let is_marker = text.starts_with(trial_marker);

    let mut derived: Option<(String, FieldValue)> = None;
    if is_marker {
        derived = Some((
            format!("{}_time", trial_marker.to_lowercase()),
            FieldValue::Int(message.time),
        ));
    } else if let MessageFilter::Keep(_) = filter {
        let mut tokens = text.split(split_char);
        let head = tokens.next().unwrap_or("");
        if !filter.accepts(head) {
            return None;
        }
        let rest: Vec<&str> = tokens.collect();
        let value = match rest.as_slice() {
            [single] => match single.parse::<f64>() {
                Ok(number) => FieldValue::Num(number),
                Err(_) => FieldValue::text(*single),
            },
            _ => FieldValue::text(rest.join(&split_char.to_string())),
        };
        derived = Some((head.to_string(), value));
    }

    let mut record = RawRecord::new();
    record.push("trial", FieldValue::Int(message.trial));
    record.push("sample", FieldValue::Int(message.sample));
    record.push("time", FieldValue::Int(message.time));
    record.push("message", FieldValue::text(text));
    if let Some((name, value)) = derived {
        record.push(name, value);
    }
    Some(record)
}
