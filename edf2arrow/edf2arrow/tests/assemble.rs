use edf2arrow::core::{Cell, Column, Eye, FieldValue, RawEdfFile, RawEvent, RawMessage, RawRecord};
use edf2arrow::edfapi::SAMPLE_COLUMNS;
use edf2arrow::{assemble_tables, MessageFilter, ReadOptions};

fn sample(time: i64, flags: i64, gaze: [f64; 2]) -> RawRecord {
    RawRecord::new()
        .with("time", FieldValue::Int(time))
        .with("gx", FieldValue::Pair(gaze))
        .with("flags", FieldValue::Int(flags))
}

fn event(eye: Eye, trial: i64, start: i64, kind: &str) -> RawEvent {
    RawEvent {
        record: RawRecord::new()
            .with("trial", FieldValue::Int(trial))
            .with("time", FieldValue::Int(start))
            .with("type", FieldValue::text(kind))
            .with("start", FieldValue::Int(start))
            .with("end", FieldValue::Int(start + 40))
            .with("eye", FieldValue::Int(eye.index() as i64)),
        eye,
        samples: Vec::new(),
    }
}

fn message(trial: i64, time: i64, text: &str) -> RawMessage {
    RawMessage {
        trial,
        sample: 0,
        time,
        text: text.to_string(),
    }
}

fn recording() -> RawEdfFile {
    RawEdfFile {
        samples: vec![
            sample(1000, 0x0002, [410.0, 200.0]),
            sample(1001, 0x0002, [411.0, 201.0]),
            sample(1002, 0x0000, [412.0, 202.0]),
        ],
        events: vec![
            event(Eye::Left, 0, 1000, "fixation"),
            event(Eye::Left, 1, 1100, "saccade"),
        ],
        messages: vec![
            message(0, 999, "TRIALID 0"),
            message(0, 1001, "beep_150"),
            message(0, 1002, "display on"),
            message(1, 1099, "TRIALID 1"),
        ],
    }
}

#[test]
fn sample_times_become_floats_with_the_half_tick_offset() {
    let tables = assemble_tables(&recording(), &ReadOptions::default()).unwrap();
    let time = tables.samples.column("time").unwrap();
    assert_eq!(time.cell(0), Cell::F64(1000.5));
    assert_eq!(time.cell(2), Cell::F64(1002.0));
}

#[test]
fn half_tick_correction_can_be_disabled() {
    let options = ReadOptions::default().with_half_tick_correction(false);
    let tables = assemble_tables(&recording(), &options).unwrap();
    let time = tables.samples.column("time").unwrap();
    assert_eq!(time.cell(0), Cell::I64(1000));
}

#[test]
fn paired_gaze_fields_split_per_eye() {
    let tables = assemble_tables(&recording(), &ReadOptions::default()).unwrap();
    assert!(tables.samples.contains("left_gx"));
    assert!(tables.samples.contains("right_gx"));
    assert_eq!(
        tables.samples.cell("left_gx", 1),
        Some(Cell::F64(411.0))
    );
}

#[test]
fn ignoring_samples_keeps_the_full_empty_schema() {
    let options = ReadOptions::default().with_ignore_samples(true);
    let tables = assemble_tables(&recording(), &options).unwrap();
    assert_eq!(tables.samples.num_rows(), 0);
    assert_eq!(tables.samples.num_columns(), SAMPLE_COLUMNS.len());
    assert!(tables.samples.contains("left_gx"));
    assert!(tables.samples.contains("flags"));
}

#[test]
fn default_events_table_keeps_one_row_per_event() {
    let tables = assemble_tables(&recording(), &ReadOptions::default()).unwrap();
    assert_eq!(tables.events.num_rows(), 2);
    assert!(tables.events.contains("eye"));
    assert_eq!(tables.events.cell("start", 1), Some(Cell::I64(1100)));
}

#[test]
fn all_filter_keeps_every_message_without_derived_fields() {
    let tables = assemble_tables(&recording(), &ReadOptions::default()).unwrap();
    assert_eq!(tables.messages.num_rows(), 4);
    assert!(!tables.messages.contains("beep"));
    assert!(tables.messages.contains("trialid_time"));
}

#[test]
fn keep_filter_derives_fields_and_drops_the_rest() {
    let options = ReadOptions::default()
        .with_message_filter(MessageFilter::Keep(vec!["beep".to_string()]))
        .with_split_char('_');
    let tables = assemble_tables(&recording(), &options).unwrap();

    // Two markers plus the one matching metadata message survive.
    assert_eq!(tables.messages.num_rows(), 3);
    let beep = tables.messages.column("beep").unwrap();
    let row = (0..3)
        .find(|&r| beep.cell(r) != Cell::Null)
        .expect("derived row");
    assert_eq!(beep.cell(row), Cell::F64(150.0));
}

#[test]
fn marker_messages_record_their_receive_time() {
    let tables = assemble_tables(&recording(), &ReadOptions::default()).unwrap();
    assert_eq!(
        tables.messages.cell("trialid_time", 0),
        Some(Cell::F64(999.0))
    );
    assert_eq!(tables.messages.cell("trialid_time", 1), Some(Cell::Null));
}

#[test]
fn joining_trials_attaches_message_metadata_to_events() {
    let options = ReadOptions::default()
        .with_message_filter(MessageFilter::Keep(vec!["beep".to_string()]))
        .with_split_char('_')
        .with_join_trials(true);
    let tables = assemble_tables(&recording(), &options).unwrap();

    // Both events survive the left join; trial 1 has no beep message.
    assert_eq!(tables.events.num_rows(), 3);
    assert!(tables.events.contains("beep"));
    let beep = tables.events.column("beep").unwrap();
    let matched: Vec<bool> = (0..3).map(|r| beep.cell(r) != Cell::Null).collect();
    assert!(matched.contains(&true));
    assert!(matched.contains(&false));
}

#[test]
fn binocular_events_merge_on_sample_time() {
    let raw = RawEdfFile {
        samples: Vec::new(),
        events: vec![
            event(Eye::Left, 0, 1000, "fixation"),
            event(Eye::Right, 0, 1005, "fixation"),
            event(Eye::Left, 0, 1100, "saccade"),
        ],
        messages: Vec::new(),
    };
    let options = ReadOptions::default().with_binocular_events(true);
    let tables = assemble_tables(&raw, &options).unwrap();

    assert_eq!(tables.events.num_rows(), 3);
    assert!(tables.events.contains("sample_time"));
    assert!(tables.events.contains("left_start"));
    assert!(tables.events.contains("right_start"));
    let time = tables.events.column("sample_time").unwrap();
    assert_eq!(time.cell(0), Cell::F64(1000.0));
    assert_eq!(time.cell(1), Cell::F64(1005.0));
    assert_eq!(time.cell(2), Cell::F64(1100.0));
}

#[test]
fn meta_columns_lead_every_table() {
    let options = ReadOptions::default()
        .with_meta("subject", FieldValue::text("s01"))
        .with_meta("session", FieldValue::Int(2));
    let tables = assemble_tables(&recording(), &options).unwrap();

    for table in [&tables.samples, &tables.events, &tables.messages] {
        let names: Vec<&str> = table.names().collect();
        assert_eq!(&names[..2], ["subject", "session"]);
    }
    assert_eq!(
        tables.events.cell("subject", 0),
        Some(Cell::Str("s01".into()))
    );
    assert_eq!(tables.samples.cell("session", 2), Some(Cell::I64(2)));
}

#[test]
fn empty_recording_still_yields_the_message_schema() {
    let tables = assemble_tables(&RawEdfFile::default(), &ReadOptions::default()).unwrap();
    assert_eq!(tables.messages.num_rows(), 0);
    for name in ["trial", "sample", "time", "message"] {
        assert!(tables.messages.contains(name));
    }
}

#[test]
fn velocity_columns_null_out_when_requested() {
    let raw = RawEdfFile {
        samples: vec![RawRecord::new()
            .with("time", FieldValue::Int(1000))
            .with("gxvel", FieldValue::Pair([3.0, 4.0]))
            .with("flags", FieldValue::Int(0))],
        events: Vec::new(),
        messages: Vec::new(),
    };
    let options = ReadOptions::default().with_null_velocity(true);
    let tables = assemble_tables(&raw, &options).unwrap();
    assert_eq!(tables.samples.cell("left_gxvel", 0), Some(Cell::Null));
    assert_eq!(tables.samples.cell("time", 0), Some(Cell::F64(1000.0)));
}
