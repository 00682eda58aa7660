use edf2arrow_core::{join_eyes, Column, MergeError, Table};

fn eye_table(times: &[i64], trials: &[i64], gavx: &[f64]) -> Table {
    let mut table = Table::new();
    table.insert("sample_time", Column::I64(times.to_vec()));
    table.insert("trial", Column::I64(trials.to_vec()));
    table.insert("gavx", Column::F64(gavx.to_vec()));
    table
}

#[test]
fn monocular_side_passes_through_unchanged() {
    let table = eye_table(&[1, 2], &[1, 1], &[10.0, 20.0]);
    let merged = join_eyes(None, Some(table.clone())).unwrap();
    assert_eq!(merged.num_rows(), 2);
    assert_eq!(merged.column("trial"), table.column("trial"));
    assert_eq!(merged.column("gavx"), table.column("gavx"));
}

#[test]
fn monocular_eye_prefixed_trial_is_canonicalized() {
    let mut table = Table::new();
    table.insert("sample_time", Column::I64(vec![1]));
    table.insert("right_trial", Column::I64(vec![7]));
    let merged = join_eyes(None, Some(table)).unwrap();
    assert!(merged.contains("trial"));
    assert!(!merged.contains("right_trial"));
    assert_eq!(merged.column("trial"), Some(&Column::I64(vec![7])));
}

#[test]
fn binocular_merge_keeps_every_row_of_both_sides() {
    let left = eye_table(&[1, 3], &[1, 2], &[10.0, 30.0]);
    let right = eye_table(&[2, 3], &[1, 2], &[20.0, 35.0]);
    let merged = join_eyes(Some(left), Some(right)).unwrap();

    assert_eq!(merged.num_rows(), 4);
    assert_eq!(
        merged.column("sample_time"),
        Some(&Column::I64(vec![1, 2, 3, 3]))
    );
}

#[test]
fn binocular_merge_prefixes_columns_and_fills_the_other_eye_with_nan() {
    let left = eye_table(&[1, 3], &[1, 2], &[10.0, 30.0]);
    let right = eye_table(&[2, 3], &[1, 2], &[20.0, 35.0]);
    let merged = join_eyes(Some(left), Some(right)).unwrap();

    let Some(Column::F64(left_gavx)) = merged.column("left_gavx") else {
        panic!("expected f64 column");
    };
    let Some(Column::F64(right_gavx)) = merged.column("right_gavx") else {
        panic!("expected f64 column");
    };
    // Row order is sample_time 1 (left), 2 (right), 3 (left), 3 (right).
    assert_eq!(left_gavx[0], 10.0);
    assert!(left_gavx[1].is_nan());
    assert_eq!(left_gavx[2], 30.0);
    assert!(left_gavx[3].is_nan());
    assert!(right_gavx[0].is_nan());
    assert_eq!(right_gavx[1], 20.0);
    assert!(right_gavx[2].is_nan());
    assert_eq!(right_gavx[3], 35.0);
}

#[test]
fn binocular_merge_unifies_the_trial_column() {
    let left = eye_table(&[1], &[4], &[0.0]);
    let right = eye_table(&[2], &[5], &[0.0]);
    let merged = join_eyes(Some(left), Some(right)).unwrap();

    assert!(!merged.contains("left_trial"));
    assert!(!merged.contains("right_trial"));
    assert_eq!(merged.column("trial"), Some(&Column::I64(vec![4, 5])));
}

#[test]
fn schema_mismatch_is_an_error() {
    let left = eye_table(&[1], &[1], &[0.0]);
    let mut right = eye_table(&[1], &[1], &[0.0]);
    right.insert("extra", Column::F64(vec![1.0]));

    let err = join_eyes(Some(left), Some(right)).unwrap_err();
    match err {
        MergeError::SchemaMismatch {
            left_only,
            right_only,
        } => {
            assert!(left_only.is_empty());
            assert_eq!(right_only, vec!["extra".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_sample_time_is_an_error() {
    let mut left = Table::new();
    left.insert("trial", Column::I64(vec![1]));
    let mut right = Table::new();
    right.insert("trial", Column::I64(vec![1]));

    let err = join_eyes(Some(left), Some(right)).unwrap_err();
    assert!(matches!(err, MergeError::MissingKey { key: "sample_time" }));
}

#[test]
fn both_sides_absent_is_an_error() {
    assert!(matches!(join_eyes(None, None), Err(MergeError::NoData)));
}
