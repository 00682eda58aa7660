use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use edf2arrow_arrow::{
    decode_mapped_column, string_mapping, table_to_record_batch, StringFormat, MAPPING_SUFFIX,
};
use edf2arrow_core::{Column, Table};

fn text_column(values: &[&str]) -> Column {
    Column::Str(values.iter().map(|v| Some(Arc::from(*v))).collect())
}

#[test]
fn string_mapping_is_sorted_and_dense() {
    let values: Vec<Option<Arc<str>>> = vec![
        Some(Arc::from("b")),
        Some(Arc::from("a")),
        Some(Arc::from("b")),
        None,
    ];
    let mapping = string_mapping(&values);
    let pairs: Vec<(String, i64)> = mapping.into_iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 1),
            ("nan".to_string(), 2),
        ]
    );
}

#[test]
fn numeric_columns_serialize_directly() {
    let mut table = Table::new();
    table.insert("time", Column::I64(vec![1, 2]));
    table.insert("gavx", Column::F64(vec![1.5, f64::NAN]));

    let batch = table_to_record_batch(&table, StringFormat::Mapped).unwrap();
    assert_eq!(batch.schema().field(0).data_type(), &DataType::Int64);
    assert_eq!(batch.schema().field(1).data_type(), &DataType::Float64);

    let gavx = batch
        .column(1)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(gavx.value(0), 1.5);
    assert!(gavx.value(1).is_nan());
}

#[test]
fn mapped_string_column_round_trips_exactly() {
    let mut table = Table::new();
    table.insert("words", text_column(&["a", "b", "a", "c"]));

    let batch = table_to_record_batch(&table, StringFormat::Mapped).unwrap();
    let field = batch.schema().field(0).clone();
    assert_eq!(field.data_type(), &DataType::Int64);

    let key = format!("words{MAPPING_SUFFIX}");
    let mapping = field.metadata().get(&key).expect("mapping metadata");
    let decoded = decode_mapped_column(batch.column(0).as_ref(), mapping).unwrap();
    assert_eq!(decoded, vec!["a", "b", "a", "c"]);
}

#[test]
fn missing_strings_code_as_the_literal_nan_value() {
    let mut table = Table::new();
    table.insert(
        "words",
        Column::Str(vec![Some(Arc::from("a")), None, Some(Arc::from("a"))]),
    );

    let batch = table_to_record_batch(&table, StringFormat::Mapped).unwrap();
    let field = batch.schema().field(0).clone();
    let mapping = field
        .metadata()
        .get(&format!("words{MAPPING_SUFFIX}"))
        .unwrap();
    let decoded = decode_mapped_column(batch.column(0).as_ref(), mapping).unwrap();
    assert_eq!(decoded, vec!["a", "nan", "a"]);
}

#[test]
fn plain_format_serializes_strings_as_utf8() {
    let mut table = Table::new();
    table.insert(
        "words",
        Column::Str(vec![Some(Arc::from("a")), None]),
    );

    let batch = table_to_record_batch(&table, StringFormat::Plain).unwrap();
    let words = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(words.value(0), "a");
    assert!(words.is_null(1));
}

#[test]
fn decoding_with_a_foreign_code_is_an_error() {
    let coded = Int64Array::from(vec![0, 7]);
    let err = decode_mapped_column(&coded, r#"{"a": 0}"#).unwrap_err();
    assert!(err.to_string().contains("7"));
}

#[test]
fn zero_column_table_converts_to_an_empty_batch() {
    let batch = table_to_record_batch(&Table::new(), StringFormat::Mapped).unwrap();
    assert_eq!(batch.num_columns(), 0);
    assert_eq!(batch.num_rows(), 0);
}
