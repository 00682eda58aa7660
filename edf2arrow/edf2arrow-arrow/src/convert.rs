//! Conversion from assembled tables to Arrow `RecordBatch`es.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use edf2arrow_core::{Column, Table};

use crate::error::ArrowConvertError;

/// Suffix appended to a column name to form its mapping metadata key.
pub const MAPPING_SUFFIX: &str = "mapping";

/// How string columns are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// Dense integer coding with the value→index mapping attached as
    /// field metadata. Keeps the store free of variable-length data.
    Mapped,
    /// Plain Utf8 columns.
    Plain,
}

/// Deterministic value→index mapping over the distinct values of a
/// string column, in sorted order. Missing cells map as the literal
/// `"nan"` value.
pub fn string_mapping(values: &[Option<Arc<str>>]) -> BTreeMap<String, i64> {
    let mut mapping = BTreeMap::new();
    for value in values {
        mapping.insert(cell_text(value).to_string(), 0);
    }
    for (index, code) in mapping.values_mut().enumerate() {
        *code = index as i64;
    }
    mapping
}

fn cell_text(value: &Option<Arc<str>>) -> &str {
    value.as_deref().unwrap_or("nan")
}

/// Convert a table to a `RecordBatch`.
///
/// The serialization path of each column is decided once, up front, by
/// its type: numeric columns pass through, string columns follow
/// `format`. There is no failure-driven fallback.
pub fn table_to_record_batch(
    table: &Table,
    format: StringFormat,
) -> Result<RecordBatch, ArrowConvertError> {
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());

    for (name, column) in table.columns() {
        match column {
            Column::F64(values) => {
                fields.push(Field::new(name, DataType::Float64, false));
                arrays.push(Arc::new(Float64Array::from(values.clone())));
            }
            Column::I64(values) => {
                fields.push(Field::new(name, DataType::Int64, false));
                arrays.push(Arc::new(Int64Array::from(values.clone())));
            }
            Column::Str(values) => match format {
                StringFormat::Plain => {
                    fields.push(Field::new(name, DataType::Utf8, true));
                    arrays.push(Arc::new(
                        values
                            .iter()
                            .map(|v| v.as_deref())
                            .collect::<StringArray>(),
                    ));
                }
                StringFormat::Mapped => {
                    let mapping = string_mapping(values);
                    let codes: Vec<i64> =
                        values.iter().map(|v| mapping[cell_text(v)]).collect();
                    let metadata = HashMap::from([(
                        format!("{name}{MAPPING_SUFFIX}"),
                        serde_json::to_string(&mapping)?,
                    )]);
                    fields.push(
                        Field::new(name, DataType::Int64, false).with_metadata(metadata),
                    );
                    arrays.push(Arc::new(Int64Array::from(codes)));
                }
            },
        }
    }

    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

/// Decode an integer-coded column back to its original string values
/// using the mapping that was attached at export time.
pub fn decode_mapped_column(
    coded: &dyn Array,
    mapping_json: &str,
) -> Result<Vec<String>, ArrowConvertError> {
    let coded = coded
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| ArrowConvertError::NotCoded {
            actual: coded.data_type().to_string(),
        })?;

    let mapping: BTreeMap<String, i64> = serde_json::from_str(mapping_json)?;
    let inverse: HashMap<i64, &str> = mapping.iter().map(|(k, &v)| (v, k.as_str())).collect();

    let mut values = Vec::with_capacity(coded.len());
    for row in 0..coded.len() {
        let code = coded.value(row);
        let value = inverse
            .get(&code)
            .ok_or(ArrowConvertError::UnmappedCode { code })?;
        values.push(value.to_string());
    }
    Ok(values)
}
