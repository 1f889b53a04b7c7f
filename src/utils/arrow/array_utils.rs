//! Utilities for working with Arrow arrays.
//!
//! Safe column lookup, string extraction, and column replacement on record
//! batches.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{LeadsError, Result};

/// Get a column from a record batch by name
///
/// # Errors
/// Returns `LeadsError::MissingField` if no column has that name
pub fn column_by_name<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(column_name)
        .ok_or_else(|| LeadsError::missing_field(column_name))
}

/// Whether a data type holds text values
#[must_use]
pub fn is_string_type(data_type: &DataType) -> bool {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, value) => {
            matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
        }
        _ => false,
    }
}

/// Normalize a text column so its values can be read as `&str`
///
/// Dictionary-encoded text is decoded to plain `Utf8`; other text arrays are
/// returned as-is.
///
/// # Returns
/// * `Ok(Some(ArrayRef))` - A readable text column
/// * `Ok(None)` - The column does not hold text
pub fn string_column(array: &ArrayRef) -> Result<Option<ArrayRef>> {
    match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Ok(Some(Arc::clone(array))),
        data_type if is_string_type(data_type) => {
            debug!("Decoding dictionary column of type {data_type:?} to Utf8");
            Ok(Some(cast::cast(array, &DataType::Utf8)?))
        }
        _ => Ok(None),
    }
}

/// Read the values of a text array, preserving nulls
///
/// Returns `None` if the array is not `Utf8`, `LargeUtf8` or `Utf8View`.
#[must_use]
pub fn str_values(array: &dyn Array) -> Option<Vec<Option<&str>>> {
    if let Some(values) = array.as_string_opt::<i32>() {
        return Some(values.iter().collect());
    }
    if let Some(values) = array.as_string_opt::<i64>() {
        return Some(values.iter().collect());
    }
    array
        .as_string_view_opt()
        .map(|values| values.iter().collect())
}

/// Set a column on a record batch
///
/// If a column named like `field` exists it is replaced in place, otherwise the
/// column is appended. Schema metadata is carried over.
///
/// # Errors
/// Returns an error if the column length does not match the batch
pub fn upsert_column(batch: &RecordBatch, field: Field, column: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    match schema.index_of(field.name()) {
        Ok(idx) => {
            debug!("Replacing existing column '{}'", field.name());
            fields[idx] = field;
            columns[idx] = column;
        }
        Err(_) => {
            fields.push(field);
            columns.push(column);
        }
    }

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}
