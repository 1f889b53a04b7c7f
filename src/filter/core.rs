//! Core filtering functionality for record batches
//!
//! Row selection over Arrow record batches with boolean masks. Filtering is
//! stable: kept rows stay in their original relative order.

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;

use crate::error::{LeadsError, Result};
use crate::utils::arrow::{column_by_name, str_values, string_column};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
///
/// # Errors
/// Returns an error if the mask length differs from the row count
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(LeadsError::Arrow(arrow::error::ArrowError::InvalidArgumentError(
            format!(
                "Mask length ({}) doesn't match batch row count ({})",
                mask.len(),
                batch.num_rows()
            ),
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Boolean mask of the rows this filter keeps
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray>;

    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.mask(batch)?;
        filter_record_batch(batch, &mask)
    }
}

/// Keeps rows whose text column equals a value exactly
///
/// Null cells never match. A column that does not hold text matches nothing.
#[derive(Debug, Clone)]
pub struct ColumnEqualsFilter {
    column: String,
    value: String,
}

impl ColumnEqualsFilter {
    /// Create a new equality filter
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl BatchFilter for ColumnEqualsFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let column = column_by_name(batch, &self.column)?;
        let Some(text) = string_column(column)? else {
            return Ok(BooleanArray::from(vec![false; batch.num_rows()]));
        };

        let keep: Vec<bool> = str_values(text.as_ref())
            .unwrap_or_default()
            .into_iter()
            .map(|value| value == Some(self.value.as_str()))
            .collect();
        Ok(BooleanArray::from(keep))
    }
}
