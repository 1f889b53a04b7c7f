//! Dataset enrichment with derived municipality and region columns.

use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::classify::classify_array;
use crate::error::Result;
use crate::reference::region_label;
use crate::utils::arrow::{column_by_name, upsert_column};

/// Name of the derived municipality column
pub const MUNICIPALITY_COLUMN: &str = "Municipality";

/// Name of the derived region column
pub const REGION_COLUMN: &str = "Region";

/// Add `Municipality` and `Region` columns to a dataset
///
/// # Arguments
/// * `dataset` - The uploaded rows
/// * `address_column` - Name of the free-text address column
///
/// # Returns
/// A new batch with the original columns in their original order and the
/// derived columns appended (or replaced in place if already present)
///
/// # Errors
/// Returns `LeadsError::MissingField` if the address column is absent
pub fn enrich(dataset: &RecordBatch, address_column: &str) -> Result<RecordBatch> {
    let start = Instant::now();
    let addresses = column_by_name(dataset, address_column)?;

    let municipalities = classify_array(addresses)?;
    let regions: StringArray = municipalities
        .iter()
        .map(|municipality| municipality.map(region_label))
        .collect();

    let enriched = upsert_column(
        dataset,
        Field::new(MUNICIPALITY_COLUMN, DataType::Utf8, false),
        Arc::new(municipalities) as ArrayRef,
    )?;
    let enriched = upsert_column(
        &enriched,
        Field::new(REGION_COLUMN, DataType::Utf8, false),
        Arc::new(regions) as ArrayRef,
    )?;

    debug!(
        "Enriched {} rows in {:?}",
        enriched.num_rows(),
        start.elapsed()
    );
    Ok(enriched)
}
