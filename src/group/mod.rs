//! Per-municipality grouping of enriched leads
//!
//! Partitions an enriched dataset into one table per matched municipality, in
//! ascending name order, and concatenates those tables into a single combined
//! table for export. Rows classified as `Unknown` appear in neither.

use std::time::Instant;

use arrow::array::AsArray;
use arrow::compute::concat_batches;
use arrow::datatypes::Field;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::{debug, warn};

use crate::enrich::MUNICIPALITY_COLUMN;
use crate::error::{LeadsError, Result};
use crate::filter::{BatchFilter, ColumnEqualsFilter, filter_record_batch};
use crate::reference::{UNKNOWN, region_label};
use crate::utils::arrow::{column_by_name, upsert_column};

/// Name of the display copy of the address column
pub const PRIMARY_ADDRESS_COLUMN: &str = "Primary Address";

/// The leads of one municipality
#[derive(Debug, Clone, PartialEq)]
pub struct MunicipalityTable {
    /// Municipality every row was classified as
    pub municipality: String,
    /// Region label of the municipality
    pub region: &'static str,
    /// 0-based positions of the rows in the uploaded dataset
    pub source_rows: Vec<usize>,
    /// The rows, with all original and derived columns
    pub batch: RecordBatch,
}

impl MunicipalityTable {
    /// Number of leads in this table
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}

/// Result of grouping one upload
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedLeads {
    /// Per-municipality tables in ascending municipality order
    pub tables: Vec<MunicipalityTable>,
    /// All tables concatenated in the same order
    pub combined: RecordBatch,
}

impl GroupedLeads {
    /// Look up the table of a municipality
    #[must_use]
    pub fn table(&self, municipality: &str) -> Option<&MunicipalityTable> {
        self.tables.iter().find(|t| t.municipality == municipality)
    }

    /// Municipality names in display order
    pub fn municipalities(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.municipality.as_str())
    }

    /// Whether no lead matched any municipality
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Partition an enriched dataset by municipality
///
/// # Arguments
/// * `enriched` - Output of [`crate::enrich::enrich`]
/// * `address_column` - Name of the free-text address column, copied into
///   the `Primary Address` display column
///
/// # Returns
/// The per-municipality tables and their concatenation
///
/// # Errors
/// Returns `LeadsError::MissingField` if the address or municipality column is
/// absent
pub fn group_by_municipality(enriched: &RecordBatch, address_column: &str) -> Result<GroupedLeads> {
    let start = Instant::now();

    let addresses = column_by_name(enriched, address_column)?;
    let address_field = enriched.schema().field_with_name(address_column)?.clone();
    let display = upsert_column(
        enriched,
        Field::new(
            PRIMARY_ADDRESS_COLUMN,
            address_field.data_type().clone(),
            address_field.is_nullable(),
        ),
        addresses.clone(),
    )?;

    let labels = column_by_name(&display, MUNICIPALITY_COLUMN)?
        .as_string_opt::<i32>()
        .ok_or_else(|| {
            LeadsError::Arrow(ArrowError::SchemaError(format!(
                "'{MUNICIPALITY_COLUMN}' column is not Utf8"
            )))
        })?;

    let keys: Vec<&str> = labels
        .iter()
        .flatten()
        .filter(|label| *label != UNKNOWN)
        .unique()
        .sorted()
        .collect();

    let mut tables = Vec::with_capacity(keys.len());
    for municipality in keys {
        let filter = ColumnEqualsFilter::new(MUNICIPALITY_COLUMN, municipality);
        let mask = filter.mask(&display)?;
        let source_rows: Vec<usize> = (0..mask.len()).filter(|&row| mask.value(row)).collect();
        let batch = filter_record_batch(&display, &mask)?;

        debug!("{municipality}: {} leads", batch.num_rows());
        tables.push(MunicipalityTable {
            municipality: municipality.to_string(),
            region: region_label(municipality),
            source_rows,
            batch,
        });
    }

    if tables.is_empty() && enriched.num_rows() > 0 {
        warn!("No address matched a known municipality; the export will be empty");
    }

    let combined = concat_batches(&display.schema(), tables.iter().map(|t| &t.batch))?;
    debug!(
        "Grouped {} of {} rows into {} municipalities in {:?}",
        combined.num_rows(),
        enriched.num_rows(),
        tables.len(),
        start.elapsed()
    );

    Ok(GroupedLeads { tables, combined })
}
