//! Parquet file operations

use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{LeadsError, Result};
use crate::error::util::safe_open_file;

/// Read a parquet file into one record batch
///
/// # Errors
/// Returns `LeadsError::MalformedFile` if the file is not valid Parquet
pub fn read_parquet(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let file = safe_open_file(path, "reading parquet upload")?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| LeadsError::malformed(path, e))?;
    let schema = builder.schema().clone();
    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .map_err(|e| LeadsError::malformed(path, e))?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch.map_err(|e| LeadsError::malformed(path, e))?);
    }

    Ok(concat_batches(&schema, &batches)?)
}
