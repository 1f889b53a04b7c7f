//! CSV file operations
//!
//! Reading delimited uploads into record batches and serialising record
//! batches back to CSV.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::{LeadsError, Result};
use crate::error::util::safe_open_file;

/// Read a CSV file with a header row into one record batch
///
/// # Arguments
/// * `path` - The CSV file
/// * `inference_rows` - Number of records sampled to infer column types
/// * `batch_size` - Rows per decoded batch
///
/// # Errors
/// Returns `LeadsError::MalformedFile` if the file cannot be decoded
pub fn read_csv(path: &Path, inference_rows: usize, batch_size: usize) -> Result<RecordBatch> {
    let mut file = safe_open_file(path, "reading CSV upload")?;

    let format = Format::default().with_header(true);
    let (schema, _) = format
        .infer_schema(&mut file, Some(inference_rows))
        .map_err(|e| LeadsError::malformed(path, e))?;
    file.rewind()?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)
        .map_err(|e| LeadsError::malformed(path, e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, ArrowError>>()
        .map_err(|e| LeadsError::malformed(path, e))?;

    Ok(concat_batches(&schema, &batches)?)
}

/// Serialise a record batch as UTF-8 CSV with a header row
///
/// Null values are written as empty fields.
pub fn to_csv_bytes(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
        writer.write(batch)?;
    }
    Ok(buffer)
}
