//! Configuration for lead processing.

use std::path::Path;

use serde::Deserialize;

use crate::error::{LeadsError, Result};
use crate::error::util::safe_open_file;

/// Column holding the free-text address of each lead
pub const DEFAULT_ADDRESS_COLUMN: &str = "primary address";

/// File name of the combined export
pub const DEFAULT_EXPORT_FILE_NAME: &str = "detailed_leads_data.csv";

/// Default batch size for CSV and Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Configuration for reading, classifying and exporting uploads
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeadsConfig {
    /// Name of the required address column (case-sensitive)
    pub address_column: String,
    /// File name of the combined CSV export
    pub export_file_name: String,
    /// Worksheet to read from workbook uploads, 0-based
    pub sheet_index: usize,
    /// Rows per batch when decoding CSV and Parquet
    pub batch_size: usize,
    /// Number of CSV records used for schema inference
    pub schema_inference_rows: usize,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            address_column: DEFAULT_ADDRESS_COLUMN.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            sheet_index: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            schema_inference_rows: 1000,
        }
    }
}

impl LeadsConfig {
    /// Load a configuration from a JSON file
    ///
    /// Keys that are absent keep their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "loading configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| LeadsError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make processing meaningless
    pub fn validate(&self) -> Result<()> {
        if self.address_column.is_empty() {
            return Err(LeadsError::Config("address_column must not be empty".into()));
        }
        if self.export_file_name.is_empty() {
            return Err(LeadsError::Config("export_file_name must not be empty".into()));
        }
        if self.batch_size == 0 {
            return Err(LeadsError::Config("batch_size must be positive".into()));
        }
        Ok(())
    }
}
