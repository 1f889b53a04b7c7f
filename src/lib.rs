//! Classify sales leads by Philippine municipality and region, group them per
//! municipality and export the grouped rows as CSV.

pub mod classify;
pub mod config;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod group;
pub mod pipeline;
pub mod reference;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::LeadsConfig;
pub use error::{LeadsError, Result};
pub use group::{GroupedLeads, MunicipalityTable};
pub use reference::{MUNICIPALITIES, REGION_MAP, Region, UNKNOWN};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Processing steps
pub use classify::{classify, classify_array};
pub use enrich::enrich;
pub use group::group_by_municipality;
pub use pipeline::{combined_csv_bytes, export_combined, generate_detailed_summary, process_upload};

// Utility functions
pub use utils::read_spreadsheet;
