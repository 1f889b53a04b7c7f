//! Utility modules shared by the lead pipeline

pub mod arrow;
pub mod io;
pub mod logging;

pub use io::{read_spreadsheet, to_csv_bytes, write_atomic};
pub use logging::{log_operation_complete, log_operation_start, log_warning};
