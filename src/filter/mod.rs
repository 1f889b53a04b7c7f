//! Filtering capabilities for record batches

pub mod core;

pub use self::core::{BatchFilter, ColumnEqualsFilter, filter_record_batch};
