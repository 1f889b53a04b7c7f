//! Arrow utility functions

pub mod array_utils;

pub use self::array_utils::{column_by_name, is_string_type, str_values, string_column, upsert_column};
