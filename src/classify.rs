//! Address classification
//!
//! Maps a free-text address to the first reference municipality whose name
//! occurs in it, ignoring case. Matching is a plain ordered scan; priority is
//! list order, never specificity.

use std::sync::LazyLock;

use arrow::array::{ArrayRef, StringArray};
use log::warn;

use crate::error::Result;
use crate::reference::{MUNICIPALITIES, UNKNOWN};
use crate::utils::arrow::{str_values, string_column};

/// Reference names paired with their lower-cased search form
static SEARCH_TERMS: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    MUNICIPALITIES
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .collect()
});

/// Classify one address
///
/// Returns the matched municipality name, or [`UNKNOWN`] when the address is
/// null or mentions no municipality.
#[must_use]
pub fn classify(address: Option<&str>) -> &'static str {
    let Some(address) = address else {
        return UNKNOWN;
    };
    let address = address.to_lowercase();

    SEARCH_TERMS
        .iter()
        .find(|(term, _)| address.contains(term.as_str()))
        .map_or(UNKNOWN, |(_, name)| *name)
}

/// Classify every value of an address column
///
/// A column that does not hold text classifies as [`UNKNOWN`] on every row.
pub fn classify_array(column: &ArrayRef) -> Result<StringArray> {
    let Some(text) = string_column(column)? else {
        warn!(
            "Address column has non-text type {:?}; every row classifies as {UNKNOWN}",
            column.data_type()
        );
        return Ok(StringArray::from(vec![UNKNOWN; column.len()]));
    };

    let labels: Vec<&str> = str_values(text.as_ref())
        .unwrap_or_default()
        .into_iter()
        .map(classify)
        .collect();
    Ok(StringArray::from(labels))
}
