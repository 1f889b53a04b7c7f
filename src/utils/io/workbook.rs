//! Workbook (Excel / OpenDocument) reading
//!
//! Decodes one worksheet into a record batch. The first row is the header.
//! Column types are inferred from the cell values: all-boolean columns become
//! `Boolean`, all-numeric columns `Int64` or `Float64`, and everything else
//! `Utf8` with cells rendered as text.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use calamine::{Data, DataType as _, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use crate::error::{LeadsError, Result};

/// Format used for date and time cells
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stand-in for cells past the end of a short row
static EMPTY_CELL: Data = Data::Empty;

/// Read one worksheet of a workbook into a record batch
///
/// # Arguments
/// * `path` - Workbook file (`xlsx`, `xlsm`, `xlsb`, `xls` or `ods`)
/// * `sheet_index` - 0-based worksheet position
///
/// # Errors
/// Returns `LeadsError::MalformedFile` if the workbook cannot be opened or the
/// worksheet does not exist
pub fn read_workbook(path: &Path, sheet_index: usize) -> Result<RecordBatch> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LeadsError::malformed(path, e))?;
    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| LeadsError::malformed(path, format!("Worksheet {sheet_index} not found")))?
        .map_err(|e| LeadsError::malformed(path, e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        log::warn!("Worksheet {sheet_index} of {} is empty", path.display());
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    };

    let names = header_names(header);
    let body: Vec<&[Data]> = rows.collect();

    let mut fields = Vec::with_capacity(names.len());
    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.into_iter().enumerate() {
        let cells: Vec<&Data> = body.iter().map(|row| row.get(idx).unwrap_or(&EMPTY_CELL)).collect();
        let column = build_column(&cells);
        fields.push(Field::new(name, column.data_type().clone(), true));
        columns.push(column);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Column names from the header row
///
/// Blank headers are named `Unnamed: <position>`; repeated names get `.1`,
/// `.2`, ... suffixes so every column stays addressable.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = cell_text(cell).unwrap_or_else(|| format!("Unnamed: {idx}"));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Build a typed Arrow column from worksheet cells
fn build_column(cells: &[&Data]) -> ArrayRef {
    let filled: Vec<&Data> = cells
        .iter()
        .copied()
        .filter(|cell| !matches!(cell, Data::Empty))
        .collect();

    if !filled.is_empty() && filled.iter().all(|cell| matches!(cell, Data::Bool(_))) {
        return Arc::new(
            cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        );
    }

    let numeric = !filled.is_empty()
        && filled
            .iter()
            .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)));
    if numeric {
        let integral = filled.len() == cells.len()
            && filled.iter().all(|cell| match cell {
                Data::Int(_) => true,
                Data::Float(f) => f.fract() == 0.0 && f.abs() < i64::MAX as f64,
                _ => false,
            });
        return if integral {
            Arc::new(
                cells
                    .iter()
                    .map(|cell| match cell {
                        Data::Int(i) => Some(*i),
                        Data::Float(f) => Some(*f as i64),
                        _ => None,
                    })
                    .collect::<Int64Array>(),
            )
        } else {
            Arc::new(
                cells
                    .iter()
                    .map(|cell| match cell {
                        Data::Int(i) => Some(*i as f64),
                        Data::Float(f) => Some(*f),
                        _ => None,
                    })
                    .collect::<Float64Array>(),
            )
        };
    }

    Arc::new(cells.iter().map(|cell| cell_text(cell)).collect::<StringArray>())
}

/// Render a cell as text; `None` for blank and error cells
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some((*f as i64).to_string())
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt: NaiveDateTime| dt.format(DATETIME_FORMAT).to_string()),
    }
}
