//! Console output utilities
//!
//! Renders grouped leads for the terminal.

use std::fmt::Write as _;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;
use crate::group::{GroupedLeads, MunicipalityTable};

/// Header of the column holding each row's position in the upload
pub const ROW_POSITION_COLUMN: &str = "#";

/// Render one municipality table, prefixed with the original row positions
pub fn render_table(table: &MunicipalityTable) -> Result<String> {
    let positions: ArrayRef = Arc::new(
        table
            .source_rows
            .iter()
            .map(|&row| row as u64)
            .collect::<UInt64Array>(),
    );

    let schema = table.batch.schema();
    let mut fields = vec![Arc::new(Field::new(ROW_POSITION_COLUMN, DataType::UInt64, false))];
    fields.extend(schema.fields().iter().cloned());
    let mut columns = vec![positions];
    columns.extend(table.batch.columns().iter().cloned());

    let display = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Ok(pretty_format_batches(&[display])?.to_string())
}

/// Render every municipality table with its heading and separator
pub fn format_grouped_tables(grouped: &GroupedLeads) -> Result<String> {
    let mut out = String::new();
    for table in &grouped.tables {
        // Writing to a String cannot fail
        let _ = writeln!(out, "### {} (Region: {})", table.municipality, table.region);
        let _ = writeln!(out, "{}", render_table(table)?);
        let _ = writeln!(out, "---");
    }
    Ok(out)
}

/// Print every municipality table to stdout
pub fn print_grouped_tables(grouped: &GroupedLeads) -> Result<()> {
    print!("{}", format_grouped_tables(grouped)?);
    Ok(())
}
