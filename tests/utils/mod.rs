use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, AsArray, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use muni_leads::Result;
use muni_leads::utils::io::to_csv_bytes;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::{Format, Workbook};

/// Name of the id column in every fixture
pub const LEAD_ID: &str = "lead id";

/// Build a lead dataset with `lead id`, `name` and `primary address` columns
///
/// Ids are the 0-based row positions.
#[must_use]
pub fn leads_batch(addresses: &[Option<&str>]) -> RecordBatch {
    let ids: Vec<i64> = (0..addresses.len() as i64).collect();
    let names: Vec<String> = (0..addresses.len()).map(|i| format!("Lead {i}")).collect();

    let schema = Schema::new(vec![
        Field::new(LEAD_ID, DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("primary address", DataType::Utf8, true),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(ids)),
        Arc::new(StringArray::from(names)),
        Arc::new(StringArray::from(addresses.to_vec())),
    ];
    RecordBatch::try_new(Arc::new(schema), columns).expect("valid fixture batch")
}

/// Write a batch as CSV into `dir`
pub fn write_csv_fixture(dir: &Path, name: &str, batch: &RecordBatch) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, to_csv_bytes(batch)?)?;
    Ok(path)
}

/// Write a batch as Parquet into `dir`
pub fn write_parquet_fixture(dir: &Path, name: &str, batch: &RecordBatch) -> Result<PathBuf> {
    let path = dir.join(name);
    let file = std::fs::File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(path)
}

/// One worksheet cell of a workbook fixture
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    /// Excel serial date, written with a `yyyy-mm-dd` number format
    Date(f64),
    Blank,
}

/// Write an `.xlsx` workbook into `dir`
///
/// Each sheet is a name and its rows; the first row is the header. Rows may
/// be shorter than the header.
pub fn write_xlsx_fixture(dir: &Path, name: &str, sheets: &[(&str, Vec<Vec<Cell>>)]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (sheet_name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name).expect("valid sheet name");
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (row, col) = (row as u32, col as u16);
                match *cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text).expect("write text");
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, value).expect("write number");
                    }
                    Cell::Date(serial) => {
                        worksheet
                            .write_number_with_format(row, col, serial, &date_format)
                            .expect("write date");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(&path).expect("save workbook fixture");
    path
}

/// Values of the `lead id` column
#[must_use]
pub fn lead_ids(batch: &RecordBatch) -> Vec<i64> {
    batch
        .column_by_name(LEAD_ID)
        .expect("lead id column")
        .as_primitive::<Int64Type>()
        .values()
        .to_vec()
}

/// Values of a text column, nulls as `None`
#[must_use]
pub fn text_values(batch: &RecordBatch, column: &str) -> Vec<Option<String>> {
    batch
        .column_by_name(column)
        .expect("text column")
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect()
}
