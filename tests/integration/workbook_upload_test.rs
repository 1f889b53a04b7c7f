use arrow::array::AsArray;
use arrow::datatypes::DataType;

use crate::utils::{Cell, text_values, write_xlsx_fixture};
use muni_leads::utils::io::read_spreadsheet;
use muni_leads::{LeadsConfig, LeadsError, export_combined, process_upload};

/// Header with a blank and a repeated name, and rows of uneven length
fn leads_sheet() -> Vec<Vec<Cell>> {
    vec![
        vec![
            Cell::Text("name"),
            Cell::Text("primary address"),
            Cell::Blank,
            Cell::Text("name"),
        ],
        vec![
            Cell::Text("Ana"),
            Cell::Text("Cebu City"),
            Cell::Date(45292.0),
            Cell::Text("x"),
        ],
        vec![Cell::Text("Ben"), Cell::Number(123.0), Cell::Number(1.0)],
        vec![Cell::Text("Cy"), Cell::Text("Batangas City")],
    ]
}

/// Worksheet cells become typed columns with pandas-style header names
#[test]
fn test_workbook_columns_and_headers() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_xlsx_fixture(dir.path(), "leads.xlsx", &[("Leads", leads_sheet())]);

    let batch = read_spreadsheet(&path, &LeadsConfig::default())?;
    let schema = batch.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, ["name", "primary address", "Unnamed: 2", "name.1"]);
    assert_eq!(batch.num_rows(), 3);

    // Mixed text and number addresses stay text
    let addresses = batch.column(1);
    assert_eq!(addresses.data_type(), &DataType::Utf8);
    assert_eq!(addresses.as_string::<i32>().value(1), "123");

    assert_eq!(
        text_values(&batch, "Unnamed: 2"),
        vec![Some("2024-01-01 00:00:00".to_string()), Some("1".to_string()), None]
    );
    assert_eq!(
        text_values(&batch, "name.1"),
        vec![Some("x".to_string()), None, None]
    );
    Ok(())
}

/// An xlsx upload flows through grouping into the exported CSV
#[test]
fn test_workbook_upload_exports_grouped_rows() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_xlsx_fixture(dir.path(), "leads.xlsx", &[("Leads", leads_sheet())]);
    let config = LeadsConfig::default();

    let grouped = process_upload(&path, &config)?;
    assert_eq!(grouped.municipalities().collect::<Vec<_>>(), ["Batangas", "Cebu"]);
    assert_eq!(grouped.table("Cebu").map(|t| t.source_rows.clone()), Some(vec![0]));

    let exported = export_combined(&grouped, &dir.path().join("out"), &config)?;
    assert_eq!(
        std::fs::read_to_string(exported)?,
        "name,primary address,Unnamed: 2,name.1,Municipality,Region,Primary Address\n\
         Cy,Batangas City,,,Batangas,Luzon,Batangas City\n\
         Ana,Cebu City,2024-01-01 00:00:00,x,Cebu,Visayas,Cebu City\n"
    );
    Ok(())
}

/// The configured sheet index picks the worksheet
#[test]
fn test_sheet_index_selects_worksheet() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let sheets = [
        (
            "Current",
            vec![vec![Cell::Text("primary address")], vec![Cell::Text("Cebu City")]],
        ),
        (
            "Archive",
            vec![
                vec![Cell::Text("primary address")],
                vec![Cell::Text("Iloilo City")],
                vec![Cell::Text("Roxas City, Capiz")],
            ],
        ),
    ];
    let path = write_xlsx_fixture(dir.path(), "leads.xlsx", &sheets);

    let first = process_upload(&path, &LeadsConfig::default())?;
    assert_eq!(first.municipalities().collect::<Vec<_>>(), ["Cebu"]);

    let archive = LeadsConfig {
        sheet_index: 1,
        ..LeadsConfig::default()
    };
    let second = process_upload(&path, &archive)?;
    assert_eq!(second.municipalities().collect::<Vec<_>>(), ["Capiz", "Iloilo"]);

    let missing = LeadsConfig {
        sheet_index: 2,
        ..LeadsConfig::default()
    };
    let err = process_upload(&path, &missing).unwrap_err();
    assert!(matches!(err, LeadsError::MalformedFile { .. }));
    assert_eq!(err.user_message(), "Error processing file: Worksheet 2 not found");
    Ok(())
}

/// A workbook without an address header reports the missing column
#[test]
fn test_workbook_without_address_column() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let sheets = [(
        "Leads",
        vec![vec![Cell::Text("address")], vec![Cell::Text("Cebu City")]],
    )];
    let path = write_xlsx_fixture(dir.path(), "leads.xlsx", &sheets);

    let err = process_upload(&path, &LeadsConfig::default()).unwrap_err();
    assert!(matches!(err, LeadsError::MissingField { ref column } if column == "primary address"));
    Ok(())
}
