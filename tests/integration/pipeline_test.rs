use crate::utils::{lead_ids, leads_batch, text_values, write_csv_fixture};
use muni_leads::enrich::{MUNICIPALITY_COLUMN, REGION_COLUMN};
use muni_leads::group::PRIMARY_ADDRESS_COLUMN;
use muni_leads::{
    LeadsConfig, LeadsError, UNKNOWN, export_combined, generate_detailed_summary, process_upload,
};

/// A Batangas lead lands in its own Luzon table
#[test]
fn test_single_batangas_lead() -> muni_leads::Result<()> {
    let data = leads_batch(&[Some("Batangas City")]);
    let grouped = generate_detailed_summary(&data, &LeadsConfig::default())?;

    assert_eq!(grouped.tables.len(), 1);
    let table = grouped.table("Batangas").expect("Batangas table");
    assert_eq!(table.region, "Luzon");
    assert_eq!(
        text_values(&table.batch, MUNICIPALITY_COLUMN),
        vec![Some("Batangas".to_string())]
    );
    assert_eq!(
        text_values(&table.batch, REGION_COLUMN),
        vec![Some("Luzon".to_string())]
    );
    Ok(())
}

/// Unmatched addresses produce no table and no exported row
#[test]
fn test_unknown_location_is_excluded() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let data = leads_batch(&[Some("Unknown location")]);
    let grouped = generate_detailed_summary(&data, &LeadsConfig::default())?;

    assert!(grouped.is_empty());
    assert!(grouped.table(UNKNOWN).is_none());

    let path = export_combined(&grouped, dir.path(), &LeadsConfig::default())?;
    let text = std::fs::read_to_string(path)?;
    assert_eq!(text.lines().count(), 1);
    Ok(())
}

/// Two Cebu leads are grouped together in upload order
#[test]
fn test_two_cebu_leads_keep_order() -> muni_leads::Result<()> {
    let data = leads_batch(&[
        Some("Mandaue, Cebu"),
        Some("Iloilo City"),
        Some("Lapu-Lapu City, Cebu"),
    ]);
    let grouped = generate_detailed_summary(&data, &LeadsConfig::default())?;

    let cebu = grouped.table("Cebu").expect("Cebu table");
    assert_eq!(cebu.num_rows(), 2);
    assert_eq!(lead_ids(&cebu.batch), vec![0, 2]);
    assert_eq!(cebu.source_rows, vec![0, 2]);
    assert_eq!(cebu.region, "Visayas");
    Ok(())
}

/// The missing column error carries the user-facing explanation
#[test]
fn test_missing_address_column() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, "name,address\nJuan,Cebu City\n")?;

    let err = process_upload(&path, &LeadsConfig::default()).unwrap_err();
    assert!(matches!(err, LeadsError::MissingField { .. }));
    assert_eq!(
        err.user_message(),
        "The uploaded file does not contain a 'primary address' column."
    );
    Ok(())
}

/// End to end: upload, group, export
#[test]
fn test_csv_upload_exports_grouped_rows() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let data = leads_batch(&[
        Some("Poblacion, Bohol"),
        Some("somewhere abroad"),
        Some("Angeles, Pampanga"),
        None,
        Some("Tagbilaran, Bohol"),
        Some("General Santos, South Cotabato"),
    ]);
    let upload = write_csv_fixture(dir.path(), "leads.csv", &data)?;

    let grouped = process_upload(&upload, &LeadsConfig::default())?;
    let names: Vec<&str> = grouped.municipalities().collect();
    assert_eq!(names, ["Bohol", "Cotabato", "Pampanga"]);

    let total: usize = grouped.tables.iter().map(|t| t.num_rows()).sum();
    assert_eq!(grouped.combined.num_rows(), total);
    assert_eq!(grouped.combined.num_rows(), data.num_rows() - 2);
    assert_eq!(lead_ids(&grouped.combined), vec![0, 4, 5, 2]);

    let out = dir.path().join("out");
    let exported = export_combined(&grouped, &out, &LeadsConfig::default())?;
    assert_eq!(exported.file_name().and_then(|n| n.to_str()), Some("detailed_leads_data.csv"));

    let text = std::fs::read_to_string(&exported)?;
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("lead id,name,primary address,Municipality,Region,Primary Address")
    );
    assert_eq!(
        lines.next(),
        Some("0,Lead 0,\"Poblacion, Bohol\",Bohol,Visayas,\"Poblacion, Bohol\"")
    );
    assert_eq!(lines.count(), 3);
    Ok(())
}

/// Exporting twice gives byte-identical files
#[test]
fn test_export_is_repeatable() -> muni_leads::Result<()> {
    let dir = tempfile::tempdir()?;
    let data = leads_batch(&[Some("Davao City"), Some("Quezon City"), Some("Zamboanga")]);
    let upload = write_csv_fixture(dir.path(), "leads.csv", &data)?;
    let config = LeadsConfig::default();

    let first = export_combined(&process_upload(&upload, &config)?, dir.path(), &config)?;
    let first_bytes = std::fs::read(&first)?;
    let second = export_combined(&process_upload(&upload, &config)?, dir.path(), &config)?;

    assert_eq!(first, second);
    assert_eq!(first_bytes, std::fs::read(&second)?);
    Ok(())
}

/// The display column mirrors the address column
#[test]
fn test_primary_address_mirrors_input() -> muni_leads::Result<()> {
    let data = leads_batch(&[Some("Legazpi, Albay"), Some("Naga, Camarines Sur")]);
    let grouped = generate_detailed_summary(&data, &LeadsConfig::default())?;

    assert_eq!(
        text_values(&grouped.combined, PRIMARY_ADDRESS_COLUMN),
        text_values(&grouped.combined, "primary address")
    );
    Ok(())
}
