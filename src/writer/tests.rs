use chrono::NaiveDate;

use super::*;
use crate::convert::to_technician;
use crate::schema::*;
use crate::table::{Cell, SequenceTable};
use crate::validator::{Decorations, SafetyValidator};

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap()
}

fn technician_table() -> SequenceTable {
    let machine = SequenceTable::from_columns(vec![
        (TST_SPEED_DEM, vec![Cell::from(0.0), Cell::from(40000.0)]),
        (TST_CELL_PRES_DEMAND, vec![Cell::from(0.21), Cell::from(10.0)]),
        (TST_AP_FLAG, vec![Cell::from(0.0), Cell::from(1.0)]),
        (TST_TEST_MODE, vec![Cell::from(1.0), Cell::from(2.0)]),
    ])
    .unwrap();
    to_technician(&machine, RecordType::MainSeal).unwrap().table
}

#[test]
fn test_file_names() {
    assert_eq!(
        spreadsheet_file_name(RecordType::MainSeal, at()),
        "edited_main_seal_test_20240307_1405.xlsx"
    );
    assert_eq!(
        csv_file_name(RecordType::SeparationSeal, at()),
        "edited_separation_seal_test_20240307.csv"
    );
}

#[test]
fn test_machine_csv() {
    let mut table = technician_table();
    table.set(0, NOTES, "warm-up");
    let before = table.clone();

    let writer = MachineCsvWriter::new(CsvConfig {
        generated_at: Some(at()),
        ..Default::default()
    });
    let (artifact, report) = writer.write(&table, RecordType::MainSeal).unwrap();

    assert_eq!(table, before);
    assert!(report.is_clean());
    assert_eq!(artifact.media_type, CSV_MEDIA_TYPE);
    assert_eq!(artifact.file_name, "edited_main_seal_test_20240307.csv");
    assert_eq!(
        String::from_utf8(artifact.bytes).unwrap(),
        "TST_SpeedDem;TST_CellPresDemand;TST_APFlag;TST_TestMode\n\
         0;0.21;0;1\n\
         40000;10;1;2\n"
    );
}

#[test]
fn test_machine_csv_strict_rejects_unknown_labels() {
    let mut table = technician_table();
    table.set(1, AUTO_PROCEED, "Maybe");

    let lenient = MachineCsvWriter::default();
    let (artifact, report) = lenient.write(&table, RecordType::MainSeal).unwrap();
    assert_eq!(report.fallbacks().len(), 1);
    assert!(String::from_utf8(artifact.bytes).unwrap().contains("40000;10;0;2"));

    let strict = MachineCsvWriter::new(CsvConfig {
        strict: true,
        ..Default::default()
    });
    assert!(strict.write(&table, RecordType::MainSeal).is_err());
}

#[test]
fn test_write_delimited_verbatim() {
    let table = SequenceTable::from_columns(vec![
        ("A", vec![Cell::text("SET_SPEED")]),
        ("B", vec![Cell::from(1.5)]),
    ])
    .unwrap();
    let mut out = Vec::new();
    write_delimited(&table, &mut out, b';').unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "A;B\nSET_SPEED;1.5\n");
}

#[test]
fn test_spreadsheet() {
    let table = technician_table();
    let before = table.clone();
    let decorations = SafetyValidator::default().decorate(&table);

    let writer = SpreadsheetWriter::new(SpreadsheetConfig {
        generated_at: Some(at()),
        job: JobInfo {
            job_number: Some("J-1042".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });
    let artifact = writer.write(&table, RecordType::MainSeal, &decorations).unwrap();

    assert_eq!(table, before);
    assert_eq!(artifact.media_type, XLSX_MEDIA_TYPE);
    assert_eq!(artifact.file_name, "edited_main_seal_test_20240307_1405.xlsx");
    // xlsx is a zip container
    assert_eq!(&artifact.bytes[..2], b"PK");
}

#[test]
fn test_spreadsheet_missing_logo_is_skipped() {
    let writer = SpreadsheetWriter::new(SpreadsheetConfig {
        logo: Some("/nonexistent/logo.png".into()),
        ..Default::default()
    });
    let artifact = writer
        .write(&technician_table(), RecordType::MainSeal, &Decorations::default())
        .unwrap();
    assert!(!artifact.bytes.is_empty());
}

#[test]
fn test_artifact_save_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = ExportArtifact {
        bytes: b"A;B\n".to_vec(),
        file_name: "edited_main_seal_test_20240307.csv".to_string(),
        media_type: CSV_MEDIA_TYPE,
    };

    let path = artifact.save(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("edited_main_seal_test_20240307.csv"));
    assert_eq!(std::fs::read(&path).unwrap(), b"A;B\n");
}

#[test]
fn test_job_info_fields() {
    let job = JobInfo {
        customer: Some("ACME".to_string()),
        technician: Some("R. Diaz".to_string()),
        ..Default::default()
    };
    assert_eq!(job.fields(), vec![("Customer", "ACME"), ("Technician", "R. Diaz")]);
}
