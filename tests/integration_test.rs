//! Integration tests for seqbridge
//!
//! These tests run the full pipeline: read a controller file, bring it into
//! the technician form, check it, and export it again.

use seqbridge::prelude::*;
use seqbridge::schema::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Read the bundled main seal file, edit it, and write it back
#[test]
fn test_main_seal_round_trip() {
    let outcome = TableReader::default().try_read_path(data("MainSealSet2.csv")).unwrap();
    assert_eq!(outcome.encoding, encoding_rs::UTF_8);
    assert_eq!(detect(&outcome.table).unwrap(), RecordType::MainSeal);

    let conversion = load_for_editing(&outcome.table).unwrap();
    assert!(conversion.coding.is_clean());

    let table = &conversion.table;
    assert_eq!(table.columns()[0], STEP);
    assert_eq!(table.columns().last().map(String::as_str), Some(NOTES));
    assert_eq!(table.len(), outcome.table.len());
    assert_eq!(table.get(4, AUTO_PROCEED), Some(&Cell::text("Yes")));
    assert_eq!(table.get(5, TEST_MODE), Some(&Cell::text("Mode 2")));
    assert_eq!(table.get(5, GAS_TYPE), Some(&Cell::text("Nitrogen")));
    assert!(SafetyValidator::default().decorate(table).is_empty());

    let machine = to_machine(table, conversion.record_type).unwrap();
    assert_eq!(machine.table, outcome.table);
}

/// A header-only separation seal file loads as an empty technician table
#[test]
fn test_header_only_separation_file() {
    let table = safe_read_csv(data("SeparationSeal_Base.csv"));
    assert_eq!(table.len(), 0);
    assert_eq!(detect_record_type(table.columns()), Some(RecordType::SeparationSeal));

    let conversion = load_for_editing(&table).unwrap();
    assert_eq!(conversion.table.len(), 0);
    assert!(conversion.table.has_column(STEP));
    assert!(conversion.table.has_column(SEP_SEAL_FLOW_SET1));

    let (artifact, report) = MachineCsvWriter::default()
        .write(&conversion.table, RecordType::SeparationSeal)
        .unwrap();
    assert!(report.is_clean());
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("TST_SpeedDem;TST_SepFlowDemand1;"));
}

/// Technician edits that exceed the speed limit are flagged, not blocked
#[test]
fn test_over_speed_is_flagged_and_still_exported() {
    let dir = tempdir().unwrap();
    let conversion = load_for_editing(&safe_read_csv(data("SeparationSeal.csv"))).unwrap();
    let mut table = conversion.table;
    assert!(table.set(1, SPEED_RPM, 40000.0));

    let decorations = SafetyValidator::default().decorate(&table);
    assert_eq!(decorations.len(), 1);
    assert!(decorations.is_flagged(1, SPEED_RPM));

    let report = SafetyValidator::default().report(&table, "edited");
    assert!(report.has_failures());

    let workbook = SpreadsheetWriter::default()
        .write(&table, RecordType::SeparationSeal, &decorations)
        .unwrap();
    let path = workbook.save(dir.path()).unwrap();
    assert!(path.exists());
    assert!(fs::read(&path).unwrap().starts_with(b"PK"));

    let (csv, _) = MachineCsvWriter::default()
        .write(&table, RecordType::SeparationSeal)
        .unwrap();
    let text = String::from_utf8(csv.bytes).unwrap();
    assert!(text.lines().nth(2).unwrap().starts_with("40000;"));
}

/// Labels outside the vocabulary fall back to the default and are reported
#[test]
fn test_out_of_vocabulary_label() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("edited.csv");
    fs::write(
        &path,
        "Step;Speed_RPM;Cell_Pressure_bar;Auto_Proceed;Test_Mode;Notes\n1;1000;5;Maybe;Mode 2;check seal\n",
    )
    .unwrap();

    let conversion = load_for_editing(&safe_read_csv(&path)).unwrap();
    assert_eq!(conversion.record_type, RecordType::MainSeal);
    assert_eq!(conversion.table.get(0, AUTO_PROCEED), Some(&Cell::text("No")));
    assert_eq!(conversion.coding.fallbacks().len(), 1);
    assert_eq!(conversion.coding.fallbacks()[0].original, "Maybe");
    assert!(conversion.clone().strict().is_err());

    let machine = to_machine(&conversion.table, conversion.record_type).unwrap();
    assert_eq!(machine.table.get(0, TST_AP_FLAG), Some(&Cell::Number(0.0)));
    assert_eq!(machine.table.get(0, TST_TEST_MODE), Some(&Cell::Number(2.0)));
    assert!(!machine.table.has_column(NOTES));
}

/// Files written by spreadsheet tools in windows-1252 still load
#[test]
fn test_legacy_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.csv");
    let mut bytes = b"TST_SpeedDem;TST_CellPresDemand;Notes\n100;1;".to_vec();
    bytes.extend_from_slice(&[b'P', b'r', 0xFC, b'f', b'e', b'n', b'\n']);
    fs::write(&path, &bytes).unwrap();

    let outcome = TableReader::default().try_read_path(&path).unwrap();
    assert_eq!(outcome.encoding, encoding_rs::WINDOWS_1252);
    assert_eq!(outcome.table.get(0, NOTES), Some(&Cell::text("Prüfen")));
}

/// Unknown files stop processing with an explicit error
#[test]
fn test_unknown_file_type() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.csv");
    fs::write(&path, "a;b\n1;2\n").unwrap();

    let table = safe_read_csv(&path);
    assert_eq!(table.len(), 1);
    let err = load_for_editing(&table).unwrap_err();
    assert!(matches!(err, ConvertError::UnknownRecordType { .. }));
}

/// Missing and undecodable files yield the empty sentinel
#[test]
fn test_unreadable_file() {
    let dir = tempdir().unwrap();
    assert!(safe_read_csv(dir.path().join("missing.csv")).is_empty());

    let reader = TableReader::new(ReaderConfig {
        encodings: vec![encoding_rs::UTF_8],
        ..Default::default()
    });
    let path = dir.path().join("binary.csv");
    fs::write(&path, [0xC3, 0x28, b';', 0xFF]).unwrap();
    assert!(reader.read_path(&path).is_empty());
    assert!(matches!(
        reader.try_read_path(&path),
        Err(ReaderError::Undecodable { .. })
    ));
}

/// Templates load like any controller file
#[test]
fn test_templates_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("template.csv");
    let template = seqbridge::templates::placeholder_template(RecordType::MainSeal).unwrap();
    seqbridge::writer::write_delimited(&template, fs::File::create(&path).unwrap(), b';').unwrap();

    let conversion = load_for_editing(&safe_read_csv(&path)).unwrap();
    assert_eq!(conversion.record_type, RecordType::MainSeal);
    assert_eq!(conversion.table.get(0, STEP), Some(&Cell::Number(1.0)));
    assert_eq!(conversion.table.get(0, AUTO_PROCEED), Some(&Cell::text("No")));
}
