use proptest::prelude::*;

use super::*;
use crate::schema::{AUTO_PROCEED, TEST_MODE, TST_AP_FLAG, TST_GAS_TYPE, TST_TORQUE_CHECK};

#[test]
fn test_decode_known_codes() {
    assert_eq!(Coding::YesNo.decode(&Cell::from(1.0)), Lookup::Exact("Yes"));
    assert_eq!(Coding::YesNo.decode(&Cell::from(0.0)), Lookup::Exact("No"));
    assert_eq!(Coding::TestMode.decode(&Cell::from(2.0)), Lookup::Exact("Mode 2"));
    assert_eq!(Coding::GasType.decode(&Cell::text("1")), Lookup::Exact("Nitrogen"));
}

#[test]
fn test_decode_accepts_labels() {
    assert_eq!(Coding::GasType.decode(&Cell::text("Air")), Lookup::Exact("Air"));
    assert_eq!(Coding::YesNo.decode(&Cell::text(" yes ")), Lookup::Exact("Yes"));
}

#[test]
fn test_decode_unknown_falls_back() {
    assert_eq!(Coding::YesNo.decode(&Cell::from(7.0)), Lookup::Fallback("No"));
    assert_eq!(Coding::TestMode.decode(&Cell::from(0.0)), Lookup::Fallback("Mode 1"));
    assert_eq!(Coding::TestMode.decode(&Cell::from(1.5)), Lookup::Fallback("Mode 1"));
    assert_eq!(Coding::GasType.decode(&Cell::text("Argon")), Lookup::Fallback("Air"));
}

#[test]
fn test_encode_out_of_vocabulary_label() {
    let lookup = Coding::YesNo.encode(&Cell::text("Maybe"));
    assert_eq!(lookup, Lookup::Fallback(0));
    assert_eq!(lookup.value(), 0);
}

#[test]
fn test_encode_keeps_valid_codes() {
    assert_eq!(Coding::TestMode.encode(&Cell::from(2.0)), Lookup::Exact(2));
    assert_eq!(Coding::YesNo.encode(&Cell::text("1")), Lookup::Exact(1));
    assert_eq!(Coding::TestMode.encode(&Cell::from(5.0)), Lookup::Fallback(1));
}

#[test]
fn test_encode_table_records_fallbacks() {
    let mut table = SequenceTable::from_columns(vec![
        (AUTO_PROCEED, vec![Cell::text("Maybe"), Cell::text("Yes")]),
        (TEST_MODE, vec![Cell::text("Mode 2"), Cell::text("Mode 3")]),
    ])
    .unwrap();

    let report = encode_table(&mut table, RecordType::MainSeal);

    assert_eq!(table.get(0, AUTO_PROCEED), Some(&Cell::Number(0.0)));
    assert_eq!(table.get(1, AUTO_PROCEED), Some(&Cell::Number(1.0)));
    assert_eq!(table.get(0, TEST_MODE), Some(&Cell::Number(2.0)));
    assert_eq!(table.get(1, TEST_MODE), Some(&Cell::Number(1.0)));

    assert_eq!(report.fallbacks().len(), 2);
    assert_eq!(report.fallbacks()[0].original, "Maybe");
    assert_eq!(report.fallbacks()[1].column, TEST_MODE);
    assert!(report.into_strict().is_err());
}

#[test]
fn test_strict_error_message() {
    let mut table = SequenceTable::from_columns(vec![
        (AUTO_PROCEED, vec![Cell::text("Maybe"), Cell::text("Perhaps")]),
    ])
    .unwrap();

    let err = encode_table(&mut table, RecordType::MainSeal)
        .into_strict()
        .unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with("2 value(s) outside the coding vocabulary:\n"));
    assert!(message.contains("step 1, Auto_Proceed: \"Maybe\" -> 0"));
    assert!(message.contains("step 2, Auto_Proceed: \"Perhaps\" -> 0"));
}

#[test]
fn test_decode_table_skips_absent_columns() {
    let mut table = SequenceTable::from_columns(vec![
        (TST_AP_FLAG, vec![Cell::from(1.0)]),
        (TST_GAS_TYPE, vec![Cell::text("Air")]),
    ])
    .unwrap();

    let report = decode_table(&mut table, RecordType::SeparationSeal);

    assert!(report.is_clean());
    assert!(report.into_strict().is_ok());
    assert_eq!(table.get(0, TST_AP_FLAG), Some(&Cell::text("Yes")));
    assert_eq!(table.get(0, TST_GAS_TYPE), Some(&Cell::text("Air")));
    assert!(!table.has_column(TST_TORQUE_CHECK));
}

fn coding_strategy() -> impl Strategy<Value = Coding> {
    prop_oneof![
        Just(Coding::YesNo),
        Just(Coding::TestMode),
        Just(Coding::GasType)
    ]
}

proptest! {
    #[test]
    fn prop_decode_encode_roundtrip(coding in coding_strategy(), idx in 0usize..3) {
        let entries = coding.entries();
        let (label, code) = entries[idx % entries.len()];

        let encoded = coding.encode(&Cell::text(label));
        prop_assert_eq!(encoded, Lookup::Exact(code));
        let decoded = coding.decode(&Cell::from(encoded.value()));
        prop_assert_eq!(decoded, Lookup::Exact(label));
    }

    #[test]
    fn prop_unknown_labels_use_default(coding in coding_strategy(), text in "[a-z]{6,12}") {
        prop_assume!(coding.labels().all(|l| !l.eq_ignore_ascii_case(&text)));
        prop_assert_eq!(coding.encode(&Cell::text(text.clone())), Lookup::Fallback(coding.default_code()));
        prop_assert_eq!(coding.decode(&Cell::text(text)), Lookup::Fallback(coding.default_label()));
    }
}
