//! Starter sequences for technicians.
//!
//! - [`example_sequence`]: a realistic six-step main seal run
//! - [`placeholder_template`]: one row of `SET_*` placeholders to fill in
//!
//! Both are in the machine vocabulary so they can be loaded like any
//! controller file.

use crate::schema::*;
use crate::table::{Cell, SequenceTable, TableError};

fn numbers(values: &[f64]) -> Vec<Cell> {
    values.iter().copied().map(Cell::from).collect()
}

/// Six-step main seal sequence: pressurise at standstill, spin up to 3600 RPM,
/// hold at 20 bar with auto-proceed, then vent.
///
/// Interface pressure is left at zero for the technician to set, so the
/// validator flags it on every step above about half a bar of chamber
/// pressure. Gas type is written as its label.
pub fn example_sequence() -> SequenceTable {
    let columns = vec![
        (TST_SPEED_DEM, numbers(&[0.0, 0.0, 0.0, 3600.0, 3600.0, 0.0])),
        (TST_CELL_PRES_DEMAND, numbers(&[0.21, 1.0, 10.0, 5.0, 20.0, 0.5])),
        (TST_INTER_PRES_DEMAND, numbers(&[0.0; 6])),
        (TST_INTER_BP_DEMAND_DE, numbers(&[0.0, 0.0, 0.0, 1.0, 0.4, 0.0])),
        (TST_INTER_BP_DEMAND_NDE, numbers(&[0.0, 0.0, 0.0, 1.0, 0.4, 0.0])),
        (TST_GAS_INJECTION_DEMAND, numbers(&[0.0; 6])),
        (TST_STEP_DURATION, numbers(&[2.0, 2.0, 2.0, 2.0, 10.0, 2.0])),
        (TST_AP_FLAG, numbers(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0])),
        (TST_TEMP_DEMAND, numbers(&[30.0, 30.0, 30.0, 155.0, 155.0, 155.0])),
        (TST_GAS_TYPE, vec![Cell::text("Air"); 6]),
        (TST_TEST_MODE, numbers(&[1.0; 6])),
        (TST_MEASUREMENT_REQ, numbers(&[1.0; 6])),
        (TST_TORQUE_CHECK, numbers(&[0.0; 6])),
    ];
    // Every column above has six values.
    SequenceTable::from_columns(columns).unwrap_or_default()
}

/// One-row template in the machine vocabulary with a placeholder per field.
///
/// Setpoints get a `SET_<QUANTITY>` marker; coded fields get their default
/// code so the row is valid controller input once the setpoints are filled in.
pub fn placeholder_template(record_type: RecordType) -> Result<SequenceTable, TableError> {
    let mapping = ColumnMapping::for_type(record_type);
    let mut table = SequenceTable::with_columns(mapping.machine_columns())?;
    let row = mapping
        .fields()
        .iter()
        .map(|field| match field.kind {
            FieldKind::Setpoint => Cell::text(placeholder(field.technician)),
            FieldKind::Coded(coding) => Cell::from(coding.default_code()),
        })
        .collect();
    table.push_row(row)?;
    Ok(table)
}

fn placeholder(technician: &str) -> &'static str {
    match technician {
        SPEED_RPM => "SET_SPEED",
        STEP_DURATION_MIN => "SET_DURATION",
        TEMPERATURE_C => "SET_TEMPERATURE",
        SEP_SEAL_FLOW_SET1 | SEP_SEAL_FLOW_SET2 => "SET_FLOW",
        _ => "SET_PRESSURE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::load_for_editing;
    use crate::validator::SafetyValidator;

    #[test]
    fn test_example_sequence_is_valid_main_seal() {
        let example = example_sequence();
        assert_eq!(example.len(), 6);

        let conversion = load_for_editing(&example).unwrap();
        assert_eq!(conversion.record_type, RecordType::MainSeal);
        assert!(conversion.coding.is_clean());
        assert_eq!(conversion.table.get(0, GAS_TYPE), Some(&Cell::text("Air")));

        let decorations = SafetyValidator::default().decorate(&conversion.table);
        let flagged: Vec<_> = decorations.iter().map(|(row, column, _)| (row, column)).collect();
        assert_eq!(
            flagged,
            vec![
                (1, INTERFACE_PRESSURE_BAR),
                (2, INTERFACE_PRESSURE_BAR),
                (3, INTERFACE_PRESSURE_BAR),
                (4, INTERFACE_PRESSURE_BAR),
            ]
        );
    }

    #[test]
    fn test_placeholder_template() {
        let template = placeholder_template(RecordType::SeparationSeal).unwrap();
        assert_eq!(template.len(), 1);
        assert_eq!(template.get(0, TST_SEP_FLOW_DEMAND_1), Some(&Cell::text("SET_FLOW")));
        assert_eq!(template.get(0, TST_TEST_MODE), Some(&Cell::Number(1.0)));

        // Placeholders load as zero setpoints.
        let conversion = load_for_editing(&template).unwrap();
        assert_eq!(conversion.table.get(0, SPEED_RPM), Some(&Cell::Number(0.0)));
        assert_eq!(conversion.table.get(0, TEST_MODE), Some(&Cell::text("Mode 1")));
    }
}
