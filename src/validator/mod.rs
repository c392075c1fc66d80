//! # Safety validation
//!
//! Flags technician-form cells whose values fall outside the test bed's
//! hardware limits. Validation is advisory: it produces a parallel decoration
//! structure keyed by cell and never mutates the table or blocks an export.
//!
//! ## Rules
//!
//! 1. **Maximum speed**: `Speed_RPM <= 32000`
//! 2. **Maximum chamber pressure**: `Cell_Pressure_bar <= 450`
//! 3. **Interface pressure band**: `Interface_Pressure_bar` within ±0.5 bar of
//!    `0.95 x Cell_Pressure_bar`
//!
//! A rule whose columns are not all present is skipped silently, so rules that
//! only make sense for one record type never fire on the other.
//!
//! ## Usage
//!
//! ```rust
//! use seqbridge::table::{Cell, SequenceTable};
//! use seqbridge::validator::SafetyValidator;
//!
//! let table = SequenceTable::from_columns(vec![
//!     ("Speed_RPM", vec![Cell::from(40000.0)]),
//!     ("Cell_Pressure_bar", vec![Cell::from(10.0)]),
//! ])?;
//!
//! let decorations = SafetyValidator::default().decorate(&table);
//! assert!(decorations.is_flagged(0, "Speed_RPM"));
//! assert!(!decorations.is_flagged(0, "Cell_Pressure_bar"));
//! # Ok::<(), seqbridge::table::TableError>(())
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::table::SequenceTable;

mod report;
mod rules;

pub use report::{RuleCheck, RuleOutcome, ValidationReport};
pub use rules::{
    SafetyLimits, SafetyRule, Violation, INTERFACE_PRESSURE_RATIO,
    INTERFACE_PRESSURE_TOLERANCE_BAR, MAX_CELL_PRESSURE_BAR, MAX_SPEED_RPM,
};

/// Per-cell safety flags for one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    cells: BTreeMap<(usize, String), Violation>,
    applied: Vec<SafetyRule>,
    skipped: Vec<SafetyRule>,
}

impl Decorations {
    /// True when the cell at (row, column) violates a rule.
    pub fn is_flagged(&self, row: usize, column: &str) -> bool {
        self.cells.contains_key(&(row, column.to_string()))
    }

    /// Violation at (row, column), if any.
    pub fn get(&self, row: usize, column: &str) -> Option<&Violation> {
        self.cells.get(&(row, column.to_string()))
    }

    /// All flagged cells in (row, column) order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Violation)> {
        self.cells
            .iter()
            .map(|((row, column), violation)| (*row, column.as_str(), violation))
    }

    /// Flagged cells for one rule.
    pub fn for_rule(&self, rule: SafetyRule) -> impl Iterator<Item = (usize, &Violation)> {
        self.cells
            .iter()
            .filter(move |(_, v)| v.rule == rule)
            .map(|((row, _), v)| (*row, v))
    }

    /// Number of flagged cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing is flagged.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rules that were evaluated.
    pub fn applied_rules(&self) -> &[SafetyRule] {
        &self.applied
    }

    /// Rules skipped because a column was absent.
    pub fn skipped_rules(&self) -> &[SafetyRule] {
        &self.skipped
    }
}

/// Evaluates the safety rules against technician-form tables.
#[derive(Debug, Clone, Default)]
pub struct SafetyValidator {
    limits: SafetyLimits,
}

impl SafetyValidator {
    /// Validator with custom limits.
    pub fn new(limits: SafetyLimits) -> Self {
        Self { limits }
    }

    /// Active limits.
    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    /// Flag every cell that violates a rule.
    pub fn decorate(&self, table: &SequenceTable) -> Decorations {
        let mut decorations = Decorations::default();

        for rule in SafetyRule::ALL {
            if !rule.required_columns().iter().all(|c| table.has_column(c)) {
                decorations.skipped.push(rule);
                continue;
            }
            decorations.applied.push(rule);

            for row in 0..table.len() {
                let value = |column: &str| table.get(row, column).and_then(|cell| cell.as_number());
                if let Some(violation) = rule.check(&self.limits, value) {
                    decorations
                        .cells
                        .insert((row, rule.flagged_column().to_string()), violation);
                }
            }
        }

        debug!(
            "Safety check: {} flagged cell(s), {} rule(s) skipped",
            decorations.len(),
            decorations.skipped.len()
        );
        decorations
    }

    /// Summarise the rules into a report, one entry per rule.
    pub fn report(&self, table: &SequenceTable, source: impl Into<String>) -> ValidationReport {
        let decorations = self.decorate(table);

        let rules = SafetyRule::ALL
            .iter()
            .map(|&rule| {
                let outcome = if !decorations.applied_rules().contains(&rule) {
                    RuleOutcome::NotApplicable
                } else {
                    let rows: Vec<_> = decorations
                        .for_rule(rule)
                        .map(|(row, violation)| (row, violation.clone()))
                        .collect();
                    if rows.is_empty() {
                        RuleOutcome::Passed
                    } else {
                        RuleOutcome::Violated(rows)
                    }
                };
                RuleCheck::new(rule, &self.limits, outcome)
            })
            .collect();

        ValidationReport::new(source, table.len(), rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CELL_PRESSURE_BAR, INTERFACE_PRESSURE_BAR, SEP_SEAL_FLOW_SET1, SPEED_RPM};
    use crate::table::Cell;
    use proptest::prelude::*;

    fn table(columns: Vec<(&str, Vec<f64>)>) -> SequenceTable {
        SequenceTable::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().map(Cell::from).collect()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_speed_flagged_pressure_not() {
        let table = table(vec![(SPEED_RPM, vec![40000.0]), (CELL_PRESSURE_BAR, vec![10.0])]);
        let decorations = SafetyValidator::default().decorate(&table);

        assert!(decorations.is_flagged(0, SPEED_RPM));
        assert!(!decorations.is_flagged(0, CELL_PRESSURE_BAR));
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations.skipped_rules(), [SafetyRule::InterfacePressureBand]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let table = table(vec![
            (SPEED_RPM, vec![32000.0, 32000.5]),
            (CELL_PRESSURE_BAR, vec![450.0, 451.0]),
        ]);
        let decorations = SafetyValidator::default().decorate(&table);

        assert!(!decorations.is_flagged(0, SPEED_RPM));
        assert!(decorations.is_flagged(1, SPEED_RPM));
        assert!(!decorations.is_flagged(0, CELL_PRESSURE_BAR));
        assert!(decorations.is_flagged(1, CELL_PRESSURE_BAR));
    }

    #[test]
    fn test_interface_band() {
        let table = table(vec![
            (CELL_PRESSURE_BAR, vec![100.0, 100.0, 100.0]),
            (INTERFACE_PRESSURE_BAR, vec![95.0, 95.4, 96.0]),
        ]);
        let decorations = SafetyValidator::default().decorate(&table);

        assert!(!decorations.is_flagged(0, INTERFACE_PRESSURE_BAR));
        assert!(!decorations.is_flagged(1, INTERFACE_PRESSURE_BAR));
        let violation = decorations.get(2, INTERFACE_PRESSURE_BAR).unwrap();
        assert_eq!(violation.rule, SafetyRule::InterfacePressureBand);
        assert_eq!(violation.value, 96.0);
    }

    #[test]
    fn test_rules_skipped_for_other_record_type() {
        let table = table(vec![(SEP_SEAL_FLOW_SET1, vec![1.0]), (SPEED_RPM, vec![100.0])]);
        let decorations = SafetyValidator::default().decorate(&table);

        assert!(decorations.is_empty());
        assert_eq!(decorations.applied_rules(), [SafetyRule::MaxSpeed]);
        assert_eq!(decorations.skipped_rules().len(), 2);
    }

    #[test]
    fn test_text_cells_are_ignored() {
        let table = SequenceTable::from_columns(vec![(SPEED_RPM, vec![Cell::text("SET_SPEED")])]).unwrap();
        assert!(SafetyValidator::default().decorate(&table).is_empty());
    }

    #[test]
    fn test_custom_limits() {
        let limits = SafetyLimits {
            max_speed_rpm: 10000.0,
            ..Default::default()
        };
        let table = table(vec![(SPEED_RPM, vec![12000.0])]);
        assert!(SafetyValidator::new(limits).decorate(&table).is_flagged(0, SPEED_RPM));
    }

    #[test]
    fn test_report() {
        let table = table(vec![(SPEED_RPM, vec![100.0, 40000.0]), (CELL_PRESSURE_BAR, vec![1.0, 2.0])]);
        let report = SafetyValidator::default().report(&table, "test.csv");

        assert_eq!(report.steps, 2);
        assert!(report.has_failures());
        assert!(!report.has_warnings());
        assert_eq!(report.violation_count(), 1);

        let outcomes: Vec<_> = report.rules.iter().map(|c| (c.rule, c.steps())).collect();
        assert_eq!(
            outcomes,
            vec![
                (SafetyRule::MaxSpeed, vec![2]),
                (SafetyRule::MaxCellPressure, vec![]),
                (SafetyRule::InterfacePressureBand, vec![]),
            ]
        );
        assert_eq!(report.rules[1].outcome, RuleOutcome::Passed);
        assert_eq!(report.rules[2].outcome, RuleOutcome::NotApplicable);
        match &report.rules[0].outcome {
            RuleOutcome::Violated(rows) => {
                assert_eq!(rows[0].0, 1);
                assert_eq!(rows[0].1.value, 40000.0);
            }
            other => panic!("expected a violation, got {:?}", other),
        }

        let output = report.to_string();
        assert!(output.contains("[FAIL] Maximum speed (Speed_RPM <= 32000)"));
        assert!(output.contains("step 2: 40000 exceeds 32000 RPM"));
        assert!(output.contains("[N/A ] Interface pressure band"));
        assert!(output.contains("Safety limits EXCEEDED: 1 cell(s) in 1 rule(s)"));
    }

    #[test]
    fn test_report_with_coding_fallbacks() {
        let mut coded = SequenceTable::from_columns(vec![(
            crate::schema::AUTO_PROCEED,
            vec![Cell::text("Maybe")],
        )])
        .unwrap();
        let coding = crate::coding::encode_table(&mut coded, crate::schema::RecordType::MainSeal);

        let table = table(vec![(SPEED_RPM, vec![100.0])]);
        let report = SafetyValidator::default()
            .report(&table, "edited.csv")
            .with_coding(coding);

        assert!(!report.has_failures());
        assert!(report.has_warnings());
        let output = report.to_string();
        assert!(output.contains("[PASS] Maximum speed"));
        assert!(output.contains("[WARN] 1 coded value(s) replaced by defaults"));
        assert!(output.contains("step 1, Auto_Proceed: \"Maybe\" -> 0"));
        assert!(output.contains("Within limits, with coding warnings"));
    }

    #[test]
    fn test_clean_report() {
        let table = table(vec![(CELL_PRESSURE_BAR, vec![10.0]), (INTERFACE_PRESSURE_BAR, vec![9.5])]);
        let report = SafetyValidator::default().report(&table, "clean.csv");

        assert!(!report.has_failures());
        assert_eq!(report.violated_rules().count(), 0);
        assert!(report.to_string().ends_with("Within limits\n"));
    }

    proptest! {
        #[test]
        fn prop_decorate_never_mutates(
            speeds in prop::collection::vec(-1.0e6f64..1.0e6, 0..20),
            pressure in 0.0f64..1000.0,
        ) {
            let n = speeds.len();
            let table = table(vec![
                (SPEED_RPM, speeds),
                (CELL_PRESSURE_BAR, vec![pressure; n]),
                (INTERFACE_PRESSURE_BAR, vec![pressure * 0.95; n]),
            ]);
            let before = table.clone();
            let decorations = SafetyValidator::default().decorate(&table);

            prop_assert_eq!(&table, &before);
            for (row, column, _) in decorations.iter() {
                prop_assert!(row < n);
                prop_assert!(column != INTERFACE_PRESSURE_BAR);
            }
        }
    }
}
