use std::fmt;

use serde::Deserialize;

use crate::schema::{CELL_PRESSURE_BAR, INTERFACE_PRESSURE_BAR, SPEED_RPM};

/// Maximum shaft speed the test bed is rated for, in RPM
pub const MAX_SPEED_RPM: f64 = 32_000.0;
/// Maximum chamber pressure, in bar
pub const MAX_CELL_PRESSURE_BAR: f64 = 450.0;
/// Interface pressure must track this fraction of the chamber pressure
pub const INTERFACE_PRESSURE_RATIO: f64 = 0.95;
/// Allowed deviation of the interface pressure from its target, in bar
pub const INTERFACE_PRESSURE_TOLERANCE_BAR: f64 = 0.5;

/// Absorbs binary rounding of decimal thresholds such as `0.95 * 10.0`.
const EPSILON: f64 = 1e-9;

/// Hardware safety limits. Defaults are the rated limits of the test bed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Upper bound on `Speed_RPM`
    pub max_speed_rpm: f64,
    /// Upper bound on `Cell_Pressure_bar`
    pub max_cell_pressure_bar: f64,
    /// Target ratio `Interface_Pressure_bar / Cell_Pressure_bar`
    pub interface_pressure_ratio: f64,
    /// Allowed absolute deviation from the interface target
    pub interface_pressure_tolerance_bar: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_speed_rpm: MAX_SPEED_RPM,
            max_cell_pressure_bar: MAX_CELL_PRESSURE_BAR,
            interface_pressure_ratio: INTERFACE_PRESSURE_RATIO,
            interface_pressure_tolerance_bar: INTERFACE_PRESSURE_TOLERANCE_BAR,
        }
    }
}

/// One of the fixed safety rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SafetyRule {
    /// `Speed_RPM <= max_speed_rpm`
    MaxSpeed,
    /// `Cell_Pressure_bar <= max_cell_pressure_bar`
    MaxCellPressure,
    /// `|Interface_Pressure_bar - ratio * Cell_Pressure_bar| <= tolerance`
    InterfacePressureBand,
}

impl SafetyRule {
    /// All rules in evaluation order.
    pub const ALL: [SafetyRule; 3] = [
        SafetyRule::MaxSpeed,
        SafetyRule::MaxCellPressure,
        SafetyRule::InterfacePressureBand,
    ];

    /// Columns that must all be present for the rule to apply.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SafetyRule::MaxSpeed => &[SPEED_RPM],
            SafetyRule::MaxCellPressure => &[CELL_PRESSURE_BAR],
            SafetyRule::InterfacePressureBand => &[INTERFACE_PRESSURE_BAR, CELL_PRESSURE_BAR],
        }
    }

    /// Column whose cell gets flagged.
    pub fn flagged_column(&self) -> &'static str {
        self.required_columns()[0]
    }

    /// Short description with the active threshold.
    pub fn describe(&self, limits: &SafetyLimits) -> String {
        match self {
            SafetyRule::MaxSpeed => format!("{} <= {}", SPEED_RPM, limits.max_speed_rpm),
            SafetyRule::MaxCellPressure => {
                format!("{} <= {}", CELL_PRESSURE_BAR, limits.max_cell_pressure_bar)
            }
            SafetyRule::InterfacePressureBand => format!(
                "{} within ±{} of {} x {}",
                INTERFACE_PRESSURE_BAR,
                limits.interface_pressure_tolerance_bar,
                limits.interface_pressure_ratio,
                CELL_PRESSURE_BAR
            ),
        }
    }

    /// Evaluate the rule for one row. `value` reads a numeric cell by column;
    /// rows where a needed value is not numeric are not flagged.
    pub(crate) fn check<F>(&self, limits: &SafetyLimits, value: F) -> Option<Violation>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self {
            SafetyRule::MaxSpeed => {
                let speed = value(SPEED_RPM)?;
                (speed > limits.max_speed_rpm + EPSILON).then(|| Violation {
                    rule: *self,
                    value: speed,
                    message: format!("{} exceeds {} RPM", speed, limits.max_speed_rpm),
                })
            }
            SafetyRule::MaxCellPressure => {
                let pressure = value(CELL_PRESSURE_BAR)?;
                (pressure > limits.max_cell_pressure_bar + EPSILON).then(|| Violation {
                    rule: *self,
                    value: pressure,
                    message: format!("{} exceeds {} bar", pressure, limits.max_cell_pressure_bar),
                })
            }
            SafetyRule::InterfacePressureBand => {
                let interface = value(INTERFACE_PRESSURE_BAR)?;
                let cell = value(CELL_PRESSURE_BAR)?;
                let target = limits.interface_pressure_ratio * cell;
                let deviation = (interface - target).abs();
                (deviation > limits.interface_pressure_tolerance_bar + EPSILON).then(|| Violation {
                    rule: *self,
                    value: interface,
                    message: format!(
                        "{} is {:.3} bar away from target {:.3} (±{})",
                        interface, deviation, target, limits.interface_pressure_tolerance_bar
                    ),
                })
            }
        }
    }
}

impl fmt::Display for SafetyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SafetyRule::MaxSpeed => "Maximum speed",
            SafetyRule::MaxCellPressure => "Maximum chamber pressure",
            SafetyRule::InterfacePressureBand => "Interface pressure band",
        };
        f.write_str(name)
    }
}

/// A flagged cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Rule that was violated
    pub rule: SafetyRule,
    /// Offending value
    pub value: f64,
    /// Human-readable explanation
    pub message: String,
}
