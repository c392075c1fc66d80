use std::collections::BTreeMap;

use log::{debug, warn};

use super::columns::*;
use super::record_type::RecordType;
use crate::coding::Coding;
use crate::table::{SequenceTable, TableError};

/// How a mapped field's values are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric setpoint, identical in both forms
    Setpoint,
    /// Label in the technician form, integer in the machine form
    Coded(Coding),
}

/// One field of a record type, named in both vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Machine vocabulary name
    pub machine: &'static str,
    /// Technician vocabulary name
    pub technician: &'static str,
    /// Value representation
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn setpoint(machine: &'static str, technician: &'static str) -> Self {
        Self {
            machine,
            technician,
            kind: FieldKind::Setpoint,
        }
    }

    const fn coded(machine: &'static str, technician: &'static str, coding: Coding) -> Self {
        Self {
            machine,
            technician,
            kind: FieldKind::Coded(coding),
        }
    }

    /// The coding, for coded fields.
    pub fn coding(&self) -> Option<Coding> {
        match self.kind {
            FieldKind::Coded(coding) => Some(coding),
            FieldKind::Setpoint => None,
        }
    }
}

const MAIN_SEAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::setpoint(TST_SPEED_DEM, SPEED_RPM),
    FieldSpec::setpoint(TST_CELL_PRES_DEMAND, CELL_PRESSURE_BAR),
    FieldSpec::setpoint(TST_INTER_PRES_DEMAND, INTERFACE_PRESSURE_BAR),
    FieldSpec::setpoint(TST_INTER_BP_DEMAND_DE, INTERFACE_BP_DE_BAR),
    FieldSpec::setpoint(TST_INTER_BP_DEMAND_NDE, INTERFACE_BP_NDE_BAR),
    FieldSpec::setpoint(TST_GAS_INJECTION_DEMAND, GAS_INJECTION_BAR),
    FieldSpec::setpoint(TST_STEP_DURATION, STEP_DURATION_MIN),
    FieldSpec::coded(TST_AP_FLAG, AUTO_PROCEED, Coding::YesNo),
    FieldSpec::setpoint(TST_TEMP_DEMAND, TEMPERATURE_C),
    FieldSpec::coded(TST_GAS_TYPE, GAS_TYPE, Coding::GasType),
    FieldSpec::coded(TST_TEST_MODE, TEST_MODE, Coding::TestMode),
    FieldSpec::coded(TST_MEASUREMENT_REQ, MEASUREMENT_REQUIRED, Coding::YesNo),
    FieldSpec::coded(TST_TORQUE_CHECK, TORQUE_CHECK, Coding::YesNo),
];

const SEPARATION_SEAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::setpoint(TST_SPEED_DEM, SPEED_RPM),
    FieldSpec::setpoint(TST_SEP_FLOW_DEMAND_1, SEP_SEAL_FLOW_SET1),
    FieldSpec::setpoint(TST_SEP_FLOW_DEMAND_2, SEP_SEAL_FLOW_SET2),
    FieldSpec::setpoint(TST_SEP_PRES_DEMAND, SEP_SEAL_PRESSURE_BAR),
    FieldSpec::setpoint(TST_STEP_DURATION, STEP_DURATION_MIN),
    FieldSpec::coded(TST_AP_FLAG, AUTO_PROCEED, Coding::YesNo),
    FieldSpec::setpoint(TST_TEMP_DEMAND, TEMPERATURE_C),
    FieldSpec::coded(TST_GAS_TYPE, GAS_TYPE, Coding::GasType),
    FieldSpec::coded(TST_TEST_MODE, TEST_MODE, Coding::TestMode),
    FieldSpec::coded(TST_MEASUREMENT_REQ, MEASUREMENT_REQUIRED, Coding::YesNo),
    FieldSpec::coded(TST_TORQUE_CHECK, TORQUE_CHECK, Coding::YesNo),
];

/// Target vocabulary of a rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Machine names → technician names
    ToTechnician,
    /// Technician names → machine names
    ToMachine,
}

/// The bijective field-name dictionary of one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    record_type: RecordType,
    fields: &'static [FieldSpec],
}

impl ColumnMapping {
    /// Mapping for a record type.
    pub fn for_type(record_type: RecordType) -> Self {
        let fields = match record_type {
            RecordType::MainSeal => MAIN_SEAL_FIELDS,
            RecordType::SeparationSeal => SEPARATION_SEAL_FIELDS,
        };
        Self {
            record_type,
            fields,
        }
    }

    /// Record type this mapping belongs to.
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// All fields in controller column order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Fields carrying a coding.
    pub fn coded_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.coding().is_some())
    }

    /// Fields carrying a numeric setpoint.
    pub fn setpoint_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Setpoint))
    }

    /// Machine names in controller column order.
    pub fn machine_columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.machine).collect()
    }

    /// Technician names in controller column order.
    pub fn technician_columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.technician).collect()
    }

    /// Machine name → technician name.
    pub fn machine_to_technician(&self) -> BTreeMap<&'static str, &'static str> {
        self.fields.iter().map(|f| (f.machine, f.technician)).collect()
    }

    /// Technician name → machine name.
    pub fn technician_to_machine(&self) -> BTreeMap<&'static str, &'static str> {
        self.fields.iter().map(|f| (f.technician, f.machine)).collect()
    }

    /// Look a field up by either of its names.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.machine == name || f.technician == name)
    }

    /// Rename the columns of `table` that are present in the source vocabulary.
    ///
    /// Unknown columns pass through unchanged; a table already in the target
    /// vocabulary is left as is. When both names of a field are present the
    /// target column wins and the source column passes through unrenamed.
    /// Returns the number of columns renamed.
    pub fn rename(&self, table: &mut SequenceTable, direction: Direction) -> Result<usize, TableError> {
        let mut renamed = 0;
        for field in self.fields {
            let (from, to) = match direction {
                Direction::ToTechnician => (field.machine, field.technician),
                Direction::ToMachine => (field.technician, field.machine),
            };
            if table.has_column(from) && table.has_column(to) {
                warn!("Both {} and {} present; keeping {} and leaving {} as is", from, to, to, from);
                continue;
            }
            if table.rename_column(from, to)? {
                renamed += 1;
            }
        }
        debug!(
            "Renamed {} column(s) {:?} for {}",
            renamed, direction, self.record_type
        );
        Ok(renamed)
    }
}
