//! Column names for both vocabularies, as constants for type safety.

// =============================================================================
// Machine vocabulary (test-bed controller input file)
// =============================================================================

/// Shaft speed demand
pub const TST_SPEED_DEM: &str = "TST_SpeedDem";
/// Chamber (cell) pressure demand, MainSeal signature column
pub const TST_CELL_PRES_DEMAND: &str = "TST_CellPresDemand";
/// Interface pressure demand
pub const TST_INTER_PRES_DEMAND: &str = "TST_InterPresDemand";
/// Interface back-pressure demand, drive end
pub const TST_INTER_BP_DEMAND_DE: &str = "TST_InterBPDemand_DE";
/// Interface back-pressure demand, non-drive end
pub const TST_INTER_BP_DEMAND_NDE: &str = "TST_InterBPDemand_NDE";
/// Gas injection pressure demand
pub const TST_GAS_INJECTION_DEMAND: &str = "TST_GasInjectionDemand";
/// Separation seal flow setpoint 1, SeparationSeal signature column
pub const TST_SEP_FLOW_DEMAND_1: &str = "TST_SepFlowDemand1";
/// Separation seal flow setpoint 2
pub const TST_SEP_FLOW_DEMAND_2: &str = "TST_SepFlowDemand2";
/// Separation seal pressure demand
pub const TST_SEP_PRES_DEMAND: &str = "TST_SepPresDemand";
/// Step duration
pub const TST_STEP_DURATION: &str = "TST_StepDuration";
/// Auto-proceed flag (0/1)
pub const TST_AP_FLAG: &str = "TST_APFlag";
/// Temperature demand
pub const TST_TEMP_DEMAND: &str = "TST_TempDemand";
/// Gas type code
pub const TST_GAS_TYPE: &str = "TST_GasType";
/// Test mode code (1/2)
pub const TST_TEST_MODE: &str = "TST_TestMode";
/// Measurement request flag (0/1)
pub const TST_MEASUREMENT_REQ: &str = "TST_MeasurementReq";
/// Torque check flag (0/1)
pub const TST_TORQUE_CHECK: &str = "TST_TorqueCheck";

// =============================================================================
// Technician vocabulary (editable table / spreadsheet)
// =============================================================================

/// Sequential 1-based step position, technician form only
pub const STEP: &str = "Step";
/// Free-text notes, technician form only
pub const NOTES: &str = "Notes";

/// Shaft speed in RPM
pub const SPEED_RPM: &str = "Speed_RPM";
/// Chamber pressure in bar
pub const CELL_PRESSURE_BAR: &str = "Cell_Pressure_bar";
/// Interface pressure in bar
pub const INTERFACE_PRESSURE_BAR: &str = "Interface_Pressure_bar";
/// Interface back-pressure, drive end, in bar
pub const INTERFACE_BP_DE_BAR: &str = "Interface_BP_DE_bar";
/// Interface back-pressure, non-drive end, in bar
pub const INTERFACE_BP_NDE_BAR: &str = "Interface_BP_NDE_bar";
/// Gas injection pressure in bar
pub const GAS_INJECTION_BAR: &str = "Gas_Injection_bar";
/// Separation seal flow setpoint 1
pub const SEP_SEAL_FLOW_SET1: &str = "Sep_Seal_Flow_Set1";
/// Separation seal flow setpoint 2
pub const SEP_SEAL_FLOW_SET2: &str = "Sep_Seal_Flow_Set2";
/// Separation seal pressure in bar
pub const SEP_SEAL_PRESSURE_BAR: &str = "Sep_Seal_Pressure_bar";
/// Step duration in minutes
pub const STEP_DURATION_MIN: &str = "Step_Duration_min";
/// Auto-proceed (Yes/No)
pub const AUTO_PROCEED: &str = "Auto_Proceed";
/// Temperature in degrees Celsius
pub const TEMPERATURE_C: &str = "Temperature_C";
/// Gas type label
pub const GAS_TYPE: &str = "Gas_Type";
/// Test mode label (Mode 1/Mode 2)
pub const TEST_MODE: &str = "Test_Mode";
/// Measurement required (Yes/No)
pub const MEASUREMENT_REQUIRED: &str = "Measurement_Required";
/// Torque check (Yes/No)
pub const TORQUE_CHECK: &str = "Torque_Check";

/// Columns that only exist in the technician form.
pub const TECHNICIAN_ONLY: [&str; 2] = [STEP, NOTES];
