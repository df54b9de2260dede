//! Insulation-resistance temperature correction.
//!
//! Implements the standard correction table that normalizes a measured
//! insulation resistance to the 20 °C reference temperature, and the
//! compliance evaluation built on top of it.

pub mod compliance;
pub mod table;

pub use compliance::{
    assess, Assessment, MeasuredResistances, PairAssessment, PhaseType, WindingPair, FAIL_LABEL,
    PASS_LABEL,
};
pub use table::{correction_factor, correction_factor_for, InsulationKind, TEMPERATURE_SAMPLES};
