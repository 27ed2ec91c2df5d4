//! Scenario lines carrying the vessel's custom state.

pub mod scenario;

pub const OXYGEN_LABEL: &str = "O2Tank";

/// Fixed-point decimals written for progress and oxygen values.
pub const VALUE_PRECISION: usize = 4;
