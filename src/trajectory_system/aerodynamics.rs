use std::f64::consts::PI;

use crate::constants::{AIRFOIL_AREA, AIRFOIL_ASPECT_RATIO, AIRFOIL_CHORD, AIRFOIL_EFFICIENCY};

const DEG: f64 = PI / 180.0;

// Angle-of-attack breakpoints and the lift/moment coefficients at each one
const AOA_TABLE: [f64; 7] = [
    -180.0 * DEG,
    -90.0 * DEG,
    -30.0 * DEG,
    0.0,
    60.0 * DEG,
    90.0 * DEG,
    180.0 * DEG,
];
const LIFT_TABLE: [f64; 7] = [0.0, -0.0005, -0.001, 0.0, 0.0071, 0.0011, 0.00001];
const MOMENT_TABLE: [f64; 7] = [0.0, 0.0, 0.0007, 0.0, -0.0010, 0.0, 0.0];

/// Reference geometry handed to the simulator when the vertical-lift airfoil is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirfoilSpec {
    pub chord: f64,
    pub area: f64,
    pub aspect_ratio: f64,
}

impl Default for AirfoilSpec {
    fn default() -> Self {
        AirfoilSpec {
            chord: AIRFOIL_CHORD,
            area: AIRFOIL_AREA,
            aspect_ratio: AIRFOIL_ASPECT_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroCoefficients {
    pub lift: f64,
    pub moment: f64,
    pub drag: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aerodynamics {
    pub airfoil: AirfoilSpec,
    pub efficiency: f64,
    pub profile_drag: f64,
}

impl Aerodynamics {
    pub fn new(airfoil: AirfoilSpec, efficiency: f64, profile_drag: f64) -> Self {
        Aerodynamics {
            airfoil,
            efficiency,
            profile_drag,
        }
    }

    pub fn shuttle_d() -> Self {
        Aerodynamics::new(AirfoilSpec::default(), AIRFOIL_EFFICIENCY, 0.045)
    }

    /// Coefficients at angle of attack `aoa` (radians) and Mach number `mach`.
    /// The Reynolds number is accepted for signature parity with the simulator
    /// callback but does not influence this hull.
    pub fn calculate_coefficients(&self, aoa: f64, mach: f64, _reynolds: f64) -> AeroCoefficients {
        let i = AOA_TABLE
            .windows(2)
            .position(|pair| pair[1] >= aoa)
            .unwrap_or(AOA_TABLE.len() - 2);
        let f = (aoa - AOA_TABLE[i]) / (AOA_TABLE[i + 1] - AOA_TABLE[i]);

        let lift = LIFT_TABLE[i] + (LIFT_TABLE[i + 1] - LIFT_TABLE[i]) * f;
        let moment = MOMENT_TABLE[i] + (MOMENT_TABLE[i + 1] - MOMENT_TABLE[i]) * f;

        let sin_aoa = aoa.sin();
        let profile = self.profile_drag + 0.4 * sin_aoa * sin_aoa;
        let drag = profile
            + Self::calculate_induced_drag(lift, self.airfoil.aspect_ratio, self.efficiency)
            + Self::calculate_wave_drag(mach, 0.75, 1.0, 1.1, 0.04);

        AeroCoefficients { lift, moment, drag }
    }

    /// Lift-induced drag coefficient cl² / (π·A·e).
    pub fn calculate_induced_drag(lift: f64, aspect_ratio: f64, efficiency: f64) -> f64 {
        lift * lift / (PI * aspect_ratio * efficiency)
    }

    /// Compressibility drag: zero below `m1`, ramps to `cmax` at `m2`, holds to
    /// `m3`, then decays with the Prandtl-Glauert factor.
    pub fn calculate_wave_drag(mach: f64, m1: f64, m2: f64, m3: f64, cmax: f64) -> f64 {
        if mach < m1 {
            0.0
        } else if mach < m2 {
            cmax * (mach - m1) / (m2 - m1)
        } else if mach < m3 {
            cmax
        } else {
            cmax * ((m3 * m3 - 1.0) / (mach * mach - 1.0)).sqrt()
        }
    }

    pub fn calculate_dynamic_pressure(air_density: f64, speed: f64) -> f64 {
        0.5 * air_density * speed.powi(2)
    }
}
