// Vessel Class Constants
pub const EMPTY_MASS: f64 = 14_770.0; // kg
pub const VESSEL_SIZE: f64 = 31.4; // mean radius, m
pub const CROSS_SECTIONS: [f64; 3] = [398.95, 221.22, 32.49]; // m²
pub const PRINCIPAL_MOMENTS_OF_INERTIA: [f64; 3] = [142.96, 138.51, 5.30]; // m², normalized

// Mechanism Operating Speeds (fraction of full travel per second)
pub const GEAR_OPERATING_SPEED: f64 = 0.10;
pub const PLBAYA_OPERATING_SPEED: f64 = 0.07;
pub const PLBAYB_OPERATING_SPEED: f64 = 0.18;

// Distance from the starting bound within which a motion cue may sound
pub const GEAR_CUE_WINDOW: f64 = 0.01;
pub const PLBAYA_CUE_WINDOW: f64 = 0.01;
pub const PLBAYB_CUE_WINDOW: f64 = 0.1;

// Life Support Constants
pub const O2_TANK_CAPACITY: f64 = 1_000.0; // kg
pub const O2_CONSUMPTION_PER_CREW: f64 = 1.2 * 1.157407e-5; // kg/s (1.2 kg per crew per day)
pub const MAX_CREW_SEATS: usize = 2;
pub const DEFAULT_CREW_PULSE: u32 = 70; // bpm
pub const DEFAULT_CREW_WEIGHT: u32 = 70; // kg
pub const MIN_CREW_AGE: u32 = 5;
pub const MAX_CREW_AGE: u32 = 100;

// Hazard Thresholds
pub const CRASH_VERTICAL_SPEED: f64 = -3.0; // m/s, strictly below is fatal
pub const REENTRY_DYNAMIC_PRESSURE: f64 = 44_000.0; // Pa, strictly above is fatal

// HUD
pub const HUD_MESSAGE_DURATION: f64 = 15.0; // s

// Cargo Constants
pub const CARGO_SLOT_COUNT: usize = 18;
pub const MAX_CARGO_MASS: f64 = 50_000.0; // kg

// Touchdown Geometry
pub const TOUCHDOWN_BASE_HEIGHT: f64 = -4.89; // m
pub const TOUCHDOWN_GEAR_TRAVEL: f64 = 0.99; // m

// Propulsion Constants
pub const MAIN_FUEL_MASS: f64 = 11_900.0; // kg
pub const RCS_TANK_MASS: f64 = 120.0; // kg
pub const RCS_TANK_COUNT: usize = 12;
pub const MAIN_THRUST: f64 = 87_000.0; // N
pub const RCS_THRUST: f64 = 1_200.0; // N
pub const RCS_FORWARD_LATERAL_THRUST: f64 = 1_470.0; // N
pub const MAIN_ISP_VACUUM: f64 = 9_000.0; // m/s
pub const MAIN_ISP_SEA_LEVEL: f64 = 4_200.0; // m/s
pub const RCS_ISP_VACUUM: f64 = 1_600.0; // m/s
pub const RCS_ISP_SEA_LEVEL: f64 = 710.0; // m/s
pub const SEA_LEVEL_PRESSURE: f64 = 101.4e3; // Pa, Isp reference pressure

// Aerodynamic Constants
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const AIRFOIL_CHORD: f64 = 8.0; // m
pub const AIRFOIL_AREA: f64 = 140.0; // m²
pub const AIRFOIL_ASPECT_RATIO: f64 = 0.1;
pub const AIRFOIL_EFFICIENCY: f64 = 0.7;

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const MAX_SIMULATION_TIME: f64 = 600.0; // s
