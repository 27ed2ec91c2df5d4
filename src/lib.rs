pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod module;
pub mod persistence;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{MechanismSpec, VesselConfig};
pub use constants::*;
pub use control::crew_enrollment::{CrewEnrollment, EnrollmentField, EnrollmentStep};
pub use control::hazards::{Hazard, HazardEvent, HazardMonitor};
pub use control::host::{
    CargoManager, ClassCapsBuilder, CrewManager, CrewTransfer, EvaOutcome, FlightState,
    GrappleOutcome, HostContext, SimulatorHost,
};
pub use control::input::{Key, Modifiers, VcSwitch};
pub use control::life_support::LifeSupport;
pub use control::mechanism::{
    CommandOutcome, Mechanism, MechanismKind, MechanismState, MechanismStatus,
};
pub use control::sound::{SoundChannel, SoundCue};
pub use control::vessel::{StepReport, Vessel};
pub use errors::VesselError;
pub use module::{HudStyle, VesselModule};

// Re-export commonly used items from persistence
pub use persistence::scenario::{format_record, parse_line, ScenarioRecord};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::{AeroCoefficients, Aerodynamics, AirfoilSpec};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::hud::HudMessages;
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::headless::{CargoHold, CrewMember, CrewRoster, HeadlessHost};
pub use utils::vector3d::Vector3D;
