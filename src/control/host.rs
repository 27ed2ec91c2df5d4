use super::mechanism::MechanismKind;
use super::propulsion::{ThrusterGroup, ThrusterSpec};
use super::sound::{SoundChannel, SoundCue};
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::utils::vector3d::Vector3D;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightState {
    pub ground_contact: bool,
    /// Airspeed in the local horizon frame; `y` is the vertical component, positive up.
    pub horizon_airspeed: Vector3D,
    // Pa
    pub dynamic_pressure: f64,
}

impl FlightState {
    pub fn vertical_speed(&self) -> f64 {
        self.horizon_airspeed.y
    }
}

pub trait SimulatorHost {
    fn set_animation(&mut self, mechanism: MechanismKind, progress: f64);

    fn connect_sound(&mut self) -> Option<SoundChannel>;
    fn load_cue(&mut self, channel: SoundChannel, cue: SoundCue, path: &str);
    fn play_cue(&mut self, channel: SoundChannel, cue: SoundCue);

    fn set_empty_mass(&mut self, mass: f64);
    fn set_touchdown_points(&mut self, points: [Vector3D; 3]);
    fn flight_state(&self) -> FlightState;
    fn vessel_name(&self) -> String;

    /// Opens a modal text prompt; the answer comes back through `CrewEnrollment::submit`.
    fn open_input_box(&mut self, prompt: &str);

    fn parse_scenario_line(&mut self, line: &str);
    fn save_base_state(&mut self, out: &mut Vec<String>);
}

pub trait ClassCapsBuilder {
    fn create_propellant(&mut self, capacity: f64) -> usize;
    fn create_thruster(&mut self, spec: &ThrusterSpec, propellant: usize) -> usize;
    fn create_thruster_group(&mut self, thrusters: &[usize], group: ThrusterGroup);
    /// The host samples `Aerodynamics::calculate_coefficients` for lift, moment and drag.
    fn create_airfoil(&mut self, aerodynamics: &Aerodynamics);
    fn set_size(&mut self, size: f64);
    fn set_cross_sections(&mut self, cross_sections: [f64; 3]);
    fn set_principal_moments(&mut self, pmi: [f64; 3]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrewTransfer {
    Transferred { name: String, role: String },
    Returned { name: String, role: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaOutcome {
    TransferredToDockedShip { name: String },
    Eva { name: String },
    AirlockClosed,
    DockedShipAirlockClosed,
    CrewMemberNotFound,
    DockedShipIncompatible,
    Failed,
}

impl EvaOutcome {
    pub fn message(&self) -> String {
        match self {
            EvaOutcome::TransferredToDockedShip { name } => {
                format!("{} transfered through main hatch", name)
            }
            EvaOutcome::Eva { name } => format!("{} on EVA", name),
            EvaOutcome::AirlockClosed => "Airlock closed. press A to open".to_string(),
            EvaOutcome::DockedShipAirlockClosed => "Docked vessel airlock closed".to_string(),
            EvaOutcome::CrewMemberNotFound => "No crew by this name aboard".to_string(),
            EvaOutcome::DockedShipIncompatible => {
                "Docked ship is not compatible with crew transfer".to_string()
            }
            EvaOutcome::Failed => "Misc error with crew manager".to_string(),
        }
    }

    pub fn left_vessel(&self) -> bool {
        matches!(
            self,
            EvaOutcome::TransferredToDockedShip { .. } | EvaOutcome::Eva { .. }
        )
    }
}

pub trait CrewManager {
    fn crew_count(&self) -> usize;
    fn set_pulse(&mut self, slot: usize, pulse: u32);
    fn member_name(&self, slot: usize) -> Option<String>;
    fn member_role(&self, slot: usize) -> Option<String>;
    fn add_member(&mut self, name: &str, age: u32, pulse: u32, weight: u32, role: &str) -> bool;
    fn eva(&mut self, slot: usize) -> EvaOutcome;

    fn airlock_open(&self) -> bool;
    fn set_airlock_open(&mut self, open: bool);

    fn process_transfers(&mut self) -> Option<CrewTransfer>;
    fn detect_action_area(&mut self) -> Option<usize>;

    /// Returns true if the line belonged to the crew manager.
    fn load_scenario_line(&mut self, line: &str) -> bool;
    fn save_scenario(&self, out: &mut Vec<String>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrappleOutcome {
    Grappled,
    NoneInRange,
    MassExceeded,
    BadConfig,
    SlotFull,
    BayClosed,
    AllSlotsFull,
    Failed,
}

impl GrappleOutcome {
    pub fn message(self) -> &'static str {
        match self {
            GrappleOutcome::Grappled => "Cargo grappled",
            GrappleOutcome::NoneInRange => "No cargo in range",
            GrappleOutcome::MassExceeded => "Maximum payload mass exceeded",
            GrappleOutcome::BadConfig => "bad config, mesh not found or slot not declared",
            GrappleOutcome::SlotFull => "Cargo slot full, unable to grapple cargo",
            GrappleOutcome::BayClosed => "Payload Bay A closed",
            GrappleOutcome::AllSlotsFull => "Unable to load Cargo. All slots full",
            GrappleOutcome::Failed => "Misc error. Unable to grapple cargo",
        }
    }
}

pub trait CargoManager {
    fn set_door_open(&mut self, open: bool);
    fn update_empty_mass(&mut self);
    /// `None` picks the first suitable slot.
    fn grapple(&mut self, slot: Option<usize>) -> GrappleOutcome;
    fn release(&mut self, slot: Option<usize>) -> bool;
    fn total_mass(&self) -> f64;
    fn loaded_count(&self) -> usize;

    fn load_scenario_line(&mut self, line: &str) -> bool;
    fn save_scenario(&self, out: &mut Vec<String>);
}

pub struct HostContext<'a> {
    pub sim: &'a mut dyn SimulatorHost,
    pub crew: &'a mut dyn CrewManager,
    pub cargo: &'a mut dyn CargoManager,
}

impl<'a> HostContext<'a> {
    pub fn new(
        sim: &'a mut dyn SimulatorHost,
        crew: &'a mut dyn CrewManager,
        cargo: &'a mut dyn CargoManager,
    ) -> Self {
        HostContext { sim, crew, cargo }
    }
}
