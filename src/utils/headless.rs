//! In-memory collaborators standing in for the simulator, the crew manager and
//! the cargo manager. Every call is recorded so flights can be inspected.

use log::{debug, info};

use crate::constants::{
    CARGO_SLOT_COUNT, DEFAULT_CREW_PULSE, DEFAULT_CREW_WEIGHT, MAX_CARGO_MASS, MAX_CREW_SEATS,
};
use crate::control::host::{
    CargoManager, ClassCapsBuilder, CrewManager, CrewTransfer, EvaOutcome, FlightState,
    GrappleOutcome, SimulatorHost,
};
use crate::control::mechanism::MechanismKind;
use crate::control::propulsion::{ThrusterGroup, ThrusterSpec};
use crate::control::sound::{SoundChannel, SoundCue};
use crate::module::{FontSpec, GdiHandle, GraphicsHost, HudStyle, PenSpec, Rgb};
use crate::persistence::scenario::strip_label;
use crate::telemetry_system::hud::HudCanvas;
use crate::trajectory_system::aerodynamics::{AeroCoefficients, Aerodynamics};
use crate::utils::vector3d::Vector3D;

const CREW_LABEL: &str = "UMMUCREW";
const CARGO_LABEL: &str = "UCGOCARGO";

pub struct HeadlessHost {
    pub name: String,
    pub flight: FlightState,
    pub sound_available: bool,
    pub animations: Vec<(MechanismKind, f64)>,
    pub loaded_cues: Vec<(SoundCue, String)>,
    pub played_cues: Vec<SoundCue>,
    pub empty_mass: Option<f64>,
    pub touchdown_points: Option<[Vector3D; 3]>,
    pub input_prompts: Vec<String>,
    pub unparsed_lines: Vec<String>,
    pub base_state: Vec<String>,

    pub propellant: Vec<f64>,
    pub thrusters: Vec<(ThrusterSpec, usize)>,
    pub thruster_groups: Vec<(ThrusterGroup, Vec<usize>)>,
    pub airfoils: Vec<Aerodynamics>,
    pub size: f64,
    pub cross_sections: [f64; 3],
    pub principal_moments: [f64; 3],

    pub live_handles: Vec<GdiHandle>,
    next_handle: u64,
    pub hud_lines: Vec<(i32, i32, String)>,
}

impl HeadlessHost {
    pub fn new(name: &str) -> Self {
        HeadlessHost {
            name: name.to_string(),
            flight: FlightState::default(),
            sound_available: true,
            animations: Vec::new(),
            loaded_cues: Vec::new(),
            played_cues: Vec::new(),
            empty_mass: None,
            touchdown_points: None,
            input_prompts: Vec::new(),
            unparsed_lines: Vec::new(),
            base_state: vec![
                "STATUS Landed Earth".to_string(),
                "POS -80.6758473 28.5227570".to_string(),
            ],
            propellant: Vec::new(),
            thrusters: Vec::new(),
            thruster_groups: Vec::new(),
            airfoils: Vec::new(),
            size: 0.0,
            cross_sections: [0.0; 3],
            principal_moments: [0.0; 3],
            live_handles: Vec::new(),
            next_handle: 0,
            hud_lines: Vec::new(),
        }
    }

    pub fn last_animation(&self, kind: MechanismKind) -> Option<f64> {
        self.animations
            .iter()
            .rev()
            .find(|(animated, _)| *animated == kind)
            .map(|(_, progress)| *progress)
    }

    // Samples a registered airfoil the way the simulator does every frame
    pub fn airfoil_coefficients(
        &self,
        airfoil: usize,
        aoa: f64,
        mach: f64,
        reynolds: f64,
    ) -> Option<AeroCoefficients> {
        self.airfoils
            .get(airfoil)
            .map(|aerodynamics| aerodynamics.calculate_coefficients(aoa, mach, reynolds))
    }

    fn allocate_handle(&mut self) -> GdiHandle {
        self.next_handle += 1;
        let handle = GdiHandle(self.next_handle);
        self.live_handles.push(handle);
        handle
    }
}

impl SimulatorHost for HeadlessHost {
    fn set_animation(&mut self, mechanism: MechanismKind, progress: f64) {
        self.animations.push((mechanism, progress));
    }

    fn connect_sound(&mut self) -> Option<SoundChannel> {
        self.sound_available.then_some(SoundChannel(1))
    }

    fn load_cue(&mut self, _channel: SoundChannel, cue: SoundCue, path: &str) {
        self.loaded_cues.push((cue, path.to_string()));
    }

    fn play_cue(&mut self, _channel: SoundChannel, cue: SoundCue) {
        self.played_cues.push(cue);
    }

    fn set_empty_mass(&mut self, mass: f64) {
        self.empty_mass = Some(mass);
    }

    fn set_touchdown_points(&mut self, points: [Vector3D; 3]) {
        self.touchdown_points = Some(points);
    }

    fn flight_state(&self) -> FlightState {
        self.flight
    }

    fn vessel_name(&self) -> String {
        self.name.clone()
    }

    fn open_input_box(&mut self, prompt: &str) {
        self.input_prompts.push(prompt.to_string());
    }

    fn parse_scenario_line(&mut self, line: &str) {
        self.unparsed_lines.push(line.to_string());
    }

    fn save_base_state(&mut self, out: &mut Vec<String>) {
        out.extend(self.base_state.iter().cloned());
    }
}

impl ClassCapsBuilder for HeadlessHost {
    fn create_propellant(&mut self, capacity: f64) -> usize {
        self.propellant.push(capacity);
        self.propellant.len() - 1
    }

    fn create_thruster(&mut self, spec: &ThrusterSpec, propellant: usize) -> usize {
        self.thrusters.push((*spec, propellant));
        self.thrusters.len() - 1
    }

    fn create_thruster_group(&mut self, thrusters: &[usize], group: ThrusterGroup) {
        self.thruster_groups.push((group, thrusters.to_vec()));
    }

    fn create_airfoil(&mut self, aerodynamics: &Aerodynamics) {
        self.airfoils.push(aerodynamics.clone());
    }

    fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    fn set_cross_sections(&mut self, cross_sections: [f64; 3]) {
        self.cross_sections = cross_sections;
    }

    fn set_principal_moments(&mut self, pmi: [f64; 3]) {
        self.principal_moments = pmi;
    }
}

impl GraphicsHost for HeadlessHost {
    fn create_font(&mut self, _font: &FontSpec) -> Option<GdiHandle> {
        Some(self.allocate_handle())
    }

    fn create_pen(&mut self, _pen: &PenSpec) -> Option<GdiHandle> {
        Some(self.allocate_handle())
    }

    fn create_brush(&mut self, _color: Rgb) -> Option<GdiHandle> {
        Some(self.allocate_handle())
    }

    fn release(&mut self, handle: GdiHandle) {
        self.live_handles.retain(|live| *live != handle);
    }
}

impl HudCanvas for HeadlessHost {
    fn select_style(&mut self, _style: &HudStyle) {}

    fn text(&mut self, x: i32, y: i32, text: &str) {
        self.hud_lines.push((x, y, text.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    pub name: String,
    pub age: u32,
    pub pulse: u32,
    pub weight: u32,
    pub role: String,
}

impl CrewMember {
    pub fn new(name: &str, age: u32, role: &str) -> Self {
        CrewMember {
            name: name.to_string(),
            age,
            pulse: DEFAULT_CREW_PULSE,
            weight: DEFAULT_CREW_WEIGHT,
            role: role.to_string(),
        }
    }

    fn to_scenario_line(&self) -> String {
        format!(
            "{} {};{};{};{};{}",
            CREW_LABEL, self.name, self.age, self.pulse, self.weight, self.role
        )
    }

    fn from_scenario_fields(fields: &str) -> Option<Self> {
        let parts: Vec<&str> = fields.trim().split(';').collect();
        match parts.as_slice() {
            [name, age, pulse, weight, role] if !name.is_empty() => Some(CrewMember {
                name: name.to_string(),
                age: age.trim().parse().ok()?,
                pulse: pulse.trim().parse().ok()?,
                weight: weight.trim().parse().ok()?,
                role: role.to_string(),
            }),
            _ => None,
        }
    }
}

pub struct CrewRoster {
    members: Vec<CrewMember>,
    seats: usize,
    airlock_open: bool,
    /// Delivered by the next `process_transfers` call; `true` marks a returning EVA.
    pub pending_transfer: Option<(CrewMember, bool)>,
    /// Reported by the next `detect_action_area` call.
    pub pending_action_area: Option<usize>,
    /// Members who left through the airlock.
    pub on_eva: Vec<CrewMember>,
}

impl Default for CrewRoster {
    fn default() -> Self {
        CrewRoster::new(MAX_CREW_SEATS)
    }
}

impl CrewRoster {
    pub fn new(seats: usize) -> Self {
        CrewRoster {
            members: Vec::new(),
            seats,
            airlock_open: false,
            pending_transfer: None,
            pending_action_area: None,
            on_eva: Vec::new(),
        }
    }

    pub fn members(&self) -> &[CrewMember] {
        &self.members
    }

    pub fn board(&mut self, member: CrewMember) -> bool {
        if self.members.len() >= self.seats
            || self.members.iter().any(|aboard| aboard.name == member.name)
        {
            return false;
        }
        info!("{} boarded", member.name);
        self.members.push(member);
        true
    }

    pub fn queue_transfer(&mut self, member: CrewMember, returning: bool) {
        self.pending_transfer = Some((member, returning));
    }
}

impl CrewManager for CrewRoster {
    fn crew_count(&self) -> usize {
        self.members.len()
    }

    fn set_pulse(&mut self, slot: usize, pulse: u32) {
        if let Some(member) = self.members.get_mut(slot) {
            member.pulse = pulse;
        }
    }

    fn member_name(&self, slot: usize) -> Option<String> {
        self.members.get(slot).map(|member| member.name.clone())
    }

    fn member_role(&self, slot: usize) -> Option<String> {
        self.members.get(slot).map(|member| member.role.clone())
    }

    fn add_member(&mut self, name: &str, age: u32, pulse: u32, weight: u32, role: &str) -> bool {
        self.board(CrewMember {
            name: name.to_string(),
            age,
            pulse,
            weight,
            role: role.to_string(),
        })
    }

    fn eva(&mut self, slot: usize) -> EvaOutcome {
        if slot >= self.members.len() {
            return EvaOutcome::CrewMemberNotFound;
        }
        if !self.airlock_open {
            return EvaOutcome::AirlockClosed;
        }
        let member = self.members.remove(slot);
        let name = member.name.clone();
        self.on_eva.push(member);
        EvaOutcome::Eva { name }
    }

    fn airlock_open(&self) -> bool {
        self.airlock_open
    }

    fn set_airlock_open(&mut self, open: bool) {
        self.airlock_open = open;
    }

    fn process_transfers(&mut self) -> Option<CrewTransfer> {
        let (member, returning) = self.pending_transfer.take()?;
        let name = member.name.clone();
        let role = member.role.clone();
        if !self.board(member) {
            debug!("No seat for {}", name);
            return None;
        }
        self.on_eva.retain(|outside| outside.name != name);
        Some(if returning {
            CrewTransfer::Returned { name, role }
        } else {
            CrewTransfer::Transferred { name, role }
        })
    }

    fn detect_action_area(&mut self) -> Option<usize> {
        self.pending_action_area.take()
    }

    fn load_scenario_line(&mut self, line: &str) -> bool {
        let Some(fields) = strip_label(line, CREW_LABEL) else {
            return false;
        };
        match CrewMember::from_scenario_fields(fields) {
            Some(member) => {
                self.board(member);
            }
            None => debug!("Ignoring crew line {:?}", line),
        }
        true
    }

    fn save_scenario(&self, out: &mut Vec<String>) {
        out.extend(self.members.iter().map(CrewMember::to_scenario_line));
    }
}

pub struct CargoHold {
    slots: Vec<Option<f64>>,
    door_open: bool,
    max_mass: f64,
    /// Masses of cargo within grapple range, nearest first.
    pub in_range: Vec<f64>,
    pub mass_updates: usize,
}

impl Default for CargoHold {
    fn default() -> Self {
        CargoHold {
            slots: vec![None; CARGO_SLOT_COUNT],
            door_open: false,
            max_mass: MAX_CARGO_MASS,
            in_range: Vec::new(),
            mass_updates: 0,
        }
    }
}

impl CargoHold {
    pub fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn slot(&self, slot: usize) -> Option<f64> {
        self.slots.get(slot).copied().flatten()
    }
}

impl CargoManager for CargoHold {
    fn set_door_open(&mut self, open: bool) {
        self.door_open = open;
    }

    fn update_empty_mass(&mut self) {
        self.mass_updates += 1;
    }

    fn grapple(&mut self, slot: Option<usize>) -> GrappleOutcome {
        if !self.door_open {
            return GrappleOutcome::BayClosed;
        }
        let Some(&mass) = self.in_range.first() else {
            return GrappleOutcome::NoneInRange;
        };
        if self.total_mass() + mass > self.max_mass {
            return GrappleOutcome::MassExceeded;
        }
        let target = match slot {
            Some(index) if index >= self.slots.len() => return GrappleOutcome::BadConfig,
            Some(index) if self.slots[index].is_some() => return GrappleOutcome::SlotFull,
            Some(index) => index,
            None => match self.slots.iter().position(Option::is_none) {
                Some(index) => index,
                None => return GrappleOutcome::AllSlotsFull,
            },
        };
        self.slots[target] = Some(self.in_range.remove(0));
        GrappleOutcome::Grappled
    }

    fn release(&mut self, slot: Option<usize>) -> bool {
        let target = match slot {
            Some(index) => index,
            None => match self.slots.iter().position(Option::is_some) {
                Some(index) => index,
                None => return false,
            },
        };
        match self.slots.get_mut(target).and_then(Option::take) {
            Some(mass) => {
                self.in_range.push(mass);
                true
            }
            None => false,
        }
    }

    fn total_mass(&self) -> f64 {
        self.slots.iter().flatten().sum()
    }

    fn loaded_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn load_scenario_line(&mut self, line: &str) -> bool {
        let Some(fields) = strip_label(line, CARGO_LABEL) else {
            return false;
        };
        let mut tokens = fields.split_whitespace();
        let slot = tokens.next().and_then(|token| token.parse::<usize>().ok());
        let mass = tokens.next().and_then(|token| token.parse::<f64>().ok());
        match (slot, mass) {
            (Some(slot), Some(mass)) if slot < self.slots.len() => self.slots[slot] = Some(mass),
            _ => debug!("Ignoring cargo line {:?}", line),
        }
        true
    }

    fn save_scenario(&self, out: &mut Vec<String>) {
        for (slot, mass) in self.slots.iter().enumerate() {
            if let Some(mass) = mass {
                out.push(format!("{} {} {:.1}", CARGO_LABEL, slot, mass));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_respects_seats() {
        let mut roster = CrewRoster::new(2);
        assert!(roster.add_member("Peter", 30, 70, 70, "Capt"));
        assert!(!roster.add_member("Peter", 30, 70, 70, "Capt"));
        assert!(roster.add_member("Anna", 41, 70, 70, "Doc"));
        assert!(!roster.add_member("Lee", 25, 70, 70, "Pax"));
        assert_eq!(roster.crew_count(), 2);
    }

    #[test]
    fn test_eva_needs_open_airlock() {
        let mut roster = CrewRoster::default();
        roster.board(CrewMember::new("Peter", 30, "Capt"));
        assert_eq!(roster.eva(0), EvaOutcome::AirlockClosed);
        assert_eq!(roster.eva(5), EvaOutcome::CrewMemberNotFound);

        roster.set_airlock_open(true);
        assert_eq!(
            roster.eva(0),
            EvaOutcome::Eva {
                name: "Peter".to_string()
            }
        );
        assert_eq!(roster.crew_count(), 0);
    }

    #[test]
    fn test_crew_lines() {
        let mut roster = CrewRoster::default();
        roster.board(CrewMember::new("Mary Jane", 33, "Sci"));
        let mut out = Vec::new();
        roster.save_scenario(&mut out);
        assert_eq!(out, vec!["UMMUCREW Mary Jane;33;70;70;Sci".to_string()]);

        let mut restored = CrewRoster::default();
        assert!(restored.load_scenario_line(&out[0]));
        assert_eq!(restored.members(), roster.members());

        assert!(restored.load_scenario_line("UMMUCREW garbage"));
        assert!(!restored.load_scenario_line("GEAR 0 0.0000"));
    }

    #[test]
    fn test_crew_label_matches_like_vessel_lines() {
        let mut roster = CrewRoster::default();
        assert!(roster.load_scenario_line("  ummucrew Anna;41;70;70;Doc"));
        assert!(!roster.load_scenario_line("UMMUCREWS Lee;25;70;70;Pax"));
        assert_eq!(roster.crew_count(), 1);
        assert_eq!(roster.member_name(0), Some("Anna".to_string()));
    }

    #[test]
    fn test_grapple_outcomes() {
        let mut hold = CargoHold::default();
        assert_eq!(hold.grapple(None), GrappleOutcome::BayClosed);

        hold.set_door_open(true);
        assert_eq!(hold.grapple(None), GrappleOutcome::NoneInRange);

        hold.in_range = vec![1_200.0, 60_000.0];
        assert_eq!(hold.grapple(Some(18)), GrappleOutcome::BadConfig);
        assert_eq!(hold.grapple(Some(3)), GrappleOutcome::Grappled);
        assert_eq!(hold.slot(3), Some(1_200.0));
        assert_eq!(hold.grapple(None), GrappleOutcome::MassExceeded);

        assert!(hold.release(None));
        assert!(!hold.release(Some(3)));
        assert_eq!(hold.loaded_count(), 0);
    }

    #[test]
    fn test_cargo_lines() {
        let mut hold = CargoHold::default();
        assert!(hold.load_scenario_line("UCGOCARGO 4 850.0"));
        assert!(hold.load_scenario_line("ucgocargo 99 850.0"));
        assert!(!hold.load_scenario_line("O2Tank 1000.0000"));
        assert_eq!(hold.loaded_count(), 1);

        let mut out = Vec::new();
        hold.save_scenario(&mut out);
        assert_eq!(out, vec!["UCGOCARGO 4 850.0".to_string()]);
    }
}
