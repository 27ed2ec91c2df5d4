use log::{debug, info, warn};

use super::crew_enrollment::CrewEnrollment;
use super::hazards::{zero_crew_vitals, HazardEvent, HazardMonitor};
use super::host::{ClassCapsBuilder, CrewManager, CrewTransfer, HostContext, SimulatorHost};
use super::life_support::LifeSupport;
use super::mechanism::{CommandOutcome, Mechanism, MechanismKind, MechanismStatus};
use super::propulsion::PropulsionLayout;
use super::sound::{register_sounds, SoundChannel, SoundCue};
use crate::config::VesselConfig;
use crate::constants::*;
use crate::errors::VesselError;
use crate::module::HudStyle;
use crate::telemetry_system::hud::{HudCanvas, HudMessages};
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::utils::vector3d::Vector3D;

const CREW_WELCOME: &str = "Welcome aboard. Press E to EVA, 1/2 to select crew, \
                            A to Open/Close airlock, 0 or 8 for info, and M to add crew.";
const CARGO_WELCOME: &str = "Payload Controls C/Shift+C to grapple/release.";

/// What one timestep produced, for whoever records the flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub cues: Vec<SoundCue>,
    pub hazards: Vec<HazardEvent>,
}

pub struct Vessel {
    pub config: VesselConfig,
    pub gear: Mechanism,
    pub bay_a: Mechanism,
    pub bay_b: Mechanism,
    pub life_support: LifeSupport,
    pub hazards: HazardMonitor,
    pub hud: HudMessages,
    pub enrollment: CrewEnrollment,
    pub aerodynamics: Aerodynamics,
    pub propulsion: PropulsionLayout,
    /// Crew slot targeted by EVA.
    pub selected_crew: usize,
    /// Cargo slot targeted by grapple and release; `None` lets the cargo manager choose.
    pub selected_cargo: Option<usize>,
    pub sound: Option<SoundChannel>,
}

impl Vessel {
    pub fn new(config: VesselConfig) -> Result<Self, VesselError> {
        config.validate()?;

        Ok(Vessel {
            gear: Mechanism::new(MechanismKind::Gear, config.gear),
            bay_a: Mechanism::new(MechanismKind::BayA, config.bay_a),
            bay_b: Mechanism::new(MechanismKind::BayB, config.bay_b),
            life_support: LifeSupport::new(config.o2_capacity, config.o2_consumption_per_crew),
            hazards: HazardMonitor::new(&config),
            hud: HudMessages::new(config.hud_message_duration),
            enrollment: CrewEnrollment::default(),
            aerodynamics: Aerodynamics::shuttle_d(),
            propulsion: PropulsionLayout::shuttle_d(),
            selected_crew: 0,
            selected_cargo: None,
            sound: None,
            config,
        })
    }

    pub fn mechanism(&self, kind: MechanismKind) -> &Mechanism {
        match kind {
            MechanismKind::Gear => &self.gear,
            MechanismKind::BayA => &self.bay_a,
            MechanismKind::BayB => &self.bay_b,
        }
    }

    pub fn mechanism_mut(&mut self, kind: MechanismKind) -> &mut Mechanism {
        match kind {
            MechanismKind::Gear => &mut self.gear,
            MechanismKind::BayA => &mut self.bay_a,
            MechanismKind::BayB => &mut self.bay_b,
        }
    }

    pub fn statuses(&self) -> [MechanismStatus; 3] {
        MechanismKind::ALL.map(|kind| self.mechanism(kind).status())
    }

    /// Defines the vessel class: geometry, propellant, thrusters and airfoil.
    pub fn set_class_caps(&mut self, caps: &mut dyn ClassCapsBuilder) {
        caps.set_size(VESSEL_SIZE);
        caps.set_cross_sections(CROSS_SECTIONS);
        caps.set_principal_moments(PRINCIPAL_MOMENTS_OF_INERTIA);
        self.propulsion.register(caps);
        caps.create_airfoil(&self.aerodynamics);

        self.hud.post_crew(CREW_WELCOME);
        self.hud.post_cargo(CARGO_WELCOME);
    }

    pub fn post_creation(&mut self, sim: &mut dyn SimulatorHost) {
        self.sound = register_sounds(sim);
        if self.sound.is_none() {
            warn!("Sound host unavailable, mechanism cues disabled");
        }
    }

    pub fn empty_mass(&self) -> f64 {
        self.config.empty_mass + self.life_support.oxygen_remaining()
    }

    pub fn touchdown_points(&self) -> [Vector3D; 3] {
        let height = TOUCHDOWN_BASE_HEIGHT + self.gear.progress() * TOUCHDOWN_GEAR_TRAVEL;
        [
            Vector3D::new(0.0, height, 1.0),
            Vector3D::new(-1.0, height, -1.0),
            Vector3D::new(1.0, height, -1.0),
        ]
    }

    pub fn oxygen_report(&self) -> String {
        format!(
            "Main Oxygen tank {:.0}kg/{:.0}kg. ",
            self.life_support.oxygen_remaining(),
            self.life_support.capacity()
        )
    }

    pub fn revert(&mut self, kind: MechanismKind) {
        self.mechanism_mut(kind).revert();
    }

    pub fn deploy(&mut self, kind: MechanismKind) -> CommandOutcome {
        let outcome = self.mechanism_mut(kind).deploy();
        self.hud.post_crew(kind.deploy_message(outcome));
        outcome
    }

    pub fn retract(&mut self, kind: MechanismKind) -> CommandOutcome {
        let outcome = self.mechanism_mut(kind).retract();
        self.hud.post_crew(kind.retract_message(outcome));
        outcome
    }

    pub fn toggle_airlock(&mut self, crew: &mut dyn CrewManager) {
        crew.set_airlock_open(!crew.airlock_open());
        self.hud.post_crew(if crew.airlock_open() {
            "Airlock open"
        } else {
            "Airlock closed"
        });
    }

    pub fn draw_hud(&mut self, canvas: &mut dyn HudCanvas, style: &HudStyle, height: i32, elapsed: f64) {
        self.hud.draw(canvas, style, height, elapsed);
    }

    /// Runs one simulator timestep.
    pub fn update(&mut self, ctx: &mut HostContext, delta_time: f64) -> StepReport {
        let mut report = StepReport::default();

        ctx.sim.set_empty_mass(self.empty_mass());
        ctx.cargo.update_empty_mass();

        if let Some(transfer) = ctx.crew.process_transfers() {
            let vessel = ctx.sim.vessel_name();
            let message = match transfer {
                CrewTransfer::Transferred { name, role } => {
                    format!("{} \"{}\" transfered to {}", role, name, vessel)
                }
                CrewTransfer::Returned { name, role } => {
                    format!("{} \"{}\" ingressed {}", role, name, vessel)
                }
            };
            info!("{}", message);
            self.hud.post_crew(message);
        }

        match ctx.crew.detect_action_area() {
            Some(0) => self.revert(MechanismKind::BayA),
            Some(1) => self.revert(MechanismKind::BayB),
            Some(2) => self.toggle_airlock(ctx.crew),
            Some(other) => debug!("Action area {} has no binding", other),
            None => {}
        }

        for kind in MechanismKind::ALL {
            let step = self.mechanism_mut(kind).update(delta_time);
            if let Some(progress) = step.animation {
                ctx.sim.set_animation(kind, progress);
            }
            if kind == MechanismKind::Gear {
                ctx.sim.set_touchdown_points(self.touchdown_points());
            }
            report.cues.extend(step.cue);
        }

        if let Some(channel) = self.sound {
            for cue in &report.cues {
                debug!("Playing cue {:?}", cue);
                ctx.sim.play_cue(channel, *cue);
            }
        }

        let flight = ctx.sim.flight_state();
        for event in self.hazards.check_flight(&flight) {
            self.apply_hazard(ctx.crew, event);
            report.hazards.push(event);
        }

        if self.bay_a.is_retracted() {
            ctx.cargo.set_door_open(false);
        } else if self.bay_a.is_deployed() {
            ctx.cargo.set_door_open(true);
        }

        self.life_support.consume(ctx.crew.crew_count(), delta_time);
        if let Some(event) = self.hazards.check_life_support(&self.life_support) {
            self.apply_hazard(ctx.crew, event);
            report.hazards.push(event);
        }

        if let Some(message) = self.enrollment.poll(ctx.sim, ctx.crew) {
            self.hud.post_crew(message);
        }

        report
    }

    fn apply_hazard(&mut self, crew: &mut dyn CrewManager, event: HazardEvent) {
        zero_crew_vitals(crew, event.hazard);
        if event.onset {
            warn!("{}", event.hazard.message());
            self.hud.post_crew(event.hazard.message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::mechanism::MechanismState;
    use approx::assert_abs_diff_eq;

    fn create_vessel() -> Vessel {
        Vessel::new(VesselConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = VesselConfig::default();
        config.gear.operating_speed = -1.0;
        assert!(matches!(
            Vessel::new(config),
            Err(VesselError::ConfigError(_))
        ));
    }

    #[test]
    fn test_empty_mass_includes_oxygen() {
        let mut vessel = create_vessel();
        assert_eq!(vessel.empty_mass(), 15_770.0);
        vessel.life_support.set_oxygen_remaining(250.0);
        assert_eq!(vessel.empty_mass(), 15_020.0);
    }

    #[test]
    fn test_touchdown_points_follow_gear() {
        let mut vessel = create_vessel();
        let retracted = vessel.touchdown_points();
        assert_abs_diff_eq!(retracted[0].y, -4.89, epsilon = 1e-12);
        assert_eq!(retracted[1], Vector3D::new(-1.0, retracted[1].y, -1.0));

        vessel.gear.restore(MechanismState::Deployed);
        let deployed = vessel.touchdown_points();
        for point in deployed {
            assert_abs_diff_eq!(point.y, -3.9, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_oxygen_report() {
        let mut vessel = create_vessel();
        vessel.life_support.set_oxygen_remaining(412.6);
        assert_eq!(vessel.oxygen_report(), "Main Oxygen tank 413kg/1000kg. ");
    }

    #[test]
    fn test_deploy_posts_hud_message() {
        let mut vessel = create_vessel();
        assert_eq!(vessel.deploy(MechanismKind::Gear), CommandOutcome::Started);
        assert_eq!(vessel.hud.crew.text(), Some("Gear lowering"));

        assert_eq!(vessel.retract(MechanismKind::Gear), CommandOutcome::Ignored);
        assert_eq!(vessel.hud.crew.text(), Some("Gear up or in motion"));
    }
}
