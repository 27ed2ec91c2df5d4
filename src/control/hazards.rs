//! Crew-fatal conditions checked every timestep.

use log::debug;

use super::host::{CrewManager, FlightState};
use super::life_support::LifeSupport;
use crate::config::VesselConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hazard {
    /// Ground contact with a sink rate beyond the gear's tolerance.
    Impact,
    /// Dynamic pressure beyond what the unshielded hull survives.
    ReentryHeating,
    /// Main oxygen tank empty.
    Asphyxiation,
}

impl Hazard {
    pub const ALL: [Hazard; 3] = [Hazard::Impact, Hazard::ReentryHeating, Hazard::Asphyxiation];

    pub fn message(self) -> &'static str {
        match self {
            Hazard::Impact => "Crashed into terrain",
            Hazard::ReentryHeating => "Hull Breach due to Atmospheric Reentry",
            Hazard::Asphyxiation => "O2 Main Tank empty-All crew dead",
        }
    }

    fn index(self) -> usize {
        match self {
            Hazard::Impact => 0,
            Hazard::ReentryHeating => 1,
            Hazard::Asphyxiation => 2,
        }
    }
}

/// A hazard that holds this timestep. `onset` is set on the first timestep of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardEvent {
    pub hazard: Hazard,
    pub onset: bool,
}

pub struct HazardMonitor {
    crash_vertical_speed: f64,
    reentry_dynamic_pressure: f64,
    active: [bool; 3],
}

impl HazardMonitor {
    pub fn new(config: &VesselConfig) -> Self {
        HazardMonitor {
            crash_vertical_speed: config.crash_vertical_speed,
            reentry_dynamic_pressure: config.reentry_dynamic_pressure,
            active: [false; 3],
        }
    }

    pub fn check_flight(&mut self, flight: &FlightState) -> Vec<HazardEvent> {
        let impact = flight.ground_contact && flight.vertical_speed() < self.crash_vertical_speed;
        let heating = flight.dynamic_pressure > self.reentry_dynamic_pressure;

        [
            self.observe(Hazard::Impact, impact),
            self.observe(Hazard::ReentryHeating, heating),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn check_life_support(&mut self, life_support: &LifeSupport) -> Option<HazardEvent> {
        self.observe(Hazard::Asphyxiation, life_support.is_depleted())
    }

    pub fn is_active(&self, hazard: Hazard) -> bool {
        self.active[hazard.index()]
    }

    pub fn active(&self) -> Vec<Hazard> {
        Hazard::ALL
            .into_iter()
            .filter(|hazard| self.is_active(*hazard))
            .collect()
    }

    fn observe(&mut self, hazard: Hazard, holds: bool) -> Option<HazardEvent> {
        let was_active = std::mem::replace(&mut self.active[hazard.index()], holds);
        holds.then(|| HazardEvent {
            hazard,
            onset: !was_active,
        })
    }
}

/// Stops every heart aboard. Safe to repeat.
pub fn zero_crew_vitals(crew: &mut dyn CrewManager, hazard: Hazard) {
    let count = crew.crew_count();
    if count > 0 {
        debug!("{}: zeroing vitals of {} crew", hazard.message(), count);
    }
    for slot in 0..count {
        crew.set_pulse(slot, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vector3d::Vector3D;

    fn flight(ground_contact: bool, vertical_speed: f64, dynamic_pressure: f64) -> FlightState {
        FlightState {
            ground_contact,
            horizon_airspeed: Vector3D::new(0.0, vertical_speed, 0.0),
            dynamic_pressure,
        }
    }

    fn hazards(events: &[HazardEvent]) -> Vec<Hazard> {
        events.iter().map(|event| event.hazard).collect()
    }

    #[test]
    fn test_impact_requires_ground_contact() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        assert!(monitor.check_flight(&flight(false, -50.0, 0.0)).is_empty());
        assert_eq!(
            hazards(&monitor.check_flight(&flight(true, -3.5, 0.0))),
            vec![Hazard::Impact]
        );
    }

    #[test]
    fn test_impact_threshold_is_strict() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        assert!(monitor.check_flight(&flight(true, -3.0, 0.0)).is_empty());
        assert!(!monitor.check_flight(&flight(true, -3.0001, 0.0)).is_empty());
    }

    #[test]
    fn test_reentry_threshold_is_strict() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        assert!(monitor.check_flight(&flight(false, 0.0, 44_000.0)).is_empty());
        assert_eq!(
            hazards(&monitor.check_flight(&flight(false, 0.0, 44_000.1))),
            vec![Hazard::ReentryHeating]
        );
    }

    #[test]
    fn test_hazards_fire_together() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        let events = monitor.check_flight(&flight(true, -10.0, 50_000.0));
        assert_eq!(hazards(&events), vec![Hazard::Impact, Hazard::ReentryHeating]);
        assert!(events.iter().all(|event| event.onset));
    }

    #[test]
    fn test_onset_only_on_first_step() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        let first = monitor.check_flight(&flight(false, 0.0, 45_000.0));
        let second = monitor.check_flight(&flight(false, 0.0, 45_000.0));
        assert!(first[0].onset);
        assert!(!second[0].onset);
        assert!(monitor.is_active(Hazard::ReentryHeating));

        monitor.check_flight(&flight(false, 0.0, 0.0));
        assert!(!monitor.is_active(Hazard::ReentryHeating));
    }

    #[test]
    fn test_asphyxiation_on_empty_tank() {
        let mut monitor = HazardMonitor::new(&VesselConfig::default());
        let mut life_support = LifeSupport::new(1.0, 1.0);
        assert_eq!(monitor.check_life_support(&life_support), None);

        life_support.consume(1, 5.0);
        let event = monitor.check_life_support(&life_support).unwrap();
        assert_eq!(event.hazard, Hazard::Asphyxiation);
        assert!(event.onset);

        let again = monitor.check_life_support(&life_support).unwrap();
        assert!(!again.onset);
        assert_eq!(monitor.active(), vec![Hazard::Asphyxiation]);
    }
}
