use log::info;

use crate::control::hazards::Hazard;
use crate::control::mechanism::{MechanismKind, MechanismStatus};
use crate::control::vessel::{StepReport, Vessel};

pub struct Telemetry {
    pub log: Vec<String>,
    min_oxygen: f64,
    cues_played: usize,
    state_times: Vec<(MechanismKind, MechanismStatus, f64)>,
    hazard_times: Vec<(Hazard, f64)>,
    last_statuses: Option<[MechanismStatus; 3]>,
    simulation_time: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            min_oxygen: f64::MAX,
            cues_played: 0,
            state_times: Vec::new(),
            hazard_times: Vec::new(),
            last_statuses: None,
            simulation_time: 0.0,
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn collect_data(&mut self, vessel: &Vessel, report: &StepReport, delta_time: f64) {
        self.simulation_time += delta_time;

        let oxygen = vessel.life_support.oxygen_remaining();
        if oxygen < self.min_oxygen {
            self.min_oxygen = oxygen;
        }
        self.cues_played += report.cues.len();

        // Track state transitions
        let statuses = vessel.statuses();
        for (index, kind) in MechanismKind::ALL.into_iter().enumerate() {
            let changed = self
                .last_statuses
                .map_or(true, |last| last[index] != statuses[index]);
            if changed {
                self.state_times
                    .push((kind, statuses[index], self.simulation_time));
            }
        }
        self.last_statuses = Some(statuses);

        for event in report.hazards.iter().filter(|event| event.onset) {
            self.hazard_times.push((event.hazard, self.simulation_time));
        }

        if !report.cues.is_empty() || report.hazards.iter().any(|event| event.onset) {
            self.log.push(format!(
                "Time: {} | Gear {:.4} | Bay A {:.4} | Bay B {:.4} | O2 {:.4} kg",
                Self::format_time(self.simulation_time),
                vessel.gear.progress(),
                vessel.bay_a.progress(),
                vessel.bay_b.progress(),
                oxygen
            ));
        }
    }

    pub fn state_times(&self) -> &[(MechanismKind, MechanismStatus, f64)] {
        &self.state_times
    }

    pub fn hazard_times(&self) -> &[(Hazard, f64)] {
        &self.hazard_times
    }

    pub fn min_oxygen(&self) -> f64 {
        self.min_oxygen
    }

    pub fn display_data(&self) {
        info!("--- Telemetry Data ---");
        for entry in &self.log {
            info!("{}", entry);
        }
        info!("--- End of Telemetry ---");

        info!("--- Flight Summary ---");
        info!("Flight Time: {}", Self::format_time(self.simulation_time));
        info!("Min Oxygen: {:.2} kg", self.min_oxygen);
        info!("Cues Played: {}", self.cues_played);

        info!("--- State Transitions ---");
        for (kind, status, time) in &self.state_times {
            info!(
                "{} {:?} reached at: {}",
                kind.display_name(),
                status,
                Self::format_time(*time)
            );
        }

        for (hazard, time) in &self.hazard_times {
            info!("{} at: {}", hazard.message(), Self::format_time(*time));
        }
    }
}
