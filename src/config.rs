use crate::constants::*;
use crate::control::mechanism::MechanismKind;
use crate::control::sound::SoundCue;
use crate::errors::VesselError;

/// Tuning for one animated mechanism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechanismSpec {
    /// Fraction of full travel covered per second.
    pub operating_speed: f64,
    /// How close to its starting bound a mechanism must be for the motion cue to sound.
    pub cue_window: f64,
    pub deploy_cue: SoundCue,
    pub retract_cue: SoundCue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VesselConfig {
    pub gear: MechanismSpec,
    pub bay_a: MechanismSpec,
    pub bay_b: MechanismSpec,
    pub empty_mass: f64,
    pub o2_capacity: f64,
    pub o2_consumption_per_crew: f64,
    pub crash_vertical_speed: f64,
    pub reentry_dynamic_pressure: f64,
    pub hud_message_duration: f64,
}

impl Default for VesselConfig {
    fn default() -> Self {
        VesselConfig {
            gear: MechanismSpec {
                operating_speed: GEAR_OPERATING_SPEED,
                cue_window: GEAR_CUE_WINDOW,
                deploy_cue: SoundCue::GearDown,
                retract_cue: SoundCue::GearUp,
            },
            bay_a: MechanismSpec {
                operating_speed: PLBAYA_OPERATING_SPEED,
                cue_window: PLBAYA_CUE_WINDOW,
                deploy_cue: SoundCue::BayAOpen,
                retract_cue: SoundCue::BayAClose,
            },
            bay_b: MechanismSpec {
                operating_speed: PLBAYB_OPERATING_SPEED,
                cue_window: PLBAYB_CUE_WINDOW,
                deploy_cue: SoundCue::BayBOpen,
                retract_cue: SoundCue::BayBClose,
            },
            empty_mass: EMPTY_MASS,
            o2_capacity: O2_TANK_CAPACITY,
            o2_consumption_per_crew: O2_CONSUMPTION_PER_CREW,
            crash_vertical_speed: CRASH_VERTICAL_SPEED,
            reentry_dynamic_pressure: REENTRY_DYNAMIC_PRESSURE,
            hud_message_duration: HUD_MESSAGE_DURATION,
        }
    }
}

impl VesselConfig {
    pub fn mechanism(&self, kind: MechanismKind) -> &MechanismSpec {
        match kind {
            MechanismKind::Gear => &self.gear,
            MechanismKind::BayA => &self.bay_a,
            MechanismKind::BayB => &self.bay_b,
        }
    }

    pub fn validate(&self) -> Result<(), VesselError> {
        for kind in MechanismKind::ALL {
            let spec = self.mechanism(kind);
            if !(spec.operating_speed.is_finite() && spec.operating_speed > 0.0) {
                return Err(VesselError::ConfigError(format!(
                    "{} operating speed must be positive, got {}",
                    kind.display_name(),
                    spec.operating_speed
                )));
            }
            if !(spec.cue_window > 0.0 && spec.cue_window <= 0.5) {
                return Err(VesselError::ConfigError(format!(
                    "{} cue window must be in (0, 0.5], got {}",
                    kind.display_name(),
                    spec.cue_window
                )));
            }
        }

        if !(self.o2_capacity.is_finite() && self.o2_capacity > 0.0) {
            return Err(VesselError::ConfigError(format!(
                "Oxygen capacity must be positive, got {}",
                self.o2_capacity
            )));
        }
        if !(self.o2_consumption_per_crew.is_finite() && self.o2_consumption_per_crew >= 0.0) {
            return Err(VesselError::ConfigError(format!(
                "Oxygen consumption must be non-negative, got {}",
                self.o2_consumption_per_crew
            )));
        }
        if !(self.empty_mass.is_finite() && self.empty_mass > 0.0) {
            return Err(VesselError::ConfigError(format!(
                "Empty mass must be positive, got {}",
                self.empty_mass
            )));
        }
        if !self.crash_vertical_speed.is_finite() || !self.reentry_dynamic_pressure.is_finite() {
            return Err(VesselError::ConfigError(
                "Hazard thresholds must be finite".to_string(),
            ));
        }
        if self.hud_message_duration < 0.0 {
            return Err(VesselError::ConfigError(format!(
                "HUD message duration cannot be negative, got {}",
                self.hud_message_duration
            )));
        }

        Ok(())
    }
}
