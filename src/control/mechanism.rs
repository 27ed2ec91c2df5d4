use log::info;

use super::sound::SoundCue;
use crate::config::MechanismSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanismKind {
    Gear,
    BayA,
    BayB,
}

impl MechanismKind {
    pub const ALL: [MechanismKind; 3] = [MechanismKind::Gear, MechanismKind::BayA, MechanismKind::BayB];

    pub fn scenario_label(self) -> &'static str {
        match self {
            MechanismKind::Gear => "GEAR",
            MechanismKind::BayA => "PLBAYA",
            MechanismKind::BayB => "PLBAYB",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MechanismKind::Gear => "Gear",
            MechanismKind::BayA => "Main payload bay",
            MechanismKind::BayB => "Aux payload bay",
        }
    }

    pub fn index(self) -> usize {
        match self {
            MechanismKind::Gear => 0,
            MechanismKind::BayA => 1,
            MechanismKind::BayB => 2,
        }
    }

    pub fn deploy_message(self, outcome: CommandOutcome) -> &'static str {
        match (self, outcome) {
            (MechanismKind::Gear, CommandOutcome::Started) => "Gear lowering",
            (MechanismKind::Gear, CommandOutcome::Ignored) => "Gear down or in motion",
            (MechanismKind::BayA, CommandOutcome::Started) => "Main payload bay opening",
            (MechanismKind::BayA, CommandOutcome::Ignored) => "Main bay open or in motion",
            (MechanismKind::BayB, CommandOutcome::Started) => "Aux payload bay opening",
            (MechanismKind::BayB, CommandOutcome::Ignored) => "Aux bay open or in motion",
        }
    }

    pub fn retract_message(self, outcome: CommandOutcome) -> &'static str {
        match (self, outcome) {
            (MechanismKind::Gear, CommandOutcome::Started) => "Gear raising",
            (MechanismKind::Gear, CommandOutcome::Ignored) => "Gear up or in motion",
            (MechanismKind::BayA, CommandOutcome::Started) => "Main payload bay closing",
            (MechanismKind::BayA, CommandOutcome::Ignored) => "Main bay closed or in motion",
            (MechanismKind::BayB, CommandOutcome::Started) => "Aux payload bay closing",
            (MechanismKind::BayB, CommandOutcome::Ignored) => "Aux bay closed or in motion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanismStatus {
    Retracted,
    Deployed,
    Retracting,
    Deploying,
}

impl MechanismStatus {
    pub fn code(self) -> i32 {
        match self {
            MechanismStatus::Retracted => 0,
            MechanismStatus::Deployed => 1,
            MechanismStatus::Retracting => 2,
            MechanismStatus::Deploying => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MechanismStatus::Retracted),
            1 => Some(MechanismStatus::Deployed),
            2 => Some(MechanismStatus::Retracting),
            3 => Some(MechanismStatus::Deploying),
            _ => None,
        }
    }

    pub fn is_transitioning(self) -> bool {
        matches!(
            self,
            MechanismStatus::Retracting | MechanismStatus::Deploying
        )
    }
}

/// Terminal states carry no progress: it is implied by the bound they sit at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MechanismState {
    Retracted,
    Deployed,
    Retracting { progress: f64 },
    Deploying { progress: f64 },
}

impl MechanismState {
    pub fn from_parts(status: MechanismStatus, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        match status {
            MechanismStatus::Retracted => MechanismState::Retracted,
            MechanismStatus::Deployed => MechanismState::Deployed,
            MechanismStatus::Retracting => MechanismState::Retracting { progress },
            MechanismStatus::Deploying => MechanismState::Deploying { progress },
        }
    }

    pub fn progress(&self) -> f64 {
        match *self {
            MechanismState::Retracted => 0.0,
            MechanismState::Deployed => 1.0,
            MechanismState::Retracting { progress } | MechanismState::Deploying { progress } => {
                progress
            }
        }
    }

    pub fn status(&self) -> MechanismStatus {
        match self {
            MechanismState::Retracted => MechanismStatus::Retracted,
            MechanismState::Deployed => MechanismStatus::Deployed,
            MechanismState::Retracting { .. } => MechanismStatus::Retracting,
            MechanismState::Deploying { .. } => MechanismStatus::Deploying,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.status().is_transitioning()
    }

    /// Retracted or heading there goes toward deployed; anything else goes toward
    /// retracted. Progress is kept so a reversal mid-travel is smooth.
    pub fn reverted(self) -> Self {
        let progress = self.progress();
        match self {
            MechanismState::Retracted | MechanismState::Retracting { .. } => {
                MechanismState::Deploying { progress }
            }
            MechanismState::Deployed | MechanismState::Deploying { .. } => {
                MechanismState::Retracting { progress }
            }
        }
    }

    /// Moves a transitioning state by `step` of full travel, snapping to the
    /// terminal state once a bound is reached.
    pub fn advanced(self, step: f64) -> Self {
        let step = step.max(0.0);
        match self {
            MechanismState::Retracting { progress } => {
                let progress = (progress - step).max(0.0);
                if progress <= 0.0 {
                    MechanismState::Retracted
                } else {
                    MechanismState::Retracting { progress }
                }
            }
            MechanismState::Deploying { progress } => {
                let progress = (progress + step).min(1.0);
                if progress >= 1.0 {
                    MechanismState::Deployed
                } else {
                    MechanismState::Deploying { progress }
                }
            }
            terminal => terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechanismStep {
    pub animation: Option<f64>,
    pub cue: Option<SoundCue>,
}

pub struct Mechanism {
    kind: MechanismKind,
    spec: MechanismSpec,
    state: MechanismState,
    // Status seen at the end of the previous timestep; motion cues fire on changes to it.
    observed: MechanismStatus,
}

impl Mechanism {
    pub fn new(kind: MechanismKind, spec: MechanismSpec) -> Self {
        Mechanism {
            kind,
            spec,
            state: MechanismState::Retracted,
            observed: MechanismStatus::Retracted,
        }
    }

    pub fn kind(&self) -> MechanismKind {
        self.kind
    }

    pub fn state(&self) -> MechanismState {
        self.state
    }

    pub fn status(&self) -> MechanismStatus {
        self.state.status()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    pub fn is_retracted(&self) -> bool {
        self.state == MechanismState::Retracted
    }

    pub fn is_deployed(&self) -> bool {
        self.state == MechanismState::Deployed
    }

    pub fn revert(&mut self) {
        self.state = self.state.reverted();
    }

    pub fn deploy(&mut self) -> CommandOutcome {
        match self.state {
            MechanismState::Retracted => {
                self.revert();
                CommandOutcome::Started
            }
            MechanismState::Retracting { progress } if progress == 0.0 => {
                self.revert();
                CommandOutcome::Started
            }
            _ => CommandOutcome::Ignored,
        }
    }

    pub fn retract(&mut self) -> CommandOutcome {
        match self.state {
            MechanismState::Deployed => {
                self.revert();
                CommandOutcome::Started
            }
            MechanismState::Deploying { progress } if progress == 1.0 => {
                self.revert();
                CommandOutcome::Started
            }
            _ => CommandOutcome::Ignored,
        }
    }

    pub fn restore(&mut self, state: MechanismState) {
        self.state = state;
        self.observed = state.status();
    }

    pub fn update(&mut self, delta_time: f64) -> MechanismStep {
        let before = self.state;
        let cue = self.motion_cue(before);
        let moving = before.is_transitioning();

        self.state = before.advanced(self.spec.operating_speed * delta_time);

        if moving && !self.state.is_transitioning() {
            info!(
                "{} {}",
                self.kind.display_name(),
                match self.state {
                    MechanismState::Deployed => "fully deployed",
                    _ => "fully retracted",
                }
            );
        }
        self.observed = self.state.status();

        MechanismStep {
            animation: moving.then(|| self.state.progress()),
            cue,
        }
    }

    // A cue sounds once per transition: on the first step after the status changed,
    // and only if the motion starts near its originating bound.
    fn motion_cue(&self, before: MechanismState) -> Option<SoundCue> {
        if before.status() == self.observed {
            return None;
        }
        match before {
            MechanismState::Deploying { progress } if progress < self.spec.cue_window => {
                Some(self.spec.deploy_cue)
            }
            MechanismState::Retracting { progress } if progress > 1.0 - self.spec.cue_window => {
                Some(self.spec.retract_cue)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VesselConfig;
    use approx::assert_abs_diff_eq;

    fn create_mechanism(kind: MechanismKind) -> Mechanism {
        let config = VesselConfig::default();
        Mechanism::new(kind, *config.mechanism(kind))
    }

    #[test]
    fn test_starts_retracted() {
        let gear = create_mechanism(MechanismKind::Gear);
        assert_eq!(gear.status(), MechanismStatus::Retracted);
        assert_eq!(gear.progress(), 0.0);
    }

    #[test]
    fn test_revert_from_bounds() {
        let mut gear = create_mechanism(MechanismKind::Gear);
        gear.revert();
        assert_eq!(gear.state(), MechanismState::Deploying { progress: 0.0 });

        gear.restore(MechanismState::Deployed);
        gear.revert();
        assert_eq!(gear.state(), MechanismState::Retracting { progress: 1.0 });
    }

    #[test]
    fn test_revert_mid_transition_keeps_progress() {
        let mut bay = create_mechanism(MechanismKind::BayA);
        bay.restore(MechanismState::Deploying { progress: 0.37 });
        bay.revert();
        assert_eq!(bay.state(), MechanismState::Retracting { progress: 0.37 });
        bay.revert();
        assert_eq!(bay.state(), MechanismState::Deploying { progress: 0.37 });
    }

    #[test]
    fn test_gear_deploys_at_operating_speed() {
        let mut gear = create_mechanism(MechanismKind::Gear);
        gear.revert();

        let step = gear.update(2.0);
        assert_abs_diff_eq!(gear.progress(), 0.2, epsilon = 1e-12);
        assert_eq!(step.animation, Some(gear.progress()));

        for _ in 0..10 {
            gear.update(1.0);
        }
        assert_eq!(gear.state(), MechanismState::Deployed);
        assert_eq!(gear.progress(), 1.0);
    }

    #[test]
    fn test_progress_never_overshoots() {
        for kind in MechanismKind::ALL {
            let mut mechanism = create_mechanism(kind);
            mechanism.revert();
            for i in 0..500 {
                mechanism.update(0.37);
                let progress = mechanism.progress();
                assert!((0.0..=1.0).contains(&progress));
                if i % 7 == 0 {
                    mechanism.revert();
                }
            }
        }
    }

    #[test]
    fn test_terminal_state_is_not_animated() {
        let mut bay = create_mechanism(MechanismKind::BayB);
        let step = bay.update(1.0);
        assert_eq!(step.animation, None);
        assert_eq!(step.cue, None);
        assert_eq!(bay.state(), MechanismState::Retracted);
    }

    #[test]
    fn test_final_step_still_pushes_animation() {
        let mut bay = create_mechanism(MechanismKind::BayB);
        bay.restore(MechanismState::Deploying { progress: 0.95 });
        let step = bay.update(1.0);
        assert_eq!(bay.state(), MechanismState::Deployed);
        assert_eq!(step.animation, Some(1.0));
    }

    #[test]
    fn test_deploy_requires_rest_at_zero() {
        let mut bay = create_mechanism(MechanismKind::BayA);
        assert_eq!(bay.deploy(), CommandOutcome::Started);
        assert_eq!(bay.status(), MechanismStatus::Deploying);

        // A second press before any motion must not undo the first.
        assert_eq!(bay.deploy(), CommandOutcome::Ignored);
        assert_eq!(bay.status(), MechanismStatus::Deploying);
    }

    #[test]
    fn test_deploy_mid_transition_is_ignored() {
        let mut bay = create_mechanism(MechanismKind::BayA);
        bay.restore(MechanismState::Retracting { progress: 0.3 });
        assert_eq!(bay.deploy(), CommandOutcome::Ignored);
        assert_eq!(bay.state(), MechanismState::Retracting { progress: 0.3 });
        assert_eq!(
            MechanismKind::BayA.deploy_message(CommandOutcome::Ignored),
            "Main bay open or in motion"
        );
    }

    #[test]
    fn test_retract_requires_rest_at_one() {
        let mut gear = create_mechanism(MechanismKind::Gear);
        assert_eq!(gear.retract(), CommandOutcome::Ignored);
        assert_eq!(gear.state(), MechanismState::Retracted);

        gear.restore(MechanismState::Deployed);
        assert_eq!(gear.retract(), CommandOutcome::Started);
        assert_eq!(gear.state(), MechanismState::Retracting { progress: 1.0 });
    }

    #[test]
    fn test_deploy_cue_fires_once_per_transition() {
        let mut gear = create_mechanism(MechanismKind::Gear);
        gear.revert();

        let mut cues = Vec::new();
        for _ in 0..200 {
            // 0.001 of travel per step keeps the gear inside the cue window for several steps
            if let Some(cue) = gear.update(0.01).cue {
                cues.push(cue);
            }
        }
        assert_eq!(cues, vec![SoundCue::GearDown]);
    }

    #[test]
    fn test_retract_cue_uses_wider_window_for_aux_bay() {
        let mut bay = create_mechanism(MechanismKind::BayB);
        bay.restore(MechanismState::Deploying { progress: 0.95 });
        bay.update(0.0);
        bay.revert();

        // 0.95 is outside the 0.01 window used by the main bay but inside 0.1
        assert_eq!(bay.update(0.1).cue, Some(SoundCue::BayBClose));
        assert_eq!(bay.update(0.1).cue, None);
    }

    #[test]
    fn test_reversal_mid_travel_is_silent() {
        let mut bay = create_mechanism(MechanismKind::BayA);
        bay.restore(MechanismState::Deploying { progress: 0.5 });
        bay.revert();
        assert_eq!(bay.update(0.1).cue, None);
    }

    #[test]
    fn test_status_codes_round_trip() {
        for code in 0..4 {
            let status = MechanismStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(MechanismStatus::from_code(4), None);
        assert_eq!(MechanismStatus::from_code(-1), None);
    }

    #[test]
    fn test_from_parts_snaps_terminal_progress() {
        assert_eq!(
            MechanismState::from_parts(MechanismStatus::Deployed, 0.6),
            MechanismState::Deployed
        );
        assert_eq!(
            MechanismState::from_parts(MechanismStatus::Deploying, 1.7),
            MechanismState::Deploying { progress: 1.0 }
        );
    }
}
