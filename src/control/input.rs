use log::info;

use super::host::HostContext;
use super::mechanism::MechanismKind;
use super::vessel::Vessel;
use crate::constants::CARGO_SLOT_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    G,
    O,
    K,
    A,
    E,
    M,
    C,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit7,
    Digit8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
    };

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            control: false,
        }
    }

    fn is_plain(self) -> bool {
        !self.shift && !self.control
    }
}

/// Clickable switches in the virtual cockpit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcSwitch {
    GearDown,
    GearUp,
    BayAOpen,
    BayAClose,
    BayBOpen,
    BayBClose,
}

impl Vessel {
    /// Handles a buffered key event. Returns true if the vessel consumed it.
    pub fn consume_key(&mut self, ctx: &mut HostContext, key: Key, down: bool, modifiers: Modifiers) -> bool {
        if !down {
            return false;
        }

        match key {
            // Mechanism toggles ignore modifiers
            Key::G => self.revert(MechanismKind::Gear),
            Key::O => self.revert(MechanismKind::BayA),
            Key::K => self.revert(MechanismKind::BayB),
            Key::Digit0 => {
                let message = format!(
                    "{} crew aboard {}",
                    ctx.crew.crew_count(),
                    ctx.sim.vessel_name()
                );
                self.hud.post_crew(message);
            }
            _ if !modifiers.is_plain() => return self.consume_modified_key(ctx, key, modifiers),
            Key::A => self.toggle_airlock(ctx.crew),
            Key::E => self.eva_selected(ctx),
            Key::Digit1 => self.select_crew(ctx, true),
            Key::Digit2 => self.select_crew(ctx, false),
            Key::M => {
                info!("Crew enrollment started");
                self.enrollment.start();
            }
            Key::Digit3 => {
                self.selected_cargo = match self.selected_cargo {
                    Some(slot) if slot > 0 => Some(slot - 1),
                    other => other,
                };
                self.post_cargo_selection();
            }
            Key::Digit4 => {
                self.selected_cargo = match self.selected_cargo {
                    None => Some(0),
                    Some(slot) => Some((slot + 1).min(CARGO_SLOT_COUNT - 1)),
                };
                self.post_cargo_selection();
            }
            Key::Digit7 => {
                let report = self.oxygen_report();
                self.hud.post_cargo(report);
            }
            Key::Digit8 => {
                let message = format!(
                    "Current payload mass {:.0}kg in {} slots",
                    ctx.cargo.total_mass(),
                    ctx.cargo.loaded_count()
                );
                self.hud.post_cargo(message);
            }
            Key::C => {
                let outcome = ctx.cargo.grapple(self.selected_cargo);
                self.hud.post_cargo(outcome.message());
            }
        }
        true
    }

    fn consume_modified_key(&mut self, ctx: &mut HostContext, key: Key, modifiers: Modifiers) -> bool {
        match key {
            Key::C if modifiers.shift && !modifiers.control => {
                let released = ctx.cargo.release(self.selected_cargo);
                self.hud
                    .post_cargo(if released { "Cargo released" } else { "Slot empty" });
                true
            }
            _ => false,
        }
    }

    pub fn vc_switch(&mut self, switch: VcSwitch) {
        match switch {
            VcSwitch::GearDown => {
                self.deploy(MechanismKind::Gear);
            }
            VcSwitch::GearUp => {
                self.retract(MechanismKind::Gear);
            }
            VcSwitch::BayAOpen => {
                self.deploy(MechanismKind::BayA);
            }
            VcSwitch::BayAClose => {
                self.retract(MechanismKind::BayA);
            }
            VcSwitch::BayBOpen => {
                self.deploy(MechanismKind::BayB);
            }
            VcSwitch::BayBClose => {
                self.retract(MechanismKind::BayB);
            }
        }
    }

    fn eva_selected(&mut self, ctx: &mut HostContext) {
        let outcome = ctx.crew.eva(self.selected_crew);
        if outcome.left_vessel() {
            info!("{}", outcome.message());
            self.selected_crew = 0;
        }
        self.hud.post_crew(outcome.message());
    }

    fn select_crew(&mut self, ctx: &mut HostContext, next: bool) {
        let count = ctx.crew.crew_count();
        if count == 0 {
            self.hud.post_crew("No crew aboard");
            return;
        }

        let last = count - 1;
        self.selected_crew = if next {
            (self.selected_crew + 1).min(last)
        } else {
            self.selected_crew.saturating_sub(1).min(last)
        };

        let slot = self.selected_crew;
        let role = ctx.crew.member_role(slot).unwrap_or_default();
        let name = ctx.crew.member_name(slot).unwrap_or_default();
        self.hud.post_crew(format!(
            "Slot {} {} \"{}\" selected for EVA or transfer",
            slot, role, name
        ));
    }

    fn post_cargo_selection(&mut self) {
        let message = match self.selected_cargo {
            Some(slot) => format!("Cargo Slot {} selected", slot),
            None => "First free cargo slot selected".to_string(),
        };
        self.hud.post_cargo(message);
    }
}
