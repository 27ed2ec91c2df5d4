use log::debug;

use super::{OXYGEN_LABEL, VALUE_PRECISION};
use crate::control::host::HostContext;
use crate::control::mechanism::{MechanismKind, MechanismState, MechanismStatus};
use crate::control::vessel::Vessel;
use crate::errors::VesselError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioRecord {
    Mechanism {
        kind: MechanismKind,
        status: MechanismStatus,
        progress: f64,
    },
    Oxygen(f64),
}

// Remainder of `line` after `label`, if the line starts with it (ignoring case)
// and the label is a whole token.
pub(crate) fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start();
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = &line[label.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

fn parse_value<T: std::str::FromStr>(token: Option<&str>, line: &str, what: &str) -> Result<T, VesselError> {
    token
        .ok_or_else(|| VesselError::ScenarioError(format!("missing {} in {:?}", what, line)))?
        .parse()
        .map_err(|_| VesselError::ScenarioError(format!("bad {} in {:?}", what, line)))
}

fn parse_fraction(token: Option<&str>, line: &str, what: &str) -> Result<f64, VesselError> {
    let value: f64 = parse_value(token, line, what)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VesselError::ScenarioError(format!(
            "non-finite {} in {:?}",
            what, line
        )))
    }
}

/// Recognises one of the vessel's own lines. `None` means the line belongs to
/// someone else; `Some(Err(_))` means it is ours but garbled.
pub fn parse_line(line: &str) -> Option<Result<ScenarioRecord, VesselError>> {
    let line = line.trim_start();

    for kind in MechanismKind::ALL {
        if let Some(rest) = strip_label(line, kind.scenario_label()) {
            let mut tokens = rest.split_whitespace();
            let record = parse_value::<i32>(tokens.next(), line, "status")
                .and_then(|code| {
                    MechanismStatus::from_code(code).ok_or_else(|| {
                        VesselError::ScenarioError(format!("unknown status {} in {:?}", code, line))
                    })
                })
                .and_then(|status| {
                    let progress = parse_fraction(tokens.next(), line, "progress")?;
                    Ok(ScenarioRecord::Mechanism {
                        kind,
                        status,
                        progress,
                    })
                });
            return Some(record);
        }
    }

    strip_label(line, OXYGEN_LABEL).map(|rest| {
        parse_fraction(rest.split_whitespace().next(), line, "oxygen").map(ScenarioRecord::Oxygen)
    })
}

pub fn format_record(record: &ScenarioRecord) -> String {
    match record {
        ScenarioRecord::Mechanism {
            kind,
            status,
            progress,
        } => format!(
            "{} {} {:.*}",
            kind.scenario_label(),
            status.code(),
            VALUE_PRECISION,
            progress
        ),
        ScenarioRecord::Oxygen(oxygen) => {
            format!("{} {:.*}", OXYGEN_LABEL, VALUE_PRECISION, oxygen)
        }
    }
}

impl Vessel {
    pub fn records(&self) -> Vec<ScenarioRecord> {
        let mut records: Vec<ScenarioRecord> = MechanismKind::ALL
            .into_iter()
            .map(|kind| {
                let mechanism = self.mechanism(kind);
                ScenarioRecord::Mechanism {
                    kind,
                    status: mechanism.status(),
                    progress: mechanism.progress(),
                }
            })
            .collect();
        records.push(ScenarioRecord::Oxygen(
            self.life_support.oxygen_remaining(),
        ));
        records
    }

    pub fn apply_record(&mut self, record: ScenarioRecord) {
        match record {
            ScenarioRecord::Mechanism {
                kind,
                status,
                progress,
            } => self
                .mechanism_mut(kind)
                .restore(MechanismState::from_parts(status, progress)),
            ScenarioRecord::Oxygen(oxygen) => self.life_support.set_oxygen_remaining(oxygen),
        }
    }

    /// Simulator base state first, then the vessel's lines, then crew and cargo.
    pub fn save_state(&self, ctx: &mut HostContext, out: &mut Vec<String>) {
        ctx.sim.save_base_state(out);
        out.extend(self.records().iter().map(format_record));
        ctx.crew.save_scenario(out);
        ctx.cargo.save_scenario(out);
    }

    pub fn load_state<I, S>(&mut self, ctx: &mut HostContext, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            match parse_line(line) {
                Some(Ok(record)) => self.apply_record(record),
                Some(Err(e)) => debug!("Ignoring scenario line: {}", e),
                None => {
                    if ctx.crew.load_scenario_line(line) || ctx.cargo.load_scenario_line(line) {
                        continue;
                    }
                    ctx.sim.parse_scenario_line(line);
                }
            }
        }

        for kind in MechanismKind::ALL {
            let progress = self.mechanism(kind).progress();
            ctx.sim.set_animation(kind, progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> ScenarioRecord {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_mechanism_line() {
        assert_eq!(
            parsed("GEAR 2 0.4231"),
            ScenarioRecord::Mechanism {
                kind: MechanismKind::Gear,
                status: MechanismStatus::Retracting,
                progress: 0.4231,
            }
        );
    }

    #[test]
    fn test_labels_ignore_case_and_leading_space() {
        assert_eq!(
            parsed("  plbayb 3 0.5"),
            ScenarioRecord::Mechanism {
                kind: MechanismKind::BayB,
                status: MechanismStatus::Deploying,
                progress: 0.5,
            }
        );
        assert_eq!(parsed("o2tank 512.25"), ScenarioRecord::Oxygen(512.25));
    }

    #[test]
    fn test_foreign_lines_are_not_recognised() {
        assert!(parse_line("STATUS Landed Earth").is_none());
        assert!(parse_line("GEARBOX 1 1.0").is_none());
        assert!(parse_line("UMMUCREW Peter;30;70;70;Capt").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_garbled_lines_are_errors() {
        for line in ["GEAR", "GEAR x 0.5", "PLBAYA 7 0.5", "PLBAYA 1", "O2Tank abc", "O2Tank NaN"] {
            assert!(
                matches!(parse_line(line), Some(Err(VesselError::ScenarioError(_)))),
                "{:?} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_format_uses_four_decimals() {
        let record = ScenarioRecord::Mechanism {
            kind: MechanismKind::BayA,
            status: MechanismStatus::Deployed,
            progress: 1.0,
        };
        assert_eq!(format_record(&record), "PLBAYA 1 1.0000");
        assert_eq!(format_record(&ScenarioRecord::Oxygen(999.99996)), "O2Tank 1000.0000");
    }

    #[test]
    fn test_retracting_progress_survives_a_save() {
        let record = ScenarioRecord::Mechanism {
            kind: MechanismKind::Gear,
            status: MechanismStatus::Retracting,
            progress: 0.4231,
        };
        assert_eq!(parsed(&format_record(&record)), record);
    }
}
