use log::info;

use super::host::{CrewManager, SimulatorHost};
use crate::constants::{DEFAULT_CREW_PULSE, DEFAULT_CREW_WEIGHT, MAX_CREW_AGE, MIN_CREW_AGE};

const MIN_ANSWER_LEN: usize = 2;
const MAX_ANSWER_LEN: usize = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentField {
    Name,
    Age,
    Role,
}

impl EnrollmentField {
    pub fn prompt(self) -> &'static str {
        match self {
            EnrollmentField::Name => "Enter new crew member name (or hit escape to cancel)",
            EnrollmentField::Age => "Enter age",
            EnrollmentField::Role => "Enter Crew ID - Capt,Sec,Vip,Sci,Doc,Tech,Crew,Pax)",
        }
    }

    fn next(self) -> Option<EnrollmentField> {
        match self {
            EnrollmentField::Name => Some(EnrollmentField::Age),
            EnrollmentField::Age => Some(EnrollmentField::Role),
            EnrollmentField::Role => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStep {
    Idle,
    /// The prompt for this field opens on the next poll.
    Prompt(EnrollmentField),
    /// The prompt is open and waiting for an answer.
    Waiting(EnrollmentField),
    /// All answers collected; the member is added on the next poll.
    Ready,
}

/// Wizard adding a crew member directly aboard, one prompt per timestep.
#[derive(Debug, Clone)]
pub struct CrewEnrollment {
    step: EnrollmentStep,
    name: String,
    age: String,
    role: String,
}

impl Default for CrewEnrollment {
    fn default() -> Self {
        CrewEnrollment {
            step: EnrollmentStep::Idle,
            name: String::new(),
            age: String::new(),
            role: String::new(),
        }
    }
}

impl CrewEnrollment {
    pub fn step(&self) -> EnrollmentStep {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.step != EnrollmentStep::Idle
    }

    /// Restarts the wizard from the name prompt, dropping earlier answers.
    pub fn start(&mut self) {
        *self = CrewEnrollment {
            step: EnrollmentStep::Prompt(EnrollmentField::Name),
            ..Default::default()
        };
    }

    pub fn cancel(&mut self) {
        *self = CrewEnrollment::default();
    }

    /// Feeds the answer to the open prompt. Returns false if no prompt is open
    /// or the answer length is out of range, in which case the prompt stays open.
    pub fn submit(&mut self, answer: &str) -> bool {
        let field = match self.step {
            EnrollmentStep::Waiting(field) => field,
            _ => return false,
        };
        let length = answer.chars().count();
        if !(MIN_ANSWER_LEN..=MAX_ANSWER_LEN).contains(&length) {
            return false;
        }

        match field {
            EnrollmentField::Name => self.name = answer.to_string(),
            EnrollmentField::Age => self.age = answer.to_string(),
            EnrollmentField::Role => self.role = answer.to_string(),
        }
        self.step = match field.next() {
            Some(next) => EnrollmentStep::Prompt(next),
            None => EnrollmentStep::Ready,
        };
        true
    }

    /// Advances the wizard by one step. Returns the HUD text once the member
    /// has been added or refused.
    pub fn poll(
        &mut self,
        sim: &mut dyn SimulatorHost,
        crew: &mut dyn CrewManager,
    ) -> Option<String> {
        match self.step {
            EnrollmentStep::Idle | EnrollmentStep::Waiting(_) => None,
            EnrollmentStep::Prompt(field) => {
                sim.open_input_box(field.prompt());
                self.step = EnrollmentStep::Waiting(field);
                None
            }
            EnrollmentStep::Ready => {
                let age = parse_age(&self.age);
                let added = crew.add_member(
                    &self.name,
                    age,
                    DEFAULT_CREW_PULSE,
                    DEFAULT_CREW_WEIGHT,
                    &self.role,
                );
                let message = if added {
                    info!("Crew member {} ({}) enrolled", self.name, self.role);
                    format!("\"{}\" aged {} added to vessel", self.name, age)
                } else {
                    "Unable to add crew".to_string()
                };
                self.cancel();
                Some(message)
            }
        }
    }
}

// Leading integer after optional whitespace and sign, 0 when there is none
fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = digits
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .fold(0i64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(c as u8 - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}

fn parse_age(text: &str) -> u32 {
    parse_leading_int(text).clamp(i64::from(MIN_CREW_AGE), i64::from(MAX_CREW_AGE)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_parsing_is_lenient() {
        assert_eq!(parse_age("42"), 42);
        assert_eq!(parse_age(" 42 years"), 42);
        assert_eq!(parse_age("old"), MIN_CREW_AGE);
        assert_eq!(parse_age("-7"), MIN_CREW_AGE);
        assert_eq!(parse_age("250"), MAX_CREW_AGE);
        assert_eq!(parse_age("99999999999999999999999"), MAX_CREW_AGE);
    }

    #[test]
    fn test_submit_without_prompt_is_rejected() {
        let mut enrollment = CrewEnrollment::default();
        assert!(!enrollment.submit("Peter"));

        enrollment.start();
        // Prompt not opened yet
        assert!(!enrollment.submit("Peter"));
    }

    #[test]
    fn test_answer_length_bounds() {
        let mut enrollment = CrewEnrollment {
            step: EnrollmentStep::Waiting(EnrollmentField::Name),
            ..Default::default()
        };
        assert!(!enrollment.submit("P"));
        assert!(!enrollment.submit(&"x".repeat(39)));
        assert_eq!(enrollment.step(), EnrollmentStep::Waiting(EnrollmentField::Name));

        assert!(enrollment.submit(&"x".repeat(38)));
        assert_eq!(enrollment.step(), EnrollmentStep::Prompt(EnrollmentField::Age));
    }

    #[test]
    fn test_answers_advance_through_fields() {
        let mut enrollment = CrewEnrollment {
            step: EnrollmentStep::Waiting(EnrollmentField::Role),
            ..Default::default()
        };
        assert!(enrollment.submit("Capt"));
        assert_eq!(enrollment.step(), EnrollmentStep::Ready);

        enrollment.cancel();
        assert!(!enrollment.is_active());
    }
}
