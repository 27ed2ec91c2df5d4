pub mod crew_enrollment;
pub mod hazards;
pub mod host;
pub mod input;
pub mod life_support;
pub mod mechanism;
pub mod propulsion;
pub mod sound;
pub mod vessel;
