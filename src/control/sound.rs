use log::debug;

use super::host::SimulatorHost;

pub const SOUND_DIRECTORY: &str = "Sound\\_CustomVesselsSounds\\Shuttle_D\\";

/// One-shot sounds played when a mechanism starts moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    GearUp,
    GearDown,
    BayAOpen,
    BayAClose,
    BayBOpen,
    BayBClose,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::GearUp,
        SoundCue::GearDown,
        SoundCue::BayAOpen,
        SoundCue::BayAClose,
        SoundCue::BayBOpen,
        SoundCue::BayBClose,
    ];

    /// Wave slot number registered with the sound host.
    pub fn id(self) -> u32 {
        match self {
            SoundCue::GearUp => 1,
            SoundCue::GearDown => 2,
            SoundCue::BayAOpen => 3,
            SoundCue::BayAClose => 4,
            SoundCue::BayBOpen => 5,
            SoundCue::BayBClose => 6,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::GearUp => "gearup.wav",
            SoundCue::GearDown => "geardown.wav",
            SoundCue::BayAOpen => "plbayaopen.wav",
            SoundCue::BayAClose => "plbayaclose.wav",
            SoundCue::BayBOpen => "plbaybopen.wav",
            SoundCue::BayBClose => "plbaybclose.wav",
        }
    }
}

/// Connection handle returned by the sound host; cues are addressed through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundChannel(pub i32);

/// Connects to the sound host and loads every cue. Must run after vessel creation.
pub fn register_sounds(sim: &mut dyn SimulatorHost) -> Option<SoundChannel> {
    let channel = sim.connect_sound()?;
    for cue in SoundCue::ALL {
        let path = format!("{}{}", SOUND_DIRECTORY, cue.file_name());
        debug!("Loading cue {} from {}", cue.id(), path);
        sim.load_cue(channel, cue, &path);
    }
    Some(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cue_ids_are_unique() {
        let ids: HashSet<u32> = SoundCue::ALL.iter().map(|cue| cue.id()).collect();
        assert_eq!(ids.len(), SoundCue::ALL.len());
    }

    #[test]
    fn test_file_names_are_wav() {
        for cue in SoundCue::ALL {
            assert!(cue.file_name().ends_with(".wav"));
        }
    }
}
