//! Speaker profiles shown in the dialogue box.

use glitchwatch_content::domain::config::NarratorConfig;
use glitchwatch_core::collaborators::Speaker;
use serde::Serialize;

/// Name plate and portrait for one speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerProfile {
    /// Displayed name.
    pub name: String,
    /// Portrait image; `None` hides the portrait.
    pub portrait: Option<String>,
}

/// The two fixed profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerProfiles {
    /// The guide.
    pub narrator: SpeakerProfile,
    /// The antagonist.
    pub antagonist: SpeakerProfile,
}

impl SpeakerProfiles {
    /// Builds both profiles from narrator settings. The antagonist's
    /// portrait is never shown inside the dialogue box; its sprite is on
    /// the scene instead.
    #[must_use]
    pub fn from_config(config: &NarratorConfig) -> Self {
        Self {
            narrator: SpeakerProfile {
                name: config.name.clone(),
                portrait: config.image.clone(),
            },
            antagonist: SpeakerProfile {
                name: config.antagonist_name.clone(),
                portrait: None,
            },
        }
    }

    /// Profile for a speaker.
    #[must_use]
    pub fn profile(&self, speaker: Speaker) -> &SpeakerProfile {
        match speaker {
            Speaker::Narrator => &self.narrator,
            Speaker::Antagonist => &self.antagonist,
        }
    }
}
