//! Read view of the dialogue box.

use serde::Serialize;

use crate::domain::controller::{DialogueController, DialoguePhase};
use crate::domain::speaker::SpeakerProfiles;

/// What the dialogue box currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueView {
    /// Name plate.
    pub speaker_name: String,
    /// Portrait, hidden for the antagonist.
    pub portrait: Option<String>,
    /// Revealed text.
    pub text: String,
    /// Whether the "next" indicator is shown.
    pub awaiting_ack: bool,
}

/// Snapshot of the dialogue box, or `None` when it is hidden.
#[must_use]
pub fn dialogue_view<C>(
    controller: &DialogueController<C>,
    profiles: &SpeakerProfiles,
) -> Option<DialogueView> {
    let speaker = controller.speaker()?;
    let profile = profiles.profile(speaker);
    Some(DialogueView {
        speaker_name: profile.name.clone(),
        portrait: profile.portrait.clone(),
        text: controller.visible_text().to_owned(),
        awaiting_ack: controller.phase() == DialoguePhase::Complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::controller::DialogueRequest;
    use crate::domain::observer::SilentObserver;
    use glitchwatch_content::domain::config::NarratorConfig;
    use glitchwatch_core::collaborators::Speaker;

    #[test]
    fn test_view_is_hidden_when_idle() {
        let controller: DialogueController<()> = DialogueController::new(10);
        let profiles = SpeakerProfiles::from_config(&NarratorConfig::default());

        assert_eq!(dialogue_view(&controller, &profiles), None);
    }

    #[test]
    fn test_view_tracks_revealed_text_and_ack_indicator() {
        // Arrange
        let mut controller: DialogueController<()> = DialogueController::new(10);
        let profiles = SpeakerProfiles::from_config(&NarratorConfig::default());
        controller.show(
            DialogueRequest::new(Speaker::Antagonist, "You again"),
            &mut SilentObserver,
        );
        controller.tick(30, &mut SilentObserver);

        // Act
        let typing = dialogue_view(&controller, &profiles).unwrap();
        controller.advance_or_skip(&mut SilentObserver);
        let complete = dialogue_view(&controller, &profiles).unwrap();

        // Assert
        assert_eq!(typing.speaker_name, "GLITCH");
        assert_eq!(typing.portrait, None);
        assert_eq!(typing.text, "You");
        assert!(!typing.awaiting_ack);
        assert_eq!(complete.text, "You again");
        assert!(complete.awaiting_ack);
    }
}
