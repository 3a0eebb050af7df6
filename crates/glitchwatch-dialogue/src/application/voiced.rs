//! Voices dialogue through the audio collaborator.

use glitchwatch_core::collaborators::{AudioService, BeepTone, Speaker};

use crate::domain::observer::RevealObserver;

/// Speaks each line as it starts and beeps for every revealed
/// non-whitespace character.
pub struct VoicedReveal<'a> {
    audio: &'a mut dyn AudioService,
}

impl<'a> VoicedReveal<'a> {
    /// Wraps an audio service for one controller call.
    pub fn new(audio: &'a mut dyn AudioService) -> Self {
        Self { audio }
    }
}

fn tone_for(speaker: Speaker) -> BeepTone {
    match speaker {
        Speaker::Narrator => BeepTone::High,
        Speaker::Antagonist => BeepTone::Low,
    }
}

impl RevealObserver for VoicedReveal<'_> {
    fn on_started(&mut self, speaker: Speaker, text: &str) {
        if !text.trim().is_empty() {
            self.audio.speak(text, speaker);
        }
    }

    fn on_character(&mut self, speaker: Speaker, ch: char) {
        if !ch.is_whitespace() {
            self.audio.play_typing_beep(tone_for(speaker));
        }
    }
}
