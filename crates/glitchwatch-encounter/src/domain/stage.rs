//! Encounter stages and the scripts built from them.

use glitchwatch_content::domain::config::EncounterTiming;
use glitchwatch_content::domain::scene::EncounterScript;
use glitchwatch_core::collaborators::{Speaker, VisualEffect};

/// One step of an encounter.
///
/// Side-effect stages run immediately and the stepper moves on. `Delay`
/// and acknowledged `Say` stages suspend the run until their timer fires
/// or their dialogue is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Start the looping alarm.
    PlayAlarm(String),
    /// Stop the alarm.
    StopAlarm,
    /// Play a one-shot effect.
    PlaySfx(String),
    /// Toggle a visual overlay.
    Effect(VisualEffect, bool),
    /// Show or hide the antagonist sprite.
    Antagonist(bool),
    /// Wait this many milliseconds.
    Delay(u64),
    /// Show a line. With `await_ack` the run waits for the player to close
    /// it; otherwise the line is left on screen and the run continues.
    Say {
        /// Voice and name plate.
        speaker: Speaker,
        /// Line to deliver.
        text: String,
        /// Whether the run waits for the dialogue to close.
        await_ack: bool,
    },
    /// Mark the module complete. Ends the run with a finale when it was the
    /// last module.
    CompleteModule,
    /// Roll the scene back, quiz bonus included.
    ResetScene,
    /// Ask the host to show the hub.
    ReturnToHub,
    /// Ask the host to open the module's quiz.
    OpenQuiz,
}

impl Stage {
    /// Short name for logs and views.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayAlarm(_) => "play_alarm",
            Self::StopAlarm => "stop_alarm",
            Self::PlaySfx(_) => "play_sfx",
            Self::Effect(..) => "effect",
            Self::Antagonist(_) => "antagonist",
            Self::Delay(_) => "delay",
            Self::Say { .. } => "say",
            Self::CompleteModule => "complete_module",
            Self::ResetScene => "reset_scene",
            Self::ReturnToHub => "return_to_hub",
            Self::OpenQuiz => "open_quiz",
        }
    }
}

fn say(speaker: Speaker, text: &str) -> Stage {
    Stage::Say {
        speaker,
        text: text.to_owned(),
        await_ack: true,
    }
}

/// Alarm, alert, glitch, antagonist, two acknowledged lines, cleanup, quiz.
#[must_use]
pub fn intro_stages(script: &EncounterScript, timing: &EncounterTiming) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(14);
    if let Some(alarm) = &script.alarm_sound {
        stages.push(Stage::PlayAlarm(alarm.clone()));
    }
    stages.extend([
        Stage::Effect(VisualEffect::Alert, true),
        Stage::Delay(timing.alert_to_glitch_ms),
        Stage::Effect(VisualEffect::Glitch, true),
        Stage::Delay(timing.glitch_to_antagonist_ms),
        Stage::Antagonist(true),
        Stage::Delay(timing.antagonist_to_speech_ms),
        say(Speaker::Antagonist, &script.antagonist_speech),
        say(Speaker::Narrator, &script.system_alert),
        Stage::Effect(VisualEffect::Alert, false),
        Stage::Effect(VisualEffect::Glitch, false),
        Stage::Antagonist(false),
        Stage::StopAlarm,
        Stage::OpenQuiz,
    ]);
    stages
}

/// Defeat speech under the victory glow, victory sound and message, module
/// completion, then (unless that was the last module) scene reset, hub and
/// a delayed welcome line.
#[must_use]
pub fn victory_stages(
    script: &EncounterScript,
    timing: &EncounterTiming,
    hub_welcome: Option<&str>,
) -> Vec<Stage> {
    let mut stages = vec![
        Stage::Antagonist(true),
        Stage::Effect(VisualEffect::VictoryGlow, true),
        say(Speaker::Antagonist, &script.defeat_speech),
        Stage::Effect(VisualEffect::VictoryGlow, false),
        Stage::Antagonist(false),
    ];
    if let Some(sound) = &script.victory_sound {
        stages.push(Stage::PlaySfx(sound.clone()));
    }
    stages.extend([
        say(Speaker::Narrator, &script.victory_message),
        Stage::CompleteModule,
        Stage::ResetScene,
        Stage::ReturnToHub,
    ]);
    if let Some(text) = hub_welcome {
        stages.push(Stage::Delay(timing.hub_welcome_ms));
        stages.push(Stage::Say {
            speaker: Speaker::Narrator,
            text: text.to_owned(),
            await_ack: false,
        });
    }
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> EncounterScript {
        EncounterScript {
            kind: "antagonist_appears".to_owned(),
            alarm_sound: Some("alarm.mp3".to_owned()),
            antagonist_speech: "Mine now!".to_owned(),
            system_alert: "Intrusion!".to_owned(),
            defeat_speech: "Nooo".to_owned(),
            victory_message: "Threat neutralised".to_owned(),
            victory_sound: None,
        }
    }

    #[test]
    fn test_intro_ends_with_cleanup_then_quiz() {
        let stages = intro_stages(&script(), &EncounterTiming::default());

        assert_eq!(stages.first(), Some(&Stage::PlayAlarm("alarm.mp3".to_owned())));
        assert_eq!(
            &stages[stages.len() - 5..],
            &[
                Stage::Effect(VisualEffect::Alert, false),
                Stage::Effect(VisualEffect::Glitch, false),
                Stage::Antagonist(false),
                Stage::StopAlarm,
                Stage::OpenQuiz,
            ]
        );
        assert!(stages.contains(&Stage::Delay(2000)));
    }

    #[test]
    fn test_intro_without_alarm_skips_play_alarm() {
        let script = EncounterScript {
            alarm_sound: None,
            ..script()
        };

        let stages = intro_stages(&script, &EncounterTiming::default());

        assert_eq!(stages[0], Stage::Effect(VisualEffect::Alert, true));
    }

    #[test]
    fn test_victory_welcome_is_optional() {
        let timing = EncounterTiming::default();

        let with = victory_stages(&script(), &timing, Some("Pick a module"));
        let without = victory_stages(&script(), &timing, None);

        assert_eq!(with.len(), without.len() + 2);
        assert_eq!(without.last(), Some(&Stage::ReturnToHub));
        assert!(matches!(
            with.last(),
            Some(Stage::Say { await_ack: false, .. })
        ));
    }
}
