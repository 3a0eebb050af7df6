//! Whole-engine snapshot for hosts.

use glitchwatch_core::collaborators::{AudioService, SceneView};
use glitchwatch_dialogue::application::queries::{DialogueView, dialogue_view};
use glitchwatch_encounter::application::queries::{EncounterStatus, encounter_status};
use glitchwatch_progress::application::queries::{ProgressView, progress_view};
use glitchwatch_quiz::application::queries::{QuestionView, question_view};
use serde::Serialize;

use super::engine::GameEngine;
use crate::domain::screen::Screen;

/// Everything a host might render, in one serializable value.
#[derive(Debug, Serialize)]
pub struct EngineStatus {
    /// Top-level screen.
    pub screen: Screen,
    /// Whether time is frozen.
    pub suspended: bool,
    /// Score, exploration and timers.
    pub progress: ProgressView,
    /// Dialogue box, if shown.
    pub dialogue: Option<DialogueView>,
    /// Quiz overlay, if open.
    pub quiz: Option<QuestionView>,
    /// Encounter sequencer state.
    pub encounter: EncounterStatus,
    /// Whether a mission report waits to be closed.
    pub report_pending: bool,
}

/// Builds the snapshot.
#[must_use]
pub fn engine_status<V: SceneView, A: AudioService>(engine: &GameEngine<V, A>) -> EngineStatus {
    EngineStatus {
        screen: engine.screen().clone(),
        suspended: engine.is_suspended(),
        progress: progress_view(engine.progress()),
        dialogue: dialogue_view(engine.dialogue(), engine.profiles()),
        quiz: engine.quiz().and_then(question_view),
        encounter: encounter_status(engine.sequencer()),
        report_pending: engine.pending_report().is_some(),
    }
}
