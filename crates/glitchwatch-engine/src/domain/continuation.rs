//! Continuations the engine's dialogue box can carry.

use glitchwatch_encounter::domain::context::EncounterResume;
use glitchwatch_quiz::domain::session::QuizResume;

/// What closing a dialogue resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// An encounter stage waiting on the line.
    Encounter(EncounterResume),
    /// A quiz waiting on answer feedback.
    Quiz(QuizResume),
}

impl From<EncounterResume> for Continuation {
    fn from(resume: EncounterResume) -> Self {
        Self::Encounter(resume)
    }
}

impl From<QuizResume> for Continuation {
    fn from(resume: QuizResume) -> Self {
        Self::Quiz(resume)
    }
}
