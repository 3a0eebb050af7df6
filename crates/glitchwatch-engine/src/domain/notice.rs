//! Notices the engine queues for the presentation layer.

use glitchwatch_content::domain::scene::ModuleCard;
use glitchwatch_core::error::DomainError;
use glitchwatch_progress::domain::events::ProgressChanged;
use glitchwatch_quiz::application::queries::QuestionView;
use serde::Serialize;

use super::report::MissionReport;

/// A hotspot marker to draw on the panorama.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotMarker {
    /// Hotspot id, also the tracking handle.
    pub id: String,
    /// Hover label.
    pub label: Option<String>,
    /// Icon name.
    pub icon: Option<String>,
    /// Whether it opens the quiz.
    pub is_quiz: bool,
    /// Whether it was already clicked.
    pub visited: bool,
}

/// Something the presentation layer should render.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineNotice {
    /// Score or exploration changed.
    Progress(ProgressChanged),
    /// The title screen is back after a restart.
    StartScreen,
    /// The hub is on screen.
    HubShown {
        /// Level-select cards.
        cards: Vec<ModuleCard>,
        /// Hub background.
        background: Option<String>,
        /// Modules already completed, sorted.
        completed: Vec<String>,
    },
    /// A module panorama was loaded.
    SceneLoaded {
        /// Scene id.
        scene_id: String,
        /// Display name.
        name: String,
        /// Markers to draw.
        hotspots: Vec<HotspotMarker>,
    },
    /// The quiz overlay changed.
    QuizQuestion(QuestionView),
    /// The quiz overlay closed.
    QuizClosed,
    /// A locked quiz was clicked.
    QuizLocked {
        /// The quiz hotspot.
        hotspot_id: String,
        /// Narrated denial.
        message: String,
    },
    /// A module's quiz was completed.
    MissionReport(MissionReport),
    /// Every module is complete.
    GameFinale,
    /// A request was declined; nothing changed.
    Declined(DomainError),
}
