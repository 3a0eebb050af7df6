//! Mission report shown after a module's quiz.

use glitchwatch_content::domain::config::GameConfig;
use glitchwatch_content::domain::scene::SceneConfig;
use glitchwatch_core::clock::format_elapsed;
use glitchwatch_progress::application::queries::exploration_stats;
use glitchwatch_progress::domain::store::ProgressStore;
use glitchwatch_quiz::domain::session::QuizResult;
use serde::Serialize;

/// Heading used when a rank has no configured wording.
pub const DEFAULT_REPORT_TITLE: &str = "MISSION REPORT";

/// End-of-module statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionReport {
    /// Module scene.
    pub scene_id: String,
    /// Module display name.
    pub scene_name: String,
    /// Time since the scene was entered, `MM:SS`.
    pub time_spent: String,
    /// Non-quiz hotspots visited.
    pub explored: usize,
    /// Non-quiz hotspots in the scene.
    pub total_hotspots: usize,
    /// Rounded exploration percent.
    pub exploration_percent: u8,
    /// Wrong quiz answers.
    pub quiz_mistakes: u32,
    /// Questions asked.
    pub total_questions: u32,
    /// Quiz accuracy, 0 to 100.
    pub accuracy: u32,
    /// Score after the quiz bonus.
    pub score: i64,
    /// Earned rank.
    pub rank: String,
    /// Rank heading.
    pub title: String,
    /// Rank sub-heading; may be empty.
    pub subtitle: String,
}

impl MissionReport {
    /// Assembles the report from the finished quiz and current progress.
    #[must_use]
    pub fn build(
        config: &GameConfig,
        scene: &SceneConfig,
        progress: &ProgressStore,
        result: &QuizResult,
    ) -> Self {
        let stats = exploration_stats(progress, scene);
        let (title, subtitle) = config.rank_message(&result.rank).map_or_else(
            || (DEFAULT_REPORT_TITLE.to_owned(), String::new()),
            |m| (m.title.clone(), m.subtitle.clone()),
        );
        Self {
            scene_id: scene.id.clone(),
            scene_name: scene.name.clone(),
            time_spent: format_elapsed(progress.elapsed()),
            explored: stats.explored,
            total_hotspots: stats.total,
            exploration_percent: stats.percent,
            quiz_mistakes: result.mistakes,
            total_questions: result.total,
            accuracy: result.accuracy,
            score: progress.score(),
            rank: result.rank.clone(),
            title,
            subtitle,
        }
    }
}
