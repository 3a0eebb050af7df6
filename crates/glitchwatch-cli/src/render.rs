//! Text rendering of engine notices and dialogue lines.

use glitchwatch_core::collaborators::{AudioService, SceneView};
use glitchwatch_dialogue::domain::controller::DialogueId;
use glitchwatch_engine::application::engine::GameEngine;
use glitchwatch_engine::domain::notice::EngineNotice;
use glitchwatch_engine::domain::report::MissionReport;

/// Turns a batch of notices into printable lines. Progress notices are
/// collapsed into one score line after everything else.
#[must_use]
pub fn render_notices(notices: &[EngineNotice]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut progress = None;
    for notice in notices {
        match notice {
            EngineNotice::Progress(changed) => progress = Some(changed),
            EngineNotice::StartScreen => lines.push("== GLITCHWATCH ==  type 'start'".to_owned()),
            EngineNotice::HubShown {
                cards, completed, ..
            } => {
                lines.push("== HUB ==".to_owned());
                for card in cards {
                    let done = if completed.contains(&card.target_scene) {
                        "x"
                    } else {
                        " "
                    };
                    lines.push(format!("  [{done}] {} ({})", card.label, card.target_scene));
                }
            }
            EngineNotice::SceneLoaded {
                name, hotspots, ..
            } => {
                lines.push(format!("== {name} =="));
                for hotspot in hotspots {
                    let mut line = format!("  - {}", hotspot.id);
                    if let Some(label) = &hotspot.label {
                        line.push_str(&format!(" \"{label}\""));
                    }
                    if hotspot.is_quiz {
                        line.push_str(" [quiz]");
                    }
                    if hotspot.visited {
                        line.push_str(" [visited]");
                    }
                    lines.push(line);
                }
            }
            EngineNotice::QuizQuestion(question) => {
                lines.push(format!(
                    "Question {}/{}: {}",
                    question.number, question.total, question.text
                ));
                for (index, option) in question.options.iter().enumerate() {
                    let marker = if option.enabled {
                        format!("{})", index + 1)
                    } else {
                        "-)".to_owned()
                    };
                    lines.push(format!("  {marker} {}", option.text));
                }
            }
            EngineNotice::QuizClosed => lines.push("(quiz closed)".to_owned()),
            EngineNotice::QuizLocked { hotspot_id, .. } => {
                lines.push(format!("({hotspot_id} is locked)"));
            }
            EngineNotice::MissionReport(report) => lines.extend(report_lines(report)),
            EngineNotice::GameFinale => lines.push("== ALL MODULES SECURED ==".to_owned()),
            EngineNotice::Declined(err) => lines.push(format!("! {err}")),
        }
    }
    if let Some(changed) = progress {
        lines.push(format!("score {}  explored {}%", changed.score, changed.percent));
    }
    lines
}

fn report_lines(report: &MissionReport) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", report.title)];
    if !report.subtitle.is_empty() {
        lines.push(format!("   {}", report.subtitle));
    }
    lines.extend([
        format!("  module      {}", report.scene_name),
        format!("  time        {}", report.time_spent),
        format!(
            "  explored    {}/{} ({}%)",
            report.explored, report.total_hotspots, report.exploration_percent
        ),
        format!(
            "  quiz        {} mistakes over {} questions, {}% accuracy",
            report.quiz_mistakes, report.total_questions, report.accuracy
        ),
        format!("  score       {}", report.score),
        format!("  rank        {}", report.rank),
        "  type 'close' to continue".to_owned(),
    ]);
    lines
}

/// Prints each dialogue line once, in full, when it first appears.
#[derive(Debug, Default)]
pub struct DialoguePrinter {
    last: Option<DialogueId>,
}

impl DialoguePrinter {
    /// Returns the line to print if a new dialogue started since the last
    /// poll.
    pub fn poll<V: SceneView, A: AudioService>(
        &mut self,
        engine: &GameEngine<V, A>,
    ) -> Option<String> {
        let dialogue = engine.dialogue();
        let id = dialogue.current_id()?;
        if self.last == Some(id) {
            return None;
        }
        self.last = Some(id);
        let speaker = dialogue.speaker()?;
        let name = &engine.profiles().profile(speaker).name;
        Some(format!("{name}: {}", dialogue.full_text()))
    }
}
