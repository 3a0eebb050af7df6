//! What the quiz overlay shows.

use serde::Serialize;

use crate::domain::session::{OptionMark, QuizSession};

/// One option button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Button label.
    pub text: String,
    /// Whether the button accepts a click.
    pub enabled: bool,
    /// Highlight left by an earlier pick.
    pub mark: Option<OptionMark>,
}

/// The question on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Owning session.
    pub serial: u64,
    /// One-based question number.
    pub number: usize,
    /// Questions in this attempt.
    pub total: usize,
    /// Prompt.
    pub text: String,
    /// Buttons in display order.
    pub options: Vec<OptionView>,
}

/// Snapshot of the current question, or `None` once the quiz is finished.
#[must_use]
pub fn question_view(session: &QuizSession) -> Option<QuestionView> {
    if session.is_finished() {
        return None;
    }
    let question = session.questions.get(session.current)?;
    Some(QuestionView {
        serial: session.serial(),
        number: session.current + 1,
        total: session.total(),
        text: question.text.clone(),
        options: question
            .options
            .iter()
            .map(|o| OptionView {
                text: o.text.clone(),
                enabled: o.enabled,
                mark: o.mark,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::QuizResume;
    use glitchwatch_content::domain::scene::{QuizOption, QuizQuestion};
    use glitchwatch_dialogue::domain::controller::DialogueController;
    use glitchwatch_dialogue::domain::observer::SilentObserver;
    use glitchwatch_test_support::MockRng;

    fn pool() -> Vec<QuizQuestion> {
        vec![QuizQuestion {
            text: "Pick one".to_owned(),
            options: vec![
                QuizOption {
                    text: "yes".to_owned(),
                    correct: true,
                },
                QuizOption {
                    text: "no".to_owned(),
                    correct: false,
                },
            ],
            feedback_correct: "ok".to_owned(),
            feedback_wrong: "nope".to_owned(),
        }]
    }

    #[test]
    fn test_view_reflects_locked_and_marked_options() {
        // Arrange
        let pool = pool();
        let mut session = QuizSession::start(3, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let mut dialogue: DialogueController<QuizResume> = DialogueController::new(10);
        let before = question_view(&session).unwrap();
        let wrong = before.options.iter().position(|o| o.text == "no").unwrap();

        // Act
        session.select(wrong, &mut dialogue, &mut SilentObserver);
        let after = question_view(&session).unwrap();

        // Assert
        assert_eq!(before.number, 1);
        assert_eq!(before.total, 1);
        assert_eq!(before.serial, 3);
        assert!(before.options.iter().all(|o| o.enabled && o.mark.is_none()));
        assert!(after.options.iter().all(|o| !o.enabled));
        assert_eq!(after.options[wrong].mark, Some(OptionMark::Wrong));
    }
}
