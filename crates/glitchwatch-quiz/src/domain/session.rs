//! Quiz session.
//!
//! A session presents its questions one at a time. Picking an option
//! locks every option and shows feedback through the dialogue box; the
//! feedback's continuation is a [`QuizResume`] the host hands back to
//! [`QuizSession::resume`] once the player acknowledges it. A wrong pick
//! retries the same question with the tried options left disabled.

use glitchwatch_content::domain::scene::QuizQuestion;
use glitchwatch_core::collaborators::Speaker;
use glitchwatch_core::error::DomainError;
use glitchwatch_core::rng::{DeterministicRng, shuffle};
use glitchwatch_dialogue::domain::controller::{DialogueController, DialogueRequest};
use glitchwatch_dialogue::domain::observer::RevealObserver;
use serde::Serialize;
use tracing::{debug, info};

use super::rank::RankEngine;

/// Continuation attached to answer feedback. `serial` names the session
/// that showed it, so feedback outliving its quiz is recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResume {
    /// Serial of the issuing session.
    pub serial: u64,
}

/// Marker left on an option after it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    /// Picked and right.
    Correct,
    /// Picked and wrong.
    Wrong,
}

#[derive(Debug, Clone)]
pub(crate) struct PresentedOption {
    pub text: String,
    pub correct: bool,
    pub enabled: bool,
    pub mark: Option<OptionMark>,
}

#[derive(Debug, Clone)]
pub(crate) struct PresentedQuestion {
    pub text: String,
    pub options: Vec<PresentedOption>,
    pub feedback_correct: String,
    pub feedback_wrong: String,
}

impl PresentedQuestion {
    fn from_config(question: &QuizQuestion, rng: &mut dyn DeterministicRng) -> Self {
        let mut options: Vec<PresentedOption> = question
            .options
            .iter()
            .map(|option| PresentedOption {
                text: option.text.clone(),
                correct: option.correct,
                enabled: true,
                mark: None,
            })
            .collect();
        shuffle(&mut options, rng);
        Self {
            text: question.text.clone(),
            options,
            feedback_correct: question.feedback_correct.clone(),
            feedback_wrong: question.feedback_wrong.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizPhase {
    AwaitingAnswer,
    AwaitingFeedback { correct: bool },
    Finished,
}

/// Result of picking an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The pick was right; feedback is showing.
    Correct,
    /// The pick was wrong and counted as a mistake; feedback is showing.
    Wrong,
    /// The pick was not accepted (options locked, out of range or already
    /// tried).
    Ignored,
}

/// Final statistics of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    /// Wrong picks across all questions.
    pub mistakes: u32,
    /// Questions presented.
    pub total: u32,
    /// `round(100 * (total - mistakes) / total)`, never below 0.
    pub accuracy: u32,
    /// Rank earned.
    pub rank: String,
}

impl QuizResult {
    /// Computes accuracy and rank for a finished attempt.
    #[must_use]
    pub fn compute(total: u32, mistakes: u32, ranks: &RankEngine<'_>) -> Self {
        let accuracy = accuracy(total, mistakes);
        Self {
            mistakes,
            total,
            accuracy,
            rank: ranks.rank(accuracy, mistakes).to_owned(),
        }
    }
}

fn accuracy(total: u32, mistakes: u32) -> u32 {
    if total == 0 {
        return 100;
    }
    let total = u64::from(total);
    let correct = total.saturating_sub(u64::from(mistakes));
    u32::try_from((correct * 200 + total) / (total * 2)).unwrap_or(100)
}

/// Checks that a question pool can be played to completion.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuizData` if the pool is empty or any
/// question has no correct option.
pub fn validate_pool(hotspot_id: &str, pool: &[QuizQuestion]) -> Result<(), DomainError> {
    if pool.is_empty() {
        return Err(DomainError::InvalidQuizData {
            hotspot_id: hotspot_id.to_owned(),
            reason: "no questions".to_owned(),
        });
    }
    if let Some(question) = pool.iter().find(|q| !q.options.iter().any(|o| o.correct)) {
        return Err(DomainError::InvalidQuizData {
            hotspot_id: hotspot_id.to_owned(),
            reason: format!("question '{}' has no correct option", question.text),
        });
    }
    Ok(())
}

/// What acknowledging the feedback led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// The continuation was stale or arrived out of turn.
    Ignored,
    /// The next question is up.
    NextQuestion,
    /// The same question is up again with the tried options disabled.
    Retry,
    /// Every question was answered.
    Completed(QuizResult),
}

/// One quiz attempt.
#[derive(Debug)]
pub struct QuizSession {
    serial: u64,
    scene_id: String,
    hotspot_id: String,
    pub(crate) questions: Vec<PresentedQuestion>,
    pub(crate) current: usize,
    mistakes: u32,
    phase: QuizPhase,
}

impl QuizSession {
    /// Picks `subset` questions (default: all) from `pool` in random order
    /// and shuffles each one's options.
    ///
    /// `subset` is clamped to `1..=pool.len()`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuizData` if the pool is empty or any
    /// question has no correct option.
    pub fn start(
        serial: u64,
        scene_id: &str,
        hotspot_id: &str,
        pool: &[QuizQuestion],
        subset: Option<usize>,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, DomainError> {
        validate_pool(hotspot_id, pool)?;

        let count = subset.unwrap_or(pool.len()).clamp(1, pool.len());
        let mut order: Vec<usize> = (0..pool.len()).collect();
        shuffle(&mut order, rng);
        order.truncate(count);

        let questions = order
            .into_iter()
            .map(|index| PresentedQuestion::from_config(&pool[index], rng))
            .collect::<Vec<_>>();

        info!(
            serial,
            scene_id,
            hotspot_id,
            questions = questions.len(),
            pool = pool.len(),
            "quiz started"
        );

        Ok(Self {
            serial,
            scene_id: scene_id.to_owned(),
            hotspot_id: hotspot_id.to_owned(),
            questions,
            current: 0,
            mistakes: 0,
            phase: QuizPhase::AwaitingAnswer,
        })
    }

    /// Session serial.
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Owning scene.
    #[must_use]
    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    /// Quiz hotspot.
    #[must_use]
    pub fn hotspot_id(&self) -> &str {
        &self.hotspot_id
    }

    /// Mistakes so far.
    #[must_use]
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Number of questions in this attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns `true` while options accept a pick.
    #[must_use]
    pub fn is_awaiting_answer(&self) -> bool {
        self.phase == QuizPhase::AwaitingAnswer
    }

    /// Returns `true` once every question was answered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    /// Handles a pick of option `index` on the current question.
    ///
    /// Every option is disabled before feedback is shown, so a second pick
    /// during feedback is ignored.
    pub fn select<C: From<QuizResume>>(
        &mut self,
        index: usize,
        dialogue: &mut DialogueController<C>,
        observer: &mut dyn RevealObserver,
    ) -> AnswerOutcome {
        if self.phase != QuizPhase::AwaitingAnswer {
            return AnswerOutcome::Ignored;
        }
        let Some(question) = self.questions.get_mut(self.current) else {
            return AnswerOutcome::Ignored;
        };
        if !question.options.get(index).is_some_and(|o| o.enabled) {
            debug!(serial = self.serial, index, "quiz pick ignored");
            return AnswerOutcome::Ignored;
        }

        for option in &mut question.options {
            option.enabled = false;
        }
        let picked = &mut question.options[index];
        let correct = picked.correct;
        let feedback = if correct {
            picked.mark = Some(OptionMark::Correct);
            question.feedback_correct.clone()
        } else {
            picked.mark = Some(OptionMark::Wrong);
            self.mistakes += 1;
            question.feedback_wrong.clone()
        };
        self.phase = QuizPhase::AwaitingFeedback { correct };

        debug!(
            serial = self.serial,
            question = self.current,
            correct,
            mistakes = self.mistakes,
            "quiz answer"
        );

        let resume = QuizResume {
            serial: self.serial,
        };
        dialogue.show(
            DialogueRequest::new(Speaker::Narrator, feedback).then(C::from(resume)),
            observer,
        );

        if correct {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Wrong
        }
    }

    /// Continues after the player acknowledged answer feedback.
    pub fn resume(&mut self, token: QuizResume, ranks: &RankEngine<'_>) -> QuizStep {
        if token.serial != self.serial {
            debug!(
                expected = self.serial,
                got = token.serial,
                "stale quiz continuation"
            );
            return QuizStep::Ignored;
        }
        let QuizPhase::AwaitingFeedback { correct } = self.phase else {
            return QuizStep::Ignored;
        };

        if !correct {
            if let Some(question) = self.questions.get_mut(self.current) {
                for option in &mut question.options {
                    option.enabled = option.mark.is_none();
                }
            }
            self.phase = QuizPhase::AwaitingAnswer;
            return QuizStep::Retry;
        }

        self.current += 1;
        if self.current < self.questions.len() {
            self.phase = QuizPhase::AwaitingAnswer;
            return QuizStep::NextQuestion;
        }

        self.phase = QuizPhase::Finished;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let result = QuizResult::compute(total, self.mistakes, ranks);
        info!(
            serial = self.serial,
            scene_id = %self.scene_id,
            mistakes = result.mistakes,
            accuracy = result.accuracy,
            rank = %result.rank,
            "quiz completed"
        );
        QuizStep::Completed(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use glitchwatch_content::domain::config::default_rank_thresholds;
    use glitchwatch_content::domain::scene::QuizOption;
    use glitchwatch_core::rng::SystemRng;
    use glitchwatch_dialogue::domain::controller::Advance;
    use glitchwatch_dialogue::domain::observer::SilentObserver;
    use glitchwatch_test_support::MockRng;

    fn question(text: &str, right: &str, wrong: &[&str]) -> QuizQuestion {
        let mut options = vec![QuizOption {
            text: right.to_owned(),
            correct: true,
        }];
        options.extend(wrong.iter().map(|w| QuizOption {
            text: (*w).to_owned(),
            correct: false,
        }));
        QuizQuestion {
            text: text.to_owned(),
            options,
            feedback_correct: format!("{text}: yes"),
            feedback_wrong: format!("{text}: no"),
        }
    }

    fn pool_of(n: usize) -> Vec<QuizQuestion> {
        (0..n)
            .map(|i| question(&format!("Q{i}"), "right", &["wrong-a", "wrong-b"]))
            .collect()
    }

    fn option_index(session: &QuizSession, text: &str) -> usize {
        session.questions[session.current]
            .options
            .iter()
            .position(|o| o.text == text)
            .unwrap()
    }

    fn acknowledge(dialogue: &mut DialogueController<QuizResume>) -> QuizResume {
        dialogue.advance_or_skip(&mut SilentObserver);
        match dialogue.advance_or_skip(&mut SilentObserver) {
            Advance::Closed(Some(token)) => token,
            other => panic!("expected continuation, got {other:?}"),
        }
    }

    #[test]
    fn test_subset_presents_distinct_questions_with_one_correct_option() {
        // Arrange
        let pool = pool_of(5);
        let mut rng = SystemRng::seeded(7);

        // Act
        let session = QuizSession::start(1, "lab", "terminal", &pool, Some(3), &mut rng).unwrap();

        // Assert
        assert_eq!(session.total(), 3);
        let texts: HashSet<&str> = session.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        for q in &session.questions {
            assert_eq!(q.options.iter().filter(|o| o.correct).count(), 1);
            assert_eq!(q.options.len(), 3);
        }
    }

    #[test]
    fn test_selection_takes_head_of_shuffled_pool() {
        // MockRng always draws 0, which rotates the pool left by one.
        let pool = pool_of(4);

        let session = QuizSession::start(1, "lab", "t", &pool, Some(2), &mut MockRng).unwrap();

        let texts: Vec<&str> = session.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_subset_is_clamped_to_pool() {
        let pool = pool_of(2);

        let all = QuizSession::start(1, "lab", "t", &pool, Some(10), &mut MockRng).unwrap();
        let one = QuizSession::start(2, "lab", "t", &pool, Some(0), &mut MockRng).unwrap();
        let default = QuizSession::start(3, "lab", "t", &pool, None, &mut MockRng).unwrap();

        assert_eq!(all.total(), 2);
        assert_eq!(one.total(), 1);
        assert_eq!(default.total(), 2);
    }

    #[test]
    fn test_empty_pool_is_invalid_quiz_data() {
        let result = QuizSession::start(1, "lab", "terminal", &[], None, &mut MockRng);

        assert!(matches!(
            result,
            Err(DomainError::InvalidQuizData { hotspot_id, .. }) if hotspot_id == "terminal"
        ));
    }

    #[test]
    fn test_question_without_correct_option_is_invalid() {
        let mut pool = pool_of(2);
        pool[1].options.iter_mut().for_each(|o| o.correct = false);

        let result = QuizSession::start(1, "lab", "terminal", &pool, None, &mut MockRng);

        assert!(matches!(result, Err(DomainError::InvalidQuizData { .. })));
    }

    #[test]
    fn test_wrong_answer_retries_with_tried_option_disabled() {
        // Arrange
        let pool = vec![question("Q", "right", &["wrong-a", "wrong-b"])];
        let mut session = QuizSession::start(4, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let mut dialogue: DialogueController<QuizResume> = DialogueController::new(10);
        let ranks_table = default_rank_thresholds();
        let ranks = RankEngine::new(&ranks_table, "poor");
        let wrong = option_index(&session, "wrong-a");

        // Act
        let outcome = session.select(wrong, &mut dialogue, &mut SilentObserver);
        let locked = session.questions[0].options.iter().all(|o| !o.enabled);
        let feedback = dialogue.full_text().to_owned();
        let step = session.resume(acknowledge(&mut dialogue), &ranks);

        // Assert
        assert_eq!(outcome, AnswerOutcome::Wrong);
        assert!(locked);
        assert_eq!(feedback, "Q: no");
        assert_eq!(step, QuizStep::Retry);
        assert_eq!(session.mistakes(), 1);
        let options = &session.questions[0].options;
        assert!(!options[wrong].enabled);
        assert_eq!(options[wrong].mark, Some(OptionMark::Wrong));
        assert_eq!(options.iter().filter(|o| o.enabled).count(), 2);
    }

    #[test]
    fn test_picks_during_feedback_are_ignored() {
        let pool = pool_of(1);
        let mut session = QuizSession::start(1, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let mut dialogue: DialogueController<QuizResume> = DialogueController::new(10);
        let wrong = option_index(&session, "wrong-a");
        let right = option_index(&session, "right");

        session.select(wrong, &mut dialogue, &mut SilentObserver);
        let second = session.select(right, &mut dialogue, &mut SilentObserver);

        assert_eq!(second, AnswerOutcome::Ignored);
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn test_retried_option_cannot_be_picked_again() {
        let pool = pool_of(1);
        let mut session = QuizSession::start(1, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let mut dialogue: DialogueController<QuizResume> = DialogueController::new(10);
        let tiers = default_rank_thresholds();
        let ranks = RankEngine::new(&tiers, "poor");
        let wrong = option_index(&session, "wrong-a");
        session.select(wrong, &mut dialogue, &mut SilentObserver);
        session.resume(acknowledge(&mut dialogue), &ranks);

        let again = session.select(wrong, &mut dialogue, &mut SilentObserver);

        assert_eq!(again, AnswerOutcome::Ignored);
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn test_full_run_completes_with_accuracy_and_rank() {
        // Arrange
        let pool = pool_of(3);
        let mut session = QuizSession::start(9, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let mut dialogue: DialogueController<QuizResume> = DialogueController::new(10);
        let tiers = default_rank_thresholds();
        let ranks = RankEngine::new(&tiers, "poor");
        let mut steps = Vec::new();

        // Act — one mistake on the first question, then all right.
        let wrong = option_index(&session, "wrong-b");
        session.select(wrong, &mut dialogue, &mut SilentObserver);
        steps.push(session.resume(acknowledge(&mut dialogue), &ranks));
        for _ in 0..3 {
            let right = option_index(&session, "right");
            assert_eq!(
                session.select(right, &mut dialogue, &mut SilentObserver),
                AnswerOutcome::Correct
            );
            steps.push(session.resume(acknowledge(&mut dialogue), &ranks));
        }

        // Assert — round(100 * 2 / 3) = 67
        assert_eq!(steps[0], QuizStep::Retry);
        assert_eq!(steps[1], QuizStep::NextQuestion);
        assert_eq!(steps[2], QuizStep::NextQuestion);
        assert_eq!(
            steps[3],
            QuizStep::Completed(QuizResult {
                mistakes: 1,
                total: 3,
                accuracy: 67,
                rank: "average".to_owned(),
            })
        );
        assert!(session.is_finished());
    }

    #[test]
    fn test_stale_or_early_continuations_are_ignored() {
        let pool = pool_of(1);
        let mut session = QuizSession::start(5, "lab", "t", &pool, None, &mut MockRng).unwrap();
        let tiers = default_rank_thresholds();
        let ranks = RankEngine::new(&tiers, "poor");

        assert_eq!(
            session.resume(QuizResume { serial: 5 }, &ranks),
            QuizStep::Ignored
        );
        assert_eq!(
            session.resume(QuizResume { serial: 4 }, &ranks),
            QuizStep::Ignored
        );
    }

    #[test]
    fn test_accuracy_never_goes_negative() {
        let tiers = default_rank_thresholds();
        let ranks = RankEngine::new(&tiers, "poor");

        let result = QuizResult::compute(2, 5, &ranks);

        assert_eq!(result.accuracy, 0);
        assert_eq!(result.rank, "poor");
        assert_eq!(QuizResult::compute(3, 0, &ranks).accuracy, 100);
        assert_eq!(QuizResult::compute(8, 1, &ranks).accuracy, 88);
    }
}
