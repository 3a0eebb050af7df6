//! The dialogue controller.
//!
//! ```text
//! Idle ──show──▶ Typing ──last char / skip──▶ Complete ──advance──▶ Idle
//!                  │ ▲
//!            pause │ │ resume
//!                  ▼ │
//!                 Paused
//! ```
//!
//! Exactly one session is active at a time. A new `show` preempts the
//! current session and drops its continuation unfired. A continuation is
//! handed back at most once, and only from `advance_or_skip` while
//! `Complete`.

use glitchwatch_core::collaborators::Speaker;
use glitchwatch_core::timer::{TimerHandle, TimerRegistry};
use tracing::debug;

use super::observer::RevealObserver;

/// Identifies one `show` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogueId(u64);

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    /// No dialogue box.
    Idle,
    /// Characters are being revealed.
    Typing,
    /// Typing is suspended; the revealed offset is kept.
    Paused,
    /// Full text visible, waiting for the player.
    Complete,
}

/// A line to deliver and what to do once the player acknowledges it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueRequest<C> {
    /// Who says it.
    pub speaker: Speaker,
    /// What is said.
    pub text: String,
    /// Handed back when the player closes the box.
    pub continuation: Option<C>,
}

impl<C> DialogueRequest<C> {
    /// A request with no continuation.
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            continuation: None,
        }
    }

    /// Attaches a continuation.
    #[must_use]
    pub fn then(mut self, continuation: C) -> Self {
        self.continuation = Some(continuation);
        self
    }
}

/// What `advance_or_skip` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance<C> {
    /// Nothing was showing.
    Idle,
    /// Typing was cut short; the full text is now visible.
    Skipped,
    /// The box closed. Carries the session's continuation, if it had one.
    Closed(Option<C>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Typing,
    Paused,
    Complete,
}

#[derive(Debug)]
struct RevealTick {
    dialogue: DialogueId,
}

#[derive(Debug)]
struct ActiveDialogue<C> {
    id: DialogueId,
    speaker: Speaker,
    text: String,
    revealed_bytes: usize,
    phase: SessionPhase,
    continuation: Option<C>,
    pending_tick: Option<TimerHandle>,
}

/// Drives one typed-text session at a time.
#[derive(Debug)]
pub struct DialogueController<C> {
    typing_interval_ms: u64,
    timers: TimerRegistry<RevealTick>,
    active: Option<ActiveDialogue<C>>,
    next_id: u64,
}

impl<C> DialogueController<C> {
    /// Creates an idle controller revealing one character every
    /// `typing_interval_ms` (minimum 1).
    #[must_use]
    pub fn new(typing_interval_ms: u64) -> Self {
        Self {
            typing_interval_ms: typing_interval_ms.max(1),
            timers: TimerRegistry::new(),
            active: None,
            next_id: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn phase(&self) -> DialoguePhase {
        match self.active.as_ref().map(|a| a.phase) {
            None => DialoguePhase::Idle,
            Some(SessionPhase::Typing) => DialoguePhase::Typing,
            Some(SessionPhase::Paused) => DialoguePhase::Paused,
            Some(SessionPhase::Complete) => DialoguePhase::Complete,
        }
    }

    /// Returns `true` unless idle.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active session's id.
    #[must_use]
    pub fn current_id(&self) -> Option<DialogueId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// The active session's speaker.
    #[must_use]
    pub fn speaker(&self) -> Option<Speaker> {
        self.active.as_ref().map(|a| a.speaker)
    }

    /// Text revealed so far; empty when idle.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        self.active
            .as_ref()
            .map_or("", |a| &a.text[..a.revealed_bytes])
    }

    /// The active session's full text; empty when idle.
    #[must_use]
    pub fn full_text(&self) -> &str {
        self.active.as_ref().map_or("", |a| a.text.as_str())
    }

    /// Returns `true` if the active session still holds a continuation.
    #[must_use]
    pub fn has_pending_continuation(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.continuation.is_some())
    }

    /// Starts delivering `request`, preempting whatever was showing.
    pub fn show(
        &mut self,
        request: DialogueRequest<C>,
        observer: &mut dyn RevealObserver,
    ) -> DialogueId {
        if let Some(previous) = self.active.take() {
            self.timers.cancel_all();
            debug!(
                preempted = previous.id.0,
                dropped_continuation = previous.continuation.is_some(),
                "dialogue preempted"
            );
        }

        let id = DialogueId(self.next_id);
        self.next_id += 1;

        let DialogueRequest {
            speaker,
            text,
            continuation,
        } = request;
        observer.on_started(speaker, &text);

        let mut session = ActiveDialogue {
            id,
            speaker,
            text,
            revealed_bytes: 0,
            phase: SessionPhase::Typing,
            continuation,
            pending_tick: None,
        };
        if session.text.is_empty() {
            session.phase = SessionPhase::Complete;
            observer.on_finished(speaker);
        } else {
            session.pending_tick = Some(
                self.timers
                    .schedule(self.typing_interval_ms, RevealTick { dialogue: id }),
            );
        }
        self.active = Some(session);
        id
    }

    /// Advances virtual time, revealing every character that came due.
    pub fn tick(&mut self, delta_ms: u64, observer: &mut dyn RevealObserver) {
        let until = self.timers.now_ms().saturating_add(delta_ms);
        while let Some((_, tick)) = self.timers.pop_due(until) {
            self.reveal_next(tick.dialogue, observer);
        }
        self.timers.advance_to(until);
    }

    fn reveal_next(&mut self, id: DialogueId, observer: &mut dyn RevealObserver) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        if session.id != id || session.phase != SessionPhase::Typing {
            return;
        }
        session.pending_tick = None;

        let Some(ch) = session.text[session.revealed_bytes..].chars().next() else {
            return;
        };
        session.revealed_bytes += ch.len_utf8();
        observer.on_character(session.speaker, ch);

        if session.revealed_bytes >= session.text.len() {
            session.phase = SessionPhase::Complete;
            observer.on_finished(session.speaker);
        } else {
            session.pending_tick = Some(
                self.timers
                    .schedule(self.typing_interval_ms, RevealTick { dialogue: id }),
            );
        }
    }

    /// The player's "next" button.
    ///
    /// While typing (or paused) this is a skip: the rest of the text appears
    /// and the continuation is kept. While complete it closes the box and
    /// hands the continuation back.
    pub fn advance_or_skip(&mut self, observer: &mut dyn RevealObserver) -> Advance<C> {
        let Some(session) = self.active.as_mut() else {
            return Advance::Idle;
        };
        match session.phase {
            SessionPhase::Typing | SessionPhase::Paused => {
                self.timers.cancel_all();
                session.pending_tick = None;
                session.revealed_bytes = session.text.len();
                session.phase = SessionPhase::Complete;
                observer.on_finished(session.speaker);
                Advance::Skipped
            }
            SessionPhase::Complete => {
                let continuation = self.active.take().and_then(|s| s.continuation);
                Advance::Closed(continuation)
            }
        }
    }

    /// Suspends typing, keeping the revealed offset and the continuation.
    ///
    /// Returns `false` unless the controller was typing.
    pub fn pause(&mut self) -> bool {
        let Some(session) = self.active.as_mut() else {
            return false;
        };
        if session.phase != SessionPhase::Typing {
            return false;
        }
        if let Some(handle) = session.pending_tick.take() {
            self.timers.cancel(handle);
        }
        session.phase = SessionPhase::Paused;
        true
    }

    /// Continues the paused session from where it stopped.
    ///
    /// Returns `false` unless the controller was paused.
    pub fn resume(&mut self) -> bool {
        let Some(session) = self.active.as_mut() else {
            return false;
        };
        if session.phase != SessionPhase::Paused {
            return false;
        }
        session.phase = SessionPhase::Typing;
        session.pending_tick = Some(self.timers.schedule(
            self.typing_interval_ms,
            RevealTick {
                dialogue: session.id,
            },
        ));
        true
    }

    /// Drops the active session without handing back its continuation.
    ///
    /// Returns `true` if something was showing.
    pub fn cancel(&mut self) -> bool {
        self.timers.cancel_all();
        match self.active.take() {
            Some(session) => {
                debug!(
                    dialogue = session.id.0,
                    dropped_continuation = session.continuation.is_some(),
                    "dialogue cancelled"
                );
                true
            }
            None => false,
        }
    }
}
