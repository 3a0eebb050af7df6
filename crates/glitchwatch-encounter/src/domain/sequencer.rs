//! The encounter stepper.
//!
//! One run is active at a time. The stepper pops stages in order and
//! executes side-effect stages immediately; it suspends on `Delay` (a timer
//! in the sequencer's own registry) and on acknowledged `Say` (a dialogue
//! continuation carrying the run id). Timers and continuations from an
//! older run are recognised by their run id and dropped. Starting a run
//! while another is active aborts the older one first, switching off
//! whatever it left on screen or playing.

use std::collections::VecDeque;

use glitchwatch_content::domain::config::EncounterTiming;
use glitchwatch_content::domain::scene::EncounterScript;
use glitchwatch_core::collaborators::VisualEffect;
use glitchwatch_core::timer::{TimerHandle, TimerRegistry};
use glitchwatch_dialogue::application::voiced::VoicedReveal;
use glitchwatch_dialogue::domain::controller::DialogueRequest;
use tracing::{debug, info};

use super::context::{EncounterContext, EncounterResume};
use super::stage::{Stage, intro_stages, victory_stages};

/// Requests the host must act on after a sequencer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterSignal {
    /// Open the module's quiz.
    OpenQuiz {
        /// Module scene.
        scene_id: String,
        /// Quiz hotspot to open.
        hotspot_id: String,
    },
    /// Show the hub without tearing the run down.
    ReturnToHub {
        /// Module that was just beaten.
        scene_id: String,
    },
    /// Every module is complete.
    GameFinale {
        /// The module completed last.
        scene_id: String,
    },
}

/// Which script a run is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// The antagonist appears and gates the quiz.
    Intro,
    /// The antagonist is defeated after the quiz.
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waiting {
    Nothing,
    Timer(TimerHandle),
    Dialogue,
}

#[derive(Debug)]
struct StageTimer {
    run: u64,
}

#[derive(Debug)]
struct ActiveRun {
    run: u64,
    kind: RunKind,
    scene_id: String,
    hotspot_id: String,
    stages: VecDeque<Stage>,
    waiting: Waiting,
}

/// Runs encounter scripts one stage at a time.
#[derive(Debug, Default)]
pub struct EventSequencer {
    timers: TimerRegistry<StageTimer>,
    active: Option<ActiveRun>,
    next_run: u64,
}

impl EventSequencer {
    /// Creates an idle sequencer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a run is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Script kind of the active run.
    #[must_use]
    pub fn active_kind(&self) -> Option<RunKind> {
        self.active.as_ref().map(|r| r.kind)
    }

    /// Scene of the active run.
    #[must_use]
    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_ref().map(|r| r.scene_id.as_str())
    }

    /// Stages not yet executed in the active run.
    #[must_use]
    pub fn remaining_stages(&self) -> usize {
        self.active.as_ref().map_or(0, |r| r.stages.len())
    }

    /// Returns `true` if the active run is parked on a dialogue.
    #[must_use]
    pub fn is_waiting_on_dialogue(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|r| r.waiting == Waiting::Dialogue)
    }

    /// Number of stage timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Starts the antagonist sequence for a module, at most once per scene.
    ///
    /// Any active run is aborted first. If the scene's encounter already
    /// fired, nothing is shown and the quiz opens straight away.
    pub fn trigger<C: From<EncounterResume>>(
        &mut self,
        scene_id: &str,
        hotspot_id: &str,
        script: &EncounterScript,
        timing: &EncounterTiming,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        self.abort(ctx);
        if !ctx.progress.mark_encounter_fired(scene_id) {
            debug!(scene_id, "encounter already fired, opening quiz");
            return vec![EncounterSignal::OpenQuiz {
                scene_id: scene_id.to_owned(),
                hotspot_id: hotspot_id.to_owned(),
            }];
        }
        let stages = intro_stages(script, timing);
        self.start(RunKind::Intro, scene_id, hotspot_id, stages, ctx)
    }

    /// Starts the victory sequence after a completed quiz.
    pub fn on_victory<C: From<EncounterResume>>(
        &mut self,
        scene_id: &str,
        script: &EncounterScript,
        timing: &EncounterTiming,
        hub_welcome: Option<&str>,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        self.abort(ctx);
        let stages = victory_stages(script, timing, hub_welcome);
        self.start(RunKind::Victory, scene_id, "", stages, ctx)
    }

    fn start<C: From<EncounterResume>>(
        &mut self,
        kind: RunKind,
        scene_id: &str,
        hotspot_id: &str,
        stages: Vec<Stage>,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        let run = self.next_run;
        self.next_run += 1;
        info!(run, ?kind, scene_id, stages = stages.len(), "encounter started");
        self.active = Some(ActiveRun {
            run,
            kind,
            scene_id: scene_id.to_owned(),
            hotspot_id: hotspot_id.to_owned(),
            stages: stages.into(),
            waiting: Waiting::Nothing,
        });
        self.step(ctx)
    }

    /// Advances virtual time, resuming the run when its delay elapses.
    pub fn tick<C: From<EncounterResume>>(
        &mut self,
        delta_ms: u64,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        let mut signals = Vec::new();
        let until = self.timers.now_ms().saturating_add(delta_ms);
        while let Some((handle, timer)) = self.timers.pop_due(until) {
            let expected = self
                .active
                .as_ref()
                .is_some_and(|r| r.run == timer.run && r.waiting == Waiting::Timer(handle));
            if !expected {
                debug!(run = timer.run, "stale encounter timer dropped");
                continue;
            }
            if let Some(active) = self.active.as_mut() {
                active.waiting = Waiting::Nothing;
            }
            signals.extend(self.step(ctx));
        }
        self.timers.advance_to(until);
        signals
    }

    /// Continues the run after the player closed a line it was waiting on.
    pub fn resume<C: From<EncounterResume>>(
        &mut self,
        token: EncounterResume,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        match self.active.as_mut() {
            Some(active) if active.run == token.run && active.waiting == Waiting::Dialogue => {
                active.waiting = Waiting::Nothing;
                self.step(ctx)
            }
            _ => {
                debug!(run = token.run, "stale encounter continuation dropped");
                Vec::new()
            }
        }
    }

    /// Cancels the active run and switches off what it may have started:
    /// overlays, the antagonist sprite, the alarm and the line it waits on.
    ///
    /// Returns `true` if a run was active.
    pub fn abort<C: From<EncounterResume>>(
        &mut self,
        ctx: &mut EncounterContext<'_, C>,
    ) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        match active.kind {
            RunKind::Intro => {
                ctx.view.set_effect(VisualEffect::Alert, false);
                ctx.view.set_effect(VisualEffect::Glitch, false);
            }
            RunKind::Victory => ctx.view.set_effect(VisualEffect::VictoryGlow, false),
        }
        ctx.view.set_antagonist_visible(false);
        if active.kind == RunKind::Intro {
            ctx.audio.stop_alarm();
        }
        if active.waiting == Waiting::Dialogue && ctx.dialogue.cancel() {
            ctx.audio.stop_speech();
        }
        self.cancel()
    }

    /// Abandons the active run. No further stage runs and no collaborator
    /// is called; see [`Self::abort`] for the variant that cleans up.
    ///
    /// Returns `true` if a run was active.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.timers.cancel_all();
        match self.active.take() {
            Some(run) => {
                info!(
                    run = run.run,
                    scene_id = %run.scene_id,
                    remaining = run.stages.len(),
                    timers = cancelled,
                    "encounter cancelled"
                );
                true
            }
            None => false,
        }
    }

    fn step<C: From<EncounterResume>>(
        &mut self,
        ctx: &mut EncounterContext<'_, C>,
    ) -> Vec<EncounterSignal> {
        let mut signals = Vec::new();
        loop {
            let Some(active) = self.active.as_mut() else {
                return signals;
            };
            if active.waiting != Waiting::Nothing {
                return signals;
            }
            let Some(stage) = active.stages.pop_front() else {
                info!(run = active.run, scene_id = %active.scene_id, "encounter finished");
                self.active = None;
                return signals;
            };
            debug!(run = active.run, stage = stage.name(), "encounter stage");

            match stage {
                Stage::PlayAlarm(clip) => ctx.audio.play_alarm(&clip),
                Stage::StopAlarm => ctx.audio.stop_alarm(),
                Stage::PlaySfx(clip) => ctx.audio.play_sfx(&clip),
                Stage::Effect(effect, enabled) => ctx.view.set_effect(effect, enabled),
                Stage::Antagonist(visible) => ctx.view.set_antagonist_visible(visible),
                Stage::Delay(ms) => {
                    let handle = self.timers.schedule(ms, StageTimer { run: active.run });
                    active.waiting = Waiting::Timer(handle);
                }
                Stage::Say {
                    speaker,
                    text,
                    await_ack,
                } => {
                    let mut request = DialogueRequest::new(speaker, text);
                    if await_ack {
                        request = request.then(C::from(EncounterResume { run: active.run }));
                        active.waiting = Waiting::Dialogue;
                    }
                    ctx.dialogue
                        .show(request, &mut VoicedReveal::new(&mut *ctx.audio));
                }
                Stage::CompleteModule => {
                    if ctx.progress.complete_module(&active.scene_id) {
                        info!(scene_id = %active.scene_id, "last module completed");
                        signals.push(EncounterSignal::GameFinale {
                            scene_id: active.scene_id.clone(),
                        });
                        active.stages.clear();
                    }
                }
                Stage::ResetScene => ctx.progress.reset_scene(&active.scene_id, true),
                Stage::ReturnToHub => signals.push(EncounterSignal::ReturnToHub {
                    scene_id: active.scene_id.clone(),
                }),
                Stage::OpenQuiz => signals.push(EncounterSignal::OpenQuiz {
                    scene_id: active.scene_id.clone(),
                    hotspot_id: active.hotspot_id.clone(),
                }),
            }
        }
    }
}
