// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll-driven simulator
//!
//! Owns one pipeline run together with its timers. Nothing happens unless
//! [`Simulator::poll`] is called: it fires every timer that is due on the
//! injected clock, feeds the matching event into the run's state machine and
//! executes the resulting effects. That makes the whole flow deterministic
//! under a fake clock and a fixed entropy source.

use cf_core::{
    Clock, Effect, Entropy, Event, EventBus, EventLog, EventReceiver, IdGen, PipelineRun,
    RunEvent, RunId, RunSnapshot, ScheduledKind, Scheduler, SimulatorConfig, SimulatorError,
    StageDefinition, Subscription, TimerId, TimerToken,
};
use std::collections::HashMap;
use std::time::Instant;

/// Drives a single pipeline run
pub struct Simulator<C: Clock, E: Entropy, I: IdGen> {
    config: SimulatorConfig,
    clock: C,
    entropy: E,
    id_gen: I,
    run: Option<PipelineRun>,
    scheduler: Scheduler,
    /// Live arming per timer id, so CancelTimer hits exactly that arming
    tokens: HashMap<TimerId, TimerToken>,
    /// Deadline of the timer being handled; new timers count from here
    firing_at: Option<Instant>,
    bus: EventBus,
    log: EventLog,
}

impl<C, E, I> Simulator<C, E, I>
where
    C: Clock,
    E: Entropy,
    I: IdGen,
{
    pub fn new(config: SimulatorConfig, clock: C, entropy: E, id_gen: I) -> Self {
        Self {
            config,
            clock,
            entropy,
            id_gen,
            run: None,
            scheduler: Scheduler::new(),
            tokens: HashMap::new(),
            firing_at: None,
            bus: EventBus::new(),
            log: EventLog::new(),
        }
    }

    /// Start a run under a generated id
    pub fn start(&mut self, stages: Vec<StageDefinition>) -> Result<RunSnapshot, SimulatorError> {
        let id = self.id_gen.next_run_id();
        self.start_with_id(id, stages)
    }

    /// Start a run under a caller-chosen id
    ///
    /// Returns immediately with the first snapshot; stages advance on later
    /// polls. A simulator runs at most one pipeline: a second start fails
    /// and leaves the first run untouched.
    pub fn start_with_id(
        &mut self,
        id: impl Into<RunId>,
        stages: Vec<StageDefinition>,
    ) -> Result<RunSnapshot, SimulatorError> {
        if let Some(run) = &self.run {
            return Err(SimulatorError::AlreadyStarted(run.id.clone()));
        }

        let run = PipelineRun::new(id, stages, self.config.clone(), &self.clock)?;
        tracing::info!(run_id = %run.id, stages = run.stages.len(), "pipeline run started");

        let created = Event::RunCreated {
            run_id: run.id.clone(),
            stages: run.stages.len(),
        };
        self.emit(created);

        let (run, effects) = run.transition(RunEvent::Start, &self.clock);
        let snapshot = RunSnapshot::from(&run);
        self.run = Some(run);
        self.execute_all(effects);

        Ok(snapshot)
    }

    /// Fire every due timer and return the events produced
    pub fn poll(&mut self) -> Vec<Event> {
        let mut produced = Vec::new();
        let now = self.clock.now();

        while let Some(item) = self.scheduler.poll_next(now) {
            // A one-shot that fired is no longer cancellable
            if item.repeat.is_none() {
                self.tokens.remove(&item.id);
            }
            self.firing_at = Some(item.fire_at);
            let event = match item.kind {
                ScheduledKind::Tick => RunEvent::Tick {
                    increment: self.entropy.increment(self.config.max_increment),
                },
                ScheduledKind::Advance => RunEvent::Advance,
            };
            produced.extend(self.apply(event));
        }
        self.firing_at = None;

        produced
    }

    /// Stop the run; a no-op once it has finished or if it never started
    pub fn cancel(&mut self) -> Vec<Event> {
        match &self.run {
            Some(run) if !run.is_terminal() => {
                let events = self.apply(RunEvent::Cancel);
                // Nothing may fire after a cancel, whatever the run asked for
                self.scheduler.clear();
                self.tokens.clear();
                events
            }
            _ => Vec::new(),
        }
    }

    fn apply(&mut self, event: RunEvent) -> Vec<Event> {
        let Some(run) = &self.run else {
            return Vec::new();
        };
        let (run, effects) = run.transition(event, &self.clock);
        self.run = Some(run);
        self.execute_all(effects)
    }

    fn execute_all(&mut self, effects: Vec<Effect>) -> Vec<Event> {
        effects
            .into_iter()
            .filter_map(|effect| self.execute(effect))
            .collect()
    }

    /// Execute one effect; returns the event if it was an emit
    fn execute(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Emit(event) => {
                self.emit(event.clone());
                Some(event)
            }
            Effect::SetTimer {
                id,
                duration,
                repeat,
            } => {
                let kind = match &self.run {
                    Some(run) if run.tick_timer() == id => ScheduledKind::Tick,
                    _ => ScheduledKind::Advance,
                };
                let base = self.firing_at.unwrap_or_else(|| self.clock.now());
                let fire_at = base + duration;
                let token = match repeat {
                    Some(interval) => {
                        self.scheduler
                            .schedule_repeating(id.clone(), fire_at, interval, kind)
                    }
                    None => self.scheduler.schedule(id.clone(), fire_at, kind),
                };
                tracing::trace!(timer = %id, delay_ms = duration.as_millis() as u64, "timer armed");
                self.tokens.insert(id, token);
                None
            }
            Effect::CancelTimer { id } => {
                if let Some(token) = self.tokens.remove(&id) {
                    self.scheduler.cancel(&token);
                    tracing::trace!(timer = %id, "timer cancelled");
                }
                None
            }
        }
    }

    fn emit(&mut self, event: Event) {
        match &event {
            Event::StageProgressed {
                stage_id, progress, ..
            } => tracing::trace!(stage = %stage_id, progress, "stage progress"),
            Event::StageStarted {
                stage_id, index, ..
            } => tracing::debug!(stage = %stage_id, index, "stage started"),
            Event::StageCompleted {
                stage_id,
                overall_progress,
                ..
            } => tracing::debug!(stage = %stage_id, overall_progress, "stage completed"),
            Event::RunCompleted { run_id } => {
                tracing::info!(run_id = %run_id, "pipeline run complete")
            }
            Event::RunCancelled { run_id } => {
                tracing::info!(run_id = %run_id, "pipeline run cancelled")
            }
            Event::RunCreated { .. } | Event::RunStarted { .. } => {}
        }
        self.log.append(event.clone(), self.clock.now());
        self.bus.publish(&event);
    }

    /// When the next timer is due, if any
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.scheduler.next_fire_time()
    }

    /// Consistent view of the run, `None` before start
    pub fn snapshot(&self) -> Option<RunSnapshot> {
        self.run.as_ref().map(RunSnapshot::from)
    }

    /// True once the run completed or was cancelled
    pub fn is_finished(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.is_terminal())
    }

    /// Subscribe to events whose names match any of `patterns`
    pub fn subscribe(&self, id: &str, patterns: &[&str]) -> EventReceiver {
        self.bus.subscribe(Subscription::new(id, patterns))
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Every event emitted so far, with clock readings
    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod tests;
