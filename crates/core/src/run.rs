// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run state machine
//!
//! A run owns an ordered list of stages and walks them one at a time:
//!
//! ```text
//! Idle --Start--> Starting --Advance--> Running --Tick*--> Settling --Advance--> Running ...
//!                                          \__ last stage done __> Complete
//! any non-terminal state --Cancel--> Cancelled
//! ```
//!
//! All waiting is expressed as timer effects; the driver arms them and feeds
//! `Advance`/`Tick` back in when they fire.

use crate::clock::Clock;
use crate::config::SimulatorConfig;
use crate::effect::{Effect, Event, TimerId};
use crate::error::SimulatorError;
use crate::stage::{Stage, StageDefinition, StageEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Unique identifier for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        RunId(s)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        RunId(s.to_string())
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Created, `Start` not yet received
    Idle,
    /// Waiting out the start delay
    Starting,
    /// A stage is processing and ticking
    Running,
    /// A stage just completed; waiting out the settle delay
    Settling,
    /// Every stage completed
    Complete,
    /// Stopped by the caller
    Cancelled,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Starting => "starting",
            RunState::Running => "running",
            RunState::Settling => "settling",
            RunState::Complete => "complete",
            RunState::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Events that can change a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEvent {
    /// Arm the start delay
    Start,
    /// Start/settle delay elapsed: begin the next stage
    Advance,
    /// Tick timer fired with a freshly drawn increment
    Tick { increment: f64 },
    /// Stop everything
    Cancel,
}

/// One execution of an ordered stage sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub id: RunId,
    pub stages: Vec<Stage>,
    /// Index of the stage that is (or will next be) processing
    pub current: usize,
    pub state: RunState,
    pub config: SimulatorConfig,
    pub created_at: Instant,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
}

impl PipelineRun {
    /// Create a new run in the Idle state with every stage Pending
    pub fn new(
        id: impl Into<RunId>,
        definitions: Vec<StageDefinition>,
        config: SimulatorConfig,
        clock: &impl Clock,
    ) -> Result<Self, SimulatorError> {
        if definitions.is_empty() {
            return Err(SimulatorError::EmptyStages);
        }
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(&def.id) {
                return Err(SimulatorError::DuplicateStage(def.id.clone()));
            }
        }
        config
            .validate()
            .map_err(|e| SimulatorError::InvalidConfig(e.to_string()))?;

        Ok(PipelineRun {
            id: id.into(),
            stages: definitions.into_iter().map(Stage::new).collect(),
            current: 0,
            state: RunState::Idle,
            config,
            created_at: clock.now(),
            started_at: None,
            finished_at: None,
        })
    }

    /// Timer driving progress ticks of the processing stage
    pub fn tick_timer(&self) -> TimerId {
        format!("{}:tick", self.id)
    }

    /// Timer for the start and settle delays
    pub fn advance_timer(&self) -> TimerId {
        format!("{}:advance", self.id)
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: RunEvent, clock: &impl Clock) -> (PipelineRun, Vec<Effect>) {
        let now = clock.now();

        match (self.state, event) {
            // Idle → Starting
            (RunState::Idle, RunEvent::Start) => {
                let run = PipelineRun {
                    state: RunState::Starting,
                    started_at: Some(now),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Emit(Event::RunStarted {
                        run_id: self.id.clone(),
                    }),
                    Effect::SetTimer {
                        id: self.advance_timer(),
                        duration: self.config.start_delay,
                        repeat: None,
                    },
                ];
                (run, effects)
            }

            // Starting/Settling → Running on the next stage
            (RunState::Starting | RunState::Settling, RunEvent::Advance) => {
                let Some(stage) = self.stages.get(self.current) else {
                    // Unreachable through transitions: the last completion goes
                    // straight to Complete
                    return self.finish(now);
                };
                let (stage, mut effects) =
                    stage.transition(&self.id, self.current, StageEvent::Begin, clock);

                let mut stages = self.stages.clone();
                stages[self.current] = stage;
                let run = PipelineRun {
                    stages,
                    state: RunState::Running,
                    ..self.clone()
                };
                effects.push(Effect::SetTimer {
                    id: self.tick_timer(),
                    duration: self.config.tick_interval,
                    repeat: Some(self.config.tick_interval),
                });
                (run, effects)
            }

            // Running: tick the processing stage
            (RunState::Running, RunEvent::Tick { increment }) => {
                let Some(stage) = self.stages.get(self.current) else {
                    return (self.clone(), vec![]);
                };
                let (stage, mut effects) = stage.transition(
                    &self.id,
                    self.current,
                    StageEvent::Tick {
                        increment,
                        cap: self.config.display_cap,
                    },
                    clock,
                );
                let done = stage.is_completed();
                let stage_id = stage.id.clone();

                let mut stages = self.stages.clone();
                stages[self.current] = stage;
                let mut run = PipelineRun {
                    stages,
                    ..self.clone()
                };
                if !done {
                    return (run, effects);
                }

                // Stage finished: stop ticking, publish overall progress
                let index = run.current;
                run.current += 1;
                effects.push(Effect::CancelTimer {
                    id: self.tick_timer(),
                });
                effects.push(Effect::Emit(Event::StageCompleted {
                    run_id: self.id.clone(),
                    stage_id,
                    index,
                    overall_progress: run.overall_progress(),
                }));

                if run.current >= run.stages.len() {
                    let (run, finish) = run.finish(now);
                    effects.extend(finish);
                    return (run, effects);
                }

                run.state = RunState::Settling;
                effects.push(Effect::SetTimer {
                    id: self.advance_timer(),
                    duration: self.config.settle_delay,
                    repeat: None,
                });
                (run, effects)
            }

            // Any live state → Cancelled
            (
                RunState::Idle | RunState::Starting | RunState::Running | RunState::Settling,
                RunEvent::Cancel,
            ) => {
                let run = PipelineRun {
                    state: RunState::Cancelled,
                    finished_at: Some(now),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::CancelTimer {
                        id: self.tick_timer(),
                    },
                    Effect::CancelTimer {
                        id: self.advance_timer(),
                    },
                    Effect::Emit(Event::RunCancelled {
                        run_id: self.id.clone(),
                    }),
                ];
                (run, effects)
            }

            // Invalid transitions (including anything after a terminal state) - no change
            _ => (self.clone(), vec![]),
        }
    }

    fn finish(&self, now: Instant) -> (PipelineRun, Vec<Effect>) {
        let run = PipelineRun {
            state: RunState::Complete,
            finished_at: Some(now),
            ..self.clone()
        };
        let effects = vec![Effect::Emit(Event::RunCompleted {
            run_id: self.id.clone(),
        })];
        (run, effects)
    }

    pub fn completed_count(&self) -> usize {
        self.stages.iter().filter(|s| s.is_completed()).count()
    }

    /// Share of completed stages, in percent
    pub fn overall_progress(&self) -> f64 {
        self.completed_count() as f64 / self.stages.len() as f64 * 100.0
    }

    /// True iff every stage is completed
    pub fn is_complete(&self) -> bool {
        self.stages.iter().all(|s| s.is_completed())
    }

    /// The stage currently processing, if any
    pub fn processing_stage(&self) -> Option<&Stage> {
        self.stages.iter().find(|s| s.is_processing())
    }

    pub fn is_started(&self) -> bool {
        self.state != RunState::Idle
    }

    /// Complete or cancelled; no further transitions apply
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, RunState::Complete | RunState::Cancelled)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
