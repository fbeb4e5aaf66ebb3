// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and events for state machine orchestration

use crate::run::RunId;
use crate::stage::StageId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a timer owned by a run
pub type TimerId = String;

/// Effects are side effects that state machines request
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Emit an event for other components to observe
    Emit(Event),
    /// Arm a timer; `repeat` makes it fire every interval until cancelled
    SetTimer {
        id: TimerId,
        duration: Duration,
        repeat: Option<Duration>,
    },
    /// Disarm a timer
    CancelTimer { id: TimerId },
}

/// Events emitted by state machines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RunCreated {
        run_id: RunId,
        stages: usize,
    },
    RunStarted {
        run_id: RunId,
    },
    RunCompleted {
        run_id: RunId,
    },
    RunCancelled {
        run_id: RunId,
    },
    StageStarted {
        run_id: RunId,
        stage_id: StageId,
        index: usize,
    },
    StageProgressed {
        run_id: RunId,
        stage_id: StageId,
        progress: f64,
    },
    StageCompleted {
        run_id: RunId,
        stage_id: StageId,
        index: usize,
        overall_progress: f64,
    },
}

impl Event {
    /// Get the event name for pattern matching
    pub fn name(&self) -> String {
        match self {
            Event::RunCreated { .. } => "run:created".to_string(),
            Event::RunStarted { .. } => "run:started".to_string(),
            Event::RunCompleted { .. } => "run:complete".to_string(),
            Event::RunCancelled { .. } => "run:cancelled".to_string(),
            Event::StageStarted { .. } => "stage:started".to_string(),
            Event::StageProgressed { .. } => "stage:progress".to_string(),
            Event::StageCompleted { .. } => "stage:completed".to_string(),
        }
    }

    pub fn run_id(&self) -> &RunId {
        match self {
            Event::RunCreated { run_id, .. }
            | Event::RunStarted { run_id }
            | Event::RunCompleted { run_id }
            | Event::RunCancelled { run_id }
            | Event::StageStarted { run_id, .. }
            | Event::StageProgressed { run_id, .. }
            | Event::StageCompleted { run_id, .. } => run_id,
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
