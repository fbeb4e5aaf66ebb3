// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage state machine
//!
//! A stage is one named unit of simulated work ("Transcribing Audio").
//! It moves Pending → Processing → Completed and never goes back.

use crate::clock::Clock;
use crate::effect::{Effect, Event};
use crate::run::RunId;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Progress at which a stage is considered done
pub const STAGE_DONE: f64 = 100.0;

/// Stable identifier of a stage within a run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub String);

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StageId {
    fn from(s: String) -> Self {
        StageId(s)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        StageId(s.to_string())
    }
}

/// Static description of a stage, supplied when a run starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: StageId,
    pub title: String,
    pub description: String,
}

impl StageDefinition {
    pub fn new(
        id: impl Into<StageId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where a stage is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Processing,
    Completed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::Pending => write!(f, "pending"),
            StageStatus::Processing => write!(f, "processing"),
            StageStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Events that can change a stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageEvent {
    /// Start processing
    Begin,
    /// One timer tick. `increment` is added to the accumulated progress and
    /// the displayed value is held at or below `cap` until the stage is done.
    Tick { increment: f64, cap: f64 },
}

/// A stage inside a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub id: StageId,
    pub title: String,
    pub description: String,
    pub status: StageStatus,
    /// Displayed progress in `[0, 100]`
    pub progress: f64,
    /// Raw sum of tick increments, may run past 100 on the final tick
    accumulated: f64,
    pub started_at: Option<Instant>,
    pub completed_at: Option<Instant>,
}

impl Stage {
    /// Create a new stage in the Pending state
    pub fn new(definition: StageDefinition) -> Self {
        Stage {
            id: definition.id,
            title: definition.title,
            description: definition.description,
            status: StageStatus::Pending,
            progress: 0.0,
            accumulated: 0.0,
            started_at: None,
            completed_at: None,
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(
        &self,
        run_id: &RunId,
        index: usize,
        event: StageEvent,
        clock: &impl Clock,
    ) -> (Stage, Vec<Effect>) {
        match (self.status, event) {
            // Pending → Processing
            (StageStatus::Pending, StageEvent::Begin) => {
                let stage = Stage {
                    status: StageStatus::Processing,
                    started_at: Some(clock.now()),
                    ..self.clone()
                };
                let effects = vec![Effect::Emit(Event::StageStarted {
                    run_id: run_id.clone(),
                    stage_id: self.id.clone(),
                    index,
                })];
                (stage, effects)
            }

            // Processing → Completed once the accumulated progress hits 100
            (StageStatus::Processing, StageEvent::Tick { increment, cap }) => {
                let accumulated = self.accumulated + increment.max(0.0);
                if accumulated >= STAGE_DONE {
                    let stage = Stage {
                        status: StageStatus::Completed,
                        progress: STAGE_DONE,
                        accumulated,
                        completed_at: Some(clock.now()),
                        ..self.clone()
                    };
                    // The run emits StageCompleted once it has recomputed
                    // overall progress
                    return (stage, vec![]);
                }

                // Never let the display move backwards, even if the cap shrinks
                let progress = accumulated.min(cap).max(self.progress);
                let stage = Stage {
                    progress,
                    accumulated,
                    ..self.clone()
                };
                let effects = vec![Effect::Emit(Event::StageProgressed {
                    run_id: run_id.clone(),
                    stage_id: self.id.clone(),
                    progress,
                })];
                (stage, effects)
            }

            // Invalid transitions - no change
            _ => (self.clone(), vec![]),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == StageStatus::Pending
    }

    pub fn is_processing(&self) -> bool {
        self.status == StageStatus::Processing
    }

    pub fn is_completed(&self) -> bool {
        self.status == StageStatus::Completed
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
