// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views of a run for display sinks

use crate::run::{PipelineRun, RunId, RunState};
use crate::stage::{StageId, StageStatus};
use serde::{Deserialize, Serialize};

/// One stage as a progress UI renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub id: StageId,
    pub title: String,
    pub description: String,
    pub status: StageStatus,
    pub progress: f64,
}

/// Whole-run view, taken in one piece so it is never torn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id: RunId,
    pub state: RunState,
    pub stages: Vec<StageSnapshot>,
    pub overall_progress: f64,
    pub is_complete: bool,
}

impl RunSnapshot {
    pub fn completed_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Completed)
            .count()
    }

    pub fn processing(&self) -> Option<&StageSnapshot> {
        self.stages
            .iter()
            .find(|s| s.status == StageStatus::Processing)
    }
}

impl From<&PipelineRun> for RunSnapshot {
    fn from(run: &PipelineRun) -> Self {
        RunSnapshot {
            run_id: run.id.clone(),
            state: run.state,
            stages: run
                .stages
                .iter()
                .map(|s| StageSnapshot {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    description: s.description.clone(),
                    status: s.status,
                    progress: s.progress,
                })
                .collect(),
            overall_progress: run.overall_progress(),
            is_complete: run.is_complete(),
        }
    }
}
