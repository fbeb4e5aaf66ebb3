// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for starting and configuring pipeline runs

use crate::run::RunId;
use crate::stage::StageId;
use thiserror::Error;

/// Broad classification of a [`SimulatorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the simulator cannot accept
    InvalidArgument,
    /// The run is not in a state that allows the request.
    ///
    /// Cancel and advance on a finished run are no-ops, so nothing in this
    /// crate currently returns this kind.
    InvalidState,
}

/// Caller misuse detected when a run is created or started
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulatorError {
    #[error("a pipeline run needs at least one stage")]
    EmptyStages,
    #[error("duplicate stage id: {0}")]
    DuplicateStage(StageId),
    #[error("run {0} has already been started")]
    AlreadyStarted(RunId),
    #[error("invalid simulator config: {0}")]
    InvalidConfig(String),
}

impl SimulatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulatorError::EmptyStages
            | SimulatorError::DuplicateStage(_)
            | SimulatorError::AlreadyStarted(_)
            | SimulatorError::InvalidConfig(_) => ErrorKind::InvalidArgument,
        }
    }
}
