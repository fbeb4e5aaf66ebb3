// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cf-core: Core library for clipflow
//!
//! This crate provides:
//! - Pure state machines for stages and pipeline runs
//! - Injectable time, id and randomness sources
//! - Effect-based timer scheduling and an event bus
//! - In-memory studio view state (dashboard, upload, preview, export)

pub mod clock;
pub mod entropy;
pub mod id;

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod studio;

// State machines (order matters for dependencies)
pub mod effect;
pub mod stage;
pub mod run;
pub mod snapshot;

// Re-exports
pub use catalog::processing_stages;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, SimulatorConfig, MAX_DELAY};
pub use effect::{Effect, Event, TimerId};
pub use entropy::{Entropy, FixedEntropy, SeededEntropy, ThreadEntropy};
pub use error::{ErrorKind, SimulatorError};
pub use events::{
    EventBus, EventLog, EventPattern, EventReceiver, EventRecord, SubscriberId, Subscription,
};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use run::{PipelineRun, RunEvent, RunId, RunState};
pub use scheduler::{ScheduledItem, ScheduledKind, Scheduler, TimerToken};
pub use snapshot::{RunSnapshot, StageSnapshot};
pub use stage::{Stage, StageDefinition, StageEvent, StageId, StageStatus};
