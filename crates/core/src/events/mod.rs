// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event delivery for display sinks and navigation triggers
//!
//! This module provides:
//! - `EventBus` - Route run and stage events to matching subscribers
//! - `EventLog` - In-memory, timestamped history of a run's events
//! - `EventPattern` - Pattern matching on event names like `stage:*`

mod bus;
mod log;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use log::{EventLog, EventRecord};
pub use subscription::{EventPattern, SubscriberId, Subscription};
