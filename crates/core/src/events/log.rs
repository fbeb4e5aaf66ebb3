// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory event history
//!
//! Runs are ephemeral, so the log lives only as long as its owner. It keeps
//! the clock reading of every event, which is how callers verify that
//! stages completed in order.

use super::subscription::EventPattern;
use crate::effect::Event;
use std::time::Instant;

/// A logged event with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 1
    pub sequence: u64,
    /// Clock reading when the event was recorded
    pub at: Instant,
    pub name: String,
    pub event: Event,
}

/// Append-only list of events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event stamped with `at`
    pub fn append(&mut self, event: Event, at: Instant) -> &EventRecord {
        let record = EventRecord {
            sequence: self.records.len() as u64 + 1,
            at,
            name: event.name(),
            event,
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records whose names match `pattern`, oldest first
    pub fn matching(&self, pattern: &EventPattern) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|r| pattern.matches(&r.name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
