// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identifier generation

use crate::run::RunId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out identifiers for new pipeline runs
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;

    fn next_run_id(&self) -> RunId {
        RunId(self.next())
    }
}

/// Random ids of the form `run-<8 hex chars>`
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        format!("run-{}", &uuid[..8])
    }
}

/// Predictable `<prefix>-<n>` ids for tests
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("run")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
