// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name patterns and subscriptions

use crate::run::RunId;

/// Pattern over colon-separated event names
///
///   - `run:complete` matches only that name
///   - `stage:*` matches one trailing segment (`stage:started`, `stage:progress`)
///   - `run:**` matches the rest of the name, however long
///   - `*` alone matches single-segment names only; `**` alone matches every event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    pub fn matches(&self, event_name: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let mut actual = event_name.split(':');
        for wanted in self.0.split(':') {
            let segment = actual.next();
            match wanted {
                "**" => return true,
                "*" if segment.is_some_and(|s| !s.is_empty()) => {}
                literal if segment == Some(literal) => {}
                _ => return false,
            }
        }
        actual.next().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

/// Interest in event names, optionally narrowed to one run
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
    pub run: Option<RunId>,
}

impl Subscription {
    pub fn new(id: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns: patterns.iter().map(|p| EventPattern::new(p)).collect(),
            run: None,
        }
    }

    /// Only accept events of `run`
    pub fn for_run(mut self, run: impl Into<RunId>) -> Self {
        self.run = Some(run.into());
        self
    }

    /// True if any pattern matches `event_name`
    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }

    /// Name match plus the run filter, if set
    pub fn accepts(&self, event_name: &str, run_id: &RunId) -> bool {
        self.run.as_ref().map_or(true, |r| r == run_id) && self.matches(event_name)
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
