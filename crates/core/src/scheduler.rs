// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer-based scheduling for run ticks and delays
//!
//! Timers are keyed by id. Scheduling an id that is already armed replaces
//! it; every schedule call hands back a [`TimerToken`] whose generation
//! pins the exact arming, so cancelling a stale token never disarms a newer
//! timer that happens to reuse the id.

use crate::effect::TimerId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

/// What a timer means to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    /// Progress tick of the processing stage
    Tick,
    /// Start or settle delay elapsed
    Advance,
}

/// Handle to one arming of a timer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub id: TimerId,
    generation: u64,
}

/// A scheduled item
#[derive(Debug, Clone)]
pub struct ScheduledItem {
    pub id: TimerId,
    pub fire_at: Instant,
    pub kind: ScheduledKind,
    pub repeat: Option<Duration>,
    generation: u64,
    seq: u64,
}

impl PartialEq for ScheduledItem {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for ScheduledItem {}

impl PartialOrd for ScheduledItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, then in scheduling order
        Reverse((self.fire_at, self.seq)).cmp(&Reverse((other.fire_at, other.seq)))
    }
}

/// Manages armed timers
#[derive(Debug, Default)]
pub struct Scheduler {
    items: BinaryHeap<ScheduledItem>,
    /// Live generation per timer id; anything else in the heap is dead
    live: HashMap<TimerId, u64>,
    next_generation: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot timer
    pub fn schedule(
        &mut self,
        id: impl Into<TimerId>,
        fire_at: Instant,
        kind: ScheduledKind,
    ) -> TimerToken {
        self.arm(id.into(), fire_at, kind, None)
    }

    /// Schedule a repeating timer (intervals below 1ms are raised to 1ms)
    pub fn schedule_repeating(
        &mut self,
        id: impl Into<TimerId>,
        fire_at: Instant,
        interval: Duration,
        kind: ScheduledKind,
    ) -> TimerToken {
        let interval = interval.max(Duration::from_millis(1));
        self.arm(id.into(), fire_at, kind, Some(interval))
    }

    fn arm(
        &mut self,
        id: TimerId,
        fire_at: Instant,
        kind: ScheduledKind,
        repeat: Option<Duration>,
    ) -> TimerToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.live.insert(id.clone(), generation);
        self.push(ScheduledItem {
            id: id.clone(),
            fire_at,
            kind,
            repeat,
            generation,
            seq: 0,
        });
        TimerToken { id, generation }
    }

    fn push(&mut self, mut item: ScheduledItem) {
        self.next_seq += 1;
        item.seq = self.next_seq;
        self.items.push(item);
    }

    /// Cancel exactly the arming behind `token`
    pub fn cancel(&mut self, token: &TimerToken) {
        if self.live.get(&token.id) == Some(&token.generation) {
            self.live.remove(&token.id);
        }
    }

    /// Cancel whatever is armed under `id`
    pub fn cancel_id(&mut self, id: &str) {
        self.live.remove(id);
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.live.clear();
        self.items.clear();
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.live.contains_key(id)
    }

    fn is_live(&self, item: &ScheduledItem) -> bool {
        self.live.get(&item.id) == Some(&item.generation)
    }

    /// Pop the earliest live item due at or before `now`
    ///
    /// Repeating items are re-armed one interval after their previous
    /// deadline. Drivers that react to each item (and may cancel others)
    /// should call this in a loop rather than [`Scheduler::poll`].
    pub fn poll_next(&mut self, now: Instant) -> Option<ScheduledItem> {
        loop {
            let item = self.items.peek()?;
            if item.fire_at > now {
                return None;
            }
            let item = self.items.pop()?;

            // Skip cancelled or replaced items
            if !self.is_live(&item) {
                continue;
            }

            match item.repeat {
                Some(interval) => self.push(ScheduledItem {
                    fire_at: item.fire_at + interval,
                    ..item.clone()
                }),
                None => {
                    self.live.remove(&item.id);
                }
            }
            return Some(item);
        }
    }

    /// Get all items that should fire at or before the given time
    pub fn poll(&mut self, now: Instant) -> Vec<ScheduledItem> {
        std::iter::from_fn(|| self.poll_next(now)).collect()
    }

    /// Check if scheduler has any live items
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Get the next live fire time, if any
    pub fn next_fire_time(&mut self) -> Option<Instant> {
        // Drop dead heads so the answer reflects live timers only
        while let Some(item) = self.items.peek() {
            if self.is_live(item) {
                return Some(item.fire_at);
            }
            self.items.pop();
        }
        None
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
