// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::{Clock, FakeClock};

fn ids(items: &[ScheduledItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn scheduler_fires_items_at_correct_time() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let now = clock.now();
    scheduler.schedule("late", now + Duration::from_secs(10), ScheduledKind::Advance);
    scheduler.schedule("early", now + Duration::from_secs(5), ScheduledKind::Advance);

    assert!(scheduler.poll(now).is_empty());

    clock.advance(Duration::from_secs(5));
    assert_eq!(ids(&scheduler.poll(clock.now())), ["early"]);

    clock.advance(Duration::from_secs(5));
    assert_eq!(ids(&scheduler.poll(clock.now())), ["late"]);
    assert!(scheduler.is_empty());
}

#[test]
fn equal_deadlines_fire_in_scheduling_order() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let at = clock.now() + Duration::from_millis(100);

    scheduler.schedule("b", at, ScheduledKind::Advance);
    scheduler.schedule("a", at, ScheduledKind::Advance);
    scheduler.schedule("c", at, ScheduledKind::Advance);

    clock.advance(Duration::from_millis(100));
    assert_eq!(ids(&scheduler.poll(clock.now())), ["b", "a", "c"]);
}

#[test]
fn repeating_timers_reschedule_from_previous_deadline() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let start = clock.now();

    scheduler.schedule_repeating(
        "tick",
        start + Duration::from_millis(150),
        Duration::from_millis(150),
        ScheduledKind::Tick,
    );

    clock.advance(Duration::from_millis(150));
    assert_eq!(scheduler.poll(clock.now()).len(), 1);
    assert_eq!(
        scheduler.next_fire_time(),
        Some(start + Duration::from_millis(300))
    );

    // A late poll catches up on every missed tick
    clock.advance(Duration::from_millis(450));
    assert_eq!(scheduler.poll(clock.now()).len(), 3);
    assert!(!scheduler.is_empty());
}

#[test]
fn cancel_prevents_firing() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    let token = scheduler.schedule(
        "advance",
        clock.now() + Duration::from_millis(500),
        ScheduledKind::Advance,
    );
    scheduler.cancel(&token);

    clock.advance(Duration::from_secs(1));
    assert!(scheduler.poll(clock.now()).is_empty());
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.next_fire_time(), None);
}

#[test]
fn cancel_stops_a_repeating_timer() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    scheduler.schedule_repeating(
        "tick",
        clock.now() + Duration::from_millis(10),
        Duration::from_millis(10),
        ScheduledKind::Tick,
    );

    clock.advance(Duration::from_millis(10));
    assert_eq!(scheduler.poll(clock.now()).len(), 1);

    scheduler.cancel_id("tick");
    clock.advance(Duration::from_millis(100));
    assert!(scheduler.poll(clock.now()).is_empty());
}

#[test]
fn stale_token_does_not_cancel_rearmed_timer() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let at = clock.now() + Duration::from_millis(500);

    let old = scheduler.schedule("advance", at, ScheduledKind::Advance);
    let new = scheduler.schedule("advance", at, ScheduledKind::Advance);
    assert_ne!(old, new);

    scheduler.cancel(&old);
    assert!(scheduler.is_armed("advance"));

    clock.advance(Duration::from_millis(500));
    // Only the live arming fires, the replaced one is dropped
    assert_eq!(ids(&scheduler.poll(clock.now())), ["advance"]);
}

#[test]
fn poll_next_lets_callers_cancel_between_items() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let at = clock.now() + Duration::from_millis(5);
    scheduler.schedule("first", at, ScheduledKind::Tick);
    scheduler.schedule("second", at, ScheduledKind::Advance);

    clock.advance(Duration::from_millis(5));
    let first = scheduler.poll_next(clock.now());
    assert_eq!(first.map(|i| i.id), Some("first".to_string()));

    scheduler.cancel_id("second");
    assert!(scheduler.poll_next(clock.now()).is_none());
}

#[test]
fn zero_interval_repeats_are_raised() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    scheduler.schedule_repeating("spin", clock.now(), Duration::ZERO, ScheduledKind::Tick);

    // Terminates: the interval was bumped to 1ms
    assert_eq!(scheduler.poll(clock.now()).len(), 1);
    clock.advance(Duration::from_millis(3));
    assert_eq!(scheduler.poll(clock.now()).len(), 3);
}

#[test]
fn clear_disarms_everything() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    scheduler.schedule("a", clock.now(), ScheduledKind::Advance);
    scheduler.schedule("b", clock.now(), ScheduledKind::Tick);
    scheduler.clear();
    assert!(scheduler.is_empty());
    assert!(scheduler.poll(clock.now()).is_empty());
}
