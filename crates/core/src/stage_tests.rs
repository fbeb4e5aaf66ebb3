// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use std::time::Duration;
use yare::parameterized;

fn run_id() -> RunId {
    RunId("run-1".to_string())
}

fn make_stage() -> Stage {
    Stage::new(StageDefinition::new(
        "transcribe",
        "Transcribing Audio",
        "Converting speech to text with AI",
    ))
}

fn tick(increment: f64) -> StageEvent {
    StageEvent::Tick {
        increment,
        cap: 99.0,
    }
}

#[test]
fn stage_starts_pending_with_zero_progress() {
    let stage = make_stage();
    assert!(stage.is_pending());
    assert_eq!(stage.progress, 0.0);
    assert!(stage.started_at.is_none());
}

#[test]
fn begin_moves_pending_to_processing() {
    let clock = FakeClock::new();
    let (stage, effects) = make_stage().transition(&run_id(), 0, StageEvent::Begin, &clock);

    assert!(stage.is_processing());
    assert_eq!(stage.started_at, Some(clock.now()));
    assert_eq!(
        effects,
        vec![Effect::Emit(Event::StageStarted {
            run_id: run_id(),
            stage_id: StageId::from("transcribe"),
            index: 0,
        })]
    );
}

#[test]
fn tick_adds_increment_and_reports_progress() {
    let clock = FakeClock::new();
    let (stage, _) = make_stage().transition(&run_id(), 0, StageEvent::Begin, &clock);
    let (stage, effects) = stage.transition(&run_id(), 0, tick(12.5), &clock);

    assert_eq!(stage.progress, 12.5);
    assert!(matches!(
        &effects[..],
        [Effect::Emit(Event::StageProgressed { progress, .. })] if *progress == 12.5
    ));
}

#[test]
fn displayed_progress_is_held_at_cap_until_done() {
    let clock = FakeClock::new();
    let (mut stage, _) = make_stage().transition(&run_id(), 0, StageEvent::Begin, &clock);
    for _ in 0..9 {
        stage = stage.transition(&run_id(), 0, tick(11.0), &clock).0;
    }
    // 99 accumulated, displayed 99
    assert_eq!(stage.progress, 99.0);
    assert!(stage.is_processing());

    let (stage, _) = stage.transition(&run_id(), 0, tick(0.5), &clock);
    assert!(stage.is_processing());
    assert_eq!(stage.progress, 99.0);
}

#[test]
fn reaching_one_hundred_completes_the_stage() {
    let clock = FakeClock::new();
    let (stage, _) = make_stage().transition(&run_id(), 0, StageEvent::Begin, &clock);
    let (stage, _) = stage.transition(&run_id(), 0, tick(60.0), &clock);

    clock.advance(Duration::from_millis(150));
    let (stage, effects) = stage.transition(&run_id(), 0, tick(45.0), &clock);

    assert!(stage.is_completed());
    assert_eq!(stage.progress, 100.0);
    assert_eq!(stage.completed_at, Some(clock.now()));
    assert!(effects.is_empty());
}

#[test]
fn negative_increments_never_lower_progress() {
    let clock = FakeClock::new();
    let (stage, _) = make_stage().transition(&run_id(), 0, StageEvent::Begin, &clock);
    let (stage, _) = stage.transition(&run_id(), 0, tick(20.0), &clock);
    let (stage, _) = stage.transition(&run_id(), 0, tick(-5.0), &clock);
    assert_eq!(stage.progress, 20.0);
}

#[parameterized(
    tick_while_pending = { StageStatus::Pending, tick(10.0) },
    begin_while_processing = { StageStatus::Processing, StageEvent::Begin },
    begin_while_completed = { StageStatus::Completed, StageEvent::Begin },
    tick_while_completed = { StageStatus::Completed, tick(10.0) },
)]
fn invalid_events_leave_stage_unchanged(status: StageStatus, event: StageEvent) {
    let clock = FakeClock::new();
    let stage = Stage {
        status,
        ..make_stage()
    };
    let (next, effects) = stage.transition(&run_id(), 0, event, &clock);
    assert_eq!(next, stage);
    assert!(effects.is_empty());
}

#[test]
fn status_display_is_lowercase() {
    assert_eq!(StageStatus::Processing.to_string(), "processing");
    assert_eq!(StageId::from("docs").to_string(), "docs");
}
