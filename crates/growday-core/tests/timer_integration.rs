//! Integration tests for the work/break timer and its XP hook.

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use growday_core::{App, Config, Event, FixedClock, ManualTicks, MemoryStore, Mode, TimerEngine};
use proptest::prelude::*;

fn running(w: u32, b: u32) -> TimerEngine {
    let mut engine = TimerEngine::new(w, b, ManualTicks::new()).unwrap();
    engine.start();
    engine
}

/// Tick `n` times and return how many round-completed events fired.
fn rounds_fired(engine: &mut TimerEngine, n: u32) -> usize {
    (0..n)
        .filter_map(|_| engine.tick())
        .filter(Event::is_round_completed)
        .count()
}

proptest! {
    #[test]
    fn reset_always_returns_to_full_work(w in 1u32..600, b in 1u32..600, ticks in 0u32..2000) {
        let mut engine = running(w, b);
        rounds_fired(&mut engine, ticks);
        engine.reset();
        prop_assert_eq!(engine.mode(), Mode::Work);
        prop_assert_eq!(engine.remaining_seconds(), w);
        prop_assert_eq!(engine.rounds_completed(), 0);
        prop_assert!(!engine.is_running());
    }

    #[test]
    fn full_work_phase_completes_exactly_one_round(w in 1u32..600, b in 1u32..600) {
        let mut engine = running(w, b);
        prop_assert_eq!(rounds_fired(&mut engine, w + 1), 1);
        prop_assert_eq!(engine.mode(), Mode::Break);
        prop_assert_eq!(engine.remaining_seconds(), b);
        prop_assert_eq!(engine.rounds_completed(), 1);

        prop_assert_eq!(rounds_fired(&mut engine, b + 1), 0);
        prop_assert_eq!(engine.mode(), Mode::Work);
        prop_assert_eq!(engine.remaining_seconds(), w);
        prop_assert_eq!(engine.rounds_completed(), 1);
    }

    #[test]
    fn remaining_never_exceeds_current_phase(w in 1u32..120, b in 1u32..120, ticks in 0u32..1000) {
        let mut engine = running(w, b);
        for _ in 0..ticks {
            engine.tick();
            let limit = engine.duration_for(engine.mode());
            prop_assert!(engine.remaining_seconds() <= limit);
        }
    }

    #[test]
    fn paused_engine_is_frozen(w in 1u32..600, b in 1u32..600, before in 0u32..900, after in 0u32..900) {
        let mut engine = running(w, b);
        rounds_fired(&mut engine, before);
        engine.pause();
        let frozen = engine.state();
        prop_assert_eq!(rounds_fired(&mut engine, after), 0);
        prop_assert_eq!(engine.state(), frozen);
    }

    #[test]
    fn switch_mode_twice_is_identity_on_mode(w in 1u32..600, b in 1u32..600) {
        let mut engine = running(w, b);
        engine.switch_mode();
        prop_assert_eq!(engine.mode(), Mode::Break);
        prop_assert_eq!(engine.remaining_seconds(), b);
        prop_assert!(engine.is_running());
        engine.switch_mode();
        prop_assert_eq!(engine.mode(), Mode::Work);
        prop_assert_eq!(engine.remaining_seconds(), w);
        prop_assert_eq!(engine.rounds_completed(), 0);
    }
}

#[test]
fn pomodoro_end_to_end_through_app() {
    let clock = Rc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
    let mut app = App::load(
        Rc::new(MemoryStore::new()),
        clock,
        Config::default(),
        ManualTicks::new(),
    )
    .unwrap();

    let rounds = Rc::new(Cell::new(0));
    let counter = Rc::clone(&rounds);
    app.timer_mut().subscribe(move |event| {
        if event.is_round_completed() {
            counter.set(counter.get() + 1);
        }
    });

    app.start_timer();
    for _ in 0..1501 {
        app.tick();
    }
    let state = app.timer_state();
    assert_eq!(state.mode, Mode::Break);
    assert_eq!(state.remaining_seconds, 300);
    assert_eq!(state.rounds_completed, 1);
    assert_eq!(app.stats().xp, 5);
    assert_eq!(rounds.get(), 1);

    for _ in 0..301 {
        app.tick();
    }
    let state = app.timer_state();
    assert_eq!(state.mode, Mode::Work);
    assert_eq!(state.remaining_seconds, 1500);
    assert_eq!(state.rounds_completed, 1);
    assert_eq!(app.stats().xp, 5);
    assert_eq!(rounds.get(), 1);
}

#[test]
fn switching_into_break_earns_nothing() {
    let mut engine = running(5, 5);
    engine.switch_mode();
    assert_eq!(rounds_fired(&mut engine, 6), 0);
    assert_eq!(engine.mode(), Mode::Work);
}
