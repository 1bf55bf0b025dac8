//! Integration tests for full gameplay sessions.

use tappyswipey_core::{
    Catalog, ComboPattern, Config, EndReason, Event, GameMode, Gesture, Orientation, Session,
    SessionSettings, SessionState, SwipeDirection,
};

const SINGLE_TAP: Gesture = Gesture::Tap { touches: 1, taps: 1 };

#[test]
fn test_timed_session_with_diminishing_returns() {
    let mut session = Session::new(SessionSettings::timed());
    assert_eq!(session.remaining_ms(), Some(60_000));
    session.start();

    let mut totals = Vec::new();
    for _ in 0..3 {
        let outcome = session.perform(SINGLE_TAP, Orientation::Portrait).unwrap();
        totals.push(outcome.award().unwrap().total);
    }

    assert_eq!(totals, vec![1_000, 1_500, 1_833]);
    assert_eq!(session.score(), 1_833);
}

#[test]
fn test_pause_then_idle_ticks_then_resume() {
    let mut session = Session::new(SessionSettings::timed());
    session.start();
    session.perform(SINGLE_TAP, Orientation::Portrait).unwrap();
    session.pause();

    for _ in 0..5 {
        session.combo_tick();
        assert!(session.countdown_tick().is_none());
    }

    session.unpause();
    session.perform(SINGLE_TAP, Orientation::Portrait).unwrap();

    assert_eq!(session.combo().len(), 1);
    assert_eq!(session.remaining_ms(), Some(60_000));
    // Counters survive the pause even though the combo stack does not.
    assert_eq!(session.scoring().count("Single Tap"), 2);
}

#[test]
fn test_full_timed_game_runs_out() {
    let config = Config {
        timing: tappyswipey_core::config::TimingConfig {
            countdown_tick_ms: 100,
            combo_reset_ms: 1_000,
            timed_duration_ms: 3_000,
        },
        ..Config::default()
    };
    let mut session = config.new_session(GameMode::Timed).unwrap();
    session.start();

    let mut ended = Vec::new();
    let mut elapsed_ms = 0;
    while elapsed_ms < 5_000 {
        if elapsed_ms % 500 == 0 {
            session
                .perform(
                    Gesture::Swipe {
                        touches: 2,
                        direction: SwipeDirection::Left,
                    },
                    Orientation::LandscapeRight,
                )
                .unwrap();
        }
        elapsed_ms += 100;
        if let Some(event @ Event::SessionEnded { .. }) = session.countdown_tick() {
            ended.push(event);
        }
        if elapsed_ms % 1_000 == 0 {
            session.combo_tick();
        }
    }

    assert_eq!(ended.len(), 1);
    assert!(matches!(
        ended[0],
        Event::SessionEnded {
            reason: EndReason::TimeExpired,
            ..
        }
    ));
    assert_eq!(session.state(), SessionState::Ended);
    // Swipes at 0, 500, ..., 2500 ms: six firings before time ran out.
    assert_eq!(session.scoring().count("Two-Finger Swipe Left"), 6);
    assert_eq!(session.score(), 1_000 + 500 + 333 + 250 + 200 + 166);
}

#[test]
fn test_every_catalog_action_scores_its_base_value_once() {
    let mut session = Session::new(SessionSettings::timed());
    session.start();
    for action in Catalog::global().all() {
        let outcome = session.perform_action(action, Orientation::Portrait);
        assert_eq!(outcome.award().unwrap().points, action.point_value);
    }
    let expected: u64 = Catalog::global()
        .all()
        .iter()
        .map(|a| u64::from(a.point_value))
        .sum();
    assert_eq!(session.score(), expected);
}

#[test]
fn test_configured_combo_consumes_suffix() {
    let config = Config {
        combos: vec![ComboPattern {
            name: "Triple Threat".into(),
            sequence: vec![
                "Single Tap".into(),
                "Double Tap".into(),
                "Triple Tap".into(),
            ],
            point_value: 20_000,
        }],
        ..Config::default()
    };
    let mut session = config.new_session(GameMode::Timed).unwrap();
    session.start();

    for taps in 1..=3 {
        session
            .perform(Gesture::Tap { touches: 1, taps }, Orientation::Portrait)
            .unwrap();
    }

    assert!(session.combo().is_empty());
    assert_eq!(session.scoring().count("Triple Threat"), 1);
    assert_eq!(session.scoring().count("Triple Tap"), 0);
    assert_eq!(session.score(), 1_000 + 2_000 + 20_000);
}

#[test]
fn test_events_serialize_for_presenters() {
    let mut session = Session::new(SessionSettings::timed());
    let started = session.start().unwrap();
    let scored = session
        .perform(SINGLE_TAP, Orientation::Portrait)
        .unwrap()
        .into_event()
        .unwrap();
    let paused = session.pause().unwrap();

    let started = serde_json::to_value(&started).unwrap();
    assert_eq!(started["type"], "SessionStarted");
    assert_eq!(started["mode"], "timed");

    let scored = serde_json::to_value(&scored).unwrap();
    assert_eq!(scored["description"], "Single Tap");
    assert_eq!(scored["points"], 1_000);

    let paused = serde_json::to_value(&paused).unwrap();
    assert_eq!(paused["control_label"], "play");
}
