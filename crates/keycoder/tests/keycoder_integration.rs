//! Integration tests for the `KeyCoder` facade.
//!
//! These tests wire `KeyCoder` to the in-memory backends from
//! `keycoder::infrastructure::mock` and exercise both entry points end to
//! end: layout lookup, translation, map construction, event posting, and the
//! post delay.

use std::sync::Arc;
use std::time::{Duration, Instant};

use keycoder::infrastructure::mock::{
    dvorak_layout, us_ansi_layout, LayoutTable, MockEventPoster, MockKeyboardLayoutProvider,
    MockTranslation,
};
use keycoder::{EventTap, KeyCoder, KeyCoderConfig, KeyCoderError, KeyEvent};
use keycoder_core::dynamic_key_codes;

fn coder_with(
    layouts: Arc<MockKeyboardLayoutProvider>,
    poster: Arc<MockEventPoster>,
    config: &KeyCoderConfig,
) -> KeyCoder {
    KeyCoder::new(layouts, poster, config)
}

fn us_coder() -> (KeyCoder, Arc<MockKeyboardLayoutProvider>, Arc<MockEventPoster>) {
    let layouts = Arc::new(MockKeyboardLayoutProvider::us_ansi());
    let poster = Arc::new(MockEventPoster::new());
    let coder = coder_with(
        Arc::clone(&layouts),
        Arc::clone(&poster),
        &KeyCoderConfig::default(),
    );
    (coder, layouts, poster)
}

// ── Layout mapper ─────────────────────────────────────────────────────────────

#[test]
fn test_us_layout_maps_a_to_code_zero() {
    let (coder, _, _) = us_coder();

    let map = coder.dynamic_mapping().unwrap();

    assert_eq!(map.get("a"), Some(0));
}

#[test]
fn test_every_scanned_non_empty_translation_is_in_mapping() {
    // Arrange
    let (coder, _, _) = us_coder();
    let table = us_ansi_layout();

    // Act
    let map = coder.dynamic_mapping().unwrap();

    // Assert – each string maps to the highest code that types it.
    for code in dynamic_key_codes() {
        if let Some(MockTranslation::Text(text)) = table.get(&code) {
            let winner = map.get(text).expect("translated text must be present");
            assert!(winner >= code, "{text:?}: {winner} should be the last code typing it");
        }
    }
}

#[test]
fn test_function_keys_collapse_to_last_scanned_code() {
    let (coder, _, _) = us_coder();

    let map = coder.dynamic_mapping().unwrap();

    // Every F-key types 0x10; F1 (0x7A) is the highest such code.
    assert_eq!(map.get("\u{10}"), Some(0x7A));
}

#[test]
fn test_mapping_never_contains_invariant_codes() {
    // Arrange – a layout that claims every code, including the keypad block.
    let table: LayoutTable = (0..128)
        .map(|code| (code, MockTranslation::Text(format!("#{code}"))))
        .collect();
    let coder = coder_with(
        Arc::new(MockKeyboardLayoutProvider::new(table)),
        Arc::new(MockEventPoster::new()),
        &KeyCoderConfig::default(),
    );

    // Act
    let map = coder.dynamic_mapping().unwrap();

    // Assert
    assert_eq!(map.len(), 99);
    assert!(map.iter().all(|(_, code)| !(65..=92).contains(&code)));
}

#[test]
fn test_mapping_is_deterministic_under_fixed_layout() {
    let (coder, _, _) = us_coder();

    let first = coder.dynamic_mapping().unwrap();
    let second = coder.dynamic_mapping().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_layout_switch_changes_next_mapping() {
    // Arrange
    let (coder, layouts, _) = us_coder();
    let before = coder.dynamic_mapping().unwrap();

    // Act
    layouts.switch_layout(dvorak_layout());
    let after = coder.dynamic_mapping().unwrap();

    // Assert
    assert_ne!(before, after);
    assert_eq!(before.get("s"), Some(0x01));
    assert_eq!(after.get("o"), Some(0x01));
    assert_eq!(after.get("s"), Some(0x29));
}

#[test]
fn test_untranslatable_codes_are_left_out() {
    // Arrange
    let mut table = us_ansi_layout();
    table.insert(0x00, MockTranslation::Failure(-25340));
    let coder = coder_with(
        Arc::new(MockKeyboardLayoutProvider::new(table)),
        Arc::new(MockEventPoster::new()),
        &KeyCoderConfig::default(),
    );

    // Act
    let map = coder.dynamic_mapping().unwrap();

    // Assert
    assert_eq!(map.get("a"), None);
    assert_eq!(map.get("s"), Some(0x01));
}

#[test]
fn test_missing_layout_is_an_error() {
    let coder = coder_with(
        Arc::new(MockKeyboardLayoutProvider::unavailable()),
        Arc::new(MockEventPoster::new()),
        &KeyCoderConfig::default(),
    );

    assert!(matches!(
        coder.dynamic_mapping(),
        Err(KeyCoderError::LayoutUnavailable(_))
    ));
}

#[test]
fn test_layout_handle_is_released_after_each_mapping() {
    let (coder, layouts, _) = us_coder();

    for _ in 0..3 {
        coder.dynamic_mapping().unwrap();
    }

    assert_eq!(layouts.opened(), 3);
    assert_eq!(layouts.released(), 3);
}

// ── Event poster ──────────────────────────────────────────────────────────────

#[test]
fn test_post_event_returns_true_and_records_event() {
    let (coder, _, poster) = us_coder();

    assert!(coder.post_event(0, true).unwrap());

    assert_eq!(poster.events(), vec![KeyEvent::down(0)]);
}

#[test]
fn test_post_event_accepts_codes_without_a_physical_key() {
    let (coder, _, poster) = us_coder();

    assert!(coder.post_event(0x7F, false).unwrap());
    assert!(coder.post_event(u16::MAX, true).unwrap());

    assert_eq!(poster.events().len(), 2);
}

#[test]
fn test_post_event_waits_at_least_nine_milliseconds() {
    let (coder, _, _) = us_coder();

    let start = Instant::now();
    coder.post_event(0x31, true).unwrap();

    assert!(start.elapsed() >= Duration::from_micros(9_000));
}

#[test]
fn test_consecutive_posts_are_spaced_by_delay() {
    let (coder, _, _) = us_coder();

    let start = Instant::now();
    for event in KeyEvent::stroke(0x31) {
        coder.post(event).unwrap();
    }

    assert!(start.elapsed() >= Duration::from_micros(18_000));
}

#[test]
fn test_configured_tap_reaches_poster() {
    // Arrange
    let mut config = KeyCoderConfig::default();
    config.events.tap = EventTap::AnnotatedSession;
    let poster = Arc::new(MockEventPoster::new());
    let coder = coder_with(
        Arc::new(MockKeyboardLayoutProvider::us_ansi()),
        Arc::clone(&poster),
        &config,
    );

    // Act
    coder.post_event(0x24, true).unwrap();

    // Assert
    assert_eq!(
        *poster.posted.lock().unwrap(),
        vec![(KeyEvent::down(0x24), EventTap::AnnotatedSession)]
    );
}

#[test]
fn test_injection_failure_is_surfaced() {
    let coder = coder_with(
        Arc::new(MockKeyboardLayoutProvider::us_ansi()),
        Arc::new(MockEventPoster::failing()),
        &KeyCoderConfig::default(),
    );

    assert!(matches!(
        coder.post_event(0, true),
        Err(KeyCoderError::EventInjectionFailure { key_code: 0, .. })
    ));
}

// ── Mapping and posting together ──────────────────────────────────────────────

#[test]
fn test_typing_a_word_through_the_mapping() {
    // Arrange
    let (coder, _, poster) = us_coder();
    let map = coder.dynamic_mapping().unwrap();

    // Act
    for ch in "qa".chars() {
        let code = map.get(&ch.to_string()).expect("character on layout");
        for event in KeyEvent::stroke(code) {
            coder.post(event).unwrap();
        }
    }

    // Assert
    let [q_down, q_up] = KeyEvent::stroke(0x0C);
    let [a_down, a_up] = KeyEvent::stroke(0x00);
    assert_eq!(poster.events(), vec![q_down, q_up, a_down, a_up]);
}
