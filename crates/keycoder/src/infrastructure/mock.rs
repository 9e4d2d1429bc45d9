//! Mock keyboard backends for tests and dry runs.
//!
//! The real backends read the layout selected in System Settings and press
//! keys on the machine running the code.  The mocks replace both with plain
//! memory:
//!
//! - [`MockKeyboardLayoutProvider`] serves a key code → string table that a
//!   test can swap at any time to simulate the user switching layouts.  It
//!   counts opened and released layout handles.
//! - [`MockEventPoster`] records every posted event in a `Mutex<Vec<...>>`.
//!
//! # Usage in tests
//!
//! ```
//! use std::sync::Arc;
//! use keycoder::infrastructure::mock::{MockEventPoster, MockKeyboardLayoutProvider};
//! use keycoder::{KeyCoder, KeyCoderConfig, KeyEvent, PlatformEventPoster};
//!
//! let layouts = Arc::new(MockKeyboardLayoutProvider::us_ansi());
//! let poster = Arc::new(MockEventPoster::new());
//! let coder = KeyCoder::new(
//!     layouts,
//!     Arc::clone(&poster) as Arc<dyn PlatformEventPoster>,
//!     &KeyCoderConfig::default(),
//! );
//!
//! assert_eq!(coder.dynamic_mapping().unwrap().get("a"), Some(0));
//! coder.post_event(0, true).unwrap();
//! assert_eq!(poster.events(), vec![KeyEvent::down(0)]);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use keycoder_core::{EventTap, KeyCode, KeyCoderError, KeyEvent};

use crate::application::layout_mapper::{KeyboardLayout, KeyboardLayoutProvider};
use crate::application::post_event::PlatformEventPoster;

/// What a mock layout reports for one key code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockTranslation {
    Text(String),
    /// The OS status code a failing `UCKeyTranslate` would return.
    Failure(i32),
}

/// A layout expressed as a table.  Codes absent from the table type nothing.
pub type LayoutTable = HashMap<KeyCode, MockTranslation>;

// ── Layout fixtures ───────────────────────────────────────────────────────────

/// US ANSI output for every layout-dependent key code that types something.
///
/// Values follow Carbon `Events.h` key positions; function keys all type
/// `kFunctionKeyCharCode` (0x10).
const US_ANSI: &[(KeyCode, &str)] = &[
    (0x00, "a"),
    (0x01, "s"),
    (0x02, "d"),
    (0x03, "f"),
    (0x04, "h"),
    (0x05, "g"),
    (0x06, "z"),
    (0x07, "x"),
    (0x08, "c"),
    (0x09, "v"),
    (0x0A, "§"),
    (0x0B, "b"),
    (0x0C, "q"),
    (0x0D, "w"),
    (0x0E, "e"),
    (0x0F, "r"),
    (0x10, "y"),
    (0x11, "t"),
    (0x12, "1"),
    (0x13, "2"),
    (0x14, "3"),
    (0x15, "4"),
    (0x16, "6"),
    (0x17, "5"),
    (0x18, "="),
    (0x19, "9"),
    (0x1A, "7"),
    (0x1B, "-"),
    (0x1C, "8"),
    (0x1D, "0"),
    (0x1E, "]"),
    (0x1F, "o"),
    (0x20, "u"),
    (0x21, "["),
    (0x22, "i"),
    (0x23, "p"),
    (0x24, "\r"),
    (0x25, "l"),
    (0x26, "j"),
    (0x27, "'"),
    (0x28, "k"),
    (0x29, ";"),
    (0x2A, "\\"),
    (0x2B, ","),
    (0x2C, "/"),
    (0x2D, "n"),
    (0x2E, "m"),
    (0x2F, "."),
    (0x30, "\t"),
    (0x31, " "),
    (0x32, "`"),
    (0x33, "\u{8}"),
    (0x35, "\u{1b}"),
    (0x40, "\u{10}"), // F17
    (0x60, "\u{10}"), // F5
    (0x61, "\u{10}"), // F6
    (0x62, "\u{10}"), // F7
    (0x63, "\u{10}"), // F3
    (0x64, "\u{10}"), // F8
    (0x65, "\u{10}"), // F9
    (0x67, "\u{10}"), // F11
    (0x69, "\u{10}"), // F13
    (0x6A, "\u{10}"), // F16
    (0x6B, "\u{10}"), // F14
    (0x6D, "\u{10}"), // F10
    (0x6F, "\u{10}"), // F12
    (0x71, "\u{10}"), // F15
    (0x72, "\u{5}"),  // Help
    (0x73, "\u{1}"),  // Home
    (0x74, "\u{b}"),  // PageUp
    (0x75, "\u{7f}"), // ForwardDelete
    (0x76, "\u{10}"), // F4
    (0x77, "\u{4}"),  // End
    (0x78, "\u{10}"), // F2
    (0x79, "\u{c}"),  // PageDown
    (0x7A, "\u{10}"), // F1
    (0x7B, "\u{1c}"), // LeftArrow
    (0x7C, "\u{1d}"), // RightArrow
    (0x7D, "\u{1f}"), // DownArrow
    (0x7E, "\u{1e}"), // UpArrow
];

/// Dvorak output for the key positions where it differs from US ANSI.
const DVORAK_OVERRIDES: &[(KeyCode, &str)] = &[
    (0x01, "o"),
    (0x02, "e"),
    (0x03, "u"),
    (0x04, "d"),
    (0x05, "i"),
    (0x06, ";"),
    (0x07, "q"),
    (0x08, "j"),
    (0x09, "k"),
    (0x0B, "x"),
    (0x0C, "'"),
    (0x0D, ","),
    (0x0E, "."),
    (0x0F, "p"),
    (0x10, "f"),
    (0x11, "y"),
    (0x18, "]"),
    (0x1B, "["),
    (0x1E, "="),
    (0x1F, "r"),
    (0x20, "g"),
    (0x21, "/"),
    (0x22, "c"),
    (0x23, "l"),
    (0x25, "n"),
    (0x26, "h"),
    (0x27, "-"),
    (0x28, "t"),
    (0x29, "s"),
    (0x2B, "w"),
    (0x2C, "z"),
    (0x2D, "b"),
    (0x2F, "v"),
];

fn table_from(entries: &[(KeyCode, &str)]) -> LayoutTable {
    entries
        .iter()
        .map(|&(code, text)| (code, MockTranslation::Text(text.to_string())))
        .collect()
}

/// The US ANSI layout table.
pub fn us_ansi_layout() -> LayoutTable {
    table_from(US_ANSI)
}

/// The Dvorak layout table.
pub fn dvorak_layout() -> LayoutTable {
    let mut table = us_ansi_layout();
    table.extend(table_from(DVORAK_OVERRIDES));
    table
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Layout provider ───────────────────────────────────────────────────────────

/// A layout provider serving an in-memory table.
#[derive(Default)]
pub struct MockKeyboardLayoutProvider {
    /// `None` simulates a system with no resolvable keyboard layout.
    current: Mutex<Option<LayoutTable>>,
    opened: AtomicUsize,
    released: AtomicUsize,
}

impl MockKeyboardLayoutProvider {
    pub fn new(table: LayoutTable) -> Self {
        Self {
            current: Mutex::new(Some(table)),
            ..Default::default()
        }
    }

    pub fn us_ansi() -> Self {
        Self::new(us_ansi_layout())
    }

    /// A provider for which no layout can be resolved.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Replaces the active layout, as if the user picked another input source.
    pub fn switch_layout(&self, table: LayoutTable) {
        *lock(&self.current) = Some(table);
    }

    /// Number of layout handles opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of layout handles dropped so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// A snapshot of the provider's table taken when the layout was opened.
struct MockKeyboardLayout<'a> {
    table: LayoutTable,
    released: &'a AtomicUsize,
}

impl KeyboardLayout for MockKeyboardLayout<'_> {
    fn translate(&self, key_code: KeyCode) -> Result<String, KeyCoderError> {
        match self.table.get(&key_code) {
            Some(MockTranslation::Text(text)) => Ok(text.clone()),
            Some(MockTranslation::Failure(status)) => Err(KeyCoderError::TranslationFailure {
                key_code,
                status: *status,
            }),
            None => Ok(String::new()),
        }
    }
}

impl Drop for MockKeyboardLayout<'_> {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl KeyboardLayoutProvider for MockKeyboardLayoutProvider {
    fn current_layout(&self) -> Result<Box<dyn KeyboardLayout + '_>, KeyCoderError> {
        let table = lock(&self.current)
            .clone()
            .ok_or_else(|| KeyCoderError::LayoutUnavailable("mock has no layout".into()))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockKeyboardLayout {
            table,
            released: &self.released,
        }))
    }
}

// ── Event poster ──────────────────────────────────────────────────────────────

/// An event poster that records every call without touching the OS.
#[derive(Default)]
pub struct MockEventPoster {
    /// Records each (event, tap) pair passed to `post_keyboard_event`.
    pub posted: Mutex<Vec<(KeyEvent, EventTap)>>,
    /// When `true`, every post fails with `EventInjectionFailure`.
    pub should_fail: bool,
}

impl MockEventPoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poster whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// The events posted so far, without their taps.
    pub fn events(&self) -> Vec<KeyEvent> {
        lock(&self.posted).iter().map(|(event, _)| *event).collect()
    }
}

impl PlatformEventPoster for MockEventPoster {
    fn post_keyboard_event(&self, event: KeyEvent, tap: EventTap) -> Result<(), KeyCoderError> {
        if self.should_fail {
            return Err(KeyCoderError::EventInjectionFailure {
                key_code: event.key_code,
                reason: "mock failure".into(),
            });
        }
        lock(&self.posted).push((event, tap));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
