//! PostEventUseCase: injects one synthesized keyboard event, then pauses.
//!
//! Every successful post is followed by a blocking sleep of at least 9 ms so
//! consecutive synthesized keystrokes reach applications no faster than
//! they can consume them.  The sleep cannot be cancelled or shortened.

use std::sync::Arc;
use std::time::Duration;

use keycoder_core::config::{EventConfig, MIN_POST_DELAY_MICROS};
use keycoder_core::{EventTap, KeyCoderError, KeyEvent};
use tracing::trace;

/// Platform-agnostic keyboard event injection.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformEventPoster: Send + Sync {
    /// Synthesizes `event` and submits it at `tap`.
    ///
    /// Posting is fire-and-forget: success means the OS accepted the event
    /// object, not that any application received it.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::EventInjectionFailure`] if the OS cannot
    /// build the event.
    fn post_keyboard_event(&self, event: KeyEvent, tap: EventTap) -> Result<(), KeyCoderError>;
}

/// The Event Poster use case.
pub struct PostEventUseCase {
    poster: Arc<dyn PlatformEventPoster>,
    tap: EventTap,
    delay: Duration,
}

impl PostEventUseCase {
    /// Creates a use case posting at the configured tap.
    ///
    /// A configured delay below 9 ms is raised to 9 ms.
    pub fn new(poster: Arc<dyn PlatformEventPoster>, config: &EventConfig) -> Self {
        let delay = config
            .post_delay()
            .max(Duration::from_micros(MIN_POST_DELAY_MICROS));
        Self {
            poster,
            tap: config.tap,
            delay,
        }
    }

    /// The pause applied after every posted event.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Posts `event` and blocks the calling thread for [`delay`](Self::delay).
    ///
    /// Returns `true` whenever it returns `Ok`; the key code is not checked
    /// against any known key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::EventInjectionFailure`] if the OS refuses to
    /// build the event.  No pause is applied in that case.
    pub fn post(&self, event: KeyEvent) -> Result<bool, KeyCoderError> {
        self.poster.post_keyboard_event(event, self.tap)?;
        trace!(key_code = event.key_code, key_down = event.key_down, tap = ?self.tap, "posted key event");
        std::thread::sleep(self.delay);
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
