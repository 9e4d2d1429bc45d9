//! The `KeyCoder` facade and the two free-standing entry points.

use std::sync::Arc;

use keycoder_core::config::load_config_or_default;
use keycoder_core::{KeyCode, KeyCodeMap, KeyCoderConfig, KeyCoderError, KeyEvent};

use crate::application::layout_mapper::{KeyboardLayoutProvider, LayoutMapperUseCase};
use crate::application::post_event::{PlatformEventPoster, PostEventUseCase};
use crate::infrastructure::{system_event_poster, system_layout_provider};

/// Layout mapping and event posting behind one handle.
///
/// `KeyCoder` holds no state between calls beyond its backends and
/// settings; every [`dynamic_mapping`](Self::dynamic_mapping) reads the
/// layout afresh.
pub struct KeyCoder {
    mapper: LayoutMapperUseCase,
    poster: PostEventUseCase,
}

impl KeyCoder {
    /// Creates a `KeyCoder` over explicit backends.
    pub fn new(
        layouts: Arc<dyn KeyboardLayoutProvider>,
        poster: Arc<dyn PlatformEventPoster>,
        config: &KeyCoderConfig,
    ) -> Self {
        Self {
            mapper: LayoutMapperUseCase::new(layouts),
            poster: PostEventUseCase::new(poster, &config.events),
        }
    }

    /// Creates a `KeyCoder` over the operating system's keyboard services.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::UnsupportedPlatform`] on targets without a
    /// system backend.
    pub fn system(config: &KeyCoderConfig) -> Result<Self, KeyCoderError> {
        Ok(Self::new(system_layout_provider()?, system_event_poster()?, config))
    }

    /// Maps every character the active layout can type to its key code.
    ///
    /// Key codes `65..=92` are never included.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::LayoutUnavailable`] if no layout is active.
    pub fn dynamic_mapping(&self) -> Result<KeyCodeMap, KeyCoderError> {
        self.mapper.dynamic_mapping()
    }

    /// Posts one key event and pauses for at least 9 ms.  Returns `true`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::EventInjectionFailure`] if the OS refuses to
    /// build the event.
    pub fn post_event(&self, key_code: KeyCode, key_down: bool) -> Result<bool, KeyCoderError> {
        self.post(KeyEvent::new(key_code, key_down))
    }

    pub fn post(&self, event: KeyEvent) -> Result<bool, KeyCoderError> {
        self.poster.post(event)
    }
}

/// Builds the character → key code map for the layout active right now,
/// using the system backend.
///
/// # Errors
///
/// Returns [`KeyCoderError::Config`] if the platform config file exists but
/// cannot be loaded.  See also [`KeyCoder::system`] and
/// [`KeyCoder::dynamic_mapping`].
pub fn dynamic_mapping() -> Result<KeyCodeMap, KeyCoderError> {
    KeyCoder::system(&load_config_or_default()?)?.dynamic_mapping()
}

/// Posts one key event through the system backend, then pauses for the
/// configured delay (9 ms unless the platform config file raises it).
///
/// # Errors
///
/// Returns [`KeyCoderError::Config`] if the platform config file exists but
/// cannot be loaded.  See also [`KeyCoder::system`] and
/// [`KeyCoder::post_event`].
pub fn post_event(key_code: KeyCode, key_down: bool) -> Result<bool, KeyCoderError> {
    KeyCoder::system(&load_config_or_default()?)?.post_event(key_code, key_down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::{MockEventPoster, MockKeyboardLayoutProvider};

    #[test]
    fn test_post_event_builds_event_from_arguments() {
        // Arrange
        let poster = Arc::new(MockEventPoster::new());
        let coder = KeyCoder::new(
            Arc::new(MockKeyboardLayoutProvider::us_ansi()),
            Arc::clone(&poster) as Arc<dyn PlatformEventPoster>,
            &KeyCoderConfig::default(),
        );

        // Act
        let down = coder.post_event(0x24, true).unwrap();
        let up = coder.post_event(0x24, false).unwrap();

        // Assert
        assert!(down && up);
        assert_eq!(poster.events(), KeyEvent::stroke(0x24).to_vec());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_free_functions_report_unsupported_platform() {
        assert!(matches!(dynamic_mapping(), Err(KeyCoderError::UnsupportedPlatform)));
        assert!(matches!(post_event(0, true), Err(KeyCoderError::UnsupportedPlatform)));
    }
}
