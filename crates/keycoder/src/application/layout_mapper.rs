//! LayoutMapperUseCase: builds the character to key code table for the
//! active keyboard layout.
//!
//! The use case opens the current layout through a
//! [`KeyboardLayoutProvider`], translates every layout-dependent key code,
//! and drops the layout handle before returning.  Codes that translate to
//! nothing, or that the OS fails to translate, are left out of the map.

use std::sync::Arc;

use keycoder_core::{KeyCode, KeyCodeMap, KeyCoderError};
use tracing::{debug, info, trace};

/// One keyboard layout, open for translation.
///
/// Any OS resource behind the layout is released when the value is dropped.
pub trait KeyboardLayout {
    /// Translates `key_code` as a key-down with no modifiers and no pending
    /// dead key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::TranslationFailure`] if the OS cannot produce
    /// a string for the code, or [`KeyCoderError::MalformedTranslation`] if
    /// what it produced is not valid text.
    fn translate(&self, key_code: KeyCode) -> Result<String, KeyCoderError>;
}

/// Decodes the UTF-16 units a platform layout produced for `key_code`.
///
/// # Errors
///
/// Returns [`KeyCoderError::MalformedTranslation`] if `units` is not valid
/// UTF-16.
pub fn decode_translation(key_code: KeyCode, units: &[u16]) -> Result<String, KeyCoderError> {
    String::from_utf16(units).map_err(|_| KeyCoderError::MalformedTranslation { key_code })
}

/// Source of the keyboard layout that is active right now.
pub trait KeyboardLayoutProvider: Send + Sync {
    /// Opens the current keyboard layout.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::LayoutUnavailable`] if no layout can be
    /// resolved.
    fn current_layout(&self) -> Result<Box<dyn KeyboardLayout + '_>, KeyCoderError>;
}

/// The Layout Mapper use case.
pub struct LayoutMapperUseCase {
    provider: Arc<dyn KeyboardLayoutProvider>,
}

impl LayoutMapperUseCase {
    pub fn new(provider: Arc<dyn KeyboardLayoutProvider>) -> Self {
        Self { provider }
    }

    /// Builds a fresh [`KeyCodeMap`] from the layout active at call time.
    ///
    /// # Errors
    ///
    /// Returns [`KeyCoderError::LayoutUnavailable`] if the provider cannot
    /// open a layout.  Per-code translation failures are not errors.
    pub fn dynamic_mapping(&self) -> Result<KeyCodeMap, KeyCoderError> {
        let layout = self.provider.current_layout()?;
        let mut skipped = 0usize;

        let map = KeyCodeMap::build(|key_code| match layout.translate(key_code) {
            Ok(text) if text.is_empty() => {
                trace!(key_code, "key code types nothing");
                skipped += 1;
                None
            }
            Ok(text) => Some(text),
            Err(error) => {
                debug!(key_code, %error, "skipping untranslatable key code");
                skipped += 1;
                None
            }
        });
        drop(layout);

        info!(entries = map.len(), skipped, "built dynamic key code mapping");
        Ok(map)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
