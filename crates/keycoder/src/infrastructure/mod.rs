//! Infrastructure layer: OS-facing implementations of the application traits.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keycoder_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`macos`** – Text Input Sources + `UCKeyTranslate` for layout mapping,
//!   CoreGraphics `CGEventPost` for event injection.  Compiled only on macOS.
//!
//! - **`mock`** – In-memory layout tables and a recording event poster, used by
//!   tests and available to hosts that want a dry run.

use std::sync::Arc;

use keycoder_core::KeyCoderError;

use crate::application::{layout_mapper::KeyboardLayoutProvider, post_event::PlatformEventPoster};

pub mod mock;

#[cfg(target_os = "macos")]
pub mod macos;

/// Returns the layout provider for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`KeyCoderError::UnsupportedPlatform`] on targets without a
/// system backend.
pub fn system_layout_provider() -> Result<Arc<dyn KeyboardLayoutProvider>, KeyCoderError> {
    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::MacosKeyboardLayoutProvider::new()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        Err(KeyCoderError::UnsupportedPlatform)
    }
}

/// Returns the event poster for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`KeyCoderError::UnsupportedPlatform`] on targets without a
/// system backend.
pub fn system_event_poster() -> Result<Arc<dyn PlatformEventPoster>, KeyCoderError> {
    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::MacosEventPoster::new()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        Err(KeyCoderError::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_system_backends_are_unsupported_off_macos() {
        assert!(matches!(
            system_layout_provider(),
            Err(KeyCoderError::UnsupportedPlatform)
        ));
        assert!(matches!(
            system_event_poster(),
            Err(KeyCoderError::UnsupportedPlatform)
        ));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_system_backends_exist_on_macos() {
        assert!(system_layout_provider().is_ok());
        assert!(system_event_poster().is_ok());
    }
}
