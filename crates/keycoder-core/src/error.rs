//! Error type shared by every KeyCoder operation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::keycode::KeyCode;

/// Error type for keyboard layout and event posting operations.
#[derive(Debug, Error)]
pub enum KeyCoderError {
    /// No current keyboard layout could be resolved.
    ///
    /// There is no fallback layout, so a mapping cannot be produced at all.
    #[error("keyboard layout unavailable: {0}")]
    LayoutUnavailable(String),

    /// A key code produced no usable string under the current layout.
    ///
    /// The layout mapper treats this as "no entry" and never returns it to
    /// callers of `dynamic_mapping`.
    #[error("key code {key_code} could not be translated (status {status})")]
    TranslationFailure { key_code: KeyCode, status: i32 },

    /// The OS reported success but returned UTF-16 that is not valid text,
    /// such as an unpaired surrogate.
    #[error("key code {key_code} translated to invalid UTF-16")]
    MalformedTranslation { key_code: KeyCode },

    /// The OS declined to build or accept a keyboard event.
    #[error("failed to inject event for key code {key_code}: {reason}")]
    EventInjectionFailure { key_code: KeyCode, reason: String },

    /// No system keyboard backend exists for the current target.
    #[error("no system keyboard backend on this platform")]
    UnsupportedPlatform,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
