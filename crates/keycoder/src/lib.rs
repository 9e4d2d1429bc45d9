//! keycoder library entry point.
//!
//! Exposes two keyboard services of the operating system:
//!
//! - [`dynamic_mapping`] asks the active keyboard layout what each
//!   layout-dependent key types and returns the reverse table, character to
//!   key code.
//! - [`post_event`] injects one synthesized key-down or key-up event into the
//!   system input stream, then pauses 9 ms so consecutive events are not
//!   delivered faster than applications can consume them.
//!
//! # Layers
//!
//! - **`application`** – use cases that drive the platform traits
//!   ([`KeyboardLayoutProvider`], [`PlatformEventPoster`]).
//! - **`infrastructure`** – the macOS implementation of those traits
//!   (Text Input Sources, `UCKeyTranslate`, `CGEventPost`) and in-memory mocks.
//! - **[`KeyCoder`]** – a facade holding one of each use case.
//!
//! # Example
//!
//! ```no_run
//! let map = keycoder::dynamic_mapping()?;
//! if let Some(code) = map.get("a") {
//!     keycoder::post_event(code, true)?;
//!     keycoder::post_event(code, false)?;
//! }
//! # Ok::<(), keycoder::KeyCoderError>(())
//! ```

/// Application layer: use cases for layout mapping and event posting.
pub mod application;

/// Infrastructure layer: OS adapters and mocks.
pub mod infrastructure;

mod key_coder;

pub use application::layout_mapper::{KeyboardLayout, KeyboardLayoutProvider, LayoutMapperUseCase};
pub use application::post_event::{PlatformEventPoster, PostEventUseCase};
pub use key_coder::{dynamic_mapping, post_event, KeyCoder};
pub use keycoder_core::{EventTap, KeyCode, KeyCodeMap, KeyCoderConfig, KeyCoderError, KeyEvent};
