//! Application layer use cases.
//!
//! - **`layout_mapper`** – builds a [`KeyCodeMap`](keycoder_core::KeyCodeMap)
//!   from whatever keyboard layout a `KeyboardLayoutProvider` reports as
//!   current.
//!
//! - **`post_event`** – forwards a `KeyEvent` to a `PlatformEventPoster` and
//!   enforces the pause that follows every posted event.
//!
//! The OS calls themselves live behind the traits defined here; the
//! implementations are in the infrastructure layer.

pub mod layout_mapper;
pub mod post_event;
