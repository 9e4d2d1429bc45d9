//! # keycoder-core
//!
//! Shared library for KeyCoder containing the key code domain types, the
//! error taxonomy, and the TOML configuration schema.
//!
//! This crate has zero dependencies on OS APIs.  The platform-facing code
//! (keyboard layout lookup and event injection) lives in the `keycoder`
//! crate, which builds on the types defined here.
//!
//! # Architecture overview (for beginners)
//!
//! KeyCoder exposes two keyboard services of the operating system:
//!
//! - a *dynamic mapping* from typed characters to hardware key codes, built
//!   by asking the OS what each key produces under the active layout, and
//! - *event posting*, which injects a synthesized key-down or key-up event
//!   into the system input stream.
//!
//! This crate defines:
//!
//! - **`domain`** – `KeyCode`, `KeyEvent`, `KeyCodeMap`, and the tables that
//!   decide which key codes depend on the keyboard layout.
//!
//! - **`error`** – `KeyCoderError`, the single error type returned by the
//!   public entry points.
//!
//! - **`config`** – `KeyCoderConfig`, loaded from a TOML file.

pub mod config;
pub mod domain;
pub mod error;

// Re-export the most-used types at the crate root so callers can write
// `keycoder_core::KeyCodeMap` instead of `keycoder_core::domain::mapping::KeyCodeMap`.
pub use config::{ConfigError, EventTap, KeyCoderConfig};
pub use domain::event::KeyEvent;
pub use domain::keycode::{dynamic_key_codes, is_layout_dependent, KeyCode};
pub use domain::mapping::KeyCodeMap;
pub use error::KeyCoderError;
