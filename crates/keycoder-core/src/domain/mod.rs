//! Domain types for keyboard layout mapping and event posting.
//!
//! Nothing in this module talks to the operating system.  The types are
//! plain values that the platform layer fills in or consumes.

pub mod event;
pub mod keycode;
pub mod mapping;
