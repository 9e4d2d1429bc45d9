//! Virtual key codes and the layout-dependent key code ranges.
//!
//! Key codes are the values defined in Carbon `Events.h` (HIToolbox
//! framework), e.g. `kVK_ANSI_A = 0x00`.  They name a physical key position,
//! not a character: what a code types depends on the active keyboard layout.
//!
//! Codes `65..=92` (keypad, volume, and a few function keys) produce the same
//! output under every layout, so they are never part of a dynamic mapping.

use std::ops::{Range, RangeInclusive};

/// A platform virtual key code (`CGKeyCode` on macOS).
pub type KeyCode = u16;

/// Key codes whose output is the same under every keyboard layout.
pub const LAYOUT_INVARIANT_CODES: RangeInclusive<KeyCode> = 65..=92;

/// The ranges scanned when building a dynamic mapping, in scan order.
pub const DYNAMIC_CODE_RANGES: [Range<KeyCode>; 2] = [0..65, 93..127];

/// Returns every key code whose output depends on the keyboard layout.
///
/// Codes are yielded in ascending order: `0..65` followed by `93..127`.
///
/// # Examples
///
/// ```
/// use keycoder_core::dynamic_key_codes;
///
/// let codes: Vec<u16> = dynamic_key_codes().collect();
/// assert_eq!(codes.first(), Some(&0));
/// assert_eq!(codes.last(), Some(&126));
/// assert!(!codes.contains(&70));
/// ```
pub fn dynamic_key_codes() -> impl Iterator<Item = KeyCode> {
    DYNAMIC_CODE_RANGES.into_iter().flatten()
}

/// Returns `true` if `code` is scanned when building a dynamic mapping.
pub fn is_layout_dependent(code: KeyCode) -> bool {
    DYNAMIC_CODE_RANGES.iter().any(|range| range.contains(&code))
}
