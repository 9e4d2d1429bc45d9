//! macOS keyboard layout lookup and CoreGraphics event injection.
//!
//! # Layout mapping
//!
//! The active layout comes from the Text Input Sources API in Carbon:
//!
//! 1. `TISCopyCurrentKeyboardLayoutInputSource()` returns a retained handle to
//!    the input source the user has selected.
//! 2. `TISGetInputSourceProperty(source, kTISPropertyUnicodeKeyLayoutData)`
//!    returns a `CFData` wrapping a `UCKeyboardLayout` (the `uchr` resource).
//!    Input methods without a `uchr` (some CJK methods) return null here.
//! 3. `UCKeyTranslate(layout, code, kUCKeyActionDown, 0, LMGetKbdType(), ...)`
//!    turns one virtual key code into the UTF-16 it types.
//!
//! Both the input source and the layout data are held as CoreFoundation
//! wrappers, so they are released when [`MacosKeyboardLayout`] drops, on
//! every exit path.
//!
//! # Event injection
//!
//! `CGEventCreateKeyboardEvent` + `CGEventPost` inject a key event at the
//! chosen tap.  At `kCGHIDEventTap` the event enters the stream where
//! hardware events do.
//!
//! # Accessibility permission
//!
//! Posting at the HID tap requires the **Accessibility** permission
//! (System Settings → Privacy & Security → Accessibility).  Without it the
//! post is silently dropped; the API gives no way to detect this.

#![cfg(target_os = "macos")]

use std::ffi::c_void;
use std::os::raw::c_ulong;

use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::data::{CFData, CFDataRef};
use core_foundation::string::CFStringRef;
use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use keycoder_core::{EventTap, KeyCode, KeyCoderError, KeyEvent};
use tracing::warn;

use crate::application::layout_mapper::{
    decode_translation, KeyboardLayout, KeyboardLayoutProvider,
};
use crate::application::post_event::PlatformEventPoster;

// ── Carbon FFI ────────────────────────────────────────────────────────────────

type TISInputSourceRef = CFTypeRef;
type OSStatus = i32;
type UniChar = u16;
type UniCharCount = c_ulong;

/// `kUCKeyActionDown` from `UnicodeUtilities.h`.
const UC_KEY_ACTION_DOWN: u16 = 0;

/// Longest string a single key can type.
const MAX_TRANSLATION_LEN: usize = 255;

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    static kTISPropertyUnicodeKeyLayoutData: CFStringRef;

    fn TISCopyCurrentKeyboardLayoutInputSource() -> TISInputSourceRef;
    fn TISGetInputSourceProperty(source: TISInputSourceRef, key: CFStringRef) -> *const c_void;
    fn LMGetKbdType() -> u8;

    #[allow(clippy::too_many_arguments)]
    fn UCKeyTranslate(
        key_layout_ptr: *const c_void,
        virtual_key_code: u16,
        key_action: u16,
        modifier_key_state: u32,
        keyboard_type: u32,
        key_translate_options: u32,
        dead_key_state: *mut u32,
        max_string_length: UniCharCount,
        actual_string_length: *mut UniCharCount,
        unicode_string: *mut UniChar,
    ) -> OSStatus;
}

// ── Layout provider ───────────────────────────────────────────────────────────

/// Reads the keyboard layout selected in System Settings.
#[derive(Debug, Default)]
pub struct MacosKeyboardLayoutProvider;

impl MacosKeyboardLayoutProvider {
    pub fn new() -> Self {
        Self
    }
}

/// An open `UCKeyboardLayout` and the input source that owns it.
pub struct MacosKeyboardLayout {
    layout_data: CFData,
    _input_source: CFType,
    keyboard_type: u32,
}

impl KeyboardLayoutProvider for MacosKeyboardLayoutProvider {
    fn current_layout(&self) -> Result<Box<dyn KeyboardLayout + '_>, KeyCoderError> {
        // SAFETY: no preconditions; the result follows the Copy rule.
        let raw_source = unsafe { TISCopyCurrentKeyboardLayoutInputSource() };
        if raw_source.is_null() {
            return Err(KeyCoderError::LayoutUnavailable(
                "no current keyboard input source".into(),
            ));
        }
        // SAFETY: non-null and owned by us (Copy rule); released on drop.
        let input_source = unsafe { CFType::wrap_under_create_rule(raw_source) };

        // SAFETY: `raw_source` is a live input source; the key is a framework constant.
        let raw_data =
            unsafe { TISGetInputSourceProperty(raw_source, kTISPropertyUnicodeKeyLayoutData) };
        if raw_data.is_null() {
            return Err(KeyCoderError::LayoutUnavailable(
                "current input source has no Unicode key layout data".into(),
            ));
        }
        // SAFETY: non-null CFData under the Get rule; wrapping retains it.
        let layout_data = unsafe { CFData::wrap_under_get_rule(raw_data as CFDataRef) };

        // SAFETY: no preconditions.
        let keyboard_type = u32::from(unsafe { LMGetKbdType() });

        Ok(Box::new(MacosKeyboardLayout {
            layout_data,
            _input_source: input_source,
            keyboard_type,
        }))
    }
}

impl KeyboardLayout for MacosKeyboardLayout {
    fn translate(&self, key_code: KeyCode) -> Result<String, KeyCoderError> {
        let mut chars: [UniChar; MAX_TRANSLATION_LEN] = [0; MAX_TRANSLATION_LEN];
        let mut length: UniCharCount = 0;
        let mut dead_key_state: u32 = 0;

        // SAFETY: `layout_data` holds a valid UCKeyboardLayout for as long as
        // `self` lives; the out-pointers reference live locals sized as declared.
        let status = unsafe {
            UCKeyTranslate(
                self.layout_data.bytes().as_ptr().cast(),
                key_code,
                UC_KEY_ACTION_DOWN,
                0,
                self.keyboard_type,
                0,
                &mut dead_key_state,
                MAX_TRANSLATION_LEN as UniCharCount,
                &mut length,
                chars.as_mut_ptr(),
            )
        };
        if status != 0 {
            return Err(KeyCoderError::TranslationFailure { key_code, status });
        }

        let length = (length as usize).min(MAX_TRANSLATION_LEN);
        decode_translation(key_code, &chars[..length])
    }
}

// ── Event poster ──────────────────────────────────────────────────────────────

/// Posts synthesized keyboard events through CoreGraphics.
#[derive(Debug, Default)]
pub struct MacosEventPoster;

impl MacosEventPoster {
    pub fn new() -> Self {
        Self
    }
}

fn tap_location(tap: EventTap) -> CGEventTapLocation {
    match tap {
        EventTap::Hid => CGEventTapLocation::HID,
        EventTap::Session => CGEventTapLocation::Session,
        EventTap::AnnotatedSession => CGEventTapLocation::AnnotatedSession,
    }
}

impl PlatformEventPoster for MacosEventPoster {
    fn post_keyboard_event(&self, event: KeyEvent, tap: EventTap) -> Result<(), KeyCoderError> {
        let key_code = event.key_code;
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|()| {
            KeyCoderError::EventInjectionFailure {
                key_code,
                reason: "could not create HID event source".into(),
            }
        })?;
        let cg_event = CGEvent::new_keyboard_event(source, key_code, event.key_down).map_err(
            |()| {
                warn!(key_code, "CGEventCreateKeyboardEvent returned null");
                KeyCoderError::EventInjectionFailure {
                    key_code,
                    reason: "could not create keyboard event".into(),
                }
            },
        )?;
        cg_event.post(tap_location(tap));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_location_maps_every_tap() {
        assert!(matches!(tap_location(EventTap::Hid), CGEventTapLocation::HID));
        assert!(matches!(tap_location(EventTap::Session), CGEventTapLocation::Session));
        assert!(matches!(
            tap_location(EventTap::AnnotatedSession),
            CGEventTapLocation::AnnotatedSession
        ));
    }

    #[test]
    #[ignore = "requires a logged-in macOS session with a US keyboard layout"]
    fn test_us_layout_translates_code_zero_to_a() {
        let provider = MacosKeyboardLayoutProvider::new();
        let layout = provider.current_layout().expect("layout");
        assert_eq!(layout.translate(0).expect("translate"), "a");
    }
}
