//! macOS Key Injection
//!
//! Posts arrow-key events through the Core Graphics event system. Each
//! directional action maps to the matching arrow key's virtual keycode.
//!
//! # Permissions
//!
//! Posting events requires Accessibility permissions in System Preferences
//! > Security & Privacy.

use super::{EmitError, KeyEmitter};
use crate::mapping::{Axis, DirectionalAction};
use std::ffi::c_void;
use std::ptr;
use tracing::trace;

type CGEventRef = *mut c_void;
type CGEventSourceRef = *mut c_void;

// kCGHIDEventTap: post at the HID level so the event reaches whichever
// application currently has focus.
const CG_HID_EVENT_TAP: u32 = 0;

// macOS virtual keycodes for the arrow keys (kVK_*Arrow)
const VK_LEFT_ARROW: u16 = 0x7B;
const VK_RIGHT_ARROW: u16 = 0x7C;
const VK_DOWN_ARROW: u16 = 0x7D;
const VK_UP_ARROW: u16 = 0x7E;

// FFI declarations for Core Graphics
#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGEventCreateKeyboardEvent(
        source: CGEventSourceRef,
        virtual_key: u16,
        key_down: bool,
    ) -> CGEventRef;

    fn CGEventPost(tap: u32, event: CGEventRef);
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFRelease(cf: *const c_void);
}

fn virtual_keycode(action: DirectionalAction) -> u16 {
    match action {
        DirectionalAction::Left => VK_LEFT_ARROW,
        DirectionalAction::Right => VK_RIGHT_ARROW,
        DirectionalAction::Down => VK_DOWN_ARROW,
        DirectionalAction::Up => VK_UP_ARROW,
    }
}

/// Arrow-key emitter backed by CGEventPost
#[derive(Debug, Default)]
pub struct MacosKeyEmitter;

impl MacosKeyEmitter {
    pub fn new() -> Self {
        Self
    }

    fn post(&self, action: DirectionalAction, key_down: bool) -> Result<(), EmitError> {
        let keycode = virtual_keycode(action);

        // Safety: a null source is documented as "combined session state";
        // the created event is released after posting.
        unsafe {
            let event = CGEventCreateKeyboardEvent(ptr::null_mut(), keycode, key_down);
            if event.is_null() {
                return Err(EmitError(format!(
                    "CGEventCreateKeyboardEvent returned null for keycode {:#x}",
                    keycode
                )));
            }
            CGEventPost(CG_HID_EVENT_TAP, event);
            CFRelease(event);
        }

        trace!(
            "posted arrow key {:?} ({})",
            action,
            if key_down { "down" } else { "up" }
        );
        Ok(())
    }
}

impl KeyEmitter for MacosKeyEmitter {
    fn press(&mut self, _axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        self.post(action, true)
    }

    fn release(&mut self, _axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        self.post(action, false)
    }
}
