//! Windows Key Injection
//!
//! Posts arrow-key events through the user32 `keybd_event` primitive, using
//! the standard VK_* virtual-key codes.

use super::{EmitError, KeyEmitter};
use crate::mapping::{Axis, DirectionalAction};
use tracing::trace;

const KEYEVENTF_KEYDOWN: u32 = 0x0000;
const KEYEVENTF_KEYUP: u32 = 0x0002;

const VK_LEFT: u8 = 0x25;
const VK_UP: u8 = 0x26;
const VK_RIGHT: u8 = 0x27;
const VK_DOWN: u8 = 0x28;

#[link(name = "user32")]
extern "system" {
    fn keybd_event(b_vk: u8, b_scan: u8, dw_flags: u32, dw_extra_info: usize);
}

fn virtual_key(action: DirectionalAction) -> u8 {
    match action {
        DirectionalAction::Left => VK_LEFT,
        DirectionalAction::Up => VK_UP,
        DirectionalAction::Right => VK_RIGHT,
        DirectionalAction::Down => VK_DOWN,
    }
}

/// Arrow-key emitter backed by keybd_event
#[derive(Debug, Default)]
pub struct WindowsKeyEmitter;

impl WindowsKeyEmitter {
    pub fn new() -> Self {
        Self
    }

    fn post(&self, action: DirectionalAction, flags: u32) -> Result<(), EmitError> {
        // Safety: keybd_event has no failure mode beyond being ignored by
        // the system; all argument combinations are defined.
        unsafe {
            keybd_event(virtual_key(action), 0, flags, 0);
        }
        trace!(
            "posted arrow key {:?} ({})",
            action,
            if flags == KEYEVENTF_KEYUP { "up" } else { "down" }
        );
        Ok(())
    }
}

impl KeyEmitter for WindowsKeyEmitter {
    fn press(&mut self, _axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        self.post(action, KEYEVENTF_KEYDOWN)
    }

    fn release(&mut self, _axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        self.post(action, KEYEVENTF_KEYUP)
    }
}
