//! Key Event Emission
//!
//! The boundary between the bridge and the OS input-injection primitive.
//! The tick loop talks to a [`KeyEmitter`] trait object; platform backends
//! translate directional actions into arrow-key down/up events.
//!
//! The bridge guarantees pairing: every `press` is matched by a `release`
//! before a different direction is pressed on the same axis, and before the
//! loop shuts down, so the target application never observes a logically
//! held key.

use crate::mapping::{Axis, DirectionalAction};
use tracing::debug;

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos::MacosKeyEmitter;
#[cfg(target_os = "windows")]
pub use windows::WindowsKeyEmitter;

/// Error from the platform injection primitive
///
/// Non-fatal: the bridge records it in status and continues ticking.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct EmitError(pub String);

/// Abstract key-injection capability.
///
/// `press` corresponds to a platform key-down, `release` to a key-up, for
/// the arrow key matching the directional action.
pub trait KeyEmitter: Send {
    fn press(&mut self, axis: Axis, action: DirectionalAction) -> Result<(), EmitError>;
    fn release(&mut self, axis: Axis, action: DirectionalAction) -> Result<(), EmitError>;
}

/// Emitter that logs instead of injecting.
///
/// Used for dry runs, headless tests, and platforms without an injection
/// backend.
#[derive(Debug, Default)]
pub struct NullEmitter;

impl KeyEmitter for NullEmitter {
    fn press(&mut self, axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        debug!("key down (dry run): {:?} {:?}", axis, action);
        Ok(())
    }

    fn release(&mut self, axis: Axis, action: DirectionalAction) -> Result<(), EmitError> {
        debug!("key up (dry run): {:?} {:?}", axis, action);
        Ok(())
    }
}

/// The default emitter for the current platform.
///
/// Falls back to [`NullEmitter`] where no injection backend exists.
pub fn platform_emitter() -> Box<dyn KeyEmitter> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacosKeyEmitter::new())
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsKeyEmitter::new())
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Box::new(NullEmitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_emitter_never_fails() {
        let mut emitter = NullEmitter;
        assert!(emitter.press(Axis::Horizontal, DirectionalAction::Right).is_ok());
        assert!(emitter.release(Axis::Horizontal, DirectionalAction::Right).is_ok());
        assert!(emitter.press(Axis::Vertical, DirectionalAction::Up).is_ok());
        assert!(emitter.release(Axis::Vertical, DirectionalAction::Up).is_ok());
    }

    #[test]
    fn test_platform_emitter_constructs() {
        let _emitter = platform_emitter();
    }
}
