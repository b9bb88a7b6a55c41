//! Keyboard input: the key-binding table and the dispatcher that turns key
//! presses into [`ViewerCommand`](crate::ViewerCommand)s.

/// Key bindings and dispatch.
pub mod keyboard;

pub use keyboard::{FocusTarget, KeyBindings, KeyCommandTag, KeyDispatcher};
