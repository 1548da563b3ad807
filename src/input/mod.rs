//! Input handling: event types, key actions, and the gesture dispatcher
//! that converts raw pointer events into view commands.

/// Platform-agnostic input events.
pub mod event;
/// Actions that can be bound to keys.
pub mod keyboard;
/// Gesture state machine producing view commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::{GestureDispatcher, GestureState};
