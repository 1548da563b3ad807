/// Platform-agnostic input events.
///
/// These are fed into a [`GestureDispatcher`](super::GestureDispatcher)
/// which converts them into [`ViewCommand`](crate::viewer::ViewCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = dispatcher.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
/// ) {
///     viewer.execute(cmd)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to a position in viewport pixels.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f64,
        /// Vertical position in physical pixels, growing downward.
        y: f64,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel, in notches.
    Scroll {
        /// Notch count (positive = zoom in, negative = zoom out).
        delta: f64,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "winit")]
impl MouseButton {
    /// The viewer's button for a winit button. Back, forward and extra
    /// buttons have no gesture and map to `None`.
    #[must_use]
    pub const fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(feature = "winit")]
impl InputEvent {
    /// Translate a winit window event, if it is one the viewer handles.
    ///
    /// Presses of buttons without a gesture are dropped. Line scrolls count one notch per line; pixel scrolls one notch per
    /// 120 pixels.
    #[must_use]
    pub fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

        match event {
            WindowEvent::CursorMoved { position, .. } => Some(Self::CursorMoved {
                x: position.x,
                y: position.y,
            }),
            WindowEvent::MouseInput { state, button, .. } => {
                Some(Self::MouseButton {
                    button: MouseButton::from_winit(*button)?,
                    pressed: *state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 120.0,
                };
                Some(Self::Scroll { delta: notches })
            }
            _ => None,
        }
    }
}
