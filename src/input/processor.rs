//! Converts raw pointer events into view commands.
//!
//! The `GestureDispatcher` owns all transient input state (gesture state,
//! last pointer position, the enable flag) and the key-binding map. It is
//! the only thing that sits between raw window events and the viewer's
//! [`execute`](crate::viewer::DrawableViewer::execute) method.

use glam::DVec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::options::{KeybindingOptions, Options, RightClickAction, WheelZoom};
use crate::viewer::ViewCommand;

/// Which drag, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No button held.
    #[default]
    Idle,
    /// Middle button held: moves pan.
    Panning,
    /// Left button held: moves orbit.
    Orbiting,
}

impl GestureState {
    /// Button whose release ends this gesture.
    const fn driving_button(self) -> Option<MouseButton> {
        match self {
            Self::Idle => None,
            Self::Panning => Some(MouseButton::Middle),
            Self::Orbiting => Some(MouseButton::Left),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GestureDispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = dispatcher.handle_event(event) {
///     viewer.execute(cmd)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GestureDispatcher {
    /// Current gesture.
    state: GestureState,
    /// Last observed pointer position.
    last_position: DVec2,
    /// When false no event produces a command.
    enabled: bool,
    /// Wheel notch → zoom factor.
    wheel_zoom: WheelZoom,
    /// Right-click command.
    right_click: RightClickAction,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl GestureDispatcher {
    /// Create an enabled dispatcher with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&Options::default())
    }

    /// Create an enabled dispatcher configured from `options`.
    #[must_use]
    pub fn with_options(options: &Options) -> Self {
        Self {
            state: GestureState::Idle,
            last_position: DVec2::ZERO,
            enabled: true,
            wheel_zoom: options.navigation.wheel_zoom,
            right_click: options.navigation.right_click,
            key_bindings: options.keybindings.clone(),
        }
    }

    /// Adopt new navigation conventions and key bindings.
    pub fn apply_options(&mut self, options: &Options) {
        self.wheel_zoom = options.navigation.wheel_zoom;
        self.right_click = options.navigation.right_click;
        self.key_bindings = options.keybindings.clone();
    }

    /// Current gesture.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Last observed pointer position.
    #[must_use]
    pub const fn last_position(&self) -> DVec2 {
        self.last_position
    }

    /// Whether pointer events are processed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable gesture handling. Disabling abandons any gesture
    /// in progress.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = GestureState::Idle;
        }
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewCommand> {
        if !self.enabled {
            return None;
        }
        self.key_bindings
            .lookup(key)
            .map(|action| self.action_command(action))
    }

    /// Process a raw input event and return zero or one commands.
    ///
    /// While disabled, cursor moves still update the pointer position but
    /// nothing else is looked at.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewCommand> {
        if !self.enabled {
            if let InputEvent::CursorMoved { x, y } = event {
                self.last_position = DVec2::new(x, y);
            }
            return None;
        }
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(DVec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => (delta != 0.0).then(|| {
                ViewCommand::Zoom {
                    factor: self.wheel_zoom.factor(delta),
                }
            }),
        }
    }

    /// Cursor moved: advance the drag, if any.
    fn handle_cursor_moved(&mut self, position: DVec2) -> Option<ViewCommand> {
        let from = std::mem::replace(&mut self.last_position, position);
        match self.state {
            GestureState::Idle => None,
            GestureState::Panning => Some(ViewCommand::Pan { from, to: position }),
            GestureState::Orbiting => {
                Some(ViewCommand::Orbit { from, to: position })
            }
        }
    }

    /// Button press/release: start or end a drag, or fit on right press.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewCommand> {
        if button == MouseButton::Right {
            return pressed.then_some(match self.right_click {
                RightClickAction::FitExtents => ViewCommand::FitExtents,
                RightClickAction::ResetTopView => ViewCommand::ResetTopView,
            });
        }

        if pressed {
            if self.state == GestureState::Idle {
                self.state = match button {
                    MouseButton::Middle => GestureState::Panning,
                    _ => GestureState::Orbiting,
                };
                log::trace!(
                    "gesture {:?} from {}",
                    self.state,
                    self.last_position
                );
            }
        } else if self.state.driving_button() == Some(button) {
            log::trace!("gesture {:?} ended", self.state);
            self.state = GestureState::Idle;
        }
        None
    }

    fn action_command(&self, action: KeyAction) -> ViewCommand {
        match action {
            KeyAction::ZoomExtents => ViewCommand::FitExtents,
            KeyAction::ResetTopView => ViewCommand::ResetTopView,
            KeyAction::ZoomIn => ViewCommand::Zoom {
                factor: self.wheel_zoom.factor(1.0),
            },
            KeyAction::ZoomOut => ViewCommand::Zoom {
                factor: self.wheel_zoom.factor(-1.0),
            },
        }
    }
}

impl Default for GestureDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn left_drag_orbits_from_last_position() {
        let mut d = GestureDispatcher::new();
        assert_eq!(d.handle_event(moved(10.0, 20.0)), None);
        assert_eq!(d.handle_event(button(MouseButton::Left, true)), None);
        assert_eq!(d.state(), GestureState::Orbiting);

        assert_eq!(
            d.handle_event(moved(15.0, 22.0)),
            Some(ViewCommand::Orbit {
                from: DVec2::new(10.0, 20.0),
                to: DVec2::new(15.0, 22.0),
            })
        );
        assert_eq!(
            d.handle_event(moved(16.0, 22.0)),
            Some(ViewCommand::Orbit {
                from: DVec2::new(15.0, 22.0),
                to: DVec2::new(16.0, 22.0),
            })
        );

        assert_eq!(d.handle_event(button(MouseButton::Left, false)), None);
        assert_eq!(d.state(), GestureState::Idle);
        assert_eq!(d.handle_event(moved(30.0, 30.0)), None);
    }

    #[test]
    fn middle_drag_pans() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(moved(1.0, 1.0));
        let _ = d.handle_event(button(MouseButton::Middle, true));
        assert_eq!(d.state(), GestureState::Panning);
        assert_eq!(
            d.handle_event(moved(4.0, 5.0)),
            Some(ViewCommand::Pan {
                from: DVec2::new(1.0, 1.0),
                to: DVec2::new(4.0, 5.0),
            })
        );
    }

    #[test]
    fn only_the_driving_button_ends_a_gesture() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(button(MouseButton::Middle, true));
        let _ = d.handle_event(button(MouseButton::Left, true));
        assert_eq!(d.state(), GestureState::Panning);
        let _ = d.handle_event(button(MouseButton::Left, false));
        assert_eq!(d.state(), GestureState::Panning);
        let _ = d.handle_event(button(MouseButton::Middle, false));
        assert_eq!(d.state(), GestureState::Idle);
    }

    #[test]
    fn right_click_fits_without_changing_state() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(button(MouseButton::Left, true));
        assert_eq!(
            d.handle_event(button(MouseButton::Right, true)),
            Some(ViewCommand::FitExtents)
        );
        assert_eq!(d.handle_event(button(MouseButton::Right, false)), None);
        assert_eq!(d.state(), GestureState::Orbiting);
    }

    #[test]
    fn right_click_can_reset_top_view() {
        let mut options = Options::default();
        options.navigation.right_click = RightClickAction::ResetTopView;
        let mut d = GestureDispatcher::with_options(&options);
        assert_eq!(
            d.handle_event(button(MouseButton::Right, true)),
            Some(ViewCommand::ResetTopView)
        );
    }

    #[test]
    fn wheel_zooms_in_any_state() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(button(MouseButton::Middle, true));
        let Some(ViewCommand::Zoom { factor }) =
            d.handle_event(InputEvent::Scroll { delta: 1.0 })
        else {
            panic!("expected zoom");
        };
        assert!(factor < 1.0);
        assert_eq!(d.state(), GestureState::Panning);
        assert_eq!(d.handle_event(InputEvent::Scroll { delta: 0.0 }), None);
    }

    #[test]
    fn disabled_dispatcher_emits_nothing_but_tracks_pointer() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(button(MouseButton::Left, true));
        d.set_enabled(false);
        assert_eq!(d.state(), GestureState::Idle);

        let events = [
            moved(5.0, 5.0),
            button(MouseButton::Left, true),
            moved(50.0, 50.0),
            button(MouseButton::Right, true),
            InputEvent::Scroll { delta: -3.0 },
            button(MouseButton::Middle, true),
            moved(80.0, 10.0),
        ];
        for event in events {
            assert_eq!(d.handle_event(event), None);
        }
        assert_eq!(d.state(), GestureState::Idle);
        assert_eq!(d.last_position(), DVec2::new(80.0, 10.0));
        assert_eq!(d.handle_key_press("KeyF"), None);
    }

    #[test]
    fn reenabled_drag_starts_at_current_pointer() {
        let mut d = GestureDispatcher::new();
        let _ = d.handle_event(moved(10.0, 10.0));
        d.set_enabled(false);
        assert_eq!(d.handle_event(moved(500.0, 400.0)), None);
        d.set_enabled(true);

        assert_eq!(d.handle_event(button(MouseButton::Left, true)), None);
        assert_eq!(
            d.handle_event(moved(501.0, 400.0)),
            Some(ViewCommand::Orbit {
                from: DVec2::new(500.0, 400.0),
                to: DVec2::new(501.0, 400.0),
            })
        );
    }

    #[test]
    fn key_presses_map_through_bindings() {
        let d = GestureDispatcher::new();
        assert_eq!(d.handle_key_press("KeyF"), Some(ViewCommand::FitExtents));
        assert_eq!(
            d.handle_key_press("KeyT"),
            Some(ViewCommand::ResetTopView)
        );
        let Some(ViewCommand::Zoom { factor }) = d.handle_key_press("Minus")
        else {
            panic!("expected zoom");
        };
        assert!(factor > 1.0);
        assert_eq!(d.handle_key_press("KeyQ"), None);
    }
}
