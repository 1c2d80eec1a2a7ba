use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A platform-agnostic event produced by a render surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The user asked to close the surface.
    Closed,
    /// The drawable area changed size, in physical pixels.
    Resized { width: u32, height: u32 },
    /// Pointer moved, in physical pixels relative to the top-left corner.
    PointerMoved { x: f32, y: f32 },
    /// The pointer left the surface.
    PointerLeft,
    PointerButton { button: MouseButton, pressed: bool },
    /// The surface lost focus; held buttons are released.
    FocusLost,
}

/// Current pointer position and left-button state for one surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: Option<Vec2>,
    pub left_down: bool,
}

impl PointerState {
    pub fn apply(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::PointerMoved { x, y } => {
                self.position = Some(Vec2::new(*x, *y));
            }
            SurfaceEvent::PointerLeft => {
                self.position = None;
            }
            SurfaceEvent::PointerButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.left_down = *pressed;
            }
            SurfaceEvent::FocusLost => {
                // Avoid a stuck button when the release happens elsewhere.
                self.left_down = false;
            }
            SurfaceEvent::PointerButton { .. }
            | SurfaceEvent::Closed
            | SurfaceEvent::Resized { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_moves_and_leaves() {
        let mut state = PointerState::default();
        state.apply(&SurfaceEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(state.position, Some(Vec2::new(10.0, 20.0)));
        state.apply(&SurfaceEvent::PointerLeft);
        assert_eq!(state.position, None);
    }

    #[test]
    fn only_left_button_is_tracked() {
        let mut state = PointerState::default();
        state.apply(&SurfaceEvent::PointerButton {
            button: MouseButton::Right,
            pressed: true,
        });
        assert!(!state.left_down);
        state.apply(&SurfaceEvent::PointerButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(state.left_down);
        state.apply(&SurfaceEvent::PointerButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(!state.left_down);
    }

    #[test]
    fn focus_loss_releases_button() {
        let mut state = PointerState {
            position: Some(Vec2::ONE),
            left_down: true,
        };
        state.apply(&SurfaceEvent::FocusLost);
        assert!(!state.left_down);
        assert_eq!(state.position, Some(Vec2::ONE));
    }

    #[test]
    fn closed_and_resize_leave_pointer_alone() {
        let mut state = PointerState {
            position: Some(Vec2::ONE),
            left_down: true,
        };
        let before = state;
        state.apply(&SurfaceEvent::Closed);
        state.apply(&SurfaceEvent::Resized {
            width: 1,
            height: 1,
        });
        assert_eq!(state, before);
    }
}
