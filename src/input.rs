//! Input events and the actions they map to
//!
//! Window events are first reduced to [`InputEvent`] so the mapping to
//! [`Action`] can run (and be tested) without a window.

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::Camera;
use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Escape,
    Other,
}

/// The subset of window events the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    CloseRequested,
    /// `position` is in logical window pixels
    MousePressed { button: MouseButton, position: Vec2 },
    KeyPressed(Key),
}

/// What the frame loop should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Spawn at world pixels; the factory applies the metre scale
    SpawnBox(Vec2),
    SpawnCircle(Vec2),
    /// Pan by a delta in metres
    PanCamera(Vec2),
    ZoomCamera(f32),
}

pub fn action_for(
    event: &InputEvent,
    camera: &Camera,
    camera_config: &CameraConfig,
    scale: f32,
) -> Option<Action> {
    match *event {
        InputEvent::CloseRequested => Some(Action::Quit),
        InputEvent::MousePressed { button, position } => {
            let world = camera.screen_to_world_pixels(position, scale);
            match button {
                MouseButton::Left => Some(Action::SpawnBox(world)),
                MouseButton::Right => Some(Action::SpawnCircle(world)),
                MouseButton::Other => None,
            }
        }
        InputEvent::KeyPressed(key) => {
            let pan = camera_config.pan_step;
            let zoom = camera_config.zoom_step;
            match key {
                Key::Escape => Some(Action::Quit),
                Key::W => Some(Action::PanCamera(Vec2::new(0.0, -pan))),
                Key::S => Some(Action::PanCamera(Vec2::new(0.0, pan))),
                Key::A => Some(Action::PanCamera(Vec2::new(-pan, 0.0))),
                Key::D => Some(Action::PanCamera(Vec2::new(pan, 0.0))),
                Key::Up => Some(Action::ZoomCamera(zoom)),
                Key::Down => Some(Action::ZoomCamera(-zoom)),
                Key::Other => None,
            }
        }
    }
}

/// Tracks the cursor between winit events; mouse button events carry no position.
#[derive(Debug, Default)]
pub struct InputState {
    pub cursor: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce a winit event to an [`InputEvent`], updating cursor tracking.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(scale_factor);
                self.cursor = Vec2::new(logical.x as f32, logical.y as f32);
                log::trace!("Mouse: ({:.0}, {:.0})", self.cursor.x, self.cursor.y);
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => Some(InputEvent::MousePressed {
                button: match button {
                    WinitMouseButton::Left => MouseButton::Left,
                    WinitMouseButton::Right => MouseButton::Right,
                    _ => MouseButton::Other,
                },
                position: self.cursor,
            }),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                log::trace!("Keyboard: {:?} pressed", code);
                Some(InputEvent::KeyPressed(key_from_code(code)))
            }
            _ => None,
        }
    }
}

fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera() -> Camera {
        Camera::from_config(&CameraConfig::default())
    }

    #[test]
    fn test_close_and_escape_quit() {
        let camera = default_camera();
        let config = CameraConfig::default();
        assert_eq!(
            action_for(&InputEvent::CloseRequested, &camera, &config, 30.0),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for(&InputEvent::KeyPressed(Key::Escape), &camera, &config, 30.0),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_left_click_spawns_box_at_converted_point() {
        let camera = Camera::new(Vec2::new(1.0, 6.5), 2.0);
        let event = InputEvent::MousePressed {
            button: MouseButton::Left,
            position: Vec2::new(100.0, 50.0),
        };
        let action = action_for(&event, &camera, &CameraConfig::default(), 30.0);
        // 100 / 2 + 1 * 30, 50 / 2 + 6.5 * 30
        assert_eq!(action, Some(Action::SpawnBox(Vec2::new(80.0, 220.0))));
    }

    #[test]
    fn test_right_click_spawns_circle() {
        let camera = Camera::new(Vec2::ZERO, 1.0);
        let event = InputEvent::MousePressed {
            button: MouseButton::Right,
            position: Vec2::new(10.0, 20.0),
        };
        assert_eq!(
            action_for(&event, &camera, &CameraConfig::default(), 30.0),
            Some(Action::SpawnCircle(Vec2::new(10.0, 20.0)))
        );
    }

    #[test]
    fn test_middle_click_is_ignored() {
        let event = InputEvent::MousePressed {
            button: MouseButton::Other,
            position: Vec2::ZERO,
        };
        assert_eq!(
            action_for(&event, &default_camera(), &CameraConfig::default(), 30.0),
            None
        );
    }

    #[test]
    fn test_camera_keys() {
        let camera = default_camera();
        let config = CameraConfig::default();
        let act = |key| action_for(&InputEvent::KeyPressed(key), &camera, &config, 30.0);

        assert_eq!(act(Key::W), Some(Action::PanCamera(Vec2::new(0.0, -1.0))));
        assert_eq!(act(Key::S), Some(Action::PanCamera(Vec2::new(0.0, 1.0))));
        assert_eq!(act(Key::A), Some(Action::PanCamera(Vec2::new(-1.0, 0.0))));
        assert_eq!(act(Key::D), Some(Action::PanCamera(Vec2::new(1.0, 0.0))));
        assert_eq!(act(Key::Up), Some(Action::ZoomCamera(0.1)));
        assert_eq!(act(Key::Down), Some(Action::ZoomCamera(-0.1)));
        assert_eq!(act(Key::Other), None);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(key_from_code(KeyCode::KeyW), Key::W);
        assert_eq!(key_from_code(KeyCode::ArrowDown), Key::Down);
        assert_eq!(key_from_code(KeyCode::Escape), Key::Escape);
        assert_eq!(key_from_code(KeyCode::KeyQ), Key::Other);
    }
}
