//! Rendering - sprite mapping, CPU canvas and wgpu presentation

mod canvas;
mod renderer;
pub mod texture;

use glam::Vec2;

use crate::camera::Camera;
use crate::physics::{BodyKind, BodyState};

pub use canvas::Canvas;
pub use renderer::Renderer;
pub use texture::{Texture, TextureError, TextureSet};

pub const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Per-frame draw request derived from one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Selects the texture
    pub kind: BodyKind,
    /// Screen position of `origin`
    pub position: Vec2,
    /// Clockwise on screen, in degrees
    pub rotation: f32,
    pub scale: f32,
    /// Pivot in texture pixels
    pub origin: Vec2,
}

impl Sprite {
    /// Map a body to its sprite. Pure in `body` and `camera`.
    pub fn for_body(body: &BodyState, camera: &Camera, scale: f32) -> Self {
        Self {
            kind: body.kind,
            position: camera.world_to_screen(body.position, scale),
            rotation: body.angle.to_degrees(),
            scale: camera.zoom(),
            origin: sprite_origin(body.kind),
        }
    }
}

pub fn sprite_origin(kind: BodyKind) -> Vec2 {
    match kind {
        BodyKind::Ground => Vec2::new(240.0, 16.0),
        BodyKind::Box | BodyKind::Circle => Vec2::new(16.0, 16.0),
    }
}

/// Anything sprites can be drawn onto
pub trait SpriteRenderer {
    fn clear(&mut self, color: [u8; 4]);

    fn draw_sprite(&mut self, sprite: &Sprite, texture: &Texture);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyId, BodyType, Shape};

    fn body(kind: BodyKind, position: Vec2, angle: f32) -> BodyState {
        BodyState {
            id: BodyId(0),
            kind,
            body_type: if kind == BodyKind::Ground {
                BodyType::Static
            } else {
                BodyType::Dynamic
            },
            position,
            angle,
            linear_velocity: Vec2::ZERO,
            shape: Shape::Circle { radius: 0.5 },
            density: 5.0,
            friction: 5.0,
        }
    }

    #[test]
    fn test_sprite_transform() {
        let camera = Camera::new(Vec2::new(1.0, 2.0), 2.0);
        let sprite = Sprite::for_body(
            &body(BodyKind::Box, Vec2::new(3.0, 5.0), std::f32::consts::FRAC_PI_2),
            &camera,
            30.0,
        );
        assert_eq!(sprite.position, Vec2::new(120.0, 180.0));
        assert!((sprite.rotation - 90.0).abs() < 1e-4);
        assert_eq!(sprite.scale, 2.0);
        assert_eq!(sprite.origin, Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_origin_by_kind() {
        assert_eq!(sprite_origin(BodyKind::Ground), Vec2::new(240.0, 16.0));
        assert_eq!(sprite_origin(BodyKind::Box), Vec2::new(16.0, 16.0));
        assert_eq!(sprite_origin(BodyKind::Circle), Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_ground_sprite_keeps_kind() {
        let camera = Camera::new(Vec2::ZERO, 1.0);
        let sprite = Sprite::for_body(&body(BodyKind::Ground, Vec2::ZERO, 0.0), &camera, 30.0);
        assert_eq!(sprite.kind, BodyKind::Ground);
        assert_eq!(sprite.rotation, 0.0);
    }
}
