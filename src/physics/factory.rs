//! Body templates for the three kinds of object the demo spawns
//!
//! Every factory takes screen-space pixels and the pixel-per-metre scale;
//! the body ends up at `(x / scale, y / scale)` metres.

use glam::Vec2;

use super::{BodyDef, BodyId, BodyKind, BodyType, PhysicsWorld, Shape};

/// Ground slab size in pixels
pub const GROUND_SIZE_PX: Vec2 = Vec2::new(480.0, 32.0);
/// Box edge length in pixels
pub const BOX_SIZE_PX: f32 = 32.0;
/// Circle radius in pixels
pub const CIRCLE_RADIUS_PX: f32 = 16.0;

pub const GROUND_DENSITY: f32 = 0.0;
pub const GROUND_FRICTION: f32 = 0.2;
pub const DYNAMIC_DENSITY: f32 = 5.0;
pub const DYNAMIC_FRICTION: f32 = 5.0;

fn to_meters(x: f32, y: f32, scale: f32) -> Vec2 {
    Vec2::new(x / scale, y / scale)
}

pub fn ground_def(x: f32, y: f32, scale: f32) -> BodyDef {
    BodyDef {
        kind: BodyKind::Ground,
        body_type: BodyType::Static,
        position: to_meters(x, y, scale),
        shape: Shape::Box {
            half_extents: GROUND_SIZE_PX / 2.0 / scale,
        },
        density: GROUND_DENSITY,
        friction: GROUND_FRICTION,
    }
}

pub fn box_def(x: f32, y: f32, scale: f32) -> BodyDef {
    BodyDef {
        kind: BodyKind::Box,
        body_type: BodyType::Dynamic,
        position: to_meters(x, y, scale),
        shape: Shape::Box {
            half_extents: Vec2::splat(BOX_SIZE_PX / 2.0 / scale),
        },
        density: DYNAMIC_DENSITY,
        friction: DYNAMIC_FRICTION,
    }
}

pub fn circle_def(x: f32, y: f32, scale: f32) -> BodyDef {
    BodyDef {
        kind: BodyKind::Circle,
        body_type: BodyType::Dynamic,
        position: to_meters(x, y, scale),
        shape: Shape::Circle {
            radius: CIRCLE_RADIUS_PX / scale,
        },
        density: DYNAMIC_DENSITY,
        friction: DYNAMIC_FRICTION,
    }
}

/// Static 480x32 px slab with zero density.
pub fn create_ground<W: PhysicsWorld + ?Sized>(world: &mut W, x: f32, y: f32, scale: f32) -> BodyId {
    world.create_body(&ground_def(x, y, scale))
}

/// Dynamic 32x32 px box.
pub fn create_box<W: PhysicsWorld + ?Sized>(world: &mut W, x: f32, y: f32, scale: f32) -> BodyId {
    world.create_body(&box_def(x, y, scale))
}

/// Dynamic ball with a 16 px radius centred on the body.
pub fn create_circle<W: PhysicsWorld + ?Sized>(world: &mut W, x: f32, y: f32, scale: f32) -> BodyId {
    world.create_body(&circle_def(x, y, scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_template() {
        let def = ground_def(340.0, 500.0, 30.0);
        assert_eq!(def.body_type, BodyType::Static);
        assert_eq!(def.kind, BodyKind::Ground);
        assert!((def.position.x - 11.333).abs() < 1e-3);
        assert!((def.position.y - 16.667).abs() < 1e-3);
        assert_eq!(
            def.shape,
            Shape::Box {
                half_extents: Vec2::new(8.0, 16.0 / 30.0)
            }
        );
        assert_eq!(def.density, 0.0);
    }

    #[test]
    fn test_box_template() {
        let def = box_def(60.0, 90.0, 30.0);
        assert_eq!(def.body_type, BodyType::Dynamic);
        assert_eq!(def.position, Vec2::new(2.0, 3.0));
        assert_eq!(
            def.shape,
            Shape::Box {
                half_extents: Vec2::splat(16.0 / 30.0)
            }
        );
        assert_eq!(def.density, 5.0);
        assert_eq!(def.friction, 5.0);
    }

    #[test]
    fn test_circle_template() {
        let def = circle_def(0.0, 0.0, 30.0);
        assert_eq!(def.kind, BodyKind::Circle);
        assert_eq!(def.shape, Shape::Circle { radius: 16.0 / 30.0 });
        assert_eq!(def.density, 5.0);
        assert_eq!(def.friction, 5.0);
    }
}
