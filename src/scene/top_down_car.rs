//! Top-down car tutorial scene: gravity off, a single tire body.

use glam::Vec2;

use crate::camera::Camera;
use crate::config::QuickboxConfig;
use crate::physics::{BodyDef, BodyId, BodyKind, BodyType, PhysicsWorld, Shape};

use super::Scene;

/// One car tire: a 1 x 2.5 m dynamic box at the world origin
#[derive(Debug, Clone, Copy)]
pub struct Tire {
    body: BodyId,
}

impl Tire {
    pub const HALF_EXTENTS: Vec2 = Vec2::new(0.5, 1.25);
    pub const DENSITY: f32 = 1.0;

    pub fn new<W: PhysicsWorld + ?Sized>(world: &mut W) -> Self {
        let body = world.create_body(&BodyDef {
            kind: BodyKind::Box,
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            shape: Shape::Box {
                half_extents: Self::HALF_EXTENTS,
            },
            density: Self::DENSITY,
            friction: 0.2,
        });
        Self { body }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }
}

#[derive(Debug, Default)]
pub struct TopDownCarScene {
    tire: Option<Tire>,
}

impl TopDownCarScene {
    pub const NAME: &'static str = "top-down-car";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn tire(&self) -> Option<Tire> {
        self.tire
    }
}

impl Scene for TopDownCarScene {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn title(&self) -> &'static str {
        "Top-down car tutorial"
    }

    fn setup(&mut self, world: &mut dyn PhysicsWorld, _scale: f32) {
        world.set_gravity(Vec2::ZERO);
        let tire = Tire::new(world);
        log::info!("Top-down car: tire body {:?}", tire.body());
        self.tire = Some(tire);
    }

    /// Centre the world origin in the window.
    fn initial_camera(&self, config: &QuickboxConfig) -> Option<Camera> {
        let zoom = config.camera.start_zoom;
        let half_window = Vec2::new(config.window.width as f32, config.window.height as f32) / 2.0;
        Some(Camera::new(
            -half_window / (config.physics.pixels_per_meter * zoom),
            zoom,
        ))
    }

    fn status_text(&self) -> Option<String> {
        Some("Tutorial Test".to_string())
    }
}
