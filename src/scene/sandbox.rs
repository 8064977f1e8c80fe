use crate::physics::{create_ground, BodyId, PhysicsWorld};

use super::Scene;

/// Ground slab placement in screen pixels
pub const GROUND_POSITION_PX: (f32, f32) = (340.0, 500.0);

/// Click-to-spawn playground: one static ground slab under configured gravity
#[derive(Debug, Default)]
pub struct SandboxScene {
    ground: Option<BodyId>,
}

impl SandboxScene {
    pub const NAME: &'static str = "sandbox";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn ground(&self) -> Option<BodyId> {
        self.ground
    }
}

impl Scene for SandboxScene {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn title(&self) -> &'static str {
        "Sandbox"
    }

    fn setup(&mut self, world: &mut dyn PhysicsWorld, scale: f32) {
        let (x, y) = GROUND_POSITION_PX;
        self.ground = Some(create_ground(world, x, y, scale));
        log::info!("Sandbox: ground placed at screen ({x}, {y})");
    }
}
