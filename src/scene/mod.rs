//! Testbed scenes
//!
//! A scene populates a fresh world and may customise how it is stepped.
//! `sandbox` is the interactive default; `top-down-car` is the tutorial stub.

mod sandbox;
mod top_down_car;

use crate::camera::Camera;
use crate::config::QuickboxConfig;
use crate::physics::{PhysicsWorld, StepParams};

pub use sandbox::SandboxScene;
pub use top_down_car::{Tire, TopDownCarScene};

/// Names accepted by [`by_name`], first one is the default
pub const SCENE_NAMES: &[&str] = &[SandboxScene::NAME, TopDownCarScene::NAME];

pub trait Scene {
    fn name(&self) -> &'static str;

    /// Human-readable title, shown in the window title bar
    fn title(&self) -> &'static str;

    /// Populate `world`. `scale` is pixels per metre.
    fn setup(&mut self, world: &mut dyn PhysicsWorld, scale: f32);

    /// Advance one frame. Scenes that drive bodies override this and then
    /// call [`PhysicsWorld::step`].
    fn step(&mut self, world: &mut dyn PhysicsWorld, params: &StepParams) {
        world.step(params);
    }

    /// Camera to start with instead of the configured one
    fn initial_camera(&self, _config: &QuickboxConfig) -> Option<Camera> {
        None
    }

    /// Extra line of text describing the scene's state
    fn status_text(&self) -> Option<String> {
        None
    }
}

pub fn by_name(name: &str) -> Option<Box<dyn Scene>> {
    match name {
        SandboxScene::NAME => Some(Box::new(SandboxScene::new())),
        TopDownCarScene::NAME => Some(Box::new(TopDownCarScene::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in SCENE_NAMES {
            let scene = by_name(name).unwrap();
            assert_eq!(scene.name(), *name);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(by_name("pinball").is_none());
    }
}
