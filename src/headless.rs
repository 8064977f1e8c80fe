//! Run a scene without a window: step, rasterise into a canvas, optionally
//! save the last frame.

use std::path::Path;

use anyhow::Result;

use crate::config::QuickboxConfig;
use crate::physics::{PhysicsWorld, RapierWorld};
use crate::render::{Canvas, TextureSet};
use crate::scene::Scene;
use crate::simulation::Simulation;

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub scene: &'static str,
    pub frames: u32,
    pub bodies: usize,
    pub sprites_drawn: usize,
}

pub fn run_headless(
    config: &QuickboxConfig,
    scene: Box<dyn Scene>,
    frames: u32,
    screenshot: Option<&Path>,
) -> Result<HeadlessReport> {
    let scene_name = scene.name();
    log::info!("Headless run: scene '{}', {} frames", scene_name, frames);

    let textures = TextureSet::load(&config.assets);
    let mut canvas = Canvas::new(config.window.width, config.window.height);
    let mut sim = Simulation::new(
        RapierWorld::new(config.physics.gravity()),
        scene,
        config,
    );

    let mut sprites_drawn = sim.render(&mut canvas, &textures);
    for _ in 0..frames {
        sim.step();
        sprites_drawn = sim.render(&mut canvas, &textures);
    }

    for body in sim.world().bodies() {
        log::info!(
            "  {:?} {:?} at ({:.3}, {:.3}) angle {:.3}",
            body.id,
            body.kind,
            body.position.x,
            body.position.y,
            body.angle
        );
    }

    if let Some(path) = screenshot {
        canvas.save_png(path)?;
        log::info!("Saved final frame to {}", path.display());
    }

    Ok(HeadlessReport {
        scene: scene_name,
        frames,
        bodies: sim.world().body_count(),
        sprites_drawn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SandboxScene, TopDownCarScene};

    #[test]
    fn test_headless_sandbox_run() {
        let report = run_headless(
            &QuickboxConfig::default(),
            Box::new(SandboxScene::new()),
            10,
            None,
        )
        .unwrap();
        assert_eq!(report.scene, "sandbox");
        assert_eq!(report.frames, 10);
        assert_eq!(report.bodies, 1);
        assert_eq!(report.sprites_drawn, 1);
    }

    #[test]
    fn test_headless_screenshot_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.png");
        let config = QuickboxConfig::default();
        run_headless(&config, Box::new(TopDownCarScene::new()), 5, Some(&path)).unwrap();

        let frame = image::open(&path).unwrap();
        assert_eq!(frame.width(), config.window.width);
        assert_eq!(frame.height(), config.window.height);
    }
}
