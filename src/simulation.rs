//! One demo session: world, camera and scene, advanced frame by frame
//!
//! Independent of any window so the whole input → step → draw path can be
//! driven from tests and the headless runner.

use crate::camera::Camera;
use crate::config::{CameraConfig, QuickboxConfig};
use crate::input::{action_for, Action, InputEvent};
use crate::physics::{create_box, create_circle, BodyId, PhysicsWorld, StepParams};
use crate::render::{Sprite, SpriteRenderer, TextureSet, CLEAR_COLOR};
use crate::scene::Scene;

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Simulation<W: PhysicsWorld> {
    world: W,
    scene: Box<dyn Scene>,
    camera: Camera,
    camera_config: CameraConfig,
    scale: f32,
    step_params: StepParams,
    frame: u64,
}

impl<W: PhysicsWorld> Simulation<W> {
    /// Build a session and let `scene` populate `world`.
    pub fn new(mut world: W, mut scene: Box<dyn Scene>, config: &QuickboxConfig) -> Self {
        let scale = config.physics.pixels_per_meter;
        scene.setup(&mut world, scale);

        let camera = scene
            .initial_camera(config)
            .unwrap_or_else(|| Camera::from_config(&config.camera));

        log::info!(
            "Scene '{}' ready: {} bodies, camera at ({:.2}, {:.2}) zoom {:.2}",
            scene.name(),
            world.body_count(),
            camera.position.x,
            camera.position.y,
            camera.zoom()
        );
        if let Some(text) = scene.status_text() {
            log::info!("{}", text);
        }

        Self {
            world,
            scene,
            camera,
            camera_config: config.camera.clone(),
            scale,
            step_params: config.physics.step_params(),
            frame: 0,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Map an input event to an action and apply it.
    pub fn handle_event(&mut self, event: &InputEvent) -> Flow {
        match action_for(event, &self.camera, &self.camera_config, self.scale) {
            Some(action) => self.apply(action),
            None => Flow::Continue,
        }
    }

    pub fn apply(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => {
                log::info!("Exit requested after {} frames", self.frame);
                return Flow::Exit;
            }
            Action::SpawnBox(at) => {
                let id = create_box(&mut self.world, at.x, at.y, self.scale);
                log::debug!("Spawned box {:?} at world px ({:.1}, {:.1})", id, at.x, at.y);
            }
            Action::SpawnCircle(at) => {
                let id = create_circle(&mut self.world, at.x, at.y, self.scale);
                log::debug!("Spawned circle {:?} at world px ({:.1}, {:.1})", id, at.x, at.y);
            }
            Action::PanCamera(delta) => {
                self.camera.pan(delta);
                log::debug!(
                    "Camera moved to ({:.2}, {:.2})",
                    self.camera.position.x,
                    self.camera.position.y
                );
            }
            Action::ZoomCamera(delta) => {
                self.camera
                    .zoom_by(delta, self.camera_config.min_zoom, self.camera_config.max_zoom);
                log::debug!("Camera zoom {:.2}", self.camera.zoom());
            }
        }
        Flow::Continue
    }

    /// Spawn a box at world pixels, as a left click would.
    pub fn spawn_box(&mut self, x: f32, y: f32) -> BodyId {
        create_box(&mut self.world, x, y, self.scale)
    }

    /// Spawn a circle at world pixels, as a right click would.
    pub fn spawn_circle(&mut self, x: f32, y: f32) -> BodyId {
        create_circle(&mut self.world, x, y, self.scale)
    }

    /// Advance the world by one fixed step.
    pub fn step(&mut self) {
        self.scene.step(&mut self.world, &self.step_params);
        self.frame += 1;

        if self.frame % 120 == 0 {
            log::debug!(
                "Frame {}: {} bodies, camera ({:.2}, {:.2}) zoom {:.2}",
                self.frame,
                self.world.body_count(),
                self.camera.position.x,
                self.camera.position.y,
                self.camera.zoom()
            );
        }
    }

    /// Sprites for the current frame, one per body.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.world
            .bodies()
            .map(move |body| Sprite::for_body(&body, &self.camera, self.scale))
    }

    /// Clear `target` and draw every body. Returns the number of draw calls.
    pub fn render<R: SpriteRenderer>(&self, target: &mut R, textures: &TextureSet) -> usize {
        target.clear(CLEAR_COLOR);
        let mut drawn = 0;
        for sprite in self.sprites() {
            target.draw_sprite(&sprite, textures.get(sprite.kind));
            drawn += 1;
        }
        log::trace!("Frame {}: drew {} sprites", self.frame, drawn);
        drawn
    }

    /// Text for the window title bar
    pub fn window_title(&self, base: &str) -> String {
        match self.scene.status_text() {
            Some(text) => format!("{} - {} ({})", base, self.scene.title(), text),
            None => format!("{} - {}", base, self.scene.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::input::{Key, MouseButton};
    use crate::physics::{BodyKind, RapierWorld};
    use crate::render::{Texture, TextureSet};
    use crate::scene::{SandboxScene, TopDownCarScene};

    fn sandbox() -> Simulation<RapierWorld> {
        let config = QuickboxConfig::default();
        Simulation::new(
            RapierWorld::new(config.physics.gravity()),
            Box::new(SandboxScene::new()),
            &config,
        )
    }

    /// Records draw calls instead of rasterising
    #[derive(Default)]
    struct RecordingRenderer {
        clears: usize,
        sprites: Vec<Sprite>,
    }

    impl SpriteRenderer for RecordingRenderer {
        fn clear(&mut self, _color: [u8; 4]) {
            self.clears += 1;
        }

        fn draw_sprite(&mut self, sprite: &Sprite, _texture: &Texture) {
            self.sprites.push(*sprite);
        }
    }

    #[test]
    fn test_click_spawns_box_under_cursor() {
        let mut sim = sandbox();
        let click = Vec2::new(200.0, 100.0);
        let flow = sim.handle_event(&InputEvent::MousePressed {
            button: MouseButton::Left,
            position: click,
        });
        assert_eq!(flow, Flow::Continue);
        assert_eq!(sim.world().body_count(), 2);

        let sprite = sim.sprites().last().unwrap();
        assert_eq!(sprite.kind, BodyKind::Box);
        assert!((sprite.position - click).length() < 1e-3);
    }

    #[test]
    fn test_right_click_spawns_circle() {
        let mut sim = sandbox();
        sim.handle_event(&InputEvent::MousePressed {
            button: MouseButton::Right,
            position: Vec2::new(10.0, 10.0),
        });
        let last = sim.world().bodies().last().unwrap();
        assert_eq!(last.kind, BodyKind::Circle);
    }

    #[test]
    fn test_escape_and_close_exit() {
        let mut sim = sandbox();
        assert_eq!(sim.handle_event(&InputEvent::KeyPressed(Key::Escape)), Flow::Exit);
        assert_eq!(sim.handle_event(&InputEvent::CloseRequested), Flow::Exit);
    }

    #[test]
    fn test_zoom_out_is_bounded() {
        let mut sim = sandbox();
        for _ in 0..40 {
            sim.handle_event(&InputEvent::KeyPressed(Key::Down));
        }
        assert!(sim.camera().zoom() > 0.0);
        assert_eq!(sim.camera().zoom(), CameraConfig::default().min_zoom);
    }

    #[test]
    fn test_render_draws_one_sprite_per_body() {
        let mut sim = sandbox();
        sim.spawn_box(100.0, 100.0);
        sim.spawn_circle(150.0, 100.0);
        sim.step();

        let mut target = RecordingRenderer::default();
        let drawn = sim.render(&mut target, &TextureSet::placeholders());

        assert_eq!(drawn, sim.world().body_count());
        assert_eq!(target.clears, 1);
        let kinds: Vec<BodyKind> = target.sprites.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![BodyKind::Ground, BodyKind::Box, BodyKind::Circle]);
    }

    #[test]
    fn test_step_counts_frames() {
        let mut sim = sandbox();
        for _ in 0..3 {
            sim.step();
        }
        assert_eq!(sim.frame(), 3);
    }

    #[test]
    fn test_window_title_includes_status_text() {
        let config = QuickboxConfig::default();
        let sim = Simulation::new(
            RapierWorld::new(config.physics.gravity()),
            Box::new(TopDownCarScene::new()),
            &config,
        );
        assert_eq!(
            sim.window_title("Demo"),
            "Demo - Top-down car tutorial (Tutorial Test)"
        );
        assert_eq!(sandbox().window_title("Demo"), "Demo - Sandbox");
    }
}
