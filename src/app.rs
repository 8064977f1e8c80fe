//! Application state and main loop

use std::sync::Arc;

use anyhow::Result;
use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::QuickboxConfig;
use crate::input::InputState;
use crate::physics::{PhysicsWorld, RapierWorld};
use crate::render::{Canvas, Renderer, TextureSet};
use crate::scene::Scene;
use crate::simulation::{Flow, Simulation};

/// Caps how often frames are requested
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    next_frame: Instant,
}

impl FrameLimiter {
    pub fn new(frames_per_second: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64),
            next_frame: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    /// True when a frame is due; schedules the one after it.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        // After a stall, resume the cadence from now instead of bursting
        if self.next_frame < now {
            self.next_frame = now + self.interval;
        }
        true
    }
}

/// Step `simulation` once if the limiter says a frame is due.
pub fn advance_if_due<W: PhysicsWorld>(
    limiter: &mut FrameLimiter,
    simulation: &mut Simulation<W>,
    now: Instant,
) -> bool {
    if !limiter.ready(now) {
        return false;
    }
    simulation.step();
    true
}

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    canvas: Canvas,
    textures: TextureSet,
    simulation: Simulation<RapierWorld>,
    input_state: InputState,
    frame_limiter: FrameLimiter,
}

impl App {
    pub async fn new(config: QuickboxConfig, scene: Box<dyn Scene>) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new()?;

        let simulation = Simulation::new(
            RapierWorld::new(config.physics.gravity()),
            scene,
            &config,
        );

        let window_attrs = WindowAttributes::default()
            .with_title(simulation.window_title(&config.window.title))
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(false);

        // Use deprecated create_window to avoid async complexity for now
        #[allow(deprecated)]
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer =
            Renderer::new(window.clone(), config.window.width, config.window.height).await?;
        let textures = TextureSet::load(&config.assets);

        let app = Self {
            window,
            renderer,
            canvas: Canvas::new(config.window.width, config.window.height),
            textures,
            simulation,
            input_state: InputState::new(),
            frame_limiter: FrameLimiter::new(config.window.frame_limit, Instant::now()),
        };

        Ok((app, event_loop))
    }

    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Draw the current state without stepping.
    fn handle_redraw(&mut self) {
        self.simulation.render(&mut self.canvas, &self.textures);

        match self.renderer.present(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.renderer.reconfigure();
            }
            Err(e) => log::error!("Render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::Resized(size) => self.renderer.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.handle_redraw(),
            _ => {}
        }

        if let Some(input) = self.input_state.translate(&event, self.window.scale_factor()) {
            if self.simulation.handle_event(&input) == Flow::Exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if advance_if_due(&mut self.frame_limiter, &mut self.simulation, Instant::now()) {
            self.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.frame_limiter.next_frame()));
    }
}
