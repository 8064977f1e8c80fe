//! # Quickbox - rigid bodies drawn as sprites
//!
//! Click to drop boxes and balls onto a ground slab; the physics world is
//! stepped at a fixed rate and every body is drawn as a textured sprite.

pub mod app;
pub mod camera;
pub mod config;
pub mod headless;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod simulation;

pub use app::App;

/// Common imports for internal use
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::config::QuickboxConfig;
    pub use crate::physics::{BodyId, BodyKind, BodyState, PhysicsWorld, RapierWorld, StepParams};
    pub use crate::simulation::{Flow, Simulation};
    pub use glam::Vec2;
}
