//! Physics seam: a narrow world interface plus the rapier2d implementation
//!
//! Everything above this module talks to [`PhysicsWorld`]; only
//! [`RapierWorld`] knows about rapier types.

pub mod factory;
mod rapier;

use glam::Vec2;

pub use factory::{create_box, create_circle, create_ground};
pub use rapier::RapierWorld;

/// Opaque handle to a body owned by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Visual/behavioural kind, tagged at creation and carried with the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Ground,
    Box,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Static,
    Dynamic,
}

/// Collision shape in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { half_extents: Vec2 },
    Circle { radius: f32 },
}

/// Everything needed to create one body with a single collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub body_type: BodyType,
    /// Position in metres
    pub position: Vec2,
    pub shape: Shape,
    pub density: f32,
    pub friction: f32,
}

/// Snapshot of a body as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub kind: BodyKind,
    pub body_type: BodyType,
    /// Position in metres
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    pub linear_velocity: Vec2,
    pub shape: Shape,
    pub density: f32,
    pub friction: f32,
}

impl BodyState {
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }
}

/// Fixed-step parameters handed straight to the solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub dt: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            velocity_iterations: 10,
            position_iterations: 5,
        }
    }
}

/// The calls the demo makes into a rigid-body engine.
pub trait PhysicsWorld {
    fn gravity(&self) -> Vec2;

    fn set_gravity(&mut self, gravity: Vec2);

    /// Advance the simulation by one fixed step.
    fn step(&mut self, params: &StepParams);

    fn create_body(&mut self, def: &BodyDef) -> BodyId;

    fn body(&self, id: BodyId) -> Option<BodyState>;

    /// All live bodies in the engine's native order.
    fn bodies(&self) -> Box<dyn Iterator<Item = BodyState> + '_>;

    fn body_count(&self) -> usize;
}
