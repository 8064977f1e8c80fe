//! rapier2d-backed implementation of [`PhysicsWorld`]

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use super::{
    BodyDef, BodyId, BodyKind, BodyState, BodyType, PhysicsWorld, Shape as ShapeDef, StepParams,
};

/// A body created through the demo, with the tag it was created with
struct BodyEntry {
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
    kind: BodyKind,
}

/// Manages the rapier2d physics world
pub struct RapierWorld {
    gravity: Vector<Real>,

    /// Rapier rigid body set
    rigid_body_set: RigidBodySet,

    /// Rapier collider set
    collider_set: ColliderSet,

    /// Physics pipeline
    pipeline: PhysicsPipeline,

    /// Integration parameters
    integration_parameters: IntegrationParameters,

    /// Island manager
    island_manager: IslandManager,

    /// Broad phase
    broad_phase: BroadPhase,

    /// Narrow phase
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver
    ccd_solver: CCDSolver,

    /// Query pipeline
    query_pipeline: QueryPipeline,

    /// Bodies in creation order, indexed by `BodyId`
    entries: Vec<BodyEntry>,
}

impl RapierWorld {
    pub fn new(gravity: Vec2) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: 1.0 / 60.0,
            ..Default::default()
        };

        log::debug!(
            "Physics: Created world with gravity ({:.2}, {:.2})",
            gravity.x,
            gravity.y
        );

        Self {
            gravity: vector![gravity.x, gravity.y],
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            entries: Vec::new(),
        }
    }

    fn state_of(&self, index: usize, entry: &BodyEntry) -> BodyState {
        let body = &self.rigid_body_set[entry.body_handle];
        let collider = &self.collider_set[entry.collider_handle];

        let shape = if let Some(ball) = collider.shape().as_ball() {
            ShapeDef::Circle {
                radius: ball.radius,
            }
        } else if let Some(cuboid) = collider.shape().as_cuboid() {
            ShapeDef::Box {
                half_extents: Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y),
            }
        } else {
            // Only balls and cuboids are ever inserted
            unreachable!("unexpected collider shape {:?}", collider.shape().shape_type())
        };

        let translation = body.translation();
        let linvel = body.linvel();

        BodyState {
            id: BodyId(index as u32),
            kind: entry.kind,
            body_type: if body.is_fixed() {
                BodyType::Static
            } else {
                BodyType::Dynamic
            },
            position: Vec2::new(translation.x, translation.y),
            angle: body.rotation().angle(),
            linear_velocity: Vec2::new(linvel.x, linvel.y),
            shape,
            density: collider.density(),
            friction: collider.friction(),
        }
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl PhysicsWorld for RapierWorld {
    fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        log::debug!("Physics: Gravity set to ({:.2}, {:.2})", gravity.x, gravity.y);
        self.gravity = vector![gravity.x, gravity.y];
    }

    fn step(&mut self, params: &StepParams) {
        self.integration_parameters.dt = params.dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(params.velocity_iterations as usize).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_pgs_iterations =
            params.position_iterations.max(1) as usize;

        let physics_hooks = ();
        let event_handler = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &physics_hooks,
            &event_handler,
        );
    }

    fn create_body(&mut self, def: &BodyDef) -> BodyId {
        let builder = match def.body_type {
            BodyType::Static => RigidBodyBuilder::fixed(),
            BodyType::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body_handle = self
            .rigid_body_set
            .insert(builder.translation(vector![def.position.x, def.position.y]));

        let collider = match def.shape {
            ShapeDef::Box { half_extents } => ColliderBuilder::cuboid(half_extents.x, half_extents.y),
            ShapeDef::Circle { radius } => ColliderBuilder::ball(radius),
        }
        .density(def.density)
        .friction(def.friction);

        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        let id = BodyId(self.entries.len() as u32);
        self.entries.push(BodyEntry {
            body_handle,
            collider_handle,
            kind: def.kind,
        });

        log::debug!(
            "Physics: Created {:?} body {:?} at ({:.2}, {:.2})",
            def.kind,
            id,
            def.position.x,
            def.position.y
        );

        id
    }

    fn body(&self, id: BodyId) -> Option<BodyState> {
        let index = id.0 as usize;
        self.entries
            .get(index)
            .map(|entry| self.state_of(index, entry))
    }

    fn bodies(&self) -> Box<dyn Iterator<Item = BodyState> + '_> {
        Box::new(
            self.entries
                .iter()
                .enumerate()
                .map(|(index, entry)| self.state_of(index, entry)),
        )
    }

    fn body_count(&self) -> usize {
        self.entries.len()
    }
}
