use itertools::Itertools;
use rapier3d::prelude::*;

/// Gravity of the z-up track world.
const GRAVITY: Vector<Real> = Vector::new(0.0, 0.0, -9.81);

/// Rapier's solver state, only touched while stepping.
struct Solver {
    parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseMultiSap,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseMultiSap::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
        }
    }
}

/// The track's physics world. Track geometry goes in as parentless static colliders, movable
/// scenery as dynamic bodies owning their colliders.
pub struct PhysicsSimulator {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    solver: Solver,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            solver: Solver::default(),
        }
    }
}

impl PhysicsSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the world by one fixed timestep.
    pub fn step(&mut self) {
        profiling::scope!("PhysicsSimulator::step");
        let solver = &mut self.solver;
        solver.pipeline.step(
            &GRAVITY,
            &solver.parameters,
            &mut solver.islands,
            &mut solver.broad_phase,
            &mut solver.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut solver.impulse_joints,
            &mut solver.multibody_joints,
            &mut solver.ccd,
            None,
            &(),
            &(),
        );
    }

    pub fn insert_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.colliders.insert(collider)
    }

    /// Inserts `body` together with the colliders attached to it.
    pub fn insert_dynamic_body(
        &mut self,
        body: RigidBody,
        colliders: impl IntoIterator<Item = Collider>,
    ) -> (RigidBodyHandle, Vec<ColliderHandle>) {
        let handle = self.bodies.insert(body);
        let collider_handles = colliders
            .into_iter()
            .map(|collider| self.colliders.insert_with_parent(collider, handle, &mut self.bodies))
            .collect_vec();
        (handle, collider_handles)
    }

    pub fn rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn rigid_body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::PhysicsSimulator;
    use rapier3d::prelude::*;

    #[test]
    fn dynamic_bodies_fall_onto_static_ground() {
        let mut simulator = PhysicsSimulator::new();
        let ground = simulator.insert_static_collider(ColliderBuilder::cuboid(50.0, 50.0, 0.5).build());

        let body = RigidBodyBuilder::dynamic().translation(vector![0.0, 0.0, 3.0]).build();
        let (handle, colliders) = simulator.insert_dynamic_body(body, [ColliderBuilder::ball(0.5).build()]);
        assert_eq!(colliders.len(), 1);
        assert_eq!(simulator.collider_count(), 2);
        assert_eq!(simulator.rigid_body_count(), 1);
        assert!(simulator.collider(ground).is_some_and(|c| c.parent().is_none()));
        assert_eq!(simulator.collider(colliders[0]).and_then(|c| c.parent()), Some(handle));

        for _ in 0..240 {
            simulator.step();
        }
        let z = simulator.rigid_body(handle).map(|body| body.translation().z);
        // resting on the ground: ground top at 0.5 plus the ball radius
        assert!(z.is_some_and(|z| z < 3.0 && z > 0.9));
    }
}
