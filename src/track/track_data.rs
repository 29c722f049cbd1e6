use std::sync::Arc;

use glam::{Quat, Vec3};
use rapier3d::geometry::{ColliderHandle, SharedShape};
use rapier3d::dynamics::RigidBodyHandle;

use crate::physics::motion_state::MotionState;
use crate::physics::physics_simulator::PhysicsSimulator;
use crate::rendering::common::types::{Model, Texture};
use crate::rendering::scene::container::Handle;
use crate::rendering::scene::node::{SceneNode, Transform};
use crate::track::road::road_strip::{RoadPatch, RoadStrip};
use crate::track::surface::TrackSurface;

/// Addresses one patch: `road` indexes [`TrackData::roads`], `patch` the strip's patches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PatchRef {
    pub road: usize,
    pub patch: usize,
}

impl PatchRef {
    pub fn new(road: usize, patch: usize) -> Self {
        Self { road, patch }
    }
}

/// What a loaded body was registered as in the physics world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TrackObject {
    Static(ColliderHandle),
    Dynamic(RigidBodyHandle),
}

/// A simulated body and the scene node drawing it.
#[derive(Debug, Copy, Clone)]
pub struct DynamicObject {
    pub body: RigidBodyHandle,
    pub node: Handle<SceneNode>,
    pub motion_state: MotionState,
}

/// Everything a loaded track consists of. Filled by the track loader and owned by the caller.
#[derive(Default)]
pub struct TrackData {
    pub static_node: SceneNode,
    pub dynamic_node: SceneNode,
    pub racingline_node: SceneNode,
    pub racingline_texture: Option<Arc<Texture>>,

    /// Keeps the models alive that are only referenced weakly by the content cache.
    pub models: Vec<Arc<Model>>,
    pub shapes: Vec<SharedShape>,
    pub objects: Vec<TrackObject>,
    pub dynamic_objects: Vec<DynamicObject>,

    pub surfaces: Vec<TrackSurface>,
    pub roads: Vec<RoadStrip>,
    /// lap timing sectors, in driving order
    pub lap: Vec<PatchRef>,
    pub lap_length: f32,
    pub start_positions: Vec<(Vec3, Quat)>,

    pub reverse: bool,
    pub cull: bool,
    pub vertical_tracking_skyboxes: bool,

    loaded: bool,
}

impl TrackData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn set_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn patch(&self, patch: PatchRef) -> Option<&RoadPatch> {
        self.roads.get(patch.road)?.patch(patch.patch)
    }

    /// Fraction of the lap (in `[0, 1)`) at `offset` meters into `patch`. `None` without lap
    /// timing or for unknown patches.
    pub fn lap_progress(&self, patch: PatchRef, offset: f32) -> Option<f32> {
        if self.lap_length <= 0.0 {
            return None;
        }

        let road_patch = self.patch(patch)?;
        Some(((road_patch.dist_from_start + offset) / self.lap_length).rem_euclid(1.0))
    }

    /// The surface a static collider was tagged with.
    pub fn surface_for_collider(
        &self,
        simulator: &PhysicsSimulator,
        collider: ColliderHandle,
    ) -> Option<&TrackSurface> {
        let collider = simulator.collider(collider)?;
        self.surfaces.get(usize::try_from(collider.user_data).ok()?)
    }

    /// Copies the simulated body transforms into the dynamic scene nodes.
    pub fn update_dynamic_objects(&mut self, simulator: &PhysicsSimulator) {
        profiling::scope!("TrackData::update_dynamic_objects");
        for object in &mut self.dynamic_objects {
            let Some(body) = simulator.rigid_body(object.body) else {
                continue;
            };

            object.motion_state.set_from_body(body.position());
            if let Some(node) = self.dynamic_node.node_mut(object.node) {
                node.transform = Transform::new(object.motion_state.position, object.motion_state.rotation);
            }
        }
    }
}
