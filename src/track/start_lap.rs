use std::f32::consts::{FRAC_PI_2, PI};

use anyhow::{anyhow, bail};
use glam::{Quat, Vec3};
use log::{info, warn};
use track_files::config::types::ConfigTree;

use crate::rendering::common::coordinate_systems::{
    authoring_to_world, authoring_to_world_rot, euler_degrees_to_quat, world_to_authoring,
};
use crate::track::road::road_strip::RoadStrip;
use crate::track::track_data::PatchRef;

/// Driving direction of a car in its local frame.
pub const FORWARD: Vec3 = Vec3::X;

/// Reads `start position <i>` / `start orientation <i>` until the first missing index.
/// Positions and orientations are converted into world space. When reversing, every orientation
/// is turned around and the order of the grid is reversed.
pub fn load_start_positions(config: &ConfigTree, reverse: bool) -> Vec<(Vec3, Quat)> {
    // orientations without this face the wrong way, historically
    let fixer = Quat::from_rotation_z(FRAC_PI_2);

    let mut start_positions: Vec<(Vec3, Quat)> = (0..)
        .map_while(|index| {
            let position = config.get::<[f32; 3]>(&format!("start position {}", index))?;
            let angles = config
                .get::<[f32; 3]>(&format!("start orientation {}", index))
                .unwrap_or([0.0; 3]);

            let orientation = fixer * authoring_to_world_rot(euler_degrees_to_quat(angles));
            Some((authoring_to_world(Vec3::from(position)), orientation))
        })
        .collect();

    if reverse {
        let turn = Quat::from_rotation_z(PI);
        for (_, orientation) in start_positions.iter_mut() {
            *orientation = turn * *orientation;
        }
        start_positions.reverse();
    }

    start_positions
}

/// Resolves the lap timing sectors. For reversed tracks the first sector stays first while the
/// remaining ones swap order, and the first one is moved to the nearest patch ahead of the first
/// start position.
pub fn load_lap_sequence(
    config: &ConfigTree,
    roads: &[RoadStrip],
    reverse: bool,
    first_start: Option<&(Vec3, Quat)>,
) -> Result<Vec<PatchRef>, anyhow::Error> {
    let count = config.get_or::<usize>("lap sequences", 0);
    let mut lap = Vec::with_capacity(count);

    for index in 0..count {
        let key = format!("lap sequence {}", index);
        let raw = config
            .get::<Vec<f32>>(&key)
            .filter(|raw| raw.len() >= 2)
            .ok_or_else(|| anyhow!("Missing or malformed \"{}\"", key))?;

        let (Some(road_id), Some(patch_id)) = (index_value(raw[0]), index_value(raw[1])) else {
            bail!("\"{}\" needs non-negative whole numbers, got {:?}", key, raw);
        };

        let Some(road) = roads.get(road_id) else {
            warn!("{} references unknown road {}, skipping it", key, road_id);
            continue;
        };

        let num_patches = road.len();
        if patch_id >= num_patches {
            bail!("{} references patch {} of road {} which has only {} patches", key, patch_id, road_id, num_patches);
        }

        let patch = if reverse {
            (num_patches - patch_id) % num_patches
        } else {
            patch_id
        };
        lap.push(PatchRef::new(road_id, patch));
    }

    if lap.is_empty() {
        info!("No lap sequence found, lap timing will not be possible");
        return Ok(lap);
    }

    if reverse {
        lap[1..].reverse();

        // the start line now lies behind the grid, move sector 0 ahead of it
        if let Some(first_patch) = first_start.and_then(|start| nearest_patch_ahead(roads, start)) {
            lap[0] = first_patch;
        }
    }

    Ok(lap)
}

/// Ids are authored as floats; only non-negative whole numbers are valid.
fn index_value(value: f32) -> Option<usize> {
    (value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f32).then_some(value as usize)
}

/// The patch whose leading edge is closest to the start position while lying in front of it.
pub fn nearest_patch_ahead(roads: &[RoadStrip], start: &(Vec3, Quat)) -> Option<PatchRef> {
    // roads live in authoring space
    let position = world_to_authoring(start.0);
    let direction = world_to_authoring(start.1 * FORWARD);

    let mut min_len2 = 1e7;
    let mut nearest = None;
    for (road_id, road) in roads.iter().enumerate() {
        for (patch_id, patch) in road.patches().iter().enumerate() {
            let vec = patch.patch.back_left() - position;
            let len2 = vec.length_squared();
            if vec.dot(direction) > 0.0 && len2 < min_len2 {
                min_len2 = len2;
                nearest = Some(PatchRef::new(road_id, patch_id));
            }
        }
    }

    nearest
}

/// Walks the successor links from the first lap sector, storing the distance from the start on
/// every patch of that loop. Returns the lap length.
pub fn compute_distances(roads: &mut [RoadStrip], start: PatchRef) -> f32 {
    let Some(road) = roads.get_mut(start.road) else {
        return 0.0;
    };

    let patches = road.patches_mut();
    let mut current = start.patch;
    let mut distance = 0.0;
    for _ in 0..patches.len() {
        let Some(patch) = patches.get_mut(current) else {
            break;
        };

        patch.dist_from_start = distance;
        distance += patch.length;
        current = patch.next;

        if current == start.patch {
            break;
        }
    }

    distance
}
