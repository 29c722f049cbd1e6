use glam::{Vec2, Vec3};

use crate::rendering::common::coordinate_systems::authoring_to_world;
use crate::rendering::common::types::{Mesh, VertexBuffers};
use crate::track::road::road_strip::RoadStrip;

const RIBBON_HALF_WIDTH: f32 = 0.25;
const RIBBON_LIFT: f32 = 0.1;

/// Places the racing line on every patch of a strip. Returns false when no line could be found,
/// the strip keeps whatever line it had in that case.
pub trait RacingLineSolver {
    fn solve(&self, strip: &mut RoadStrip) -> bool;
}

/// Follows the middle of the road.
#[derive(Debug, Default, Copy, Clone)]
pub struct CentreLineSolver {}

impl RacingLineSolver for CentreLineSolver {
    fn solve(&self, strip: &mut RoadStrip) -> bool {
        if strip.is_empty() {
            return false;
        }

        for patch in strip.patches_mut() {
            patch.racing_line = patch.patch.center_point(0.0);
        }
        true
    }
}

/// A flat ribbon connecting the racing line points of consecutive patches, in world space.
pub fn build_racing_line_mesh(strip: &RoadStrip) -> Mesh {
    let mut buffers = VertexBuffers::default();
    let mut indices = Vec::with_capacity(strip.len() * 6);

    for patch in strip.patches() {
        let Some(next) = strip.patch(patch.next) else {
            continue;
        };

        let start = patch.racing_line;
        let end = next.racing_line;
        // authoring space is y-up
        let side = (end - start).cross(Vec3::Y).normalize_or_zero() * RIBBON_HALF_WIDTH;
        if side == Vec3::ZERO {
            continue;
        }

        let lift = Vec3::Y * RIBBON_LIFT;
        let base = buffers.position_buffer.len() as u32;
        for (position, uv) in [
            (start - side, Vec2::new(0.0, 0.0)),
            (start + side, Vec2::new(1.0, 0.0)),
            (end + side, Vec2::new(1.0, 1.0)),
            (end - side, Vec2::new(0.0, 1.0)),
        ] {
            buffers.position_buffer.push(authoring_to_world(position + lift));
            buffers.normals_buffer.push(authoring_to_world(Vec3::Y));
            buffers.texcoord_buffer_0.push(uv);
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh {
        vertex_buffers: buffers,
        index_buffer: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::{CentreLineSolver, RacingLineSolver, build_racing_line_mesh};
    use crate::track::road::bezier::tests::straight_patch;
    use crate::track::road::road_strip::RoadStrip;
    use glam::Vec3;

    #[test]
    fn ribbon_per_patch() {
        let mut strip = RoadStrip::new((0..3).map(|i| straight_patch(i as f32 * 10.0, 10.0, 4.0)).collect(), false);
        assert!(CentreLineSolver::default().solve(&mut strip));
        assert_eq!(strip.patches()[1].racing_line, Vec3::new(0.0, 0.0, 10.0));

        let mesh = build_racing_line_mesh(&strip);
        assert_eq!(mesh.triangle_count(), 6);
        assert_eq!(mesh.vertex_buffers.len(), 12);
    }

    #[test]
    fn empty_strips_have_no_line() {
        let mut strip = RoadStrip::default();
        assert!(!CentreLineSolver::default().solve(&mut strip));
        assert!(build_racing_line_mesh(&strip).is_empty());
    }
}
