use glam::Vec3;
use track_files::roads::types::RoadStripAsset;

use crate::track::road::bezier::Bezier;

/// One segment of a road strip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPatch {
    pub patch: Bezier,
    pub length: f32,
    /// Filled in once the lap is known, see [`crate::track::start_lap`].
    pub dist_from_start: f32,
    /// index of the successor within the strip
    pub next: usize,
    pub racing_line: Vec3,
}

impl RoadPatch {
    pub fn new(patch: Bezier) -> Self {
        Self {
            length: patch.arc_length(),
            racing_line: patch.center_point(0.0),
            patch,
            dist_from_start: 0.0,
            next: 0,
        }
    }
}

/// A closed loop of patches. The successor of the last patch is the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadStrip {
    patches: Vec<RoadPatch>,
}

impl RoadStrip {
    pub fn new(patches: Vec<Bezier>, reverse: bool) -> Self {
        let beziers: Vec<Bezier> = if reverse {
            patches.iter().rev().map(Bezier::reversed).collect()
        } else {
            patches
        };

        let count = beziers.len();
        let patches = beziers
            .into_iter()
            .enumerate()
            .map(|(index, bezier)| RoadPatch {
                next: (index + 1) % count,
                ..RoadPatch::new(bezier)
            })
            .collect();

        Self { patches }
    }

    pub fn from_asset(asset: &RoadStripAsset, reverse: bool) -> Self {
        Self::new(asset.patches.iter().map(Bezier::from).collect(), reverse)
    }

    pub fn patches(&self) -> &[RoadPatch] {
        &self.patches
    }

    pub fn patches_mut(&mut self) -> &mut [RoadPatch] {
        &mut self.patches
    }

    pub fn patch(&self, index: usize) -> Option<&RoadPatch> {
        self.patches.get(index)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.patches.iter().map(|p| p.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::RoadStrip;
    use crate::track::road::bezier::tests::straight_patch;

    #[test]
    fn strips_are_loops() {
        let strip = RoadStrip::new((0..4).map(|i| straight_patch(i as f32 * 10.0, 10.0, 4.0)).collect(), false);
        let nexts: Vec<usize> = strip.patches().iter().map(|p| p.next).collect();
        assert_eq!(nexts, vec![1, 2, 3, 0]);
        assert!((strip.total_length() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn reversed_strips_run_backwards() {
        let forward = RoadStrip::new((0..3).map(|i| straight_patch(i as f32 * 10.0, 10.0, 4.0)).collect(), false);
        let reversed = RoadStrip::new((0..3).map(|i| straight_patch(i as f32 * 10.0, 10.0, 4.0)).collect(), true);

        assert_eq!(reversed.len(), 3);
        assert_eq!(reversed.patches()[0].patch, forward.patches()[2].patch.reversed());
        assert_eq!(reversed.patches()[2].next, 0);
    }
}
