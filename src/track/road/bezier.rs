use glam::Vec3;
use track_files::roads::types::BezierAsset;

const ARC_LENGTH_SAMPLES: usize = 16;

/// A bicubic bezier patch. Rows run from the front edge (row 0) to the back edge (row 3),
/// columns from left (column 0) to right (column 3).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bezier {
    pub points: [[Vec3; 4]; 4],
}

impl Bezier {
    pub fn new(points: [[Vec3; 4]; 4]) -> Self {
        Self { points }
    }

    pub fn front_left(&self) -> Vec3 {
        self.points[0][0]
    }

    pub fn front_right(&self) -> Vec3 {
        self.points[0][3]
    }

    pub fn back_left(&self) -> Vec3 {
        self.points[3][0]
    }

    pub fn back_right(&self) -> Vec3 {
        self.points[3][3]
    }

    /// The same patch driven in the opposite direction: back becomes front and left becomes right.
    pub fn reversed(&self) -> Self {
        let mut points = self.points;
        points.reverse();
        for row in points.iter_mut() {
            row.reverse();
        }

        Self { points }
    }

    /// Point on the curve through the middle of the patch, `t` running front to back.
    pub fn center_point(&self, t: f32) -> Vec3 {
        let mids = self.points.map(|row| (row[0] + row[3]) * 0.5);
        cubic(&mids, t)
    }

    /// Point on the patch surface, `u` running left to right and `v` front to back.
    pub fn surface_point(&self, u: f32, v: f32) -> Vec3 {
        let column = self.points.map(|row| cubic(&row, u));
        cubic(&column, v)
    }

    pub fn arc_length(&self) -> f32 {
        (1..=ARC_LENGTH_SAMPLES)
            .map(|i| {
                let t0 = (i - 1) as f32 / ARC_LENGTH_SAMPLES as f32;
                let t1 = i as f32 / ARC_LENGTH_SAMPLES as f32;
                self.center_point(t1).distance(self.center_point(t0))
            })
            .sum()
    }
}

impl From<&BezierAsset> for Bezier {
    fn from(value: &BezierAsset) -> Self {
        Self {
            points: value
                .points
                .map(|row| row.map(|point| Vec3::new(point.x, point.y, point.z))),
        }
    }
}

fn cubic(points: &[Vec3; 4], t: f32) -> Vec3 {
    let s = 1.0 - t;
    points[0] * (s * s * s) + points[1] * (3.0 * s * s * t) + points[2] * (3.0 * s * t * t) + points[3] * (t * t * t)
}
