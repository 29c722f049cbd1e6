use crate::common::types::C3Vector;

/// Control points of one bicubic road patch. Rows go from the front edge (row 0) to the back
/// edge (row 3), columns from left (column 0) to right (column 3).
#[derive(Debug, Clone, PartialEq)]
pub struct BezierAsset {
    pub points: [[C3Vector; 4]; 4],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadStripAsset {
    pub patches: Vec<BezierAsset>,
}
