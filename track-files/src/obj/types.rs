use crate::common::types::{C2Vector, C3Vector};

/// A Wavefront OBJ file reduced to what the track models use: one object, positions, optional
/// texture coordinates and normals and polygonal faces.
#[derive(Debug, Clone, Default)]
pub struct ObjAsset {
    pub positions: Vec<C3Vector>,
    pub texcoords: Vec<C2Vector>,
    pub normals: Vec<C3Vector>,
    pub faces: Vec<ObjFace>,
}

/// Zero based indices into the attribute lists of [`ObjAsset`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjVertex {
    pub position: u32,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjFace {
    pub vertices: Vec<ObjVertex>,
}
