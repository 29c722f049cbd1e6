use crate::ParserError;
use crate::common::reader::TokenReader;
use crate::common::types::C3Vector;
use crate::roads::types::{BezierAsset, RoadStripAsset};

/// Upper bound for pre-sizing from counts read out of the file, a bogus count must not allocate.
const MAX_PREALLOC: usize = 1024;

pub struct RoadsReader {}

impl RoadsReader {
    /// `roads.trk`: the number of strips, then for every strip the number of patches followed by
    /// 16 control points (three floats each) per patch.
    pub fn parse_asset(bytes: Vec<u8>) -> Result<Vec<RoadStripAsset>, ParserError> {
        let mut tokens = TokenReader::from_bytes(bytes)?;
        let num_roads: usize = tokens.parse_next("road count")?;

        let mut roads = Vec::with_capacity(num_roads.min(MAX_PREALLOC));
        for _ in 0..num_roads {
            roads.push(Self::parse_strip(&mut tokens)?);
        }

        Ok(roads)
    }

    fn parse_strip(tokens: &mut TokenReader) -> Result<RoadStripAsset, ParserError> {
        let num_patches: usize = tokens.parse_next("patch count")?;
        let mut patches = Vec::with_capacity(num_patches.min(MAX_PREALLOC));
        for _ in 0..num_patches {
            patches.push(Self::parse_patch(tokens)?);
        }

        Ok(RoadStripAsset { patches })
    }

    fn parse_patch(tokens: &mut TokenReader) -> Result<BezierAsset, ParserError> {
        let mut points = [[C3Vector::default(); 4]; 4];
        for row in points.iter_mut() {
            for point in row.iter_mut() {
                *point = C3Vector {
                    x: tokens.parse_next("control point x")?,
                    y: tokens.parse_next("control point y")?,
                    z: tokens.parse_next("control point z")?,
                };
            }
        }

        Ok(BezierAsset { points })
    }
}
