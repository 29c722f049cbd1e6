use std::io::BufRead;
use std::str::SplitWhitespace;

use log::trace;

use crate::ParserError;
use crate::common::types::{C2Vector, C3Vector};
use crate::obj::types::{ObjAsset, ObjFace, ObjVertex};

pub struct ObjReader {}

impl ObjReader {
    pub fn parse_asset<R: BufRead>(rdr: R) -> Result<ObjAsset, ParserError> {
        let mut asset = ObjAsset::default();

        for (index, line_res) in rdr.lines().enumerate() {
            let line_number = index + 1;
            let line = line_res?;
            let mut parts = line.split_whitespace();

            match parts.next() {
                Some("v") => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, line_number)?;
                    asset.positions.push(C3Vector { x, y, z });
                }
                Some("vt") => {
                    let [x, y] = parse_floats::<2>(&mut parts, line_number)?;
                    asset.texcoords.push(C2Vector { x, y });
                }
                Some("vn") => {
                    let [x, y, z] = parse_floats::<3>(&mut parts, line_number)?;
                    asset.normals.push(C3Vector { x, y, z });
                }
                Some("f") => {
                    let vertices = parts
                        .map(|vertex| parse_vertex(vertex, &asset, line_number))
                        .collect::<Result<Vec<_>, _>>()?;

                    if vertices.len() < 3 {
                        return Err(ParserError::format(line_number, "Face with less than three vertices"));
                    }

                    asset.faces.push(ObjFace { vertices });
                }
                // groups, smoothing, materials and comments don't matter for a single textured model
                _ => {}
            }
        }

        if asset.faces.is_empty() {
            return Err(ParserError::EmptySource);
        }

        trace!(
            "Parsed OBJ with {} positions and {} faces",
            asset.positions.len(),
            asset.faces.len()
        );

        Ok(asset)
    }
}

fn parse_floats<const N: usize>(parts: &mut SplitWhitespace<'_>, line_number: usize) -> Result<[f32; N], ParserError> {
    let mut values = [0.0f32; N];
    for value in values.iter_mut() {
        let token = parts
            .next()
            .ok_or_else(|| ParserError::format(line_number, format!("Expected {} components", N)))?;
        *value = token
            .parse()
            .map_err(|_| ParserError::format(line_number, format!("Invalid number \"{}\"", token)))?;
    }

    Ok(values)
}

/// `p`, `p/t`, `p//n` or `p/t/n` with 1-based or negative (relative) indices.
fn parse_vertex(vertex: &str, asset: &ObjAsset, line_number: usize) -> Result<ObjVertex, ParserError> {
    let mut components = vertex.split('/');
    let position = components
        .next()
        .ok_or_else(|| ParserError::format(line_number, "Empty face vertex"))?;
    let texcoord = components.next().filter(|value| !value.is_empty());
    let normal = components.next().filter(|value| !value.is_empty());

    Ok(ObjVertex {
        position: resolve_index(position, asset.positions.len(), line_number)?,
        texcoord: texcoord
            .map(|value| resolve_index(value, asset.texcoords.len(), line_number))
            .transpose()?,
        normal: normal
            .map(|value| resolve_index(value, asset.normals.len(), line_number))
            .transpose()?,
    })
}

fn resolve_index(value: &str, count: usize, line_number: usize) -> Result<u32, ParserError> {
    let index: i64 = value
        .parse()
        .map_err(|_| ParserError::format(line_number, format!("Invalid index \"{}\"", value)))?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i - 1),
        i => Some(count as i64 + i),
    };

    match resolved {
        Some(i) if i >= 0 && (i as usize) < count => Ok(i as u32),
        _ => Err(ParserError::format(
            line_number,
            format!("Index {} out of range ({} entries)", value, count),
        )),
    }
}
