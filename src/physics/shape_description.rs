use anyhow::{anyhow, bail};
use glam::{Quat, Vec3};
use track_files::config::types::ConfigTree;

use crate::rendering::common::coordinate_systems::euler_degrees_to_quat;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PrimitiveShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// aligned with the local Y axis
    Cylinder { radius: f32, height: f32 },
    /// aligned with the local Y axis, `height` excludes the caps
    Capsule { radius: f32, height: f32 },
}

/// One authored collision primitive, placed relative to the body origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeDescription {
    pub primitive: PrimitiveShape,
    pub position: Vec3,
    pub rotation: Quat,
}

impl ShapeDescription {
    /// Reads the shape sections of a body: either a single `shape` section or the numbered
    /// `shape 0`, `shape 1`, ... sections. Returns an empty list when the body has none.
    pub fn read_all(body: &ConfigTree) -> Result<Vec<ShapeDescription>, anyhow::Error> {
        if let Some(section) = body.child("shape").filter(|s| s.has_children()) {
            return Ok(vec![Self::read(section)?]);
        }

        let mut shapes = Vec::new();
        while let Some(section) = body.child(&format!("shape {}", shapes.len())) {
            shapes.push(Self::read(section)?);
        }

        Ok(shapes)
    }

    pub fn read(section: &ConfigTree) -> Result<ShapeDescription, anyhow::Error> {
        let shape_type = section
            .get::<String>("type")
            .ok_or_else(|| anyhow!("Shape without type"))?;

        let radius = || {
            section
                .get::<f32>("radius")
                .filter(|r| *r > 0.0)
                .ok_or_else(|| anyhow!("{} shape needs a positive radius", shape_type))
        };
        let height = || section.get_or::<f32>("height", 0.0).max(0.0);

        let primitive = match shape_type.to_ascii_lowercase().as_str() {
            "box" => {
                let size = section
                    .get::<[f32; 3]>("size")
                    .ok_or_else(|| anyhow!("box shape needs a size"))?;
                PrimitiveShape::Box {
                    half_extents: Vec3::from(size) * 0.5,
                }
            }
            "sphere" => PrimitiveShape::Sphere { radius: radius()? },
            "cylinder" => PrimitiveShape::Cylinder {
                radius: radius()?,
                height: height(),
            },
            "capsule" => PrimitiveShape::Capsule {
                radius: radius()?,
                height: height(),
            },
            other => bail!("Unknown shape type {}", other),
        };

        Ok(ShapeDescription {
            primitive,
            position: section.get::<[f32; 3]>("position").map(Vec3::from).unwrap_or(Vec3::ZERO),
            rotation: section
                .get::<[f32; 3]>("rotation")
                .map(euler_degrees_to_quat)
                .unwrap_or(Quat::IDENTITY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PrimitiveShape, ShapeDescription};
    use glam::Vec3;
    use track_files::config::reader::ConfigReader;

    #[test]
    fn numbered_shapes() -> Result<(), anyhow::Error> {
        let text = r#"
[shape 0]
type = box
size = 2, 4, 6
[shape 1]
type = sphere
radius = 0.5
position = 0, 0, 1
"#;
        let body = ConfigReader::parse_bytes(text.as_bytes())?;
        let shapes = ShapeDescription::read_all(&body)?;
        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes[0].primitive,
            PrimitiveShape::Box {
                half_extents: Vec3::new(1.0, 2.0, 3.0)
            }
        );
        assert_eq!(shapes[1].primitive, PrimitiveShape::Sphere { radius: 0.5 });
        assert_eq!(shapes[1].position, Vec3::Z);
        Ok(())
    }

    #[test]
    fn invalid_shapes_are_errors() -> Result<(), anyhow::Error> {
        let body = ConfigReader::parse_bytes(b"[shape]\ntype = torus\n")?;
        assert!(ShapeDescription::read_all(&body).is_err());

        let body = ConfigReader::parse_bytes(b"[shape]\ntype = sphere\n")?;
        assert!(ShapeDescription::read_all(&body).is_err());

        let body = ConfigReader::parse_bytes(b"mass = 3\n")?;
        assert!(ShapeDescription::read_all(&body)?.is_empty());
        Ok(())
    }
}
