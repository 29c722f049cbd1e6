use anyhow::anyhow;
use glam::{Quat, Vec3};
use nalgebra::Isometry3;
use rapier3d::dynamics::{MassProperties, RigidBody, RigidBodyBuilder};
use rapier3d::geometry::{Collider, ColliderBuilder, MeshConverter, SharedShape};
use rapier3d::math::{Point, Real, Vector};

use crate::physics::shape_description::{PrimitiveShape, ShapeDescription};
use crate::rendering::common::types::{Mesh, Model};

/// Friction of simulated scenery objects.
pub const DYNAMIC_FRICTION: Real = 0.9;

pub enum ColliderFactory {}

impl ColliderFactory {
    pub fn trimesh_shape(mesh: &Mesh) -> Result<SharedShape, anyhow::Error> {
        let vertices = mesh
            .vertex_buffers
            .position_buffer
            .iter()
            .map(|&vert| vert.into())
            .collect();

        // convex decomposition would be nicer for the physics but takes far too long for track geometry
        let converter = MeshConverter::TriMesh;

        let builder = ColliderBuilder::converted_trimesh(vertices, mesh.triangles(), converter)
            .map_err(|err| anyhow!("Invalid collision mesh: {:?}", err))?;
        Ok(builder.shape)
    }

    pub fn primitive_shape(primitive: &PrimitiveShape) -> SharedShape {
        match *primitive {
            PrimitiveShape::Box { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            PrimitiveShape::Sphere { radius } => SharedShape::ball(radius),
            PrimitiveShape::Cylinder { radius, height } => SharedShape::cylinder(height * 0.5, radius),
            PrimitiveShape::Capsule { radius, height } => SharedShape::capsule_y(height * 0.5, radius),
        }
    }

    /// Builds the authored shapes about the mass centre: every shape is moved by `offset`
    /// (the negated mass centre). A single shape that ends up at the origin is used as is,
    /// anything else becomes a compound. `None` when nothing was authored.
    pub fn authored_shape(shapes: &[ShapeDescription], offset: Vec3) -> Option<SharedShape> {
        match shapes {
            [] => None,
            [single] if single.position + offset == Vec3::ZERO && single.rotation == Quat::IDENTITY => {
                Some(Self::primitive_shape(&single.primitive))
            }
            _ => Some(SharedShape::compound(
                shapes
                    .iter()
                    .map(|shape| {
                        (
                            Isometry3::from((shape.position + offset, shape.rotation)),
                            Self::primitive_shape(&shape.primitive),
                        )
                    })
                    .collect(),
            )),
        }
    }

    /// The fallback for massive bodies without authored shapes: the model's bounding box.
    pub fn bounding_box_shape(model: &Model) -> SharedShape {
        let half_extents = (model.size() * 0.5).max(Vec3::splat(0.001));
        SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
    }

    /// Mass properties of `shape` for the given mass, about the body origin (the mass centre).
    pub fn mass_properties(shape: &SharedShape, mass: Real) -> MassProperties {
        let unit = shape.mass_properties(1.0);
        let inertia = if unit.mass() > 0.0 {
            unit.principal_inertia() * (mass / unit.mass())
        } else {
            Vector::zeros()
        };

        MassProperties::new(Point::origin(), mass, inertia)
    }

    /// A fixed collider tagged with its surface index.
    pub fn static_collider(shape: SharedShape, position: Isometry3<Real>, surface: usize) -> Collider {
        ColliderBuilder::new(shape)
            .position(position)
            .user_data(surface as u128)
            .build()
    }

    pub fn dynamic_body(position: Isometry3<Real>) -> RigidBody {
        RigidBodyBuilder::dynamic().position(position).build()
    }

    pub fn dynamic_collider(shape: SharedShape, mass_properties: MassProperties) -> Collider {
        ColliderBuilder::new(shape)
            .mass_properties(mass_properties)
            .friction(DYNAMIC_FRICTION)
            .build()
    }
}
