use std::collections::HashMap;

use glam::{Vec2, Vec3};
use track_files::obj::types::{ObjAsset, ObjVertex};

use crate::rendering::common::types::{Mesh, VertexBuffers};

pub struct ModelImporter {}

impl ModelImporter {
    /// Builds an indexed triangle mesh. Every distinct (position, texcoord, normal) triple becomes
    /// one vertex and polygons are triangulated as fans. Vertices without an authored normal get
    /// the (area weighted) average of their faces' normals.
    pub fn create_mesh(asset: &ObjAsset) -> Mesh {
        let mut vertex_lookup = HashMap::<ObjVertex, u32>::new();
        let mut buffers = VertexBuffers::default();
        let mut generated_normals = Vec::<bool>::new();
        let mut indices = Vec::<u32>::with_capacity(asset.faces.len() * 3);

        for face in &asset.faces {
            let face_indices: Vec<u32> = face
                .vertices
                .iter()
                .map(|vertex| {
                    *vertex_lookup.entry(*vertex).or_insert_with(|| {
                        let pos = asset.positions[vertex.position as usize];
                        buffers.position_buffer.push(Vec3::new(pos.x, pos.y, pos.z));

                        let uv = vertex
                            .texcoord
                            .map(|t| asset.texcoords[t as usize])
                            .map(|t| Vec2::new(t.x, t.y))
                            .unwrap_or(Vec2::ZERO);
                        buffers.texcoord_buffer_0.push(uv);

                        match vertex.normal {
                            Some(n) => {
                                let normal = asset.normals[n as usize];
                                buffers
                                    .normals_buffer
                                    .push(Vec3::new(normal.x, normal.y, normal.z).normalize_or_zero());
                                generated_normals.push(false);
                            }
                            None => {
                                buffers.normals_buffer.push(Vec3::ZERO);
                                generated_normals.push(true);
                            }
                        }

                        (buffers.position_buffer.len() - 1) as u32
                    })
                })
                .collect();

            for i in 1..face_indices.len() - 1 {
                indices.extend_from_slice(&[face_indices[0], face_indices[i], face_indices[i + 1]]);
            }
        }

        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pos = &buffers.position_buffer;
            let face_normal = (pos[b] - pos[a]).cross(pos[c] - pos[a]);
            for index in [a, b, c] {
                if generated_normals[index] {
                    buffers.normals_buffer[index] += face_normal;
                }
            }
        }

        for (normal, generated) in buffers.normals_buffer.iter_mut().zip(&generated_normals) {
            if *generated {
                *normal = normal.normalize_or_zero();
            }
        }

        Mesh {
            vertex_buffers: buffers,
            index_buffer: indices,
        }
    }
}
