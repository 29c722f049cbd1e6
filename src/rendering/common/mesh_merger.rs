use crate::rendering::common::types::{Mesh, VertexBuffers};
use glam::{Quat, Vec3};
use log::warn;

pub enum MeshMerger {}

impl MeshMerger {
    /// Appends `source` to `target` by concatenating the vertex buffers and offsetting the
    /// appended indices by the previous vertex count.
    pub fn append_mesh(target: &mut Mesh, source: &Mesh) {
        let base_index = target.vertex_buffers.position_buffer.len() as u32;

        target
            .vertex_buffers
            .position_buffer
            .extend_from_slice(&source.vertex_buffers.position_buffer);
        target
            .vertex_buffers
            .normals_buffer
            .extend_from_slice(&source.vertex_buffers.normals_buffer);
        target
            .vertex_buffers
            .texcoord_buffer_0
            .extend_from_slice(&source.vertex_buffers.texcoord_buffer_0);

        target
            .index_buffer
            .extend(source.index_buffer.iter().map(|&index| index + base_index));
    }

    /// Merge multiple meshes by combining the vertex buffers and counting up the index buffers.
    pub fn merge_meshes_vertices_only(input_meshes: &[Mesh]) -> Mesh {
        let mut merged_mesh = Mesh {
            vertex_buffers: VertexBuffers::default(),
            index_buffer: Vec::with_capacity(input_meshes.iter().map(|m| m.index_buffer.len()).sum()),
        };

        if input_meshes.is_empty() {
            warn!("Merging 0 meshes");
            return merged_mesh;
        }

        for mesh in input_meshes {
            Self::append_mesh(&mut merged_mesh, mesh);
        }

        merged_mesh
    }

    /// Bakes a rotation and translation into the vertex data, used for static geometry that is
    /// inserted pre-transformed.
    pub fn mesh_transform(mesh: &mut Mesh, rotation: Quat, translation: Vec3) {
        for pos in &mut mesh.vertex_buffers.position_buffer {
            *pos = rotation * *pos + translation;
        }

        for normal in &mut mesh.vertex_buffers.normals_buffer {
            *normal = rotation * *normal;
        }
    }

    pub fn mesh_scale_position(mesh: &mut Mesh, scale: Vec3) {
        for pos in &mut mesh.vertex_buffers.position_buffer {
            *pos *= scale;
        }
    }
}
