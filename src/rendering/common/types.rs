use std::fmt::{Debug, Formatter};

use glam::{Vec2, Vec3};

#[derive(Clone, Default)]
pub struct Mesh {
    pub vertex_buffers: VertexBuffers,
    pub index_buffer: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.index_buffer.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.index_buffer.is_empty()
    }

    /// The index buffer grouped into triangles, as the physics engine wants it.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        assert_eq!(
            self.index_buffer.len() % 3,
            0,
            "Index buffer is not made of triangles"
        );

        self.index_buffer
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect()
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ vertex_buffers: {:?}, ", self.vertex_buffers)?;
        write!(f, "index_buffer: [{}] }}", self.index_buffer.len())
    }
}

#[derive(Clone, Default)]
pub struct VertexBuffers {
    pub position_buffer: Vec<Vec3>,
    pub normals_buffer: Vec<Vec3>,
    pub texcoord_buffer_0: Vec<Vec2>,
}

impl VertexBuffers {
    pub fn len(&self) -> usize {
        self.position_buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_buffer.is_empty()
    }
}

impl Debug for VertexBuffers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ position_buffer: [{}], ", self.position_buffer.len())?;
        write!(f, "normals_buffer: [{}], ", self.normals_buffer.len())?;
        write!(f, "texcoord_buffer_0: [{}] }}", self.texcoord_buffer_0.len())
    }
}

/// Bounds of a mesh, needed for culling and for the fallback collision box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshMetrics {
    pub min: Vec3,
    pub max: Vec3,
    pub radius: f32,
}

impl MeshMetrics {
    pub fn from_positions(positions: &[Vec3]) -> Self {
        if positions.is_empty() {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
                radius: 0.0,
            };
        }

        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), &pos| (min.min(pos), max.max(pos)),
        );

        Self {
            min,
            max,
            // a tiny margin, so flat meshes never end up with a zero radius
            radius: (max - min).length() * 0.5 + 0.001,
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.max + self.min) * 0.5
    }
}

/// A mesh plus its (lazily generated) metrics. Replacing or appending geometry invalidates the
/// metrics, see [`Model::generate_mesh_metrics`].
#[derive(Clone, Default)]
pub struct Model {
    mesh: Mesh,
    metrics: Option<MeshMetrics>,
}

impl Model {
    pub fn new(mesh: Mesh) -> Self {
        let mut model = Self { mesh, metrics: None };
        model.generate_mesh_metrics();
        model
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
        self.metrics = None;
    }

    /// Appends the geometry of `other`, offsetting its indices.
    pub fn append(&mut self, other: &Mesh) {
        crate::rendering::common::mesh_merger::MeshMerger::append_mesh(&mut self.mesh, other);
        self.metrics = None;
    }

    pub fn generate_mesh_metrics(&mut self) {
        self.metrics = Some(MeshMetrics::from_positions(
            &self.mesh.vertex_buffers.position_buffer,
        ));
    }

    pub fn have_mesh_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn metrics(&self) -> Option<&MeshMetrics> {
        self.metrics.as_ref()
    }

    pub fn size(&self) -> Vec3 {
        self.metrics.map(|m| m.size()).unwrap_or(Vec3::ZERO)
    }

    pub fn center(&self) -> Vec3 {
        self.metrics.map(|m| m.center()).unwrap_or(Vec3::ZERO)
    }

    pub fn radius(&self) -> f32 {
        self.metrics.map(|m| m.radius).unwrap_or(0.0)
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ mesh: {:?}, metrics: {:?} }}", self.mesh, self.metrics)
    }
}

/// How a texture is sampled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureInfo {
    pub mipmap: bool,
    pub anisotropy: u32,
    pub repeatu: bool,
    pub repeatv: bool,
    pub normalmap: bool,
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self {
            mipmap: true,
            anisotropy: 0,
            repeatu: true,
            repeatv: true,
            normalmap: false,
        }
    }
}

impl TextureInfo {
    /// Content cache key of the texture at `path` sampled with these settings.
    pub fn cache_key(&self, path: &str) -> String {
        format!(
            "{}?mip={}&aniso={}&wrap={}{}&normal={}",
            path,
            self.mipmap as u8,
            self.anisotropy,
            self.repeatu as u8,
            self.repeatv as u8,
            self.normalmap as u8
        )
    }
}

/// Decoded RGBA8 pixels.
#[derive(Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub info: TextureInfo,
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ width: {}, height: {}, data: [{}], info: {:?} }}",
            self.width,
            self.height,
            self.data.len(),
            self.info
        )
    }
}
