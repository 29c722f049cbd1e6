use std::sync::Arc;

use glam::Vec3;

use crate::rendering::common::types::{Model, Texture};

/// Everything a renderer needs to draw one model.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub model: Arc<Model>,
    pub diffuse: Option<Arc<Texture>>,
    pub misc1: Option<Arc<Texture>>,
    /// normal map
    pub misc2: Option<Arc<Texture>>,
    /// alpha blended
    pub decal: bool,
    pub cull: bool,
    pub radius: f32,
    pub object_center: Vec3,
    pub skybox: bool,
    pub vertical_track: bool,
}

impl Drawable {
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            radius: model.radius(),
            object_center: model.center(),
            model,
            diffuse: None,
            misc1: None,
            misc2: None,
            decal: false,
            cull: false,
            skybox: false,
            vertical_track: false,
        }
    }
}
