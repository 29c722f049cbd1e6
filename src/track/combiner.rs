use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::content::ContentCache;
use crate::io::common::loader::join_path;
use crate::track::object::Object;

/// Merges static, non-collideable legacy objects that share a texture into one model, so every
/// texture ends up as a single drawable.
#[derive(Debug, Default)]
pub struct StaticCombiner {
    entries: BTreeMap<String, Object>,
}

impl StaticCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first object of a texture opens the entry. If the content cache already knows a
    /// combined model for that texture (from an earlier load) it is taken as is and later objects
    /// are not merged into it.
    pub fn add(&mut self, mut object: Object, content: &ContentCache, objects_dir: &str) {
        if let Some(entry) = self.entries.get_mut(&object.texture) {
            if !entry.cached {
                trace!("Combining another object into {}", object.texture);
                Arc::make_mut(&mut entry.model).append(object.model.mesh());
            }
            return;
        }

        if let Some(model) = content.models.get(&join_path(objects_dir, &object.texture)) {
            debug!("Using the cached combined model for {}", object.texture);
            object.model = model;
            object.cached = true;
        }

        self.entries.insert(object.texture.clone(), object);
    }

    /// Takes the next entry in texture order, finalised: merged geometry gets fresh mesh metrics
    /// and is registered in the content cache under `<objects dir>/<texture>`.
    pub fn pop(&mut self, content: &ContentCache, objects_dir: &str) -> Option<Object> {
        let (texture, mut object) = self.entries.pop_first()?;

        if !object.cached && !object.model.have_mesh_metrics() {
            Arc::make_mut(&mut object.model).generate_mesh_metrics();
            content
                .models
                .insert(join_path(objects_dir, &texture), &object.model);
        }

        Some(object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
