use std::sync::Arc;

use track_files::legacy::types::ObjectRecord;

use crate::rendering::common::types::Model;

/// One object of a legacy object list, with its model resolved.
#[derive(Debug, Clone)]
pub struct Object {
    pub model: Arc<Model>,
    pub texture: String,
    pub mipmap: bool,
    pub nolighting: bool,
    pub skybox: bool,
    /// 0: opaque, 1: alpha blended, 2: opaque but double sided
    pub transparent_blend: i32,
    pub collideable: bool,
    pub clamp_texture: i32,
    pub surface: i32,
    /// The model was found in the content cache, so nothing needs to be merged into it.
    pub cached: bool,
}

impl Object {
    pub fn new(record: ObjectRecord, model: Arc<Model>) -> Self {
        Self {
            model,
            texture: record.texture,
            mipmap: record.mipmap,
            nolighting: record.nolighting,
            skybox: record.skybox,
            transparent_blend: record.transparent_blend,
            collideable: record.collideable,
            clamp_texture: record.clamp_texture,
            surface: record.surface,
            cached: false,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent_blend == 1
    }

    pub fn is_double_sided(&self) -> bool {
        self.transparent_blend == 2
    }

    /// Only plain opaque scenery without collision is merged with other objects, a merged entry
    /// has a single collideable flag and surface.
    pub fn is_combinable(&self) -> bool {
        !self.skybox && !self.is_transparent() && !self.collideable
    }

    /// `<stem>-misc1.png` / `<stem>-misc2.png` next to the diffuse texture.
    pub fn misc_texture_name(&self, index: u32) -> String {
        let stem = self
            .texture
            .char_indices()
            .nth_back(3)
            .map(|(pos, _)| &self.texture[..pos])
            .unwrap_or("");
        format!("{}-misc{}.png", stem, index)
    }
}

#[cfg(test)]
mod tests {
    use super::Object;
    use crate::rendering::common::types::Model;
    use std::sync::Arc;
    use track_files::legacy::types::ObjectRecord;

    #[test]
    fn misc_names_replace_the_extension() {
        let record = ObjectRecord {
            model: "fence.obj".to_string(),
            texture: "fence.png".to_string(),
            ..ObjectRecord::default()
        };
        let object = Object::new(record, Arc::new(Model::default()));
        assert_eq!(object.misc_texture_name(1), "fence-misc1.png");
        assert_eq!(object.misc_texture_name(2), "fence-misc2.png");

        let short = Object {
            texture: "a".to_string(),
            ..object
        };
        assert_eq!(short.misc_texture_name(1), "-misc1.png");
    }

    #[test]
    fn only_plain_scenery_is_combinable() {
        let scenery = Object::new(ObjectRecord::default(), Arc::new(Model::default()));
        assert!(scenery.is_combinable());

        let wall = Object {
            collideable: true,
            ..scenery.clone()
        };
        assert!(!wall.is_combinable());

        let glass = Object {
            transparent_blend: 1,
            ..scenery.clone()
        };
        assert!(!glass.is_combinable());

        let sky = Object { skybox: true, ..scenery };
        assert!(!sky.is_combinable());
    }
}
