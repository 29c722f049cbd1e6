use std::sync::Arc;

use anyhow::Context;

use crate::content::ContentCache;
use crate::io::common::loader::{RawAssetLoader, join_path};
use crate::io::pack::loader::PackLoader;
use crate::rendering::common::types::{Model, Texture, TextureInfo};
use crate::rendering::loader::model_loader::ModelLoader;
use crate::rendering::loader::texture_loader::TextureLoader;

/// Loads the models and textures of one track's object directory through the content cache.
#[derive(Clone)]
pub struct TrackAssets<'a> {
    pub loader: &'a dyn RawAssetLoader,
    pub content: &'a ContentCache,
    /// Models are looked up here first, then in the object directory.
    pub pack: Option<PackLoader>,
    pub objects_dir: String,
    pub anisotropy: u32,
}

impl<'a> TrackAssets<'a> {
    pub fn path(&self, name: &str) -> String {
        join_path(&self.objects_dir, name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.loader.exists(&self.path(name))
    }

    fn model_loader(&self, path: &str) -> &dyn RawAssetLoader {
        match &self.pack {
            Some(pack) if pack.exists(path) => pack as &dyn RawAssetLoader,
            _ => self.loader,
        }
    }

    pub fn load_model(&self, name: &str) -> Result<Arc<Model>, anyhow::Error> {
        let path = self.path(name);
        self.content
            .models
            .get_or_try_load(&path, |path| ModelLoader::load(self.model_loader(path), path))
            .with_context(|| format!("Loading model {}", name))
    }

    pub fn load_texture(&self, name: &str, info: TextureInfo) -> Result<Arc<Texture>, anyhow::Error> {
        self.load_texture_at(&self.path(name), info)
    }

    /// Loads a texture from outside of the object directory. The same file sampled differently
    /// is cached separately.
    pub fn load_texture_at(&self, path: &str, info: TextureInfo) -> Result<Arc<Texture>, anyhow::Error> {
        self.content
            .textures
            .get_or_try_load(&info.cache_key(path), |_| TextureLoader::load(self.loader, path, info))
            .with_context(|| format!("Loading texture {}", path))
    }

    /// Sampling for object textures: mipmapping is forced on with anisotropic filtering. Clamp
    /// mode 1 clamps both axes, 2 only U and 3 only V.
    pub fn texture_info(&self, mipmap: bool, clamp: i32) -> TextureInfo {
        TextureInfo {
            mipmap: mipmap || self.anisotropy > 0,
            anisotropy: self.anisotropy,
            repeatu: clamp != 1 && clamp != 2,
            repeatv: clamp != 1 && clamp != 3,
            normalmap: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrackAssets;
    use crate::content::ContentCache;
    use crate::io::memory::loader::MemoryLoader;
    use crate::rendering::common::types::TextureInfo;
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn clamp_modes() {
        let loader = MemoryLoader::new();
        let content = ContentCache::new();
        let assets = TrackAssets {
            loader: &loader,
            content: &content,
            pack: None,
            objects_dir: "tracks/ring/objects".to_string(),
            anisotropy: 0,
        };

        let wrap = assets.texture_info(true, 0);
        assert!(wrap.repeatu && wrap.repeatv);
        let both = assets.texture_info(true, 1);
        assert!(!both.repeatu && !both.repeatv);
        let u_only = assets.texture_info(false, 2);
        assert!(!u_only.repeatu && u_only.repeatv && !u_only.mipmap);
        let v_only = assets.texture_info(true, 3);
        assert!(v_only.repeatu && !v_only.repeatv);

        let anisotropic = TrackAssets { anisotropy: 8, ..assets };
        assert!(anisotropic.texture_info(false, 0).mipmap);
    }

    #[test]
    fn models_are_shared() -> Result<(), anyhow::Error> {
        let mut loader = MemoryLoader::new();
        loader.insert("tracks/ring/objects/wall.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let content = ContentCache::new();
        let assets = TrackAssets {
            loader: &loader,
            content: &content,
            pack: None,
            objects_dir: "tracks/ring/objects".to_string(),
            anisotropy: 0,
        };

        let first = assets.load_model("wall.obj")?;
        let second = assets.load_model("wall.obj")?;
        assert!(Arc::ptr_eq(&first, &second));
        assert!(assets.load_model("missing.obj").is_err());
        Ok(())
    }

    #[test]
    fn textures_are_cached_per_sampling() -> Result<(), anyhow::Error> {
        let mut png = Vec::new();
        image::RgbaImage::new(2, 2).write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
        let mut loader = MemoryLoader::new();
        loader.insert("tracks/ring/objects/wall.png", png);
        let content = ContentCache::new();
        let assets = TrackAssets {
            loader: &loader,
            content: &content,
            pack: None,
            objects_dir: "tracks/ring/objects".to_string(),
            anisotropy: 0,
        };

        let diffuse = assets.load_texture("wall.png", TextureInfo::default())?;
        let normal_info = TextureInfo {
            normalmap: true,
            ..TextureInfo::default()
        };
        let normal = assets.load_texture("wall.png", normal_info)?;
        assert!(!Arc::ptr_eq(&diffuse, &normal));
        assert!(!diffuse.info.normalmap);
        assert!(normal.info.normalmap);

        let again = assets.load_texture("wall.png", TextureInfo::default())?;
        assert!(Arc::ptr_eq(&diffuse, &again));
        Ok(())
    }
}
