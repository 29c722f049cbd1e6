use std::fmt::{Debug, Formatter};

use anyhow::Context;
use glam::Vec3;
use log::{debug, warn};
use rapier3d::dynamics::MassProperties;
use rapier3d::geometry::SharedShape;
use track_files::config::types::ConfigTree;

use crate::physics::collider_factory::ColliderFactory;
use crate::physics::shape_description::ShapeDescription;
use crate::rendering::common::types::Model;
use crate::rendering::scene::drawable::Drawable;
use crate::rendering::scene::node::DrawListKind;
use crate::track::assets::TrackAssets;

/// Bodies lighter than this are static scenery.
pub const STATIC_MASS_EPSILON: f32 = 1e-3;

/// Track wide flags that influence how bodies are built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyOptions {
    pub cull: bool,
    pub vertical_tracking_skyboxes: bool,
    pub dynamic_shadows: bool,
    pub num_surfaces: usize,
}

/// A drawable plus, for collidable bodies, its collision shape and mass.
#[derive(Clone)]
pub struct Body {
    pub drawable: Drawable,
    pub drawlist: DrawListKind,
    pub shape: Option<SharedShape>,
    pub mass: f32,
    pub mass_properties: Option<MassProperties>,
    /// local mass centre
    pub center: Vec3,
    pub surface: usize,
    pub nolighting: bool,
    pub collidable: bool,
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ drawable: {:?}, drawlist: {:?}, ", self.drawable, self.drawlist)?;
        write!(f, "shape: {:?}, ", self.shape.as_ref().map(|s| s.shape_type()))?;
        write!(f, "mass: {}, center: {}, surface: {}, ", self.mass, self.center, self.surface)?;
        write!(f, "nolighting: {}, collidable: {} }}", self.nolighting, self.collidable)
    }
}

impl Body {
    pub fn is_static(&self) -> bool {
        self.mass < STATIC_MASS_EPSILON
    }

    /// Builds a body from its configuration. `rel_path` is prepended to every asset name (the
    /// directory of an external body file). `Ok(None)` means the body is intentionally skipped,
    /// errors are missing or broken assets.
    pub fn load(
        assets: &TrackAssets,
        cfg: &ConfigTree,
        rel_path: &str,
        options: &BodyOptions,
    ) -> Result<Option<Body>, anyhow::Error> {
        let isashadow = cfg.get_or("isashadow", false);
        if isashadow && options.dynamic_shadows {
            debug!("Skipping shadow body, shadows are rendered dynamically");
            return Ok(None);
        }

        let model_name = cfg.get::<String>("model").context("Body without model")?;
        let mut texture_names = cfg
            .get::<Vec<String>>("texture")
            .context("Body without texture")?;
        texture_names.resize(3, String::new());

        let clampuv = cfg.get_or::<i32>("clampuv", 0);
        let mipmap = cfg.get_or("mipmap", true);
        let skybox = cfg.get_or("skybox", false);
        let alphablend = cfg.get_or("alphablend", false);
        let doublesided = cfg.get_or("doublesided", false);
        let nolighting = cfg.get_or("nolighting", false);

        let model = assets.load_model(&format!("{}{}", rel_path, model_name))?;

        let mut body = Body {
            drawable: Drawable::new(model.clone()),
            drawlist: DrawListKind::select(skybox, alphablend, nolighting),
            shape: None,
            mass: 0.0,
            mass_properties: None,
            center: Vec3::ZERO,
            surface: 0,
            nolighting,
            collidable: false,
        };

        // a body takes part in the physics as soon as it declares a mass
        if let Some(mass) = cfg.get::<f32>("mass") {
            body.mass = mass;
            body.collidable = true;
            body.load_shape(cfg, &model, options)?;
        }

        let mut info = assets.texture_info(mipmap, clampuv);
        body.drawable.diffuse = Some(assets.load_texture(&format!("{}{}", rel_path, texture_names[0]), info)?);
        if !texture_names[1].is_empty() {
            body.drawable.misc1 = Some(assets.load_texture(&format!("{}{}", rel_path, texture_names[1]), info)?);
        }
        if !texture_names[2].is_empty() {
            info.normalmap = true;
            body.drawable.misc2 = Some(assets.load_texture(&format!("{}{}", rel_path, texture_names[2]), info)?);
        }

        body.drawable.decal = alphablend;
        body.drawable.cull = options.cull && !doublesided;
        body.drawable.skybox = skybox;
        body.drawable.vertical_track = skybox && options.vertical_tracking_skyboxes;

        Ok(Some(body))
    }

    fn load_shape(&mut self, cfg: &ConfigTree, model: &Model, options: &BodyOptions) -> Result<(), anyhow::Error> {
        if self.is_static() {
            let surface = cfg.get_or::<i32>("surface", 0);
            self.surface = match usize::try_from(surface) {
                Ok(surface) if surface < options.num_surfaces => surface,
                _ => {
                    warn!("Surface {} does not exist, using surface 0", surface);
                    0
                }
            };
            self.shape = Some(ColliderFactory::trimesh_shape(model.mesh())?);
            return Ok(());
        }

        let mut center = cfg.get::<[f32; 3]>("mass-center").map(Vec3::from).unwrap_or(Vec3::ZERO);
        let shapes = ShapeDescription::read_all(cfg)?;
        let shape = match ColliderFactory::authored_shape(&shapes, -center) {
            Some(shape) => shape,
            None => {
                // the bounding box is centred on the body origin, move the mass centre instead
                center += model.center();
                ColliderFactory::bounding_box_shape(model)
            }
        };

        self.mass_properties = Some(ColliderFactory::mass_properties(&shape, self.mass));
        self.shape = Some(shape);
        self.center = center;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, BodyOptions};
    use crate::content::ContentCache;
    use crate::io::memory::loader::MemoryLoader;
    use crate::rendering::scene::node::DrawListKind;
    use crate::track::assets::TrackAssets;
    use glam::Vec3;
    use std::io::Cursor;
    use track_files::config::reader::ConfigReader;

    const OPTIONS: BodyOptions = BodyOptions {
        cull: true,
        vertical_tracking_skyboxes: true,
        dynamic_shadows: false,
        num_surfaces: 2,
    };

    fn png() -> Vec<u8> {
        let mut buf = Vec::new();
        image::RgbaImage::new(2, 2)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        buf
    }

    fn loader() -> MemoryLoader {
        let mut loader = MemoryLoader::new();
        loader.insert(
            "objects/crate.obj",
            "v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nv 0 0 2\nf 1 2 3 4\nf 1 2 5\n",
        );
        loader.insert("objects/crate.png", png());
        loader.insert("objects/crate-normal.png", png());
        loader
    }

    fn assets<'a>(loader: &'a MemoryLoader, content: &'a ContentCache) -> TrackAssets<'a> {
        TrackAssets {
            loader,
            content,
            pack: None,
            objects_dir: "objects".to_string(),
            anisotropy: 0,
        }
    }

    #[test_log::test]
    fn static_body_has_trimesh() -> Result<(), anyhow::Error> {
        let (loader, content) = (loader(), ContentCache::new());
        let cfg = ConfigReader::parse_bytes(b"model = crate.obj\ntexture = crate.png, , crate-normal.png\nmass = 0\nsurface = 1\ndoublesided = 1\n")?;
        let body = Body::load(&assets(&loader, &content), &cfg, "", &OPTIONS)?.expect("not skipped");

        assert!(body.is_static() && body.collidable);
        assert_eq!(body.surface, 1);
        assert!(body.shape.as_ref().is_some_and(|s| s.as_trimesh().is_some()));
        assert!(!body.drawable.cull);
        assert!(body.drawable.misc1.is_none());
        assert!(body.drawable.misc2.as_ref().is_some_and(|t| t.info.normalmap));
        assert_eq!(body.drawlist, DrawListKind::NormalNoBlend);
        Ok(())
    }

    #[test_log::test]
    fn massless_body_is_not_collidable() -> Result<(), anyhow::Error> {
        let (loader, content) = (loader(), ContentCache::new());
        let cfg = ConfigReader::parse_bytes(b"model = crate.obj\ntexture = crate.png\nskybox = 1\nalphablend = 1\n")?;
        let body = Body::load(&assets(&loader, &content), &cfg, "", &OPTIONS)?.expect("not skipped");

        assert!(!body.collidable);
        assert!(body.shape.is_none());
        assert_eq!(body.drawlist, DrawListKind::SkyboxBlend);
        assert!(body.drawable.vertical_track && body.drawable.decal);
        Ok(())
    }

    #[test_log::test]
    fn massive_body_falls_back_to_bounding_box() -> Result<(), anyhow::Error> {
        let (loader, content) = (loader(), ContentCache::new());
        let cfg = ConfigReader::parse_bytes(b"model = crate.obj\ntexture = crate.png\nmass = 20\nmass-center = 0, 0, 0.5\n")?;
        let body = Body::load(&assets(&loader, &content), &cfg, "", &OPTIONS)?.expect("not skipped");

        assert!(!body.is_static());
        assert!(body.shape.as_ref().is_some_and(|s| s.as_cuboid().is_some()));
        assert!(body.center.abs_diff_eq(Vec3::new(1.0, 1.0, 1.5), 1e-5));
        assert!(body.mass_properties.is_some_and(|p| (p.mass() - 20.0).abs() < 1e-3));
        Ok(())
    }

    #[test_log::test]
    fn shadows_and_missing_assets() -> Result<(), anyhow::Error> {
        let (loader, content) = (loader(), ContentCache::new());
        let shadow = ConfigReader::parse_bytes(b"model = crate.obj\ntexture = crate.png\nisashadow = 1\n")?;
        let dynamic_shadows = BodyOptions {
            dynamic_shadows: true,
            ..OPTIONS
        };
        assert!(Body::load(&assets(&loader, &content), &shadow, "", &dynamic_shadows)?.is_none());
        assert!(Body::load(&assets(&loader, &content), &shadow, "", &OPTIONS)?.is_some());

        let missing = ConfigReader::parse_bytes(b"model = nothing.obj\ntexture = crate.png\n")?;
        assert!(Body::load(&assets(&loader, &content), &missing, "", &OPTIONS).is_err());
        Ok(())
    }
}
