use anyhow::{Context, anyhow};
use log::trace;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::common::types::{Texture, TextureInfo};

pub struct TextureLoader {}

impl TextureLoader {
    /// Decodes any format the `image` crate was built with (png, jpeg, bmp) into RGBA8.
    pub fn load(
        loader: &dyn RawAssetLoader,
        path: &str,
        info: TextureInfo,
    ) -> Result<Texture, anyhow::Error> {
        let buf = loader
            .load_raw_owned(path)
            .ok_or_else(|| anyhow!("Texture {} not found", path))?;

        let image = image::load_from_memory(&buf)
            .with_context(|| format!("Decoding texture {}", path))?
            .into_rgba8();

        trace!("Loaded texture {} ({}x{})", path, image.width(), image.height());
        Ok(Texture {
            width: image.width(),
            height: image.height(),
            data: image.into_raw(),
            info,
        })
    }
}
