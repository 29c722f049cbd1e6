use anyhow::{Context, anyhow};
use log::trace;
use track_files::obj::reader::ObjReader;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::common::types::Model;
use crate::rendering::importer::model_importer::ModelImporter;

pub struct ModelLoader {}

impl ModelLoader {
    pub fn load(loader: &dyn RawAssetLoader, path: &str) -> Result<Model, anyhow::Error> {
        let buf = loader
            .load_raw_owned(path)
            .ok_or_else(|| anyhow!("Model {} not found", path))?;

        let asset = ObjReader::parse_asset(buf.as_slice())
            .with_context(|| format!("Parsing model {}", path))?;

        let mesh = ModelImporter::create_mesh(&asset);
        trace!("Loaded model {}: {:?}", path, mesh);
        Ok(Model::new(mesh))
    }
}
