pub mod asset_cache;

use crate::content::asset_cache::AssetCache;
use crate::rendering::common::types::{Model, Texture};

/// Deduplicates loaded assets by path. Only weak references are kept: an asset stays shared as
/// long as some track (or caller) still holds it.
#[derive(Default)]
pub struct ContentCache {
    pub models: AssetCache<Model>,
    pub textures: AssetCache<Texture>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops entries whose assets are gone.
    pub fn sweep(&self) {
        self.models.sweep();
        self.textures.sweep();
    }
}
