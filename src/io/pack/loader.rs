use std::sync::Arc;

use log::{trace, warn};
use track_files::pack::reader::PackReader;
use track_files::pack::types::PackAsset;

use crate::io::common::loader::RawAssetLoader;

/// Serves the files of an object pack under the directory the pack was found in, so
/// `<mount_dir>/wall.obj` resolves to the pack entry `wall.obj`.
#[derive(Clone)]
pub struct PackLoader {
    mount_dir: String,
    pack: Arc<PackAsset>,
}

impl PackLoader {
    pub fn new(mount_dir: impl Into<String>, pack: PackAsset) -> Self {
        Self {
            mount_dir: mount_dir.into().trim_end_matches('/').to_string(),
            pack: Arc::new(pack),
        }
    }

    /// Reads the pack at `path` through `loader` and mounts it at `mount_dir`. `Ok(None)` if
    /// there is no such pack.
    pub fn open(
        loader: &dyn RawAssetLoader,
        path: &str,
        mount_dir: &str,
    ) -> Result<Option<Self>, anyhow::Error> {
        if !loader.exists(path) {
            return Ok(None);
        }
        let Some(buf) = loader.load_raw_owned(path) else {
            return Ok(None);
        };
        let pack = PackReader::parse_asset(buf)?;
        Ok(Some(Self::new(mount_dir, pack)))
    }

    pub fn len(&self) -> usize {
        self.pack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pack.is_empty()
    }

    fn entry_name<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.mount_dir.is_empty() {
            return Some(path);
        }
        path.strip_prefix(self.mount_dir.as_str())?.strip_prefix('/')
    }
}

impl RawAssetLoader for PackLoader {
    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>> {
        let data = self.entry_name(path).and_then(|name| self.pack.file(name));
        match data {
            Some(data) => {
                trace!("Loading {} ({} bytes) from pack", path, data.len());
                Some(data.to_vec())
            }
            None => {
                warn!("Could not locate {} in pack!", path);
                None
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.entry_name(path)
            .is_some_and(|name| self.pack.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::PackLoader;
    use crate::io::common::loader::RawAssetLoader;
    use crate::io::memory::loader::MemoryLoader;

    fn pack_bytes(name: &str, data: &[u8]) -> Vec<u8> {
        let mut bytes = b"JPK01.00".to_vec();
        bytes.extend(1u32.to_le_bytes());
        bytes.extend(16u32.to_le_bytes());
        bytes.extend(40u32.to_le_bytes());
        bytes.extend((data.len() as u32).to_le_bytes());
        let mut padded = name.as_bytes().to_vec();
        padded.resize(16, 0);
        bytes.extend(padded);
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn resolves_paths_below_the_mount_dir() -> Result<(), anyhow::Error> {
        let mut files = MemoryLoader::new();
        files.insert("tracks/ring/objects/objects.jpk", pack_bytes("wall.obj", b"v 0 0 0\n"));

        let pack = PackLoader::open(&files, "tracks/ring/objects/objects.jpk", "tracks/ring/objects/")?
            .ok_or_else(|| anyhow::anyhow!("pack not found"))?;
        assert_eq!(pack.len(), 1);
        assert!(pack.exists("tracks/ring/objects/wall.obj"));
        assert!(!pack.exists("wall.obj"));
        assert!(!pack.exists("tracks/ring/objects/fence.obj"));
        assert!(!pack.exists("tracks/ring/objectswall.obj"));
        assert_eq!(
            pack.load_raw_owned("tracks/ring/objects/wall.obj"),
            Some(b"v 0 0 0\n".to_vec())
        );
        assert!(pack.load_raw_owned("tracks/ring/objects/fence.obj").is_none());
        Ok(())
    }

    #[test]
    fn missing_and_corrupt_packs() {
        let mut files = MemoryLoader::new();
        assert!(matches!(PackLoader::open(&files, "objects.jpk", ""), Ok(None)));

        files.insert("objects.jpk", b"JPK02.00".to_vec());
        assert!(PackLoader::open(&files, "objects.jpk", "").is_err());
    }
}
