use std::fs;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::io::common::loader::RawAssetLoader;

/// Loads assets from a data folder on disk, e.g. `data/tracks/<track>/track.txt`.
pub struct FsLoader {
    data_folder: PathBuf,
}

impl FsLoader {
    pub fn new(data_folder: impl AsRef<Path>) -> Self {
        Self {
            data_folder: data_folder.as_ref().to_path_buf(),
        }
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.data_folder.clone(), |full, segment| full.join(segment))
    }
}

impl RawAssetLoader for FsLoader {
    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>> {
        let full_path = self.resolve(path);
        match fs::read(&full_path) {
            Ok(buf) => {
                trace!("Loaded {} ({} bytes)", full_path.display(), buf.len());
                Some(buf)
            }
            Err(err) => {
                warn!("Could not load {}: {}", full_path.display(), err);
                None
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}
