use std::collections::HashMap;

use log::{trace, warn};

use crate::io::common::loader::RawAssetLoader;

/// Keeps every asset in memory, keyed by its path. Handy for generated tracks and for tests.
#[derive(Default)]
pub struct MemoryLoader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl RawAssetLoader for MemoryLoader {
    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>> {
        let buf = self.files.get(path).cloned();
        match &buf {
            Some(data) => trace!("Loading {} ({} bytes) from memory", path, data.len()),
            None => warn!("Could not locate {}!", path),
        }
        buf
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
