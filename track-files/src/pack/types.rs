use std::collections::HashMap;

pub const PACK_VERSION: &[u8; 8] = b"JPK01.00";

/// Location of one file within the pack data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub offset: u32,
    pub length: u32,
}

/// A whole pack file: the raw bytes plus the file table pointing into them.
#[derive(Debug, Default)]
pub struct PackAsset {
    pub(crate) data: Vec<u8>,
    pub(crate) entries: HashMap<String, PackEntry>,
}

impl PackAsset {
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        let entry = self.entries.get(name)?;
        let start = entry.offset as usize;
        self.data.get(start..start + entry.length as usize)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
