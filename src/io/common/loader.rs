/// Byte level access to track assets. Paths are `/` separated and relative to whatever root the
/// implementation was created for.
pub trait RawAssetLoader {
    /// in case of a caching implementation, this may need to clone the whole buffer!
    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>>;

    fn exists(&self, path: &str) -> bool;
}

/// Joins an asset directory and a name, tolerating empty directories and stray separators.
pub fn join_path(directory: &str, name: &str) -> String {
    let directory = directory.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", directory, name)
    }
}

/// The directory part of a path including the trailing separator, `""` for bare names.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::{join_path, parent_dir};

    #[test]
    fn joins_paths() {
        assert_eq!(join_path("tracks/ring/objects", "a.obj"), "tracks/ring/objects/a.obj");
        assert_eq!(join_path("tracks/ring/objects/", "/a.obj"), "tracks/ring/objects/a.obj");
        assert_eq!(join_path("", "a.obj"), "a.obj");
    }

    #[test]
    fn parent_dirs() {
        assert_eq!(parent_dir("trees/oak/body.txt"), "trees/oak/");
        assert_eq!(parent_dir("body.txt"), "");
    }
}
