use clap::Parser;

use crate::io::common::loader::join_path;

#[derive(Parser, Debug)]
#[command(name = "trackloader")]
#[command(version)]
#[command(about = "Loads a racing track step by step into a scene graph and a physics world")]
pub struct CliArgs {
    #[arg(long, env = "TRACKLOADER_DATA_DIR", default_value_t = default_data_dir())]
    pub data_dir: String,

    /// Name of the track directory below `tracks/`
    pub track: String,

    #[arg(long)]
    pub reverse: bool,

    /// Simulate massive objects instead of freezing them in place
    #[arg(long)]
    pub dynamic_objects: bool,

    /// The renderer draws dynamic shadows, baked shadow objects are skipped
    #[arg(long)]
    pub dynamic_shadows: bool,

    /// Merge static geometry sharing a texture (legacy object lists only)
    #[arg(long)]
    pub aggressive_combining: bool,

    #[arg(long, default_value_t = 0)]
    pub anisotropy: u32,

    /// Directory (relative to the data dir) holding the shared textures, e.g. the racing line
    #[arg(long, default_value = "textures")]
    pub texture_dir: String,

    /// Number of physics steps to run after loading
    #[arg(long, default_value_t = 0)]
    pub simulate_steps: u32,
}

pub fn default_data_dir() -> String {
    std::env::current_dir()
        .map(|dir| dir.join("data").to_string_lossy().to_string())
        .unwrap_or_else(|_| String::from("data"))
}

/// Everything that controls how a track is loaded. Paths are relative to the asset loader root.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSettings {
    /// e.g. `tracks/ring`
    pub track_path: String,
    pub texture_dir: String,
    pub anisotropy: u32,
    pub reverse: bool,
    pub dynamic_objects: bool,
    pub dynamic_shadows: bool,
    pub aggressive_combining: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            track_path: String::new(),
            texture_dir: String::from("textures"),
            anisotropy: 0,
            reverse: false,
            dynamic_objects: false,
            dynamic_shadows: false,
            aggressive_combining: false,
        }
    }
}

impl LoaderSettings {
    pub fn for_track(track_path: impl Into<String>) -> Self {
        Self {
            track_path: track_path.into(),
            ..Self::default()
        }
    }

    pub fn objects_dir(&self) -> String {
        join_path(&self.track_path, "objects")
    }
}

impl From<&CliArgs> for LoaderSettings {
    fn from(args: &CliArgs) -> Self {
        Self {
            track_path: join_path("tracks", &args.track),
            texture_dir: args.texture_dir.clone(),
            anisotropy: args.anisotropy,
            reverse: args.reverse,
            dynamic_objects: args.dynamic_objects,
            dynamic_shadows: args.dynamic_shadows,
            aggressive_combining: args.aggressive_combining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, LoaderSettings};
    use clap::Parser;

    #[test]
    fn cli_to_settings() {
        let args = CliArgs::parse_from([
            "trackloader",
            "--data-dir",
            "/srv/data",
            "--reverse",
            "--anisotropy",
            "4",
            "ring",
        ]);
        let settings = LoaderSettings::from(&args);

        assert_eq!(args.data_dir, "/srv/data");
        assert_eq!(settings.track_path, "tracks/ring");
        assert_eq!(settings.objects_dir(), "tracks/ring/objects");
        assert!(settings.reverse);
        assert!(!settings.dynamic_objects);
        assert_eq!(settings.anisotropy, 4);
    }
}
