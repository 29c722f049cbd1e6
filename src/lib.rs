pub mod content;
pub mod io;
pub mod physics;
pub mod rendering;
pub mod settings;
pub mod track;

pub use track::loader::{LoadPhase, LoadProgress, TrackLoader};
pub use track::track_data::TrackData;
