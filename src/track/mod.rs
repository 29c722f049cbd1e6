pub mod assets;
/// One object's drawable plus its collision shape and mass.
pub mod body;
/// Merges static legacy objects sharing a texture.
pub mod combiner;
pub mod loader;
pub mod object;
pub mod racing_line;
pub mod road;
/// Start grid and lap timing sectors, including track reversal.
pub mod start_lap;
pub mod source;
pub mod surface;
pub mod track_data;
