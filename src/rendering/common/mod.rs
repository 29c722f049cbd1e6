/// Track assets are authored in a different frame than the one the world is simulated in, this
/// module converts between both. The world convention is right handed, Z up, driving direction +X.
pub mod coordinate_systems;
pub mod mesh_merger;
/// basic types (e.g. mesh) to abstract away from both the asset format and the consumers (scene graph, physics).
pub mod types;
