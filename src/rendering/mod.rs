pub mod common;
pub mod importer;
pub mod loader;
/// The handle based scene graph the loader populates: nodes, draw lists and drawables.
pub mod scene;
