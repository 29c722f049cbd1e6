/// Turns IR meshes and authored shape descriptions into rapier shapes and colliders.
pub mod collider_factory;
/// Graphics transform of a simulated body, synchronised after every physics step.
pub mod motion_state;
pub mod physics_simulator;
pub mod shape_description;
