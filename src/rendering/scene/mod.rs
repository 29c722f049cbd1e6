pub mod container;
pub mod drawable;
pub mod node;
