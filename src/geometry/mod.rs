pub mod geometry_objects;
pub mod geometry_operations;
