pub mod geometry;
pub mod recognizer;
pub mod stroke2d;
