pub mod cache;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod text;
