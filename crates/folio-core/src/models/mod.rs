//! Data models for the photo capture pipeline

mod field;
mod image;

pub use field::*;
pub use image::*;
