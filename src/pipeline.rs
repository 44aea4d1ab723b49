//! The per-track generation pipeline.

mod track;

pub use track::Pipeline;
