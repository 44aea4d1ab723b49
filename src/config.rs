//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that describes the collection to
//! generate (album metadata, tracks, voice, tools) and helpers to load it
//! from disk and the environment.

mod load;
mod schema;

pub use schema::*;
