//! Voice model provisioning.
//!
//! Voices are cached in a local directory as `<id>.onnx` plus
//! `<id>.onnx.json` and fetched from the voice repository only when missing.

mod provision;

pub use provision::*;
