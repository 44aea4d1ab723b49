//! Speech synthesis: the `Synthesizer` seam, the piper-backed implementation
//! and materialization of a chunk stream into a WAV file.

mod piper;
mod types;
mod wav;

pub use piper::Piper;
pub use types::*;
pub use wav::write_wav;
