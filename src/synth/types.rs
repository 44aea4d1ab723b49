//! Audio chunk types shared by synthesizers and the WAV writer.

use crate::error::SynthesisError;

/// Sample layout of a chunk of raw PCM.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    /// Bytes per sample (1..=4), little-endian signed PCM.
    pub sample_width: u16,
}

impl Default for AudioFormat {
    /// Piper's native output: 22.05 kHz, mono, 16-bit.
    fn default() -> Self {
        Self {
            sample_rate: 22_050,
            channels: 1,
            sample_width: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub format: AudioFormat,
    pub payload: Vec<u8>,
}

/// Turns text into a stream of PCM chunks.
///
/// Each call yields a fresh, single-pass sequence. All chunks of one sequence
/// are expected to share the first chunk's format; callers rely on this
/// without checking it.
pub trait Synthesizer {
    type Chunks: Iterator<Item = Result<AudioChunk, SynthesisError>>;

    fn synthesize(&self, text: &str) -> Result<Self::Chunks, SynthesisError>;

    /// Format used when a sequence turns out to be empty.
    fn default_format(&self) -> AudioFormat {
        AudioFormat::default()
    }
}
