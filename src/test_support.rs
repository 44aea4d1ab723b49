//! Fakes shared by unit tests: an in-memory synthesizer, a transcoder that
//! emits a tiny valid FLAC, and a helper building that FLAC.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PreflightError, SynthesisError, TranscodeError};
use crate::synth::{AudioChunk, AudioFormat, Synthesizer};
use crate::transcode::Transcoder;

/// A header-only FLAC stream: `fLaC` + a single STREAMINFO block
/// (22.05 kHz, mono, 16-bit, zero samples).
pub fn minimal_flac() -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();
    // Last metadata block, type STREAMINFO, 34 bytes long.
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]); // min/max block size 4096
    bytes.extend_from_slice(&[0x00; 6]); // min/max frame size unknown
    bytes.extend_from_slice(&[0x05, 0x62, 0x20, 0xf0, 0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x00; 16]); // MD5 of unencoded audio
    bytes
}

/// Produces `chunks_per_text` two-sample chunks per call, or fails on a given text.
pub struct FakeSynth {
    pub chunks_per_text: usize,
    pub fail_on: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSynth {
    pub fn new(chunks_per_text: usize) -> Self {
        Self {
            chunks_per_text,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Synthesizer for FakeSynth {
    type Chunks = std::vec::IntoIter<Result<AudioChunk, SynthesisError>>;

    fn synthesize(&self, text: &str) -> Result<Self::Chunks, SynthesisError> {
        self.calls.borrow_mut().push(text.to_string());
        if self.fail_on.as_deref() == Some(text) {
            return Err(SynthesisError::Io(std::io::Error::other("voice crashed")));
        }
        let chunks: Vec<_> = (0..self.chunks_per_text)
            .map(|i| {
                Ok(AudioChunk {
                    format: AudioFormat::default(),
                    payload: vec![i as u8, 0, 0, 1],
                })
            })
            .collect();
        Ok(chunks.into_iter())
    }
}

/// What `FakeTranscoder` writes for each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOutput {
    Flac,
    Garbage,
}

/// Records each call, checks the input exists, and writes `output` unless the
/// call number matches `fail_on_call` (1-based).
pub struct FakeTranscoder {
    pub available: bool,
    pub fail_on_call: Option<usize>,
    pub output: FakeOutput,
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_on_call: None,
            output: FakeOutput::Flac,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Transcoder for FakeTranscoder {
    fn preflight(&self) -> Result<(), PreflightError> {
        if self.available {
            Ok(())
        } else {
            Err(PreflightError::Missing {
                tool: "ffmpeg".to_string(),
                hint: "install ffmpeg".to_string(),
            })
        }
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), output.to_path_buf()));
        assert!(input.is_file(), "intermediate {} missing", input.display());

        if self.fail_on_call == Some(self.calls.borrow().len()) {
            return Err(TranscodeError::Failed {
                status: failed_status(),
                stderr: "Invalid data found when processing input".to_string(),
            });
        }
        let bytes = match self.output {
            FakeOutput::Flac => minimal_flac(),
            FakeOutput::Garbage => b"not flac".to_vec(),
        };
        fs::write(output, bytes).map_err(|source| TranscodeError::Spawn {
            program: "fake".to_string(),
            source,
        })
    }
}

#[cfg(unix)]
fn failed_status() -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(1 << 8)
}

#[cfg(windows)]
fn failed_status() -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(1)
}
