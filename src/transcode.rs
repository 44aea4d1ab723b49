//! Encoding of the intermediate WAV into the final container via `ffmpeg`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{PreflightError, TranscodeError};
use crate::preflight::require_tool;

pub const FFMPEG_INSTALL_HINT: &str = "Install it with: sudo apt-get install ffmpeg (or equivalent)";

/// Converts one audio file into another container/codec.
pub trait Transcoder {
    /// Fails when the underlying tool cannot be used on this host.
    fn preflight(&self) -> Result<(), PreflightError>;

    /// Encode `input` into `output`, replacing `output` if it already exists.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
    codec: String,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>, codec: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            codec: codec.into(),
        }
    }
}

impl Transcoder for Ffmpeg {
    fn preflight(&self) -> Result<(), PreflightError> {
        require_tool(&self.program, "-version", FFMPEG_INSTALL_HINT)
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-i")
            .arg(input)
            .arg("-c:a")
            .arg(&self.codec)
            .arg("-y")
            .arg(output)
            .stdin(Stdio::null());

        debug!("Running transcoder: {:?}", cmd);

        let out = cmd.output().map_err(|source| TranscodeError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !out.status.success() {
            return Err(TranscodeError::Failed {
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(())
    }
}
