//! Speech synthesis through the `piper` executable in raw-output mode.
//!
//! Piper reads text on stdin and writes 16-bit mono PCM at the voice's sample
//! rate to stdout. The output is handed out in fixed-size chunks as it arrives.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::SynthesisError;
use crate::voice::Voice;

use super::types::{AudioChunk, AudioFormat, Synthesizer};

pub struct Piper {
    program: PathBuf,
    voice: Voice,
    chunk_bytes: usize,
}

impl Piper {
    pub fn new(program: impl Into<PathBuf>, voice: Voice, chunk_bytes: usize) -> Self {
        Self {
            program: program.into(),
            voice,
            chunk_bytes,
        }
    }

    fn format(&self) -> AudioFormat {
        AudioFormat {
            sample_rate: self.voice.sample_rate,
            ..AudioFormat::default()
        }
    }
}

impl Synthesizer for Piper {
    type Chunks = PiperChunks;

    fn synthesize(&self, text: &str) -> Result<PiperChunks, SynthesisError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--model")
            .arg(&self.voice.model_path)
            .arg("--config")
            .arg(&self.voice.config_path)
            .arg("--output_raw")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running synthesizer: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| SynthesisError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        let format = self.format();
        // Never split a frame across chunks.
        let frame = usize::from(format.sample_width) * usize::from(format.channels);
        let chunk_bytes = (self.chunk_bytes / frame).max(1) * frame;

        let (stdin, stdout) = (child.stdin.take(), child.stdout.take());
        let stderr = child.stderr.take().map(drain_stderr);
        let mut chunks = PiperChunks {
            child,
            stdout,
            stderr,
            format,
            chunk_bytes,
            finished: false,
        };

        let Some(mut stdin) = stdin else {
            return Err(io::Error::other("synthesizer stdin unavailable").into());
        };
        let written = stdin
            .write_all(text.as_bytes())
            .and_then(|()| stdin.write_all(b"\n"));
        drop(stdin);

        if let Err(e) = written {
            // The engine quit before reading its input.
            let (status, stderr) = chunks.reap()?;
            if !status.success() {
                return Err(SynthesisError::Failed { status, stderr });
            }
            return Err(e.into());
        }

        if chunks.stdout.is_none() {
            return Err(io::Error::other("synthesizer stdout unavailable").into());
        }
        Ok(chunks)
    }

    fn default_format(&self) -> AudioFormat {
        self.format()
    }
}

/// Collect stderr on a separate thread while stdout is being consumed.
fn drain_stderr(mut stderr: ChildStderr) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut diagnostics = String::new();
        stderr.read_to_string(&mut diagnostics)?;
        Ok(diagnostics)
    })
}

/// Single-pass stream of PCM chunks from one piper process.
pub struct PiperChunks {
    child: Child,
    stdout: Option<ChildStdout>,
    stderr: Option<JoinHandle<io::Result<String>>>,
    format: AudioFormat,
    chunk_bytes: usize,
    finished: bool,
}

impl PiperChunks {
    /// Close stdout, wait for the process and collect its diagnostics.
    fn reap(&mut self) -> Result<(ExitStatus, String), SynthesisError> {
        self.finished = true;
        self.stdout = None;

        let status = self.child.wait()?;
        let diagnostics = match self.stderr.take().map(JoinHandle::join) {
            Some(Ok(read)) => read?,
            Some(Err(_)) => {
                warn!("synthesizer stderr reader panicked");
                String::new()
            }
            None => String::new(),
        };
        Ok((status, diagnostics.trim().to_string()))
    }

    /// Reap the process once stdout is exhausted.
    fn finish(&mut self) -> Result<(), SynthesisError> {
        let (status, stderr) = self.reap()?;
        if !status.success() {
            return Err(SynthesisError::Failed { status, stderr });
        }
        Ok(())
    }
}

impl Iterator for PiperChunks {
    type Item = Result<AudioChunk, SynthesisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let stdout = self.stdout.as_mut()?;

        let mut payload = vec![0u8; self.chunk_bytes];
        let mut filled = 0;
        while filled < payload.len() {
            match stdout.read(&mut payload[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }

        if filled == 0 {
            return self.finish().err().map(Err);
        }

        payload.truncate(filled);
        Some(Ok(AudioChunk {
            format: self.format,
            payload,
        }))
    }
}

impl Drop for PiperChunks {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
