//! Operator-facing progress output.
//!
//! Progress and success lines go to `out` (stdout in the binary); every error
//! goes to `err` (stderr). Write failures on either stream are ignored.

use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

use crate::error::{GenerateError, PreflightError, TrackError, TranscodeError};

pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn removing_existing(&mut self, dir: &Path) {
        let _ = writeln!(self.out, "Removing existing collection at {}", dir.display());
    }

    pub fn header(&mut self, dir: &Path, voice_model: &str) {
        let _ = writeln!(self.out, "Generating collection in {}", dir.display());
        let _ = writeln!(self.out, "Using piper-tts with model: {voice_model}");
    }

    pub fn provisioning(&mut self, voice_model: &str) {
        let _ = writeln!(self.out, "Downloading voice model: {voice_model}");
    }

    pub fn loading_voice(&mut self, model_path: &Path) {
        let _ = writeln!(self.out, "Loading voice model: {}", model_path.display());
    }

    pub fn track_started(&mut self, number: usize, total: usize, title: &str) {
        let _ = writeln!(self.out, "Generating track {number}/{total}: {title}");
    }

    pub fn track_done(&mut self, file_name: &str) {
        let _ = writeln!(self.out, "  ✓ Generated {file_name}");
    }

    pub fn summary(&mut self, dir: &Path, total: usize) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "✓ Collection generated successfully in {}", dir.display());
        let _ = writeln!(self.out, "  Total tracks: {total}");
        let _ = self.out.flush();
    }

    /// Print a fatal error, plus any captured tool diagnostics.
    pub fn error(&mut self, error: &GenerateError) {
        let _ = match error {
            GenerateError::Track { number, source } => {
                writeln!(self.err, "Error processing track {number}: {source}")
            }
            other => writeln!(self.err, "Error: {other}"),
        };
        match error {
            GenerateError::Preflight(PreflightError::Missing { hint, .. }) if !hint.is_empty() => {
                let _ = writeln!(self.err, "{hint}");
            }
            GenerateError::Track {
                source: TrackError::Transcode(TranscodeError::Failed { stderr, .. }),
                ..
            } if !stderr.trim().is_empty() => {
                let _ = writeln!(self.err, "ffmpeg error: {}", stderr.trim_end());
            }
            _ => {}
        }
        let _ = self.err.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::process::ExitStatus;

    fn reporter() -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(Vec::new(), Vec::new())
    }

    fn streams(r: Reporter<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = r.into_inner();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn progress_goes_to_stdout_only() {
        let mut r = reporter();
        let dir = PathBuf::from("collection/The Announcers - First Test");
        r.header(&dir, "en_GB-alan-medium");
        r.loading_voice(Path::new(".voices/en_GB-alan-medium.onnx"));
        r.track_started(1, 2, "Duck");
        r.track_done("01. Duck.flac");
        r.summary(&dir, 2);

        let (out, err) = streams(r);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "Generating collection in collection/The Announcers - First Test\n\
             Using piper-tts with model: en_GB-alan-medium\n\
             Loading voice model: .voices/en_GB-alan-medium.onnx\n\
             Generating track 1/2: Duck\n  \
             ✓ Generated 01. Duck.flac\n\
             \n\
             ✓ Collection generated successfully in collection/The Announcers - First Test\n  \
             Total tracks: 2\n"
        );
    }

    #[test]
    fn preflight_error_includes_install_hint() {
        let mut r = reporter();
        r.error(&GenerateError::Preflight(PreflightError::Missing {
            tool: "ffmpeg".to_string(),
            hint: "Install it with: sudo apt-get install ffmpeg (or equivalent)".to_string(),
        }));

        let (out, err) = streams(r);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "Error: ffmpeg is not installed or not in PATH\n\
             Install it with: sudo apt-get install ffmpeg (or equivalent)\n"
        );
    }

    #[test]
    #[cfg(unix)]
    fn transcode_failure_surfaces_tool_stderr_with_track_number() {
        let mut r = reporter();
        r.error(&GenerateError::Track {
            number: 3,
            source: TrackError::Transcode(TranscodeError::Failed {
                status: exit_status(1),
                stderr: "Invalid data found when processing input\n".to_string(),
            }),
        });

        let (_, err) = streams(r);
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error processing track 3: transcoder exited with"));
        assert_eq!(lines[1], "ffmpeg error: Invalid data found when processing input");
    }
}
