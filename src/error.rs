//! Error types for each stage of a run.
//!
//! Every variant is fatal: the runtime reports it and exits non-zero.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("{tool} is not installed or not in PATH")]
    Missing { tool: String, hint: String },
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("invalid voice identifier {0:?}, expected <lang>_<REGION>-<speaker>-<quality>")]
    InvalidId(String),
    #[error("failed to download {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to download {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("voice model not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid voice config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("speech synthesis exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// Non-zero exit; `stderr` holds the transcoder's diagnostics.
    #[error("transcoder exited with {status}")]
    Failed { status: ExitStatus, stderr: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error("failed to write intermediate audio {}: {source}", .path.display())]
    Materialize {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
    #[error("failed to remove intermediate audio {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to tag {}: {source}", .path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Preflight(#[from] PreflightError),
    #[error("failed to prepare collection directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to provision voice: {0}")]
    Voice(#[from] VoiceError),
    #[error("error processing track {number}: {source}")]
    Track {
        number: usize,
        #[source]
        source: TrackError,
    },
}
