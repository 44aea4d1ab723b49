//! Host environment checks run before anything touches the disk.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PreflightError;

/// Verify that `program` can be started and answers `probe_arg` successfully.
pub fn require_tool(program: &Path, probe_arg: &str, hint: &str) -> Result<(), PreflightError> {
    let missing = || PreflightError::Missing {
        tool: program.display().to_string(),
        hint: hint.to_string(),
    };

    let status = Command::new(program)
        .arg(probe_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| {
            debug!("spawning {} failed: {e}", program.display());
            missing()
        })?;

    if !status.success() {
        debug!("{} {probe_arg} exited with {status}", program.display());
        return Err(missing());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn missing_program_is_reported_with_hint() {
        let err = require_tool(
            Path::new("/nonexistent/definitely-not-ffmpeg"),
            "-version",
            "install it",
        )
        .unwrap_err();
        let PreflightError::Missing { tool, hint } = err;
        assert_eq!(tool, "/nonexistent/definitely-not-ffmpeg");
        assert_eq!(hint, "install it");
    }

    #[test]
    #[cfg(unix)]
    fn failing_probe_counts_as_missing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("broken-tool");
        fs::write(&script, "#!/bin/sh\nexit 3\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(require_tool(&script, "-version", "").is_err());
    }

    #[test]
    #[cfg(unix)]
    fn working_probe_passes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script: PathBuf = dir.path().join("fine-tool");
        fs::write(&script, "#!/bin/sh\necho version 1\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(require_tool(&script, "-version", "").is_ok());
    }
}
