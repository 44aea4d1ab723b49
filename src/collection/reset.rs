use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Outcome of `reset_dir`, so callers can report what happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reset {
    /// The directory did not exist and was created.
    Created,
    /// A previous directory was removed and recreated empty.
    Replaced,
}

/// Leave `dir` existing and empty: remove it recursively if present, then
/// recreate it along with any missing parents.
///
/// Not atomic: a failure between removal and creation leaves `dir` absent.
pub fn reset_dir(dir: &Path) -> io::Result<Reset> {
    let existed = match fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(dir)?;
            true
        }
        Ok(_) => {
            fs::remove_file(dir)?;
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e),
    };

    fs::create_dir_all(dir)?;
    debug!("collection directory ready at {}", dir.display());

    Ok(if existed { Reset::Replaced } else { Reset::Created })
}
