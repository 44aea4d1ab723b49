use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::tags::{TrackTags, read_tags};

/// A generated track as found on disk.
#[derive(Debug, Clone)]
pub struct ScannedTrack {
    pub path: PathBuf,
    pub file_name: String,
    pub tags: TrackTags,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// List the final files directly inside `album_dir`, sorted by file name, with
/// their tags. Files lofty cannot read are listed with empty tags.
pub fn scan_album(album_dir: &Path, final_extension: &str) -> Vec<ScannedTrack> {
    let mut tracks: Vec<ScannedTrack> = WalkDir::new(album_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && has_extension(e.path(), final_extension))
        .map(|e| ScannedTrack {
            path: e.path().to_path_buf(),
            file_name: e.file_name().to_string_lossy().into_owned(),
            tags: read_tags(e.path()).unwrap_or_default(),
        })
        .collect();

    tracks.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracks
}

/// Every regular file name directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
