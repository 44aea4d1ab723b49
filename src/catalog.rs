//! The album to generate: fixed metadata plus the ordered track list.
//!
//! A `Catalog` is built once from `Settings` at startup and passed down to the
//! pipeline; nothing downstream reads configuration directly.

use std::path::{Path, PathBuf};

use crate::config::CollectionSettings;

/// One entry of the catalog. Its position decides the track number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub title: String,
    pub spoken_text: String,
}

/// Metadata shared by every track of the album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumMetadata {
    pub artist: String,
    pub album: String,
    pub release_date: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub album: AlbumMetadata,
    pub tracks: Vec<TrackDescriptor>,
}

impl Catalog {
    pub fn from_settings(settings: &CollectionSettings) -> Self {
        Self {
            album: AlbumMetadata {
                artist: settings.artist.clone(),
                album: settings.album.clone(),
                release_date: settings.date.clone(),
            },
            tracks: settings
                .tracks
                .iter()
                .map(|t| TrackDescriptor {
                    title: t.title.clone(),
                    spoken_text: t.text.clone(),
                })
                .collect(),
        }
    }

    /// `<root>/<artist> - <album>`
    pub fn album_dir(&self, root: &Path) -> PathBuf {
        root.join(format!("{} - {}", self.album.artist, self.album.album))
    }

    /// Tracks paired with their 1-based number, in album order.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &TrackDescriptor)> {
        self.tracks.iter().enumerate().map(|(i, t)| (i + 1, t))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// File name of a track: `NN. <title>.<extension>`, `NN` zero-padded.
pub fn track_file_name(number: usize, title: &str, extension: &str) -> String {
    format!("{number:02}. {title}.{extension}")
}
