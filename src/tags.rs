//! Tag writing and reading with `lofty`.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::{ItemKey, Tag};

use crate::catalog::AlbumMetadata;

/// The five fields written into every generated track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub date: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<String>,
}

impl TrackTags {
    pub fn for_track(album: &AlbumMetadata, title: &str, number: usize) -> Self {
        Self {
            artist: Some(album.artist.clone()),
            album: Some(album.album.clone()),
            date: Some(album.release_date.clone()),
            title: Some(title.to_string()),
            track_number: Some(number.to_string()),
        }
    }

    fn entries(&self) -> [(ItemKey, Option<&String>); 5] {
        [
            (ItemKey::TrackArtist, self.artist.as_ref()),
            (ItemKey::AlbumTitle, self.album.as_ref()),
            (ItemKey::RecordingDate, self.date.as_ref()),
            (ItemKey::TrackTitle, self.title.as_ref()),
            (ItemKey::TrackNumber, self.track_number.as_ref()),
        ]
    }
}

/// Set the given fields on the file's primary tag (creating it if needed) and save.
pub fn write_tags(path: &Path, tags: &TrackTags) -> Result<(), LoftyError> {
    let mut tagged = lofty::read_from_path(path)?;

    let mut tag = tagged
        .primary_tag()
        .cloned()
        .unwrap_or_else(|| Tag::new(tagged.primary_tag_type()));

    for (key, value) in tags.entries() {
        if let Some(value) = value {
            tag.insert_text(key, value.clone());
        }
    }

    // Replaces the existing tag of the same type.
    tagged.insert_tag(tag);
    tagged.save_to_path(path, WriteOptions::default())
}

/// Read back the fields `write_tags` manages from the primary (or first) tag.
pub fn read_tags(path: &Path) -> Result<TrackTags, LoftyError> {
    let tagged = lofty::read_from_path(path)?;
    let mut read = TrackTags::default();

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(read);
    };

    for item in tag.items() {
        let Some(text) = item.value().text() else {
            continue;
        };
        let slot = match item.key() {
            ItemKey::TrackArtist => &mut read.artist,
            ItemKey::AlbumTitle => &mut read.album,
            ItemKey::RecordingDate => &mut read.date,
            ItemKey::TrackTitle => &mut read.title,
            ItemKey::TrackNumber => &mut read.track_number,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(text.to_string());
        }
    }
    Ok(read)
}
