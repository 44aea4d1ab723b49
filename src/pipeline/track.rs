use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::{Catalog, TrackDescriptor, track_file_name};
use crate::config::EncodingSettings;
use crate::error::{GenerateError, TrackError};
use crate::report::Reporter;
use crate::synth::{Synthesizer, write_wav};
use crate::tags::{TrackTags, write_tags};
use crate::transcode::Transcoder;

/// Runs every catalog entry through synthesize → materialize → encode →
/// cleanup → tag, in order, stopping at the first failure.
pub struct Pipeline<'a, S, T> {
    pub catalog: &'a Catalog,
    pub album_dir: &'a Path,
    pub encoding: &'a EncodingSettings,
    pub synthesizer: &'a S,
    pub transcoder: &'a T,
}

impl<S: Synthesizer, T: Transcoder> Pipeline<'_, S, T> {
    /// Generate all tracks; returns the final file paths in album order.
    ///
    /// Tracks finished before a failure stay on disk.
    pub fn run<O: Write, E: Write>(
        &self,
        reporter: &mut Reporter<O, E>,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let total = self.catalog.len();
        let mut produced = Vec::with_capacity(total);

        for (number, track) in self.catalog.numbered() {
            reporter.track_started(number, total, &track.title);
            let path = self
                .generate_track(number, track)
                .map_err(|source| GenerateError::Track { number, source })?;
            let file_name = track_file_name(number, &track.title, &self.encoding.final_extension);
            reporter.track_done(&file_name);
            produced.push(path);
        }
        Ok(produced)
    }

    fn path_for(&self, number: usize, title: &str, extension: &str) -> PathBuf {
        self.album_dir.join(track_file_name(number, title, extension))
    }

    fn generate_track(&self, number: usize, track: &TrackDescriptor) -> Result<PathBuf, TrackError> {
        let started = Instant::now();
        let intermediate = self.path_for(number, &track.title, &self.encoding.intermediate_extension);
        let output = self.path_for(number, &track.title, &self.encoding.final_extension);

        let chunks = self.synthesizer.synthesize(&track.spoken_text)?;
        let bytes = write_wav(&intermediate, chunks, self.synthesizer.default_format())?;
        debug!(track = number, bytes, "synthesized {}", intermediate.display());

        self.transcoder.transcode(&intermediate, &output)?;
        debug!(track = number, "encoded {}", output.display());

        fs::remove_file(&intermediate).map_err(|source| TrackError::Cleanup {
            path: intermediate.clone(),
            source,
        })?;

        let tags = TrackTags::for_track(&self.catalog.album, &track.title, number);
        write_tags(&output, &tags).map_err(|source| TrackError::Tag {
            path: output.clone(),
            source,
        })?;

        info!(
            track = number,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated {}",
            output.display()
        );
        Ok(output)
    }
}
