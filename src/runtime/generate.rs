use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::catalog::Catalog;
use crate::collection::{file_names, reset_dir, scan_album};
use crate::config::Settings;
use crate::error::{GenerateError, VoiceError};
use crate::pipeline::Pipeline;
use crate::report::Reporter;
use crate::synth::Synthesizer;
use crate::transcode::Transcoder;

/// One full rebuild of the album directory.
///
/// Order is fixed: transcoder preflight, directory reset, voice provisioning,
/// then the track pipeline. `provision` is only called once the directory is
/// ready, and never when preflight fails.
pub fn generate<S, T, P, O, E>(
    settings: &Settings,
    catalog: &Catalog,
    transcoder: &T,
    provision: P,
    reporter: &mut Reporter<O, E>,
) -> Result<Vec<PathBuf>, GenerateError>
where
    S: Synthesizer,
    T: Transcoder,
    P: FnOnce(&mut Reporter<O, E>) -> Result<S, VoiceError>,
    O: Write,
    E: Write,
{
    transcoder.preflight()?;

    let album_dir = catalog.album_dir(&settings.collection.root);
    if album_dir.exists() {
        reporter.removing_existing(&album_dir);
    }
    let reset = reset_dir(&album_dir).map_err(|source| GenerateError::Directory {
        path: album_dir.clone(),
        source,
    })?;
    debug!(?reset, "album directory {}", album_dir.display());

    reporter.header(&album_dir, &settings.voice.model);
    reporter.provisioning(&settings.voice.model);
    let synthesizer = provision(reporter)?;
    if catalog.is_empty() {
        debug!("catalog has no tracks, album directory stays empty");
    }

    let pipeline = Pipeline {
        catalog,
        album_dir: &album_dir,
        encoding: &settings.encoding,
        synthesizer: &synthesizer,
        transcoder,
    };
    let produced = pipeline.run(reporter)?;

    for track in scan_album(&album_dir, &settings.encoding.final_extension) {
        debug!(file = %track.file_name, tags = ?track.tags, "wrote {}", track.path.display());
    }
    debug!(files = ?file_names(&album_dir), "album directory contents");

    reporter.summary(&album_dir, catalog.len());
    Ok(produced)
}
