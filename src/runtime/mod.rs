use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info};

use crate::catalog::Catalog;
use crate::error::{GenerateError, VoiceError};
use crate::report::Reporter;
use crate::synth::Piper;
use crate::transcode::Ffmpeg;
use crate::voice::VoiceStore;

mod generate;
mod settings;


pub use generate::generate;

pub fn run() -> ExitCode {
    let mut reporter = Reporter::stdio();
    match execute(&mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("run aborted: {e}");
            reporter.error(&e);
            ExitCode::FAILURE
        }
    }
}

fn execute<O: Write, E: Write>(reporter: &mut Reporter<O, E>) -> Result<(), GenerateError> {
    let settings = settings::load_settings()?;
    let catalog = Catalog::from_settings(&settings.collection);
    let ffmpeg = Ffmpeg::new(&settings.tools.ffmpeg, &settings.encoding.codec);

    let provision = |reporter: &mut Reporter<O, E>| -> Result<Piper, VoiceError> {
        let store = VoiceStore::new(&settings.voice.dir, &settings.voice.base_url)
            .with_download_timeout(settings.voice.download_timeout_secs.map(Duration::from_secs));
        let voice = store.provision(&settings.voice.model)?;
        info!(voice = %voice.id.name, sample_rate = voice.sample_rate, "voice ready");
        reporter.loading_voice(&voice.model_path);
        Ok(Piper::new(&settings.tools.piper, voice, settings.voice.chunk_bytes))
    };

    generate(&settings, &catalog, &ffmpeg, provision, reporter)?;
    Ok(())
}
