use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::VoiceError;

/// Parsed form of `en_GB-alan-medium`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceId {
    pub name: String,
    /// `en_GB`
    pub language: String,
    pub speaker: String,
    pub quality: String,
}

impl VoiceId {
    pub fn parse(name: &str) -> Result<Self, VoiceError> {
        let invalid = || VoiceError::InvalidId(name.to_string());

        let mut parts = name.split('-');
        let (Some(language), Some(speaker), Some(quality), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if [language, speaker, quality].iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        // The language code must look like `<family>_<REGION>`.
        match language.split_once('_') {
            Some((family, region)) if !family.is_empty() && !region.is_empty() => {}
            _ => return Err(invalid()),
        }

        Ok(Self {
            name: name.to_string(),
            language: language.to_string(),
            speaker: speaker.to_string(),
            quality: quality.to_string(),
        })
    }

    /// `en` for `en_GB`.
    pub fn family(&self) -> &str {
        self.language
            .split_once('_')
            .map_or(self.language.as_str(), |(family, _)| family)
    }

    pub fn model_file(&self) -> String {
        format!("{}.onnx", self.name)
    }

    pub fn config_file(&self) -> String {
        format!("{}.onnx.json", self.name)
    }

    /// `<base>/<family>/<language>/<speaker>/<quality>/<file>`
    pub fn url(&self, base_url: &str, file: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.family(),
            self.language,
            self.speaker,
            self.quality,
            file
        )
    }
}

/// A voice whose model and config are present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: VoiceId,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub sample_rate: u32,
}

#[derive(Deserialize)]
struct VoiceConfig {
    audio: VoiceAudio,
}

#[derive(Deserialize)]
struct VoiceAudio {
    sample_rate: u32,
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Local cache of downloaded voices.
pub struct VoiceStore {
    dir: PathBuf,
    base_url: String,
    download_timeout: Option<Duration>,
}

impl VoiceStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
            download_timeout: None,
        }
    }

    /// Bound each download's total time, body included. Without this a
    /// download may take as long as the link needs.
    pub fn with_download_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Make `name` available locally, downloading whatever is missing.
    pub fn provision(&self, name: &str) -> Result<Voice, VoiceError> {
        let id = VoiceId::parse(name)?;
        fs::create_dir_all(&self.dir)?;

        let model_path = self.dir.join(id.model_file());
        let config_path = self.dir.join(id.config_file());

        let missing: Vec<(String, &PathBuf)> =
            [(id.model_file(), &model_path), (id.config_file(), &config_path)]
                .into_iter()
                .filter(|(_, path)| {
                    let cached = path.is_file();
                    if cached {
                        debug!("voice file cached at {}", path.display());
                    }
                    !cached
                })
                .collect();

        if !missing.is_empty() {
            let client = reqwest::blocking::Client::builder()
                .user_agent(concat!("collection-gen/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(self.download_timeout)
                .build()
                .map_err(|source| VoiceError::Http {
                    url: self.base_url.clone(),
                    source,
                })?;
            for (file, path) in missing {
                download(&client, &id.url(&self.base_url, &file), path)?;
            }
        }

        if !model_path.is_file() {
            return Err(VoiceError::NotFound(model_path));
        }
        let sample_rate = read_sample_rate(&config_path)?;

        Ok(Voice {
            id,
            model_path,
            config_path,
            sample_rate,
        })
    }
}

fn read_sample_rate(config_path: &Path) -> Result<u32, VoiceError> {
    let raw = fs::read(config_path)?;
    let config: VoiceConfig = serde_json::from_slice(&raw).map_err(|source| VoiceError::Config {
        path: config_path.to_path_buf(),
        source,
    })?;
    Ok(config.audio.sample_rate)
}

/// Fetch `url` into `dest` through a `.part` file so an interrupted download
/// never looks cached.
fn download(client: &reqwest::blocking::Client, url: &str, dest: &Path) -> Result<(), VoiceError> {
    info!("Downloading {url}");
    let http_err = |source| VoiceError::Http {
        url: url.to_string(),
        source,
    };

    let mut response = client.get(url).send().map_err(http_err)?;
    if !response.status().is_success() {
        return Err(VoiceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let mut part = dest.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let mut file = fs::File::create(&part)?;
    let copied = match response.copy_to(&mut file) {
        Ok(n) => n,
        Err(source) => {
            drop(file);
            let _ = fs::remove_file(&part);
            return Err(http_err(source));
        }
    };
    file.sync_all()?;
    drop(file);

    fs::rename(&part, dest).map_err(|e| {
        let _ = fs::remove_file(&part);
        io::Error::new(e.kind(), format!("moving {} into place: {e}", part.display()))
    })?;
    debug!("downloaded {copied} bytes to {}", dest.display());
    Ok(())
}
