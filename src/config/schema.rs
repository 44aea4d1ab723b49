use std::path::PathBuf;

use serde::Deserialize;

/// Top-level generator settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/collection-gen/config.toml` or
/// `~/.config/collection-gen/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `COLLECTION_GEN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub collection: CollectionSettings,
    pub voice: VoiceSettings,
    pub tools: ToolSettings,
    pub encoding: EncodingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    /// Directory that receives the `<artist> - <album>` folder.
    pub root: PathBuf,
    pub artist: String,
    pub album: String,
    /// Written verbatim into the `date` tag.
    pub date: String,
    /// Tracks in album order; position decides the track number.
    pub tracks: Vec<TrackSetting>,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("collection"),
            artist: "The Announcers".to_string(),
            album: "First Test".to_string(),
            date: "2025".to_string(),
            tracks: default_tracks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackSetting {
    pub title: String,
    /// What the voice actually says.
    pub text: String,
}

fn default_tracks() -> Vec<TrackSetting> {
    [
        ("Duck", "One duck"),
        ("Hens", "Two hens"),
        ("Geese", "Three squawking geese"),
        ("Oysters", "Four limerick oysters"),
        ("Porpoises", "Five corpulent porpoises"),
        ("Tweezers", "Six pairs of Don Alverzo's tweezers"),
        (
            "Macedonians",
            "Seven thousand Macedonians in full battle array",
        ),
        (
            "Monkeys",
            "Eight brass monkeys from the ancient sacred crypts of Egypt",
        ),
        (
            "Men",
            "Nine apathetic, sympathetic, diabetic old men on roller skates, \
             with a marked propensity toward procrastination and sloth",
        ),
        (
            "Denizens",
            "Ten lyrical, spherical, diabolical denizens of the deep who all stall \
             around the corner of the quo of the quay of the quivery, all at the same time",
        ),
    ]
    .into_iter()
    .map(|(title, text)| TrackSetting {
        title: title.to_string(),
        text: text.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Piper voice identifier, `<lang>_<REGION>-<speaker>-<quality>`.
    pub model: String,
    /// Local cache for downloaded voice models.
    pub dir: PathBuf,
    /// Root of the voice repository the models are fetched from.
    pub base_url: String,
    /// Bytes of raw PCM handed to the pipeline per synthesized chunk.
    pub chunk_bytes: usize,
    /// Upper bound on one voice file download, in seconds. Unset means no
    /// limit; model files are tens of megabytes.
    pub download_timeout_secs: Option<u64>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            model: "en_GB-alan-medium".to_string(),
            dir: PathBuf::from(".voices"),
            base_url: "https://huggingface.co/rhasspy/piper-voices/resolve/v1.0.0".to_string(),
            chunk_bytes: 8192,
            download_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Transcoder executable (name on `PATH` or absolute path).
    pub ffmpeg: PathBuf,
    /// Speech synthesis executable.
    pub piper: PathBuf,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            piper: PathBuf::from("piper"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncodingSettings {
    /// Extension of the transient pre-encode file (without dot).
    pub intermediate_extension: String,
    /// Extension of the tagged output file (without dot).
    pub final_extension: String,
    /// Codec name handed to the transcoder.
    pub codec: String,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            intermediate_extension: "wav".to_string(),
            final_extension: "flac".to_string(),
            codec: "flac".to_string(),
        }
    }
}
