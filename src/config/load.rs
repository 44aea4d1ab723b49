use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `COLLECTION_GEN__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("COLLECTION_GEN")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject settings that would produce a broken or self-destructing run.
    pub fn validate(&self) -> Result<(), String> {
        let c = &self.collection;
        if c.artist.trim().is_empty() {
            return Err("collection.artist must not be empty".to_string());
        }
        if c.album.trim().is_empty() {
            return Err("collection.album must not be empty".to_string());
        }
        for (i, track) in c.tracks.iter().enumerate() {
            if track.title.trim().is_empty() {
                return Err(format!("collection.tracks[{i}].title must not be empty"));
            }
            if track.title.contains(['/', '\\']) {
                return Err(format!(
                    "collection.tracks[{i}].title must not contain path separators: {:?}",
                    track.title
                ));
            }
        }

        let e = &self.encoding;
        if e.intermediate_extension.trim().is_empty() || e.final_extension.trim().is_empty() {
            return Err("encoding extensions must not be empty".to_string());
        }
        if e.intermediate_extension.eq_ignore_ascii_case(&e.final_extension) {
            return Err(
                "encoding.intermediate_extension must differ from encoding.final_extension"
                    .to_string(),
            );
        }
        if e.codec.trim().is_empty() {
            return Err("encoding.codec must not be empty".to_string());
        }

        if self.voice.model.trim().is_empty() {
            return Err("voice.model must not be empty".to_string());
        }
        if self.voice.chunk_bytes == 0 {
            return Err("voice.chunk_bytes must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `COLLECTION_GEN_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("COLLECTION_GEN_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/collection-gen/config.toml`
/// or `~/.config/collection-gen/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("collection-gen").join("config.toml"))
}
