use crate::config;
use crate::error::GenerateError;

/// Load and validate settings. A broken config aborts the run rather than
/// silently generating a different collection.
pub fn load_settings() -> Result<config::Settings, GenerateError> {
    let settings =
        config::Settings::load().map_err(|e| GenerateError::Config(e.to_string()))?;
    settings.validate().map_err(GenerateError::Config)?;
    Ok(settings)
}
