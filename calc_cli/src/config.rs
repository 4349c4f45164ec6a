//! Settings file loading.
//!
//! Settings are TOML; every key is optional and falls back to the
//! calc_core defaults:
//!
//! ```toml
//! [display]
//! precision = 4
//! currency_precision = 2
//!
//! [combinatorics]
//! max_n = 50
//!
//! [cycle]
//! min_length_days = 20
//! max_length_days = 45
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use calc_core::Settings;
use tracing::info;

/// Load settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    let settings = parse_settings(&text)
        .with_context(|| format!("loading settings from {}", path.display()))?;

    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(text: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(text).context("parsing TOML")?;
    settings.validate()?;
    Ok(settings)
}
